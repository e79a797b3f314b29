//! SynthBrute theme and color utilities.

use errlens_core::{color_of, primary_color, ClassificationResponse, WorkflowPhase};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

/// Parse `#RRGGBB` into a terminal color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Terminal color for a category label, via the shared label table.
pub fn label_color(label: &str, theme: &SynthBruteTheme) -> Color {
    hex_color(color_of(label)).unwrap_or(theme.text_dim)
}

/// Headline color for a result. An unparseable service token falls back to
/// the label table.
pub fn headline_color(response: &ClassificationResponse, theme: &SynthBruteTheme) -> Color {
    hex_color(primary_color(response)).unwrap_or_else(|| label_color(&response.label, theme))
}

/// Editor border for the current phase.
pub fn editor_border_color(phase: WorkflowPhase, theme: &SynthBruteTheme) -> Color {
    match phase {
        WorkflowPhase::Loading => theme.warning,
        WorkflowPhase::Failed => theme.error,
        WorkflowPhase::Idle | WorkflowPhase::Success => theme.border_focus,
    }
}

pub fn phase_color(phase: WorkflowPhase, theme: &SynthBruteTheme) -> Color {
    match phase {
        WorkflowPhase::Idle => theme.primary_dim,
        WorkflowPhase::Loading => theme.warning,
        WorkflowPhase::Success => theme.success,
        WorkflowPhase::Failed => theme.error,
    }
}
