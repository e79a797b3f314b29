//! Workflow status indicator.

use errlens_core::WorkflowPhase;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct StatusIndicator<'a> {
    pub phase: WorkflowPhase,
    pub detail: Option<&'a str>,
    pub style: Style,
}

impl StatusIndicator<'_> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(
            phase_label(self.phase),
            self.style.add_modifier(Modifier::BOLD),
        )];
        if let Some(detail) = self.detail {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(detail.to_string(), self.style));
        }
        let paragraph = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

pub fn phase_label(phase: WorkflowPhase) -> &'static str {
    match phase {
        WorkflowPhase::Idle => "READY",
        WorkflowPhase::Loading => "CLASSIFYING...",
        WorkflowPhase::Success => "DONE",
        WorkflowPhase::Failed => "ERROR",
    }
}
