//! View rendering.

pub mod examples;
pub mod input;
pub mod result;

use crate::notifications::NotificationLevel;
use crate::state::{App, ExamplesSource};
use crate::widgets::StatusIndicator;
use crate::theme::phase_color;
use chrono::{Duration, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HELP: &str = "Ctrl+S/F5 classify • F1-F4 examples • Ctrl+R health • Esc quit";

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(example_panel_height(app))])
        .split(columns[0]);
    input::render(f, app, left[0]);
    examples::render(f, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);
    let status = StatusIndicator {
        phase: app.phase(),
        detail: app.controller.last_error(),
        style: Style::default().fg(phase_color(app.phase(), &app.theme)),
    };
    status.render(f, right[0]);
    result::render(f, app, right[1]);

    render_footer(f, app, layout[2]);
}

fn example_panel_height(app: &App) -> u16 {
    u16::try_from(app.examples.len()).unwrap_or(u16::MAX).saturating_add(2).min(10)
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let source = match app.examples_source {
        ExamplesSource::BuiltIn => "built-in examples",
        ExamplesSource::Remote => "service examples",
    };
    let title = format!(
        "ERRLENS | {} | {} | {}",
        app.config.api_base_url,
        app.health.summary(),
        source
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let fresh = app
        .notifications
        .last()
        .filter(|note| note.is_fresh(Utc::now(), Duration::seconds(5)));
    let (text, style) = match fresh {
        Some(note) => {
            let color = match note.level {
                NotificationLevel::Info => app.theme.info,
                NotificationLevel::Warning => app.theme.warning,
                NotificationLevel::Error => app.theme.error,
                NotificationLevel::Success => app.theme.success,
            };
            (
                format!("{}: {}", note.level.label(), note.message),
                Style::default().fg(color),
            )
        }
        None => (HELP.to_string(), Style::default().fg(app.theme.text_dim)),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
