//! Classification result panel.

use crate::state::App;
use crate::theme::headline_color;
use crate::widgets::ProbabilityChart;
use errlens_core::{
    description_of, display_label, format_confidence, project,
    ClassificationResponse, WorkflowPhase,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    match app.last_result() {
        Some(result) => render_result(f, app, result, area),
        None => {
            let message = match app.phase() {
                WorkflowPhase::Loading => "Waiting for the classifier...",
                WorkflowPhase::Failed => "No result. Fix the input and classify again.",
                _ => "Edit the tool call, then press Ctrl+S to classify.",
            };
            let placeholder = Paragraph::new(message)
                .style(Style::default().fg(app.theme.text_dim))
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Result").borders(Borders::ALL));
            f.render_widget(placeholder, area);
        }
    }
}

fn render_result(f: &mut Frame<'_>, app: &App, result: &ClassificationResponse, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let headline = headline_color(result, &app.theme);
    let lines = vec![
        Line::from(Span::styled(
            display_label(&result.label),
            Style::default().fg(headline).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            description_of(&result.label),
            Style::default().fg(app.theme.text_dim),
        )),
        Line::from(vec![
            Span::raw("Confidence: "),
            Span::styled(
                format_confidence(result.confidence),
                Style::default().fg(app.theme.primary),
            ),
            Span::raw(format!("   Processed in {:.2} ms", result.processing_time_ms)),
        ]),
    ];
    let summary = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Result").borders(Borders::ALL));
    f.render_widget(summary, chunks[0]);

    let bars = project(result);
    let chart = ProbabilityChart {
        title: "Probabilities",
        bars: &bars,
        label_style: Style::default().fg(app.theme.text),
        fallback_color: app.theme.text_dim,
    };
    chart.render(f, chunks[1]);
}
