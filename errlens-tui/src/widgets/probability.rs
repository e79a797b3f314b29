//! Horizontal probability bars for a classification result.

use crate::theme::hex_color;
use errlens_core::{format_percentage, ChartBar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Width of the label column, enough for the longest category name.
const LABEL_WIDTH: u16 = 24;

pub struct ProbabilityChart<'a> {
    pub title: &'a str,
    pub bars: &'a [ChartBar],
    pub label_style: Style,
    pub fallback_color: Color,
}

impl ProbabilityChart<'_> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title(self.title).borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let visible = self.bars.len().min(usize::from(inner.height));
        if visible == 0 {
            return;
        }

        let mut constraints = vec![Constraint::Length(1); visible];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (bar, row) in self.bars.iter().zip(rows.iter()) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
                .split(*row);

            f.render_widget(
                Paragraph::new(bar.label.as_str()).style(self.label_style),
                cols[0],
            );

            let color = hex_color(&bar.color).unwrap_or(self.fallback_color);
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color))
                .ratio(bar_ratio(bar.percentage))
                .label(format_percentage(bar.percentage));
            f.render_widget(gauge, cols[1]);
        }
    }
}

/// Gauge fill for a percentage, clamped into `0.0..=1.0`.
pub fn bar_ratio(percentage: f64) -> f64 {
    if percentage.is_finite() {
        (percentage / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
