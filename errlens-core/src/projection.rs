//! Projection of a classification response into chart-ready bars.

use crate::labels::color_of;
use crate::types::ClassificationResponse;
use serde::Serialize;

/// One bar of the probability breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub percentage: f64,
    pub color: String,
}

/// Build the breakdown series, highest percentage first.
///
/// Colors always come from the local label table so the same category has
/// the same color across responses. Equal percentages keep wire order.
pub fn project(response: &ClassificationResponse) -> Vec<ChartBar> {
    let mut bars: Vec<ChartBar> = response
        .all_probabilities
        .iter()
        .map(|(label, probability)| ChartBar {
            label: display_label(label),
            percentage: probability * 100.0,
            color: color_of(label).to_string(),
        })
        .collect();
    // sort_by is stable
    bars.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    bars
}

/// Headline color: the service's choice when it sent one.
pub fn primary_color(response: &ClassificationResponse) -> &str {
    if response.category_color.trim().is_empty() {
        color_of(&response.label)
    } else {
        &response.category_color
    }
}

/// `Incorrect_Function_Name` → `Incorrect Function Name`.
pub fn display_label(label: &str) -> String {
    label.replace('_', " ")
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// Headline confidence, one decimal: `0.87` → `87.0%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
