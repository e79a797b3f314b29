//! Reusable widget components.

pub mod probability;
pub mod status;

pub use probability::ProbabilityChart;
pub use status::StatusIndicator;
