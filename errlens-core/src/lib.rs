//! errlens Core - Classification Contract and Workflow
//!
//! Data types for the tool-call classification contract, the static label and
//! example tables, the chart projection, and the per-session workflow state
//! machine. No network code lives here; the HTTP client implements
//! [`Classifier`] in `errlens-client`.

pub mod catalog;
pub mod error;
pub mod labels;
pub mod projection;
pub mod traits;
pub mod types;
pub mod workflow;

pub use catalog::built_in_examples;
pub use error::{ClassifyError, ClassifyResult};
pub use labels::{color_of, description_of, ErrorCategory, DEFAULT_LABEL_COLOR, UNKNOWN_LABEL_DESCRIPTION};
pub use projection::{
    display_label, format_confidence, format_percentage, primary_color, project, ChartBar,
};
pub use traits::Classifier;
pub use types::{
    ClassificationRequest, ClassificationResponse, ExampleEntry, ExamplesEnvelope, HealthStatus,
    Probabilities, Tool, ToolInvocationAttempt, ToolParameterSchema,
};
pub use workflow::{
    ClassifyStart, Completion, PendingClassification, Ticket, WorkflowController, WorkflowPhase,
    WorkflowState, FALLBACK_ERROR_MESSAGE,
};
