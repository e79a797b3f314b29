//! Label color and description table for the eight error categories.

use serde::{Deserialize, Serialize};

/// Neutral gray used for labels the table does not know.
pub const DEFAULT_LABEL_COLOR: &str = "#6B7280";

/// Description used for labels the table does not know.
pub const UNKNOWN_LABEL_DESCRIPTION: &str = "Unknown error type";

/// The eight categories the classifier is trained on.
///
/// Responses carry the label as an open string; use [`ErrorCategory::from_label`]
/// to recover the typed category when there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    #[serde(rename = "Correct")]
    Correct,
    #[serde(rename = "No_Tool_Available")]
    NoToolAvailable,
    #[serde(rename = "Incorrect_Function_Name")]
    IncorrectFunctionName,
    #[serde(rename = "Incorrect_Argument_Name")]
    IncorrectArgumentName,
    #[serde(rename = "Incorrect_Argument_Value")]
    IncorrectArgumentValue,
    #[serde(rename = "Incorrect_Argument_Type")]
    IncorrectArgumentType,
    #[serde(rename = "Wrong_Tool")]
    WrongTool,
    #[serde(rename = "Wrong_Syntax")]
    WrongSyntax,
}

impl ErrorCategory {
    pub fn all() -> &'static [ErrorCategory] {
        &[
            ErrorCategory::Correct,
            ErrorCategory::NoToolAvailable,
            ErrorCategory::IncorrectFunctionName,
            ErrorCategory::IncorrectArgumentName,
            ErrorCategory::IncorrectArgumentValue,
            ErrorCategory::IncorrectArgumentType,
            ErrorCategory::WrongTool,
            ErrorCategory::WrongSyntax,
        ]
    }

    /// Wire label, e.g. `Incorrect_Function_Name`.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Correct => "Correct",
            ErrorCategory::NoToolAvailable => "No_Tool_Available",
            ErrorCategory::IncorrectFunctionName => "Incorrect_Function_Name",
            ErrorCategory::IncorrectArgumentName => "Incorrect_Argument_Name",
            ErrorCategory::IncorrectArgumentValue => "Incorrect_Argument_Value",
            ErrorCategory::IncorrectArgumentType => "Incorrect_Argument_Type",
            ErrorCategory::WrongTool => "Wrong_Tool",
            ErrorCategory::WrongSyntax => "Wrong_Syntax",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.label() == label)
    }

    pub fn color(&self) -> &'static str {
        match self {
            ErrorCategory::Correct => "#10B981",
            ErrorCategory::NoToolAvailable => "#F59E0B",
            ErrorCategory::IncorrectFunctionName => "#EF4444",
            ErrorCategory::IncorrectArgumentName => "#EC4899",
            ErrorCategory::IncorrectArgumentValue => "#8B5CF6",
            ErrorCategory::IncorrectArgumentType => "#3B82F6",
            ErrorCategory::WrongTool => "#F97316",
            ErrorCategory::WrongSyntax => "#DC2626",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Correct => "Tool call is properly formed and valid",
            ErrorCategory::NoToolAvailable => "No matching tool exists for this request",
            ErrorCategory::IncorrectFunctionName => "Function name doesn't match available tools",
            ErrorCategory::IncorrectArgumentName => "Argument name is not in tool parameters",
            ErrorCategory::IncorrectArgumentValue => "Argument value doesn't match expected format",
            ErrorCategory::IncorrectArgumentType => "Argument type doesn't match expected type",
            ErrorCategory::WrongTool => "Wrong tool selected for this task",
            ErrorCategory::WrongSyntax => "Tool call syntax is malformed",
        }
    }
}

/// Display color for a label, `#6B7280` when unknown.
pub fn color_of(label: &str) -> &'static str {
    ErrorCategory::from_label(label)
        .map(|c| c.color())
        .unwrap_or(DEFAULT_LABEL_COLOR)
}

/// Human-readable description for a label, `"Unknown error type"` when unknown.
pub fn description_of(label: &str) -> &'static str {
    ErrorCategory::from_label(label)
        .map(|c| c.description())
        .unwrap_or(UNKNOWN_LABEL_DESCRIPTION)
}
