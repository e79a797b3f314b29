//! Error types for the TUI.

use crate::config::ConfigError;
use errlens_client::ClientBuildError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientBuildError),
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
