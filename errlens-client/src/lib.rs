//! HTTP client for the tool-call classification service.

pub mod client;
pub mod config;

pub use client::{ClassifierClient, ClientBuildError};
pub use config::{
    ClientConfig, API_BASE_URL_ENV, CLASSIFY_PATH, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_MS,
    EXAMPLES_PATH, HEALTH_PATH,
};
