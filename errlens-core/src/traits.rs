//! Seam between the workflow and the inference service.

use crate::error::ClassifyResult;
use crate::types::{ClassificationRequest, ClassificationResponse, ExampleEntry, HealthStatus};
use async_trait::async_trait;

/// A backend that can classify tool calls.
///
/// Implemented over HTTP by `errlens_client::ClassifierClient` and by the
/// scripted stubs in `errlens-test-utils`. Implementations make a single
/// attempt per call; retry policy belongs to the caller.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, request: &ClassificationRequest) -> ClassifyResult<ClassificationResponse>;

    /// Examples published by the service, an alternative to the built-in catalog.
    async fn list_examples(&self) -> ClassifyResult<Vec<ExampleEntry>>;

    async fn check_health(&self) -> ClassifyResult<HealthStatus>;
}
