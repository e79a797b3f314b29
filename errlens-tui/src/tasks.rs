//! Background work for the event loop.
//!
//! Each function runs one backend call and turns its outcome into the
//! [`TuiEvent`] the loop feeds back into [`crate::state::App`].

use crate::events::TuiEvent;
use errlens_core::{Classifier, ClassifyError, PendingClassification};
use std::sync::Arc;

/// Run one classification on its own task.
///
/// A panicked or aborted task still yields an outcome for the ticket, so the
/// app never stays in `Loading`.
pub async fn run_classification<C>(classifier: Arc<C>, pending: PendingClassification) -> TuiEvent
where
    C: Classifier + ?Sized + 'static,
{
    let PendingClassification { ticket, request } = pending;
    let outcome = match tokio::spawn(async move { classifier.classify(&request).await }).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "Classification task aborted");
            Err(ClassifyError::transport(format!(
                "classification task failed: {}",
                err
            )))
        }
    };
    TuiEvent::Classified { ticket, outcome }
}

pub async fn run_health_check<C>(classifier: Arc<C>) -> TuiEvent
where
    C: Classifier + ?Sized,
{
    TuiEvent::Health(classifier.check_health().await)
}

pub async fn run_example_fetch<C>(classifier: Arc<C>) -> TuiEvent
where
    C: Classifier + ?Sized,
{
    let result = classifier.list_examples().await;
    if let Err(err) = &result {
        tracing::warn!(error = %err, "Remote examples unavailable");
    }
    TuiEvent::RemoteExamples(result)
}
