//! Per-session classification workflow.
//!
//! [`WorkflowController`] owns the editable input, the last result or error,
//! and the in-flight flag. Every mutation goes through a named transition
//! that returns the resulting [`WorkflowPhase`].
//!
//! ```text
//!            begin_classify            complete_classify(Ok)
//!   Idle ───────────────────▶ Loading ───────────────────────▶ Success
//!    ▲  │  (parse failure)        │    complete_classify(Err)
//!    │  └──────────────────┐      └──────────────────────────▶ Failed
//!    │                     ▼
//!    └── load_example ── Failed
//! ```
//!
//! A classification is split into `begin_classify` and `complete_classify`
//! so an event loop can run the network call elsewhere and hand back the
//! outcome. Each dispatch carries a [`Ticket`]; outcomes for anything but the
//! current ticket are dropped.

use crate::error::{ClassifyError, ClassifyResult};
use crate::traits::Classifier;
use crate::types::{ClassificationRequest, ClassificationResponse, ExampleEntry};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to classify";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// The observable session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub input_text: String,
    pub last_result: Option<ClassificationResponse>,
    pub in_flight: bool,
    pub last_error: Option<String>,
}

/// Identifies one dispatched classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A request that has passed local validation and is waiting on the backend.
#[derive(Debug, Clone)]
pub struct PendingClassification {
    pub ticket: Ticket,
    pub request: ClassificationRequest,
}

#[derive(Debug, Clone)]
pub enum ClassifyStart {
    /// Empty input or already loading. Nothing changed.
    Ignored,
    /// The input failed local parsing; the controller is now `Failed`.
    Rejected,
    Dispatched(PendingClassification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(WorkflowPhase),
    /// The ticket was superseded by a later dispatch or an example load.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct WorkflowController {
    state: WorkflowState,
    phase: WorkflowPhase,
    generation: u64,
}

impl WorkflowController {
    /// Start a session seeded with the first catalog entry.
    pub fn new(catalog: &[ExampleEntry]) -> Self {
        let input_text = catalog
            .first()
            .map(|entry| match entry.data.to_pretty_json() {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(example = %entry.name, error = %err, "Failed to render seed example");
                    String::new()
                }
            })
            .unwrap_or_default();

        Self {
            state: WorkflowState {
                input_text,
                ..WorkflowState::default()
            },
            phase: WorkflowPhase::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn input_text(&self) -> &str {
        &self.state.input_text
    }

    pub fn last_result(&self) -> Option<&ClassificationResponse> {
        self.state.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.in_flight
    }

    /// True when `begin_classify` would dispatch (modulo parse errors).
    pub fn can_classify(&self) -> bool {
        !self.state.input_text.is_empty() && self.phase != WorkflowPhase::Loading
    }

    /// Replace the input text.
    ///
    /// A previous result or error stays visible next to the edited input.
    pub fn edit_input(&mut self, text: impl Into<String>) -> WorkflowPhase {
        self.state.input_text = text.into();
        self.phase
    }

    /// Put an example into the editor and reset to `Idle`.
    ///
    /// Any classification still in flight is orphaned; its outcome will be
    /// discarded when it arrives.
    pub fn load_example(&mut self, entry: &ExampleEntry) -> WorkflowPhase {
        self.generation += 1;
        self.state.last_result = None;
        self.state.last_error = None;
        self.state.in_flight = false;

        match entry.data.to_pretty_json() {
            Ok(text) => {
                self.state.input_text = text;
                self.phase = WorkflowPhase::Idle;
                tracing::debug!(example = %entry.name, "Loaded example");
            }
            Err(err) => {
                self.state.last_error = Some(user_message(&err));
                self.phase = WorkflowPhase::Failed;
                tracing::warn!(example = %entry.name, error = %err, "Failed to render example");
            }
        }
        self.phase
    }

    /// Validate the input and move to `Loading`.
    ///
    /// Result and error are cleared before validation runs, so a rejected
    /// input replaces whatever was shown before.
    pub fn begin_classify(&mut self) -> ClassifyStart {
        if !self.can_classify() {
            tracing::debug!(phase = ?self.phase, "Classify ignored");
            return ClassifyStart::Ignored;
        }

        self.generation += 1;
        self.phase = WorkflowPhase::Loading;
        self.state.in_flight = true;
        self.state.last_result = None;
        self.state.last_error = None;

        match ClassificationRequest::from_input(&self.state.input_text) {
            Ok(request) => {
                let ticket = Ticket(self.generation);
                tracing::debug!(generation = ticket.0, tool = %request.tool_calling.name, "Classification dispatched");
                ClassifyStart::Dispatched(PendingClassification { ticket, request })
            }
            Err(err) => {
                tracing::debug!(error = %err, "Input rejected before dispatch");
                self.fail(&err);
                ClassifyStart::Rejected
            }
        }
    }

    /// Apply the backend outcome for `ticket`.
    pub fn complete_classify(
        &mut self,
        ticket: Ticket,
        outcome: ClassifyResult<ClassificationResponse>,
    ) -> Completion {
        if self.phase != WorkflowPhase::Loading || ticket.0 != self.generation {
            tracing::debug!(
                generation = ticket.0,
                current = self.generation,
                "Discarding stale classification outcome"
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(response) => {
                tracing::debug!(label = %response.label, confidence = response.confidence, "Classification succeeded");
                self.state.in_flight = false;
                self.state.last_result = Some(response);
                self.phase = WorkflowPhase::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Classification failed");
                self.fail(&err);
            }
        }
        Completion::Applied(self.phase)
    }

    /// Run a whole classification against `classifier`.
    ///
    /// If the returned future is dropped while waiting on the backend, the
    /// controller still leaves `Loading` and records a cancellation.
    pub async fn classify<C>(&mut self, classifier: &C) -> WorkflowPhase
    where
        C: Classifier + ?Sized,
    {
        let pending = match self.begin_classify() {
            ClassifyStart::Dispatched(pending) => pending,
            ClassifyStart::Ignored | ClassifyStart::Rejected => return self.phase,
        };

        let mut guard = SettleOnDrop {
            controller: self,
            ticket: pending.ticket,
            armed: true,
        };
        let outcome = classifier.classify(&pending.request).await;
        guard.armed = false;
        guard.controller.complete_classify(pending.ticket, outcome);
        guard.controller.phase
    }

    fn fail(&mut self, err: &ClassifyError) {
        self.state.in_flight = false;
        self.state.last_result = None;
        self.state.last_error = Some(user_message(err));
        self.phase = WorkflowPhase::Failed;
    }
}

struct SettleOnDrop<'a> {
    controller: &'a mut WorkflowController,
    ticket: Ticket,
    armed: bool,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller
                .complete_classify(self.ticket, Err(ClassifyError::Cancelled));
        }
    }
}

fn user_message(err: &ClassifyError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
