//! errlens Test Utilities
//!
//! Shared test infrastructure for the errlens workspace:
//! - Proptest generators for the wire types
//! - Scripted in-process classifiers
//! - A stub HTTP service that speaks the classifier API
//! - Fixtures for common scenarios

pub mod service;

pub use service::{StubReply, StubRoutes, StubService};

pub use errlens_core::{
    ClassificationRequest, ClassificationResponse, ClassifyError, ClassifyResult, Classifier,
    ExampleEntry, HealthStatus, Probabilities, Tool, ToolInvocationAttempt, ToolParameterSchema,
};

use async_trait::async_trait;
use errlens_core::{built_in_examples, ErrorCategory};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// FIXTURES
// ============================================================================

/// The calculator request whose function name does not match its tool.
pub fn calculator_request() -> ClassificationRequest {
    built_in_examples()[1].data.clone()
}

/// Wire form of [`calculator_request`].
pub fn calculator_request_json() -> Value {
    json!({
        "query": "Calculate 25 * 4",
        "enabled_tools": [{
            "name": "calculator",
            "description": "Perform calculations",
            "parameters": {
                "type": "object",
                "properties": {"expression": {"type": "string"}}
            }
        }],
        "tool_calling": {"name": "calculate", "arguments": {"expression": "25 * 4"}}
    })
}

/// A typical wrong-function-name verdict.
pub fn function_name_response() -> ClassificationResponse {
    ClassificationResponse {
        label: "Incorrect_Function_Name".to_string(),
        confidence: 0.87,
        all_probabilities: [
            ("Correct", 0.05),
            ("Incorrect_Function_Name", 0.87),
            ("Wrong_Tool", 0.08),
        ]
        .into_iter()
        .collect(),
        processing_time_ms: 42.0,
        category_color: "#EF4444".to_string(),
    }
}

pub fn function_name_response_json() -> Value {
    json!({
        "label": "Incorrect_Function_Name",
        "confidence": 0.87,
        "all_probabilities": {
            "Correct": 0.05,
            "Incorrect_Function_Name": 0.87,
            "Wrong_Tool": 0.08
        },
        "processing_time_ms": 42,
        "category_color": "#EF4444"
    })
}

pub fn healthy_status() -> HealthStatus {
    HealthStatus {
        status: "healthy".to_string(),
        model_loaded: true,
        device: "cuda".to_string(),
    }
}

// ============================================================================
// SCRIPTED CLASSIFIERS
// ============================================================================

/// Classifier that replays queued outcomes and records what it was asked.
///
/// When the queue runs dry it answers with a transport error.
#[derive(Debug, Default)]
pub struct StubClassifier {
    outcomes: Mutex<VecDeque<ClassifyResult<ClassificationResponse>>>,
    requests: Mutex<Vec<ClassificationRequest>>,
    classify_calls: AtomicUsize,
    examples: Vec<ExampleEntry>,
    health: Option<HealthStatus>,
}

impl StubClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(response: ClassificationResponse) -> Self {
        Self::new().then(Ok(response))
    }

    pub fn failing(error: ClassifyError) -> Self {
        Self::new().then(Err(error))
    }

    /// Queue another outcome.
    pub fn then(self, outcome: ClassifyResult<ClassificationResponse>) -> Self {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
        self
    }

    pub fn with_examples(mut self, examples: Vec<ExampleEntry>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = Some(health);
        self
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ClassificationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, request: &ClassificationRequest) -> ClassifyResult<ClassificationResponse> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or_else(|| Err(ClassifyError::transport("stub has no scripted outcome")))
    }

    async fn list_examples(&self) -> ClassifyResult<Vec<ExampleEntry>> {
        Ok(self.examples.clone())
    }

    async fn check_health(&self) -> ClassifyResult<HealthStatus> {
        self.health
            .clone()
            .ok_or_else(|| ClassifyError::service(503, "Health check failed"))
    }
}

/// Classifier whose calls never complete.
#[derive(Debug, Default)]
pub struct HangingClassifier {
    calls: AtomicUsize,
}

impl HangingClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for HangingClassifier {
    async fn classify(&self, _request: &ClassificationRequest) -> ClassifyResult<ClassificationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn list_examples(&self) -> ClassifyResult<Vec<ExampleEntry>> {
        std::future::pending().await
    }

    async fn check_health(&self) -> ClassifyResult<HealthStatus> {
        std::future::pending().await
    }
}

/// Classifier that panics inside `classify`.
#[derive(Debug, Default)]
pub struct PanickingClassifier;

#[async_trait]
impl Classifier for PanickingClassifier {
    async fn classify(&self, _request: &ClassificationRequest) -> ClassifyResult<ClassificationResponse> {
        panic!("classifier backend crashed")
    }

    async fn list_examples(&self) -> ClassifyResult<Vec<ExampleEntry>> {
        panic!("classifier backend crashed")
    }

    async fn check_health(&self) -> ClassifyResult<HealthStatus> {
        panic!("classifier backend crashed")
    }
}

// ============================================================================
// GENERATORS
// ============================================================================

/// One of the eight known labels.
pub fn arb_known_label() -> impl Strategy<Value = String> {
    prop::sample::select(ErrorCategory::all().to_vec()).prop_map(|c| c.label().to_string())
}

/// Known labels mixed with arbitrary ones.
pub fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![arb_known_label(), "[A-Za-z][A-Za-z_]{0,20}"]
}

pub fn arb_probabilities() -> impl Strategy<Value = Probabilities> {
    prop::collection::vec((arb_label(), 0.0f64..=1.0), 0..10)
        .prop_map(|pairs| pairs.into_iter().collect())
}

pub fn arb_response() -> impl Strategy<Value = ClassificationResponse> {
    (
        arb_label(),
        0.0f64..=1.0,
        arb_probabilities(),
        0.0f64..5_000.0,
        prop_oneof![Just(String::new()), "#[0-9A-F]{6}"],
    )
        .prop_map(
            |(label, confidence, all_probabilities, processing_time_ms, category_color)| {
                ClassificationResponse {
                    label,
                    confidence,
                    all_probabilities,
                    processing_time_ms,
                    category_color,
                }
            },
        )
}

fn arb_argument_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

pub fn arb_tool() -> impl Strategy<Value = Tool> {
    (
        "[a-z][a-z_]{0,15}",
        "[A-Za-z ]{0,30}",
        prop::collection::btree_map("[a-z]{1,8}", Just(ToolParameterSchema::string()), 0..4),
    )
        .prop_map(|(name, description, properties)| Tool {
            name,
            description,
            parameters: ToolParameterSchema::object(properties),
        })
}

pub fn arb_request() -> impl Strategy<Value = ClassificationRequest> {
    (
        "[A-Za-z0-9 ?*]{0,40}",
        prop::collection::vec(arb_tool(), 0..4),
        "[a-z][a-z_]{0,15}",
        prop::collection::btree_map("[a-z]{1,8}", arb_argument_value(), 0..4),
    )
        .prop_map(|(query, enabled_tools, name, arguments)| ClassificationRequest {
            query,
            enabled_tools,
            tool_calling: ToolInvocationAttempt {
                name,
                arguments: arguments.into_iter().collect(),
            },
        })
}
