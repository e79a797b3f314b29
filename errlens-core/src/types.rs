//! Wire types for the classification service.

use crate::error::{ClassifyError, ClassifyResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// REQUEST
// ============================================================================

/// Argument schema for one tool, a subset of JSON Schema.
///
/// Keywords other than the ones modelled here are kept in `extra` so
/// user-written schemas survive a parse/print cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameterSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ToolParameterSchema>>,
    /// Not checked against `properties`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolParameterSchema {
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: schema_type.into(),
            description: None,
            allowed_values: None,
            properties: None,
            required: None,
            extra: Map::new(),
        }
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, ToolParameterSchema)>,
        K: Into<String>,
    {
        let mut schema = Self::new("object");
        schema.properties = Some(
            properties
                .into_iter()
                .map(|(name, prop)| (name.into(), prop))
                .collect(),
        );
        schema
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameterSchema,
}

/// The call the agent actually made. `name` may not match any enabled tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationAttempt {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub query: String,
    pub enabled_tools: Vec<Tool>,
    pub tool_calling: ToolInvocationAttempt,
}

impl ClassificationRequest {
    /// Parse free-form input text into a request.
    ///
    /// Syntax errors become [`ClassifyError::Parse`]; well-formed JSON that does
    /// not have the request shape becomes [`ClassifyError::InvalidRequest`].
    pub fn from_input(text: &str) -> ClassifyResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ClassifyError::parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> ClassifyResult<Self> {
        if !value.is_object() {
            return Err(ClassifyError::invalid_request(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| ClassifyError::invalid_request(e.to_string()))
    }

    /// Two-space indented JSON, the form shown in the input editor.
    pub fn to_pretty_json(&self) -> ClassifyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ClassifyError::Request {
            reason: e.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Label → probability pairs in the order the service sent them.
///
/// A plain map would lose wire order, which the chart projection uses to
/// break ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Probabilities(Vec<(String, f64)>);

impl Probabilities {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite. An overwritten label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, probability: f64) {
        let label = label.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = probability,
            None => self.0.push((label, probability)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(label, p)| (label.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Probabilities {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut probabilities = Probabilities::new();
        for (label, p) in iter {
            probabilities.insert(label, p);
        }
        probabilities
    }
}

impl Serialize for Probabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, p) in &self.0 {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Probabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProbabilitiesVisitor;

        impl<'de> Visitor<'de> for ProbabilitiesVisitor {
            type Value = Probabilities;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of label to probability")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut probabilities = Probabilities::new();
                while let Some((label, p)) = access.next_entry::<String, f64>()? {
                    probabilities.insert(label, p);
                }
                Ok(probabilities)
            }
        }

        deserializer.deserialize_map(ProbabilitiesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// One of the eight known labels in practice, but kept open.
    pub label: String,
    pub confidence: f64,
    pub all_probabilities: Probabilities,
    pub processing_time_ms: f64,
    #[serde(default)]
    pub category_color: String,
}

impl ClassificationResponse {
    /// Range checks beyond what the type shape guarantees.
    ///
    /// Probabilities are not required to sum to one.
    pub fn validate(&self) -> ClassifyResult<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ClassifyError::malformed(format!(
                "confidence {} is outside [0, 1]",
                self.confidence
            )));
        }
        if !self.processing_time_ms.is_finite() || self.processing_time_ms < 0.0 {
            return Err(ClassifyError::malformed(format!(
                "processing_time_ms {} is not a non-negative number",
                self.processing_time_ms
            )));
        }
        if let Some((label, p)) = self.all_probabilities.iter().find(|(_, p)| !p.is_finite()) {
            return Err(ClassifyError::malformed(format!(
                "probability for {} is not finite: {}",
                label, p
            )));
        }
        Ok(())
    }
}

// ============================================================================
// EXAMPLES / HEALTH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleEntry {
    pub name: String,
    pub description: String,
    pub data: ClassificationRequest,
}

/// Body of `GET /api/examples`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamplesEnvelope {
    pub examples: Vec<ExampleEntry>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub device: String,
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        self.model_loaded && self.status.eq_ignore_ascii_case("healthy")
    }
}
