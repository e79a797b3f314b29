//! reqwest-backed classifier client.

use crate::config::{ClientConfig, CLASSIFY_PATH, EXAMPLES_PATH, HEALTH_PATH};
use async_trait::async_trait;
use errlens_core::{
    ClassificationRequest, ClassificationResponse, ClassifyError, ClassifyResult, Classifier,
    ExampleEntry, ExamplesEnvelope, HealthStatus,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};

const CLASSIFY_FALLBACK: &str = "Classification failed";
const EXAMPLES_FALLBACK: &str = "Failed to fetch examples";
const HEALTH_FALLBACK: &str = "Health check failed";

#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the classification service.
///
/// One outbound request per call, no retries.
#[derive(Clone)]
pub struct ClassifierClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ClassifierClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| ClientBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url,
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> ClassifyResult<ClassificationResponse> {
        let body = serde_json::to_vec(request).map_err(|e| ClassifyError::Request {
            reason: e.to_string(),
        })?;
        let builder = self
            .client
            .post(self.endpoint(CLASSIFY_PATH))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);

        let text = self.send(builder, CLASSIFY_PATH, CLASSIFY_FALLBACK).await?;
        let response: ClassificationResponse = decode(&text)?;
        response.validate()?;
        Ok(response)
    }

    pub async fn list_examples(&self) -> ClassifyResult<Vec<ExampleEntry>> {
        let builder = self
            .client
            .get(self.endpoint(EXAMPLES_PATH))
            .header(ACCEPT, "application/json");
        let text = self.send(builder, EXAMPLES_PATH, EXAMPLES_FALLBACK).await?;
        let envelope: ExamplesEnvelope = decode(&text)?;
        Ok(envelope.examples)
    }

    pub async fn check_health(&self) -> ClassifyResult<HealthStatus> {
        let builder = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .header(ACCEPT, "application/json");
        let text = self.send(builder, HEALTH_PATH, HEALTH_FALLBACK).await?;
        decode(&text)
    }

    /// Send and return the body of a 2xx response.
    async fn send(&self, builder: RequestBuilder, path: &str, fallback: &str) -> ClassifyResult<String> {
        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(path, e))?;
        tracing::debug!(
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Classifier service responded"
        );

        if status.is_success() {
            Ok(text)
        } else {
            let message = service_message(&text, fallback);
            tracing::warn!(path, status = status.as_u16(), %message, "Classifier service returned an error");
            Err(ClassifyError::service(status.as_u16(), message))
        }
    }

    fn transport_error(&self, path: &str, err: reqwest::Error) -> ClassifyError {
        let reason = if err.is_timeout() {
            format!("request to {} timed out after {}ms", path, self.timeout.as_millis())
        } else if err.is_connect() {
            format!("could not connect to {}", self.base_url)
        } else {
            err.to_string()
        };
        tracing::warn!(path, %reason, "Classifier request failed");
        ClassifyError::transport(reason)
    }
}

impl std::fmt::Debug for ClassifierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Classifier for ClassifierClient {
    async fn classify(&self, request: &ClassificationRequest) -> ClassifyResult<ClassificationResponse> {
        ClassifierClient::classify(self, request).await
    }

    async fn list_examples(&self) -> ClassifyResult<Vec<ExampleEntry>> {
        ClassifierClient::list_examples(self).await
    }

    async fn check_health(&self) -> ClassifyResult<HealthStatus> {
        ClassifierClient::check_health(self).await
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> ClassifyResult<T> {
    serde_json::from_str(text).map_err(|e| ClassifyError::malformed(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// Prefers `detail`, then `message`. Non-string details (validation error
/// lists) are rendered as compact JSON. Blank or missing → `fallback`.
fn service_message(body: &str, fallback: &str) -> String {
    let field = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["detail", "message"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find(|v| !v.is_null())
            .cloned()
    });

    let message = match field {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
