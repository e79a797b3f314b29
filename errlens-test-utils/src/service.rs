//! In-process stub of the classification HTTP service.
//!
//! Binds an axum router on an ephemeral localhost port. Each endpoint replies
//! with a fixed [`StubReply`]; calls to `/api/classify` are counted and their
//! bodies kept for assertions.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A canned HTTP reply.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self::raw(status, "")
    }

    /// Hold the reply back, for exercising client deadlines.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn send(self) -> Response {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// Replies for each endpoint. Unset endpoints answer 404.
#[derive(Debug, Clone)]
pub struct StubRoutes {
    pub classify: StubReply,
    pub examples: StubReply,
    pub health: StubReply,
}

impl Default for StubRoutes {
    fn default() -> Self {
        let not_found = StubReply::json(404, serde_json::json!({"detail": "Not Found"}));
        Self {
            classify: not_found.clone(),
            examples: not_found.clone(),
            health: not_found,
        }
    }
}

impl StubRoutes {
    pub fn classify(reply: StubReply) -> Self {
        Self {
            classify: reply,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct Recorder {
    classify_hits: AtomicUsize,
    bodies: Mutex<Vec<Bytes>>,
    content_types: Mutex<Vec<Option<String>>>,
}

struct StubState {
    routes: StubRoutes,
    recorder: Arc<Recorder>,
}

/// Running stub. The server task is aborted on drop.
pub struct StubService {
    addr: SocketAddr,
    recorder: Arc<Recorder>,
    handle: JoinHandle<()>,
}

impl StubService {
    pub async fn start(routes: StubRoutes) -> std::io::Result<Self> {
        let recorder = Arc::new(Recorder::default());
        let state = Arc::new(StubState {
            routes,
            recorder: recorder.clone(),
        });

        let app = Router::new()
            .route("/api/classify", post(classify_handler))
            .route("/api/examples", get(examples_handler))
            .route("/health", get(health_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            recorder,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn classify_hits(&self) -> usize {
        self.recorder.classify_hits.load(Ordering::SeqCst)
    }

    /// Bodies received on `/api/classify`, parsed as JSON.
    pub fn classify_bodies(&self) -> Vec<Value> {
        self.recorder
            .bodies
            .lock()
            .map(|bodies| {
                bodies
                    .iter()
                    .filter_map(|b| serde_json::from_slice(b).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn classify_content_types(&self) -> Vec<Option<String>> {
        self.recorder
            .content_types
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl Drop for StubService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn classify_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.recorder.classify_hits.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut bodies) = state.recorder.bodies.lock() {
        bodies.push(body);
    }
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Ok(mut content_types) = state.recorder.content_types.lock() {
        content_types.push(content_type);
    }
    state.routes.classify.clone().send().await
}

async fn examples_handler(State(state): State<Arc<StubState>>) -> Response {
    state.routes.examples.clone().send().await
}

async fn health_handler(State(state): State<Arc<StubState>>) -> Response {
    state.routes.health.clone().send().await
}
