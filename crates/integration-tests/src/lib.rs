//! End-to-end tests for Larder.
//!
//! Tests run the real `reqwest` client against [`MockApi`], an in-process
//! axum server that records every request and answers with scripted
//! replies. No external services are needed:
//!
//! ```bash
//! cargo test -p larder-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Event binding, cart requests and banners
//! - `order_status` - Confirmed order status updates

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use larder_storefront::{Document, HttpStorefrontApi, InteractionConfig, Page, ScriptedHost};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Banner lifetime used by [`test_config`].
pub const TEST_ALERT_TIMEOUT: Duration = Duration::from_millis(150);

/// Reload delay used by [`test_config`].
pub const TEST_RELOAD_DELAY: Duration = Duration::from_millis(50);

/// A request as seen by the mock API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path as sent on the wire (percent-encoding preserved)
    pub path: String,
    /// JSON body, `Null` if the body was empty or not JSON
    pub body: Value,
    pub cookie: Option<String>,
}

/// Reply the mock API sends for the next request.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Json(StatusCode, Value),
    Raw(StatusCode, String),
}

impl ScriptedReply {
    /// `200 OK` with a JSON body.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self::Json(StatusCode::OK, body)
    }

    /// Any status with a JSON body.
    #[must_use]
    pub const fn json(status: StatusCode, body: Value) -> Self {
        Self::Json(status, body)
    }

    /// Any status with a non-JSON body.
    #[must_use]
    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self::Raw(status, body.to_string())
    }
}

impl IntoResponse for ScriptedReply {
    fn into_response(self) -> Response {
        match self {
            Self::Json(status, body) => (status, axum::Json(body)).into_response(),
            Self::Raw(status, body) => {
                (status, [(header::CONTENT_TYPE, "text/html")], body).into_response()
            }
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    replies: VecDeque<ScriptedReply>,
}

type SharedState = Arc<Mutex<MockState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process storefront API.
///
/// Replies are consumed in order; once the queue is empty every request gets
/// `200 {}`. The server stops when the value is dropped.
#[derive(Debug)]
pub struct MockApi {
    addr: SocketAddr,
    state: SharedState,
    server: JoinHandle<()>,
}

impl MockApi {
    /// Start the server on an ephemeral local port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API listener");
        let addr = listener
            .local_addr()
            .expect("Mock API listener has no local address");

        let state = SharedState::default();
        let app = Router::new()
            .fallback(record)
            .with_state(Arc::clone(&state));

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                server_stopped(&e);
            }
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Root URL of the server.
    ///
    /// # Panics
    ///
    /// Never in practice; the address always forms a valid URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("Invalid mock API URL")
    }

    /// URL of the server under a path prefix, without a trailing slash.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` does not form a valid URL.
    #[must_use]
    pub fn base_url_with_prefix(&self, prefix: &str) -> Url {
        Url::parse(&format!("http://{}/{prefix}", self.addr)).expect("Invalid mock API URL")
    }

    /// Queue the reply to the next unanswered request.
    pub fn push_reply(&self, reply: ScriptedReply) {
        lock(&self.state).replies.push_back(reply);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// The crate has no subscriber of its own; surface the failure in test output.
fn server_stopped(e: &std::io::Error) {
    #[allow(clippy::print_stderr)]
    {
        eprintln!("Mock API server stopped: {e}");
    }
}

async fn record(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ScriptedReply {
    let request = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        cookie: headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };

    let mut state = lock(&state);
    state.requests.push(request);
    state
        .replies
        .pop_front()
        .unwrap_or_else(|| ScriptedReply::ok(serde_json::json!({})))
}

/// A URL nothing is listening on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind placeholder listener");
    let addr = listener
        .local_addr()
        .expect("Placeholder listener has no local address");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("Invalid placeholder URL")
}

/// Configuration with short timers so tests run in real time.
#[must_use]
pub fn test_config(base_url: Url) -> InteractionConfig {
    let mut config = InteractionConfig::new(base_url);
    config.alert_timeout = TEST_ALERT_TIMEOUT;
    config.reload_delay = TEST_RELOAD_DELAY;
    config
}

/// Page wired to the real HTTP client and a scripted host.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built from `config`.
#[must_use]
pub fn http_page(
    config: InteractionConfig,
    host: ScriptedHost,
    document: Document,
) -> Page<HttpStorefrontApi, ScriptedHost> {
    let api = HttpStorefrontApi::new(&config).expect("Failed to build API client");
    Page::new(config, api, host, document)
}
