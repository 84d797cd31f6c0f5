//! A scripted stand-in for the backend proxy.
//!
//! Routes are keyed by method and the raw (still percent-encoded) request
//! path, so tests can assert exactly what went over the wire. Each route
//! holds a queue of replies; the last reply repeats once the queue drains.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// One scripted answer.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            delay: Duration::ZERO,
        }
    }

    /// 2xx with no body.
    pub fn empty() -> Self {
        Self::ok(Value::Null)
    }

    /// The proxy's error shape: `{ "error": message }`.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the proxy saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Decoded query pairs in request order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect()
    }
}

#[derive(Default)]
struct Route {
    replies: VecDeque<Reply>,
    hits: usize,
}

#[derive(Default)]
struct ProxyState {
    routes: Mutex<HashMap<(String, String), Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ProxyState {
    fn routes(&self) -> MutexGuard<'_, HashMap<(String, String), Route>> {
        self.routes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Fake backend proxy bound to an ephemeral local port. The server task is
/// aborted on drop.
pub struct FakeProxy {
    addr: SocketAddr,
    state: Arc<ProxyState>,
    server: JoinHandle<()>,
}

impl FakeProxy {
    pub async fn start() -> Self {
        let state = Arc::new(ProxyState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake proxy");
        let addr = listener.local_addr().expect("fake proxy address");
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "fake proxy stopped");
            }
        });
        Self {
            addr,
            state,
            server,
        }
    }

    /// Origin to hand to the client, e.g. `http://127.0.0.1:54321`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a reply for `method path`.
    pub fn respond(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.state
            .routes()
            .entry(route_key(method, path))
            .or_default()
            .replies
            .push_back(reply);
        self
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .routes()
            .get(&route_key(method, path))
            .map(|r| r.hits)
            .unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        let (method, path) = route_key(method, path);
        self.state
            .requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    /// Wait until a route has been hit at least `count` times.
    pub async fn wait_for_hits(&self, method: &str, path: &str, count: usize, timeout: Duration) {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.hits(method, path) < count {
            if tokio::time::Instant::now() >= deadline {
                panic!(
                    "expected {} hits on {} {}, saw {}",
                    count,
                    method,
                    path,
                    self.hits(method, path)
                );
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl Drop for FakeProxy {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn route_key(method: &str, path: &str) -> (String, String) {
    (method.to_ascii_uppercase(), path.to_string())
}

async fn handle(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let key = route_key(method.as_str(), uri.path());
    state.requests().push(RecordedRequest {
        method: key.0.clone(),
        path: key.1.clone(),
        query: uri.query().map(str::to_owned),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = {
        let mut routes = state.routes();
        match routes.get_mut(&key) {
            Some(route) if !route.replies.is_empty() => {
                route.hits += 1;
                if route.replies.len() > 1 {
                    route.replies.pop_front()
                } else {
                    route.replies.front().cloned()
                }
            }
            _ => None,
        }
    };

    let Some(reply) = reply else {
        let message = format!("No route for {} {}", key.0, key.1);
        return (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response();
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if reply.body.is_null() {
        status.into_response()
    } else {
        (status, Json(reply.body)).into_response()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|c| c.into_owned())
        .unwrap_or(spaced)
}
