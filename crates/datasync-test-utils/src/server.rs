//! Loopback HTTP server serving canned responses.
//!
//! Every request goes through one fallback handler that looks the request
//! target (path plus query) up in the route table.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned response for one path.
#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with a JSON (or any text) body
    Json(String),
    /// Arbitrary status and body
    Status(u16, String),
    /// Redirect with the given status to `Location`
    Redirect(u16, String),
    /// Accept the request and never answer
    Hang,
}

impl Route {
    pub fn json(value: serde_json::Value) -> Self {
        Route::Json(value.to_string())
    }

    pub fn found(location: impl Into<String>) -> Self {
        Route::Redirect(302, location.into())
    }
}

#[derive(Clone)]
struct FixtureState {
    routes: Arc<HashMap<String, Route>>,
    hits: Arc<AtomicUsize>,
}

/// HTTP server bound to `127.0.0.1` on an ephemeral port.
///
/// The server task is aborted when the server is dropped.
pub struct FixtureServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl FixtureServer {
    /// Start serving `routes`, keyed by path including any query string.
    pub async fn start<I, P>(routes: I) -> Self
    where
        I: IntoIterator<Item = (P, Route)>,
        P: Into<String>,
    {
        let state = FixtureState {
            routes: Arc::new(routes.into_iter().map(|(p, r)| (p.into(), r)).collect()),
            hits: Arc::new(AtomicUsize::new(0)),
        };
        let hits = state.hits.clone();
        let app = Router::new().fallback(respond).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("FixtureServer: failed to bind");
        let addr = listener.local_addr().expect("FixtureServer: no local addr");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, hits, handle }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(State(state): State<FixtureState>, uri: Uri) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    match state.routes.get(target).cloned() {
        Some(Route::Json(body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Some(Route::Status(status, body)) => (status_code(status), body).into_response(),
        Some(Route::Redirect(status, location)) => {
            (status_code(status), [(header::LOCATION, location)]).into_response()
        }
        Some(Route::Hang) => std::future::pending().await,
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
