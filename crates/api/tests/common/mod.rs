//! Shared helpers for API integration tests.
//!
//! Tests run against the seeded in-memory store and a recording email
//! transport, through the same middleware stack production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use outreach_api::config::ServerConfig;
use outreach_api::router::build_app_router;
use outreach_api::state::AppState;
use outreach_db::memory::MemoryStore;
use outreach_mailer::{EmailTransport, MailerError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// An [`EmailTransport`] that records sends instead of speaking SMTP.
#[derive(Default)]
pub struct RecordingMailer {
    /// `(to, subject, html)` triples, in send order.
    pub sent: tokio::sync::Mutex<Vec<(String, String, String)>>,
}

#[async_trait::async_trait]
impl EmailTransport for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError> {
        self.sent
            .lock()
            .await
            .push((to.to_owned(), subject.to_owned(), html.to_owned()));
        Ok(())
    }
}

/// Build the full application router backed by the seeded in-memory
/// store and the given transport.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(mailer: Option<Arc<dyn EmailTransport>>) -> Router {
    let store = Arc::new(MemoryStore::seeded());
    let state = AppState {
        config: Arc::new(test_config()),
        pool: None,
        templates: store.clone(),
        prospects: store.clone(),
        consultations: store,
        ai: None,
        mailer,
    };

    build_app_router(state, &test_config())
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a JSON POST request to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request_json(app, Method::POST, uri, body).await
}

/// Send a JSON request with an arbitrary method to the app.
pub async fn request_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
