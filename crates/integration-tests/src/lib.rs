//! Integration tests for the Bluepenguin admin client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bluepenguin-integration-tests
//! ```
//!
//! Each test starts a [`FakeBackend`]: an axum router bound to an ephemeral
//! port on `127.0.0.1` that records every request it receives. Tests build
//! a [`ConsoleState`] pointed at it and assert on both the client-side
//! outcome and the recorded traffic.
//!
//! # Test Categories
//!
//! - `api_client` - Header injection, body normalization, error messages
//! - `services` - Payload mapping, envelopes, count fan-out
//! - `category_store` - Featured cap, toggling, overlapping fetches
//! - `session` - Persistence, expiry and the navigation guard

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use bluepenguin_admin::{AdminConfig, ConsoleState, MemoryStorage, SessionStorage};
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use tokio::net::TcpListener;

/// A request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path without the query string.
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
struct Recorder {
    requests: Mutex<Vec<RecordedRequest>>,
}

async fn record(State(recorder): State<Arc<Recorder>>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    recorder.requests.lock().push(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(String::from),
        authorization,
    });

    next.run(request).await
}

/// Fake Bluepenguin backend.
pub struct FakeBackend {
    base_url: String,
    recorder: Arc<Recorder>,
}

impl FakeBackend {
    /// Serve `router` on an ephemeral local port.
    pub async fn start(router: Router) -> Self {
        let recorder = Arc::new(Recorder::default());
        let app = router.layer(middleware::from_fn_with_state(Arc::clone(&recorder), record));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake backend");
        });

        Self {
            base_url: format!("http://{addr}/"),
            recorder,
        }
    }

    /// Base URL with a trailing slash, as users configure it.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.requests.lock().clone()
    }

    /// Requests received for `method` and `path`.
    #[must_use]
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.recorder
            .requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.recorder.requests.lock().len()
    }

    /// Configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> AdminConfig {
        AdminConfig::for_base_url(&self.base_url).expect("fake backend config")
    }

    /// Console state over in-memory session storage, not logged in.
    #[must_use]
    pub fn console(&self) -> (ConsoleState, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let state = ConsoleState::with_storage(
            self.config(),
            Arc::clone(&storage) as Arc<dyn SessionStorage>,
        )
        .expect("console state");
        (state, storage)
    }

    /// Console state with a session valid for the next hour.
    #[must_use]
    pub fn logged_in_console(&self) -> ConsoleState {
        let (state, _) = self.console();
        login(&state, TEST_TOKEN);
        state
    }
}

/// Bearer token used by [`FakeBackend::logged_in_console`].
pub const TEST_TOKEN: &str = "test-token";

/// Store a session with `token` valid for the next hour.
pub fn login(state: &ConsoleState, token: &str) {
    state
        .session()
        .set_auth(token, "u-1", Utc::now() + Duration::hours(1))
        .expect("store session");
}
