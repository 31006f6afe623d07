//! Integration tests for the category store and the featured-category cap.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use bluepenguin_admin::StoreError;
use bluepenguin_core::CategoryId;
use bluepenguin_integration_tests::FakeBackend;
use parking_lot::Mutex;
use serde_json::{Value, json};

/// Backend-side catalog state.
#[derive(Clone, Default)]
struct Catalog {
    categories: Arc<Vec<Value>>,
    featured: Arc<Mutex<Vec<String>>>,
    listing_delay: Option<Duration>,
    listing_fails: bool,
    featured_fails: bool,
    create_fails: bool,
    create_delay: Option<Duration>,
}

impl Catalog {
    fn with_categories(ids: &[&str]) -> Self {
        Self {
            categories: Arc::new(
                ids.iter()
                    .map(|id| json!({"rowKey": id, "title": format!("Category {id}")}))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    fn featuring(self, ids: &[&str]) -> Self {
        *self.featured.lock() = ids.iter().map(ToString::to_string).collect();
        self
    }

    fn router(self) -> Router {
        Router::new()
            .route("/api/Category/getall", get(list_categories))
            .route("/api/FeaturedCategory/getall", get(list_featured))
            .route("/api/FeaturedCategory/create", post(create_featured))
            .route("/api/FeaturedCategory/delete/{code}", delete(delete_featured))
            .with_state(self)
    }
}

async fn list_categories(State(catalog): State<Catalog>) -> Response {
    if let Some(delay) = catalog.listing_delay {
        tokio::time::sleep(delay).await;
    }
    if catalog.listing_fails {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({"message": "category table unavailable"})),
        )
            .into_response();
    }
    axum::Json(Value::Array(catalog.categories.to_vec())).into_response()
}

async fn list_featured(State(catalog): State<Catalog>) -> Response {
    if catalog.featured_fails {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    axum::Json(json!(catalog.featured.lock().clone())).into_response()
}

async fn create_featured(
    State(catalog): State<Catalog>,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    if let Some(delay) = catalog.create_delay {
        tokio::time::sleep(delay).await;
    }
    if catalog.create_fails {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({"message": "featured set is locked"})),
        )
            .into_response();
    }
    let code = body["code"].as_str().unwrap_or_default().to_string();
    catalog.featured.lock().push(code);
    StatusCode::OK.into_response()
}

async fn delete_featured(State(catalog): State<Catalog>, Path(code): Path<String>) -> StatusCode {
    catalog.featured.lock().retain(|c| c != &code);
    StatusCode::NO_CONTENT
}

fn id(raw: &str) -> CategoryId {
    CategoryId::new(raw)
}

// =============================================================================
// Fetch
// =============================================================================

#[tokio::test]
async fn test_fetch_merges_featured_listing_with_flags() {
    let mut catalog = Catalog::with_categories(&["C1", "C2", "C3"]).featuring(&["C2"]);
    catalog.categories = Arc::new(vec![
        json!({"rowKey": "C1", "title": "Rings", "isFeatured": true}),
        json!({"rowKey": "C2", "title": "Anklets"}),
        json!({"rowKey": "C3", "title": "Chains"}),
    ]);
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();

    store.fetch().await.unwrap();

    assert_eq!(store.featured_codes().await, vec![id("C1"), id("C2")]);
    let snapshot = store.snapshot().await;
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_featured_lookup_failure_falls_back_to_flags() {
    let mut catalog = Catalog::with_categories(&[]);
    catalog.categories = Arc::new(vec![json!({"rowKey": "C1", "isFeatured": true})]);
    catalog.featured_fails = true;
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();

    store.fetch().await.unwrap();
    assert!(store.is_featured(&id("C1")).await);
}

#[tokio::test]
async fn test_fetch_failure_records_error() {
    let mut catalog = Catalog::with_categories(&[]);
    catalog.listing_fails = true;
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();

    let err = store.fetch().await.unwrap_err();

    assert!(matches!(err, StoreError::Api(_)));
    assert_eq!(store.error().await.as_deref(), Some("category table unavailable"));
    assert!(!store.snapshot().await.is_loading);
    assert!(store.categories().await.is_empty());
}

#[tokio::test]
async fn test_overlapping_fetches_issue_one_request() {
    let mut catalog = Catalog::with_categories(&["C1", "C2"]);
    catalog.listing_delay = Some(Duration::from_millis(150));
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();

    let (first, second, third) = tokio::join!(store.fetch(), store.fetch(), store.fetch());
    first.unwrap();
    second.unwrap();
    third.unwrap();

    assert_eq!(backend.hits("GET", "/api/Category/getall"), 1);
    assert_eq!(backend.hits("GET", "/api/FeaturedCategory/getall"), 1);
    assert_eq!(store.categories().await.len(), 2);
}

#[tokio::test]
async fn test_joined_fetch_shares_failure() {
    let mut catalog = Catalog::with_categories(&[]);
    catalog.listing_delay = Some(Duration::from_millis(150));
    catalog.listing_fails = true;
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();

    let (first, second) = tokio::join!(store.fetch(), store.fetch());

    assert!(matches!(first, Err(StoreError::Api(_))));
    match second {
        Err(StoreError::Fetch(message)) => assert_eq!(message, "category table unavailable"),
        other => panic!("expected joined failure, got {other:?}"),
    }
    assert_eq!(backend.hits("GET", "/api/Category/getall"), 1);
}

#[tokio::test]
async fn test_sequential_fetches_each_reach_backend() {
    let backend = FakeBackend::start(Catalog::with_categories(&["C1"]).router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();

    store.fetch().await.unwrap();
    store.fetch().await.unwrap();

    assert_eq!(backend.hits("GET", "/api/Category/getall"), 2);
}

// =============================================================================
// Toggle Featured
// =============================================================================

#[tokio::test]
async fn test_toggle_round_trip() {
    let catalog = Catalog::with_categories(&["C1", "C2"]);
    let featured = Arc::clone(&catalog.featured);
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();
    store.fetch().await.unwrap();

    store.toggle_featured(&id("C1")).await.unwrap();
    assert!(store.is_featured(&id("C1")).await);
    assert_eq!(*featured.lock(), vec!["C1".to_string()]);

    store.toggle_featured(&id("C1")).await.unwrap();
    assert!(!store.is_featured(&id("C1")).await);
    assert!(featured.lock().is_empty());

    assert_eq!(backend.hits("POST", "/api/FeaturedCategory/create"), 1);
    assert_eq!(backend.hits("DELETE", "/api/FeaturedCategory/delete/C1"), 1);
}

#[tokio::test]
async fn test_fifth_featured_category_is_rejected_without_network() {
    let catalog = Catalog::with_categories(&["C1", "C2", "C3", "C4", "C5"])
        .featuring(&["C1", "C2", "C3", "C4"]);
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();
    store.fetch().await.unwrap();
    let hits_before = backend.total_hits();

    let err = store.toggle_featured(&id("C5")).await.unwrap_err();

    assert!(matches!(err, StoreError::FeaturedLimit { max: 4 }));
    assert_eq!(err.to_string(), "Maximum of 4 featured categories allowed.");
    assert_eq!(backend.total_hits(), hits_before);
    assert_eq!(
        store.error().await.as_deref(),
        Some("Maximum of 4 featured categories allowed.")
    );
    assert!(!store.is_featured(&id("C5")).await);

    // Unfeaturing is always allowed at the cap
    store.toggle_featured(&id("C4")).await.unwrap();
    assert_eq!(store.featured_codes().await.len(), 3);
    assert!(store.error().await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_adds_respect_featured_cap() {
    let mut catalog = Catalog::with_categories(&["C1", "C2", "C3", "C4", "C5"])
        .featuring(&["C1", "C2", "C3"]);
    catalog.create_delay = Some(Duration::from_millis(100));
    let featured = Arc::clone(&catalog.featured);
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();
    store.fetch().await.unwrap();

    let (c4, c5) = (id("C4"), id("C5"));
    let (first, second) = tokio::join!(store.toggle_featured(&c4), store.toggle_featured(&c5));

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(StoreError::FeaturedLimit { max: 4 })))
    );
    assert_eq!(store.featured_codes().await.len(), 4);
    assert_eq!(featured.lock().len(), 4);
    assert_eq!(backend.hits("POST", "/api/FeaturedCategory/create"), 1);
}

#[tokio::test]
async fn test_failed_toggle_keeps_local_flag() {
    let mut catalog = Catalog::with_categories(&["C1"]);
    catalog.create_fails = true;
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();
    store.fetch().await.unwrap();

    let err = store.toggle_featured(&id("C1")).await.unwrap_err();

    assert_eq!(err.to_string(), "featured set is locked");
    assert!(!store.is_featured(&id("C1")).await);
    assert_eq!(store.error().await.as_deref(), Some("featured set is locked"));
}

#[tokio::test]
async fn test_toggle_unknown_category_attempts_add() {
    let catalog = Catalog::with_categories(&["C1"]);
    let featured = Arc::clone(&catalog.featured);
    let backend = FakeBackend::start(catalog.router()).await;
    let state = backend.logged_in_console();
    let store = state.categories();
    store.fetch().await.unwrap();

    store.toggle_featured(&id("C9")).await.unwrap();

    assert_eq!(*featured.lock(), vec!["C9".to_string()]);
    assert!(!store.is_featured(&id("C9")).await);
}
