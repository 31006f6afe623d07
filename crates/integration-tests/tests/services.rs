//! Integration tests for the resource services.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use bluepenguin_admin::services::ProductSearch;
use bluepenguin_core::{Category, CategoryId, CollectionId, ImageId, Sku};
use bluepenguin_integration_tests::FakeBackend;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use std::collections::HashMap;

fn json_route(payload: Value) -> axum::routing::MethodRouter {
    get(move || async move { axum::Json(payload) })
}

// =============================================================================
// Catalog Listings
// =============================================================================

#[tokio::test]
async fn test_category_minimal_payload() {
    let router = Router::new().route(
        "/api/Category/getall",
        json_route(json!([{"rowKey": "C1", "title": "Rings"}])),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let categories = state.services().categories.get_all().await.unwrap();
    assert_eq!(
        categories,
        vec![Category {
            id: CategoryId::new("C1"),
            name: "Rings".to_string(),
            product_count: 0,
            is_active: true,
            is_featured: false,
        }]
    );
}

#[tokio::test]
async fn test_category_get_by_id_scans_listing() {
    let router = Router::new().route(
        "/api/Category/getall",
        json_route(json!([{"rowKey": "C1", "title": "Rings"}, {"id": "C2", "name": "Anklets"}])),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();
    let service = &state.services().categories;

    let found = service.get_by_id(&CategoryId::new("C2")).await.unwrap();
    assert_eq!(found.map(|c| c.name).as_deref(), Some("Anklets"));
    assert!(service.get_by_id(&CategoryId::new("C9")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_envelope_payloads_are_unwrapped() {
    let router = Router::new().route(
        "/api/Material/getall",
        json_route(json!({
            "items": [{"rowKey": "SLV", "title": "Silver", "itemCount": 12}],
            "totalCount": 1
        })),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let materials = state.services().materials.get_all().await.unwrap();
    assert_eq!(materials.len(), 1);
    assert_eq!(materials[0].id.as_str(), "SLV");
    assert_eq!(materials[0].product_count, 12);
}

#[tokio::test]
async fn test_items_without_id_are_dropped() {
    let router = Router::new().route(
        "/api/Feature/getall",
        json_route(json!([
            {"featureId": "HND", "featureName": "Handmade"},
            {"featureName": "Orphan"}
        ])),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let features = state.services().features.get_all().await.unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].name, "Handmade");
}

#[tokio::test]
async fn test_listing_failure_propagates_message() {
    let router = Router::new().route(
        "/api/Category/getall",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                axum::Json(json!({"message": "not found"})),
            )
        }),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let err = state.services().categories.get_all().await.unwrap_err();
    assert_eq!(err.to_string(), "not found");
}

// =============================================================================
// Collection Count Fan-Out
// =============================================================================

async fn search_counts(axum::Json(body): axum::Json<Value>) -> Response {
    match body["selectedCollections"][0].as_str() {
        Some("A") => axum::Json(json!({"items": [], "totalCount": 3})).into_response(),
        Some("B") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("C") => axum::Json(json!({"items": [], "totalCount": 7})).into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[tokio::test]
async fn test_collection_counts_with_partial_failure() {
    let router = Router::new()
        .route(
            "/api/Collection/getall",
            json_route(json!([
                {"collectionId": "A", "collectionName": "Alpha"},
                {"collectionId": "B", "collectionName": "Beta"},
                {"collectionId": "C", "collectionName": "Gamma"}
            ])),
        )
        .route("/api/Product/search", post(search_counts));
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let collections = state.services().collections.get_all().await.unwrap();

    let counts: Vec<(&str, u64)> = collections
        .iter()
        .map(|c| (c.id.as_str(), c.product_count))
        .collect();
    assert_eq!(counts, vec![("A", 3), ("B", 0), ("C", 7)]);
    assert_eq!(backend.hits("POST", "/api/Product/search"), 3);

    let searches: Vec<_> = backend
        .requests()
        .into_iter()
        .filter(|r| r.path == "/api/Product/search")
        .collect();
    assert!(
        searches
            .iter()
            .all(|r| r.query.as_deref() == Some("page=1&pageSize=1"))
    );
}

#[tokio::test]
async fn test_collection_create_and_update_bodies() {
    async fn echo(axum::Json(body): axum::Json<Value>) -> axum::Json<Value> {
        assert_eq!(body, json!({"collectionId": "SUM", "collectionName": "Summer Edit"}));
        axum::Json(body)
    }

    let router = Router::new()
        .route("/api/Collection/create", post(echo))
        .route("/api/Collection/update", axum::routing::put(echo));
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();
    let id = CollectionId::new("SUM");

    state.services().collections.create(&id, "Summer Edit").await.unwrap();
    state.services().collections.update(&id, "Summer Edit").await.unwrap();

    assert_eq!(backend.hits("POST", "/api/Collection/create"), 1);
    assert_eq!(backend.hits("PUT", "/api/Collection/update"), 1);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_product_search_page() {
    async fn search(
        Query(params): Query<HashMap<String, String>>,
        axum::Json(body): axum::Json<Value>,
    ) -> axum::Json<Value> {
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
        assert_eq!(params.get("pageSize").map(String::as_str), Some("5"));
        assert_eq!(body, json!({"selectedCategories": ["RNG"]}));
        axum::Json(json!({
            "items": [{"sku": "BP-RNG-006", "productName": "Lotus Ring", "price": 999}],
            "totalCount": 6
        }))
    }

    let router = Router::new().route("/api/Product/search", post(search));
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let filter = ProductSearch {
        selected_categories: vec!["RNG".into()],
        ..ProductSearch::default()
    };
    let page = state.services().products.search(&filter, 2, 5).await.unwrap();

    assert_eq!(page.total_count, 6);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].sku, Sku::new("BP-RNG-006"));
    assert_eq!(page.items[0].price.display(), "₹999.00");
}

#[tokio::test]
async fn test_product_listing() {
    let router = Router::new().route(
        "/api/Product/getall",
        json_route(json!([
            {"skuId": "BP-EAR-001", "productName": "Drop Earrings", "categoryCode": "EAR"},
            {"productName": "No SKU"}
        ])),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let products = state.services().products.get_all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category.as_ref().unwrap().as_str(), "EAR");
}

// =============================================================================
// Marker Lists
// =============================================================================

#[tokio::test]
async fn test_featured_markers_accept_strings_and_objects() {
    let router = Router::new().route(
        "/api/FeaturedCategory/getall",
        json_route(json!({"items": ["C1", {"code": "C2"}, {"id": "C3"}, {"code": ""}]})),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let codes: Vec<String> = state
        .services()
        .featured_categories
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.code.into_inner())
        .collect();
    assert_eq!(codes, vec!["C1", "C2", "C3"]);
}

#[tokio::test]
async fn test_artisan_fav_create_and_delete() {
    let router = Router::new()
        .route(
            "/api/ArtisanFav/create",
            post(|axum::Json(body): axum::Json<Value>| async move {
                assert_eq!(body, json!({"sku": "BP-RNG-001"}));
                StatusCode::OK
            }),
        )
        .route(
            "/api/ArtisanFav/delete/{sku}",
            delete(|Path(sku): Path<String>| async move {
                assert_eq!(sku, "BP-RNG-001");
                StatusCode::NO_CONTENT
            }),
        );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();
    let sku = Sku::new("BP-RNG-001");

    state.services().artisan_favs.create(&sku).await.unwrap();
    state.services().artisan_favs.delete(&sku).await.unwrap();

    assert_eq!(backend.hits("DELETE", "/api/ArtisanFav/delete/BP-RNG-001"), 1);
}

// =============================================================================
// Images
// =============================================================================

#[tokio::test]
async fn test_image_listing_failure_propagates() {
    let router = Router::new().route(
        "/api/FileUpload/getAllImagesForSkuId",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let err = state
        .services()
        .files
        .get_images(&Sku::new("S1"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "401 Unauthorized");
}

#[tokio::test]
async fn test_image_listing_empty_payload() {
    let router = Router::new().route(
        "/api/FileUpload/getAllImagesForSkuId",
        get(|| async { StatusCode::NO_CONTENT }),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();

    let images = state.services().files.get_images(&Sku::new("S1")).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_image_listing_and_delete() {
    let router = Router::new()
        .route(
            "/api/FileUpload/getAllImagesForSkuId",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("skuId").map(String::as_str), Some("S1"));
                axum::Json(json!(["img-1", "img-2"]))
            }),
        )
        .route(
            "/api/FileUpload/deleteproductimage",
            delete(|| async { StatusCode::OK }),
        )
        .route(
            "/api/FileUpload/downloadByimageId",
            get(|| async { vec![7_u8, 7, 7] }),
        );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();
    let files = &state.services().files;
    let sku = Sku::new("S1");

    let images = files.get_images(&sku).await.unwrap();
    assert_eq!(images, vec![ImageId::new("img-1"), ImageId::new("img-2")]);

    let bytes = files.download(&sku, &images[0]).await.unwrap();
    assert_eq!(bytes, vec![7, 7, 7]);

    files.delete(&sku, &images[1]).await.unwrap();
    let deletes: Vec<_> = backend
        .requests()
        .into_iter()
        .filter(|r| r.method == "DELETE")
        .collect();
    assert_eq!(deletes[0].query.as_deref(), Some("skuId=S1&imageId=img-2"));
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_login_returns_credentials_without_touching_session() {
    let router = Router::new().route(
        "/login",
        post(|axum::Json(body): axum::Json<Value>| async move {
            assert_eq!(body, json!({"username": "admin", "password": "pw"}));
            axum::Json(json!({
                "token": "jwt-token",
                "expiration": "2099-01-01T00:00:00Z",
                "userId": "u-42"
            }))
        }),
    );
    let backend = FakeBackend::start(router).await;
    let (state, storage) = backend.console();

    let response = state.services().auth.login("admin", "pw").await.unwrap();

    assert_eq!(response.token.expose_secret(), "jwt-token");
    assert_eq!(response.user_id.as_str(), "u-42");
    assert!(!state.session().is_authenticated());
    assert_eq!(storage.writes(), 0);
}

#[tokio::test]
async fn test_rejected_login() {
    let router = Router::new().route(
        "/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({"message": "Invalid credentials"})),
            )
        }),
    );
    let backend = FakeBackend::start(router).await;
    let (state, _) = backend.console();

    let err = state.services().auth.login("admin", "bad").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_hash_accepts_text_and_json_strings() {
    let router = Router::new().route(
        "/hashme/{key}",
        get(|Path(key): Path<String>| async move {
            if key == "plain" {
                "abc123".into_response()
            } else {
                axum::Json(json!(format!("hash-of-{key}"))).into_response()
            }
        }),
    );
    let backend = FakeBackend::start(router).await;
    let state = backend.logged_in_console();
    let auth = &state.services().auth;

    assert_eq!(auth.hash("plain").await.unwrap(), "abc123");
    assert_eq!(auth.hash("a b").await.unwrap(), "hash-of-a b");
}
