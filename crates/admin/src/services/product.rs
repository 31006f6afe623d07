//! Product listing and search.

use bluepenguin_core::{CategoryId, CollectionId, FeatureId, MaterialId, Product};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{fields, logged};
use crate::api::{ApiClient, ApiError, RequestOptions};

/// Default page size for product search.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Product search filter, sent as the search request body.
///
/// Empty lists match everything.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearch {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_collections: Vec<CollectionId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_categories: Vec<CategoryId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_materials: Vec<MaterialId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_features: Vec<FeatureId>,
}

impl ProductSearch {
    /// Filter matching one collection.
    #[must_use]
    pub fn for_collection(id: CollectionId) -> Self {
        Self {
            selected_collections: vec![id],
            ..Self::default()
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Matches across all pages.
    pub total_count: u64,
}

/// Product endpoints.
#[derive(Debug, Clone)]
pub struct ProductService {
    api: ApiClient,
}

impl ProductService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Product>, ApiError> {
        let result = self.api.get("/api/Product/getall", RequestOptions::new()).await;
        let payload = logged(result, "fetch products")?.into_json();

        let products: Vec<Product> = fields::list_items(payload)
            .iter()
            .filter_map(fields::product_from)
            .collect();

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Search products. `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        filter: &ProductSearch,
        page: u32,
        page_size: u32,
    ) -> Result<ProductPage, ApiError> {
        let payload = logged(self.search_raw(filter, page, page_size).await, "search products")?;

        let total_count = fields::total_count(&payload);
        let items = fields::list_items(payload)
            .iter()
            .filter_map(fields::product_from)
            .collect();

        Ok(ProductPage { items, total_count })
    }

    /// Number of products matching `filter`.
    ///
    /// Failures are returned without logging; callers fanning out over many
    /// filters decide how loud a single miss should be.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn count(&self, filter: &ProductSearch) -> Result<u64, ApiError> {
        let payload = self.search_raw(filter, 1, 1).await?;
        Ok(fields::total_count(&payload))
    }

    async fn search_raw(
        &self,
        filter: &ProductSearch,
        page: u32,
        page_size: u32,
    ) -> Result<Value, ApiError> {
        let options = RequestOptions::new()
            .param("page", page.max(1))
            .param("pageSize", page_size.max(1));
        let body = self.api.post("/api/Product/search", filter, options).await?;
        Ok(body.into_json())
    }
}
