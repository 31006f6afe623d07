//! Product categories.

use bluepenguin_core::{Category, CategoryId};
use tracing::{debug, instrument};

use super::{fields, logged};
use crate::api::{ApiClient, ApiError, RequestOptions};

/// Category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Category>, ApiError> {
        let result = self.api.get("/api/Category/getall", RequestOptions::new()).await;
        let payload = logged(result, "fetch categories")?.into_json();

        let categories: Vec<Category> = fields::list_items(payload)
            .iter()
            .filter_map(fields::category_from)
            .collect();

        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// Find a category by id. There is no single-item endpoint, so this
    /// scans the full listing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get_by_id(&self, id: &CategoryId) -> Result<Option<Category>, ApiError> {
        Ok(self.get_all().await?.into_iter().find(|c| &c.id == id))
    }
}
