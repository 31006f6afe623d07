//! Categories promoted on the storefront home page.

use bluepenguin_core::{CategoryId, FeaturedCategory};
use serde::Serialize;
use tracing::{info, instrument};

use super::{fields, logged, segment};
use crate::api::{ApiClient, ApiError, RequestOptions};

#[derive(Serialize)]
struct FeaturedRequest<'a> {
    code: &'a str,
}

/// Featured category endpoints.
#[derive(Debug, Clone)]
pub struct FeaturedCategoryService {
    api: ApiClient,
}

impl FeaturedCategoryService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List featured category markers. Markers without a code are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<FeaturedCategory>, ApiError> {
        let result = self
            .api
            .get("/api/FeaturedCategory/getall", RequestOptions::new())
            .await;
        let payload = logged(result, "fetch featured categories")?.into_json();

        Ok(fields::list_items(payload)
            .iter()
            .filter_map(|item| fields::marker_code(item, fields::FEATURED_CODE))
            .map(|code| FeaturedCategory { code: code.into() })
            .collect())
    }

    /// Mark a category as featured.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, code), fields(code = %code))]
    pub async fn create(&self, code: &CategoryId) -> Result<(), ApiError> {
        let body = FeaturedRequest {
            code: code.as_str(),
        };
        let result = self
            .api
            .post("/api/FeaturedCategory/create", &body, RequestOptions::new())
            .await;
        logged(result, "create featured category")?;

        info!("Featured category added");
        Ok(())
    }

    /// Remove a category from the featured set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, code), fields(code = %code))]
    pub async fn delete(&self, code: &CategoryId) -> Result<(), ApiError> {
        let path = format!("/api/FeaturedCategory/delete/{}", segment(code.as_str()));
        let result = self.api.delete(&path, RequestOptions::new()).await;
        logged(result, "delete featured category")?;

        info!("Featured category removed");
        Ok(())
    }
}
