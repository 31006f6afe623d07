//! Materials.

use bluepenguin_core::Material;
use tracing::instrument;

use super::{fields, logged};
use crate::api::{ApiClient, ApiError, RequestOptions};

/// Material endpoints.
#[derive(Debug, Clone)]
pub struct MaterialService {
    api: ApiClient,
}

impl MaterialService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all materials.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Material>, ApiError> {
        let result = self.api.get("/api/Material/getall", RequestOptions::new()).await;
        let payload = logged(result, "fetch materials")?.into_json();

        Ok(fields::list_items(payload)
            .iter()
            .filter_map(|item| fields::catalog_entry_from(&fields::MATERIAL, item))
            .collect())
    }
}
