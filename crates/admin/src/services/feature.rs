//! Product features (hand-made, adjustable, ...).

use bluepenguin_core::{Feature, FeatureId};
use serde::Serialize;
use tracing::{info, instrument};

use super::{fields, logged};
use crate::api::{ApiClient, ApiError, RequestOptions};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureRequest<'a> {
    feature_id: &'a str,
    feature_name: &'a str,
}

/// Feature endpoints.
#[derive(Debug, Clone)]
pub struct FeatureService {
    api: ApiClient,
}

impl FeatureService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all features.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Feature>, ApiError> {
        let result = self.api.get("/api/Feature/getall", RequestOptions::new()).await;
        let payload = logged(result, "fetch features")?.into_json();

        Ok(fields::list_items(payload)
            .iter()
            .filter_map(|item| fields::catalog_entry_from(&fields::FEATURE, item))
            .collect())
    }

    /// Create a feature.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn create(&self, id: &FeatureId, name: &str) -> Result<(), ApiError> {
        let body = FeatureRequest {
            feature_id: id.as_str(),
            feature_name: name,
        };
        let result = self
            .api
            .post("/api/Feature/create", &body, RequestOptions::new())
            .await;
        logged(result, "create feature")?;

        info!(name, "Created feature");
        Ok(())
    }
}
