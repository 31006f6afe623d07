//! Products marked as artisan favourites.

use bluepenguin_core::{ArtisanFav, Sku};
use serde::Serialize;
use tracing::{info, instrument};

use super::{fields, logged, segment};
use crate::api::{ApiClient, ApiError, RequestOptions};

#[derive(Serialize)]
struct ArtisanFavRequest<'a> {
    sku: &'a str,
}

/// Artisan favourite endpoints.
#[derive(Debug, Clone)]
pub struct ArtisanFavService {
    api: ApiClient,
}

impl ArtisanFavService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List artisan favourites. Markers without a SKU are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ArtisanFav>, ApiError> {
        let result = self.api.get("/api/ArtisanFav/getall", RequestOptions::new()).await;
        let payload = logged(result, "fetch artisan favourites")?.into_json();

        Ok(fields::list_items(payload)
            .iter()
            .filter_map(|item| fields::marker_code(item, fields::ARTISAN_FAV_SKU))
            .map(|sku| ArtisanFav { sku: sku.into() })
            .collect())
    }

    /// Mark a product as an artisan favourite.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, sku), fields(sku = %sku))]
    pub async fn create(&self, sku: &Sku) -> Result<(), ApiError> {
        let body = ArtisanFavRequest { sku: sku.as_str() };
        let result = self
            .api
            .post("/api/ArtisanFav/create", &body, RequestOptions::new())
            .await;
        logged(result, "create artisan favourite")?;

        info!("Artisan favourite added");
        Ok(())
    }

    /// Unmark a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, sku), fields(sku = %sku))]
    pub async fn delete(&self, sku: &Sku) -> Result<(), ApiError> {
        let path = format!("/api/ArtisanFav/delete/{}", segment(sku.as_str()));
        let result = self.api.delete(&path, RequestOptions::new()).await;
        logged(result, "delete artisan favourite")?;

        info!("Artisan favourite removed");
        Ok(())
    }
}
