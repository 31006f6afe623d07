//! Collections.
//!
//! The collection listing carries no product counts, so [`CollectionService::get_all`]
//! asks product search for each collection's total. Those lookups run
//! concurrently and a failed lookup leaves the count at zero instead of
//! failing the listing.

use bluepenguin_core::{Collection, CollectionId};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::product::{ProductSearch, ProductService};
use super::{fields, logged};
use crate::api::{ApiClient, ApiError, RequestOptions};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionRequest<'a> {
    collection_id: &'a str,
    collection_name: &'a str,
}

/// Collection endpoints.
#[derive(Debug, Clone)]
pub struct CollectionService {
    api: ApiClient,
    products: ProductService,
}

impl CollectionService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            products: ProductService::new(api.clone()),
            api,
        }
    }

    /// List all collections with their product counts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing fails. Count lookups never fail
    /// the call.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Collection>, ApiError> {
        let result = self.api.get("/api/Collection/getall", RequestOptions::new()).await;
        let payload = logged(result, "fetch collections")?.into_json();

        let mut collections: Vec<Collection> = fields::list_items(payload)
            .iter()
            .filter_map(|item| fields::catalog_entry_from(&fields::COLLECTION, item))
            .collect();

        let lookups = collections.iter().map(|collection| {
            let search = ProductSearch::for_collection(collection.id.clone());
            async move { self.products.count(&search).await }
        });
        let outcomes = join_all(lookups).await;

        for (collection, outcome) in collections.iter_mut().zip(outcomes) {
            match outcome {
                Ok(count) => collection.product_count = count,
                Err(e) => warn!(
                    collection = %collection.id,
                    error = %e,
                    "Could not fetch product count for collection"
                ),
            }
        }

        debug!(count = collections.len(), "Fetched collections");
        Ok(collections)
    }

    /// Find a collection by id by scanning the full listing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get_by_id(&self, id: &CollectionId) -> Result<Option<Collection>, ApiError> {
        Ok(self.get_all().await?.into_iter().find(|c| &c.id == id))
    }

    /// Create a collection.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn create(&self, id: &CollectionId, name: &str) -> Result<(), ApiError> {
        let body = CollectionRequest {
            collection_id: id.as_str(),
            collection_name: name,
        };
        let result = self
            .api
            .post("/api/Collection/create", &body, RequestOptions::new())
            .await;
        logged(result, "create collection")?;

        info!(name, "Created collection");
        Ok(())
    }

    /// Rename a collection.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn update(&self, id: &CollectionId, name: &str) -> Result<(), ApiError> {
        let body = CollectionRequest {
            collection_id: id.as_str(),
            collection_name: name,
        };
        let result = self
            .api
            .put("/api/Collection/update", &body, RequestOptions::new())
            .await;
        logged(result, "update collection")?;

        info!(name, "Updated collection");
        Ok(())
    }
}
