//! Catalog entities: categories, collections, materials and features.
//!
//! Collections, materials and features share one shape and are modelled as
//! [`CatalogEntry`] with a different code type. Categories additionally carry
//! the featured flag.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, CollectionId, FeatureId, MaterialId, Sku};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable external identifier (the backend row key).
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Number of products in the category. Aggregate, not authoritative.
    pub product_count: u64,
    /// Whether the category is shown in the storefront.
    pub is_active: bool,
    /// Whether the category is promoted to the featured list.
    pub is_featured: bool,
}

/// A named catalog grouping keyed by a code of type `I`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry<I> {
    /// Stable external identifier.
    pub id: I,
    /// Display name.
    pub name: String,
    /// Number of products tagged with this entry.
    pub product_count: u64,
    /// Whether the entry is active.
    pub is_active: bool,
}

/// A product collection.
pub type Collection = CatalogEntry<CollectionId>;

/// A product material.
pub type Material = CatalogEntry<MaterialId>;

/// A product feature.
pub type Feature = CatalogEntry<FeatureId>;

/// Marker entity promoting a category to featured status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeaturedCategory {
    /// The featured category's id.
    pub code: CategoryId,
}

/// Marker entity flagging a product as an artisan favourite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtisanFav {
    /// The product's SKU.
    pub sku: Sku,
}
