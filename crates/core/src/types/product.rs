//! Product type as listed by the catalog API.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, CollectionId, FeatureId, MaterialId, Sku};
use super::price::Price;
use super::status::ProductStatus;

/// A catalog product.
///
/// Classification codes are optional: products created before a taxonomy
/// existed come back without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stock keeping unit, the product's stable identifier.
    pub sku: Sku,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Category code.
    pub category: Option<CategoryId>,
    /// Material code.
    pub material: Option<MaterialId>,
    /// Feature codes attached to the product.
    pub feature_codes: Vec<FeatureId>,
    /// Collection code.
    pub collection_code: Option<CollectionId>,
    /// Year component of the SKU scheme.
    pub year_code: u32,
    /// Sequence component of the SKU scheme.
    pub sequence_code: u32,
    /// Publication status.
    pub status: ProductStatus,
}
