//! Field resolution tables for backend payloads.
//!
//! The backend has renamed properties several times, so every logical field
//! is looked up through an ordered list of candidate property names. The
//! tables below are the single place to audit against the live schema.
//!
//! Resolution rules:
//! - strings skip missing, null and empty values
//! - counts skip missing, null and zero values
//! - flags skip missing and null values only (an explicit `false` wins)

use std::str::FromStr;

use bluepenguin_core::{CatalogEntry, Category, Price, Product, ProductStatus};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

/// Candidate property names for a catalog entity.
#[derive(Debug, Clone, Copy)]
pub struct CatalogFields {
    /// Entity name used in fallback display names and logs.
    pub entity: &'static str,
    pub id: &'static [&'static str],
    pub name: &'static [&'static str],
    pub product_count: &'static [&'static str],
    pub is_active: &'static [&'static str],
    pub is_featured: &'static [&'static str],
}

pub const CATEGORY: CatalogFields = CatalogFields {
    entity: "Category",
    id: &["rowKey", "id"],
    name: &["title", "name"],
    product_count: &["productCount", "itemCount"],
    is_active: &["isActive"],
    is_featured: &["isFeatured"],
};

pub const COLLECTION: CatalogFields = CatalogFields {
    entity: "Collection",
    id: &["collectionId", "rowKey", "id"],
    name: &["collectionName", "title", "name"],
    product_count: &["productCount"],
    is_active: &["isActive"],
    is_featured: &[],
};

pub const MATERIAL: CatalogFields = CatalogFields {
    entity: "Material",
    id: &["rowKey", "id"],
    name: &["title", "name"],
    product_count: &["itemCount", "productCount"],
    is_active: &["isActive"],
    is_featured: &[],
};

pub const FEATURE: CatalogFields = CatalogFields {
    entity: "Feature",
    id: &["featureId", "rowKey", "id"],
    name: &["featureName", "title", "name"],
    product_count: &["productCount"],
    is_active: &["isActive"],
    is_featured: &[],
};

/// Candidate property names for a product.
#[derive(Debug, Clone, Copy)]
pub struct ProductFields {
    pub sku: &'static [&'static str],
    pub name: &'static [&'static str],
    pub description: &'static [&'static str],
    pub price: &'static [&'static str],
    pub category: &'static [&'static str],
    pub material: &'static [&'static str],
    pub feature_codes: &'static [&'static str],
    pub collection_code: &'static [&'static str],
    pub year_code: &'static [&'static str],
    pub sequence_code: &'static [&'static str],
    pub status: &'static [&'static str],
}

pub const PRODUCT: ProductFields = ProductFields {
    sku: &["sku", "skuId"],
    name: &["productName", "name"],
    description: &["description"],
    price: &["price"],
    category: &["categoryCode"],
    material: &["material", "materialCode"],
    feature_codes: &["featureCodes"],
    collection_code: &["collectionCode"],
    year_code: &["yearCode"],
    sequence_code: &["sequenceCode"],
    status: &["status"],
};

/// Candidate properties for featured-category markers.
pub const FEATURED_CODE: &[&str] = &["code", "id"];

/// Candidate properties for artisan-favourite markers.
pub const ARTISAN_FAV_SKU: &[&str] = &["sku", "skuId", "id"];

/// Candidate properties for a search result's total.
pub const TOTAL_COUNT: &[&str] = &["totalCount"];

// =============================================================================
// Resolution
// =============================================================================

fn candidates<'a>(item: &'a Value, names: &'a [&'a str]) -> impl Iterator<Item = &'a Value> {
    names.iter().filter_map(|name| item.get(*name))
}

/// First non-empty string (or non-zero number, stringified) among `names`.
#[must_use]
pub fn resolve_str(item: &Value, names: &[&str]) -> Option<String> {
    candidates(item, names).find_map(|value| match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// First non-zero, non-negative count among `names`.
#[must_use]
pub fn resolve_count(item: &Value, names: &[&str]) -> Option<u64> {
    candidates(item, names).find_map(|value| match value {
        Value::Number(n) => n.as_u64().filter(|&c| c > 0),
        Value::String(s) => s.trim().parse::<u64>().ok().filter(|&c| c > 0),
        _ => None,
    })
}

/// First non-null boolean among `names`.
#[must_use]
pub fn resolve_bool(item: &Value, names: &[&str]) -> Option<bool> {
    candidates(item, names).find_map(Value::as_bool)
}

/// First non-zero decimal among `names`.
#[must_use]
pub fn resolve_decimal(item: &Value, names: &[&str]) -> Option<Decimal> {
    candidates(item, names).find_map(|value| {
        let parsed = match value {
            Value::Number(n) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .ok(),
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        };
        parsed.filter(|d| !d.is_zero())
    })
}

/// First array of strings among `names`, keeping only non-empty entries.
#[must_use]
pub fn resolve_str_list(item: &Value, names: &[&str]) -> Option<Vec<String>> {
    candidates(item, names).find_map(|value| {
        value.as_array().map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
    })
}

/// Normalize a list payload: a bare array or an `{ items, totalCount }` envelope.
#[must_use]
pub fn list_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Total reported by a search payload, or zero.
#[must_use]
pub fn total_count(payload: &Value) -> u64 {
    resolve_count(payload, TOTAL_COUNT).unwrap_or(0)
}

// =============================================================================
// Mapping
// =============================================================================

/// Map a category payload. Returns `None` (with a warning) if it has no id.
#[must_use]
pub fn category_from(item: &Value) -> Option<Category> {
    let entry: CatalogEntry<String> = catalog_entry_from(&CATEGORY, item)?;
    Some(Category {
        id: entry.id.into(),
        name: entry.name,
        product_count: entry.product_count,
        is_active: entry.is_active,
        is_featured: resolve_bool(item, CATEGORY.is_featured).unwrap_or(false),
    })
}

/// Map a catalog entry payload. Returns `None` (with a warning) if it has no id.
#[must_use]
pub fn catalog_entry_from<I: From<String>>(
    fields: &CatalogFields,
    item: &Value,
) -> Option<CatalogEntry<I>> {
    let Some(id) = resolve_str(item, fields.id) else {
        warn!(entity = fields.entity, payload = %item, "Dropping entry without an id");
        return None;
    };

    Some(CatalogEntry {
        id: I::from(id),
        name: resolve_str(item, fields.name)
            .unwrap_or_else(|| format!("Unknown {}", fields.entity)),
        product_count: resolve_count(item, fields.product_count).unwrap_or(0),
        is_active: resolve_bool(item, fields.is_active).unwrap_or(true),
    })
}

/// Map a product payload. Returns `None` (with a warning) if it has no SKU.
#[must_use]
pub fn product_from(item: &Value) -> Option<Product> {
    let Some(sku) = resolve_str(item, PRODUCT.sku) else {
        warn!(payload = %item, "Dropping product without a SKU");
        return None;
    };

    let code = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);

    Some(Product {
        sku: sku.into(),
        name: resolve_str(item, PRODUCT.name).unwrap_or_else(|| "Unknown Product".to_string()),
        description: resolve_str(item, PRODUCT.description),
        price: Price::home(resolve_decimal(item, PRODUCT.price).unwrap_or_default()),
        category: resolve_str(item, PRODUCT.category).map(Into::into),
        material: resolve_str(item, PRODUCT.material).map(Into::into),
        feature_codes: resolve_str_list(item, PRODUCT.feature_codes)
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect(),
        collection_code: resolve_str(item, PRODUCT.collection_code).map(Into::into),
        year_code: resolve_count(item, PRODUCT.year_code).map_or(0, code),
        sequence_code: resolve_count(item, PRODUCT.sequence_code).map_or(0, code),
        status: resolve_str(item, PRODUCT.status)
            .and_then(|s| s.parse::<ProductStatus>().ok())
            .unwrap_or_default(),
    })
}

/// Code carried by a marker payload: either the string itself or an object
/// property from `names`.
#[must_use]
pub fn marker_code(item: &Value, names: &[&str]) -> Option<String> {
    match item {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => resolve_str(item, names),
        _ => None,
    }
}
