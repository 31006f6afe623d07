//! Core types for Bluepenguin.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod catalog;
pub mod id;
pub mod occasion;
pub mod price;
pub mod product;
pub mod status;

pub use catalog::{
    ArtisanFav, CatalogEntry, Category, Collection, Feature, FeaturedCategory, Material,
};
pub use id::*;
pub use occasion::{Occasion, OccasionKind};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::*;
