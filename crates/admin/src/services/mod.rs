//! Resource services for the Bluepenguin backend.
//!
//! One service per backend entity. Each wraps a shared [`ApiClient`],
//! normalizes payloads through the [`fields`] tables, and logs failures
//! before handing them back unchanged. Nothing here retries.
//!
//! # Services
//!
//! - `auth` - Login and key hashing
//! - `category` - Product categories
//! - `collection` - Collections, with product counts from product search
//! - `material` - Materials
//! - `feature` - Product features
//! - `product` - Product listing and search
//! - `featured_category` - Categories promoted on the storefront home page
//! - `artisan_fav` - Products marked as artisan favourites
//! - `file_upload` - Product image upload, listing and download

pub mod artisan_fav;
pub mod auth;
pub mod category;
pub mod collection;
pub mod feature;
pub mod featured_category;
pub mod fields;
pub mod file_upload;
pub mod material;
pub mod product;

pub use artisan_fav::ArtisanFavService;
pub use auth::{AuthService, LoginResponse};
pub use category::CategoryService;
pub use collection::CollectionService;
pub use feature::FeatureService;
pub use featured_category::FeaturedCategoryService;
pub use file_upload::{FileUploadService, ImageUpload};
pub use material::MaterialService;
pub use product::{ProductPage, ProductSearch, ProductService};

use tracing::error;

use crate::api::{ApiClient, ApiError};

/// All resource services over one client.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub categories: CategoryService,
    pub collections: CollectionService,
    pub materials: MaterialService,
    pub features: FeatureService,
    pub products: ProductService,
    pub featured_categories: FeaturedCategoryService,
    pub artisan_favs: ArtisanFavService,
    pub files: FileUploadService,
}

impl Services {
    /// Build every service over `api`.
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            categories: CategoryService::new(api.clone()),
            collections: CollectionService::new(api.clone()),
            materials: MaterialService::new(api.clone()),
            features: FeatureService::new(api.clone()),
            products: ProductService::new(api.clone()),
            featured_categories: FeaturedCategoryService::new(api.clone()),
            artisan_favs: ArtisanFavService::new(api.clone()),
            files: FileUploadService::new(api.clone()),
        }
    }
}

/// Log a failed backend call and pass the result through.
pub(crate) fn logged<T>(result: Result<T, ApiError>, action: &str) -> Result<T, ApiError> {
    result.inspect_err(|e| error!(error = %e, status = ?e.status(), "Failed to {action}"))
}

/// Percent-encode a value used as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
