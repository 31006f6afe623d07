//! Client-side domain stores.
//!
//! A store owns the console's in-memory view of one backend collection,
//! together with the loading and error state a front end renders.

pub mod category;

pub use category::{CategoryState, CategoryStore, MAX_FEATURED_CATEGORIES};

use thiserror::Error;

use crate::api::ApiError;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Adding another featured category would exceed the cap.
    #[error("Maximum of {max} featured categories allowed.")]
    FeaturedLimit { max: usize },

    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The in-flight fetch this call waited on failed with this message.
    #[error("{0}")]
    Fetch(String),
}

impl StoreError {
    /// Whether the backend rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}
