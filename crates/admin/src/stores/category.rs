//! Category store with featured-category management.
//!
//! # Featured cap
//!
//! At most [`MAX_FEATURED_CATEGORIES`] categories may be featured. The cap
//! is checked against local state before any request is made, so a rejected
//! toggle costs no network traffic. Toggles are serialized through a
//! mutation gate held from the check until the local flag is updated, so
//! concurrent adds cannot both pass the check.
//!
//! # Overlapping fetches
//!
//! Fetches are serialized through a gate. A caller that arrives while a
//! fetch is running waits for it and returns that fetch's outcome rather
//! than issuing a second request.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use bluepenguin_core::{Category, CategoryId};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

use super::StoreError;
use crate::api::ApiClient;
use crate::services::{CategoryService, FeaturedCategoryService};

/// Maximum number of featured categories.
pub const MAX_FEATURED_CATEGORIES: usize = 4;

/// Observable store state.
#[derive(Debug, Clone, Default)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub is_loading: bool,
    /// Message of the last failed operation, cleared when the next one starts.
    pub error: Option<String>,
}

impl CategoryState {
    /// Ids of featured categories, in listing order.
    #[must_use]
    pub fn featured_codes(&self) -> Vec<CategoryId> {
        self.categories
            .iter()
            .filter(|c| c.is_featured)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Whether `id` is featured. Unknown ids are not.
    #[must_use]
    pub fn is_featured(&self, id: &CategoryId) -> bool {
        self.categories
            .iter()
            .find(|c| &c.id == id)
            .is_some_and(|c| c.is_featured)
    }
}

#[derive(Default)]
struct Inner {
    view: CategoryState,
    /// Outcome of the most recent fetch, handed to callers that joined it.
    last_fetch_error: Option<String>,
}

/// Category store.
pub struct CategoryStore {
    categories: CategoryService,
    featured: FeaturedCategoryService,
    state: RwLock<Inner>,
    fetch_gate: Mutex<()>,
    mutation_gate: Mutex<()>,
    /// Completed fetches, used to detect that a fetch finished while waiting.
    fetches: AtomicU64,
}

impl std::fmt::Debug for CategoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryStore")
            .field("fetches", &self.fetches.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl CategoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        Self {
            categories: CategoryService::new(api.clone()),
            featured: FeaturedCategoryService::new(api.clone()),
            state: RwLock::new(Inner::default()),
            fetch_gate: Mutex::new(()),
            mutation_gate: Mutex::new(()),
            fetches: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub async fn snapshot(&self) -> CategoryState {
        self.state.read().await.view.clone()
    }

    /// Current categories.
    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.view.categories.clone()
    }

    /// Ids of featured categories.
    pub async fn featured_codes(&self) -> Vec<CategoryId> {
        self.state.read().await.view.featured_codes()
    }

    /// Whether `id` is featured.
    pub async fn is_featured(&self, id: &CategoryId) -> bool {
        self.state.read().await.view.is_featured(id)
    }

    /// Message of the last failed operation.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.view.error.clone()
    }

    /// Reload categories and their featured flags from the backend.
    ///
    /// A category is featured if the backend flags it or it appears in the
    /// featured-category listing. If only the featured listing fails, the
    /// backend flags are used as-is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Api` if the category listing fails, or
    /// `StoreError::Fetch` if this call joined a fetch that failed. The
    /// message is also recorded in [`CategoryState::error`].
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<(), StoreError> {
        let observed = self.fetches.load(Ordering::SeqCst);
        let _gate = self.fetch_gate.lock().await;

        if self.fetches.load(Ordering::SeqCst) != observed {
            debug!("Joined in-flight category fetch");
            return match &self.state.read().await.last_fetch_error {
                Some(message) => Err(StoreError::Fetch(message.clone())),
                None => Ok(()),
            };
        }

        {
            let mut state = self.state.write().await;
            state.view.is_loading = true;
            state.view.error = None;
        }

        let (categories, featured) =
            tokio::join!(self.categories.get_all(), self.featured.get_all());

        let outcome = categories.map(|mut categories| {
            match featured {
                Ok(featured) => {
                    let codes: HashSet<CategoryId> =
                        featured.into_iter().map(|f| f.code).collect();
                    for category in &mut categories {
                        category.is_featured |= codes.contains(&category.id);
                    }
                }
                Err(e) => warn!(error = %e, "Featured lookup failed, using category flags"),
            }
            categories
        });

        let mut state = self.state.write().await;
        state.view.is_loading = false;
        let result = match outcome {
            Ok(categories) => {
                debug!(count = categories.len(), "Categories loaded");
                state.view.categories = categories;
                state.last_fetch_error = None;
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %message, "Failed to fetch categories");
                state.view.error = Some(message.clone());
                state.last_fetch_error = Some(message);
                Err(StoreError::Api(e))
            }
        };
        drop(state);

        self.fetches.fetch_add(1, Ordering::SeqCst);
        result
    }

    /// Flip whether `id` is featured.
    ///
    /// The local flag only changes once the backend accepts the change.
    /// Ids not in the store are treated as not featured. Concurrent toggles
    /// run one at a time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FeaturedLimit` without contacting the backend
    /// when adding would exceed [`MAX_FEATURED_CATEGORIES`], or
    /// `StoreError::Api` if the backend call fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn toggle_featured(&self, id: &CategoryId) -> Result<(), StoreError> {
        let _gate = self.mutation_gate.lock().await;

        let currently_featured = {
            let mut state = self.state.write().await;
            state.view.error = None;

            let featured = state.view.is_featured(id);
            if !featured && state.view.featured_codes().len() >= MAX_FEATURED_CATEGORIES {
                let err = StoreError::FeaturedLimit {
                    max: MAX_FEATURED_CATEGORIES,
                };
                warn!(error = %err, "Featured limit reached");
                state.view.error = Some(err.to_string());
                return Err(err);
            }
            featured
        };

        let result = if currently_featured {
            self.featured.delete(id).await
        } else {
            self.featured.create(id).await
        };

        let mut state = self.state.write().await;
        match result {
            Ok(()) => {
                if let Some(category) = state.view.categories.iter_mut().find(|c| &c.id == id) {
                    category.is_featured = !currently_featured;
                }
                info!(featured = !currently_featured, "Featured status updated");
                Ok(())
            }
            Err(e) => {
                state.view.error = Some(e.to_string());
                Err(StoreError::Api(e))
            }
        }
    }
}
