//! Console state shared by every front-end command.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::config::AdminConfig;
use crate::guard::RouteGuard;
use crate::services::Services;
use crate::session::{FileStorage, SessionManager, SessionStorage, StorageError};
use crate::stores::CategoryStore;

/// Errors raised while assembling the console state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The stored session could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Session, client, services and stores wired together.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct ConsoleState {
    inner: Arc<ConsoleStateInner>,
}

struct ConsoleStateInner {
    config: AdminConfig,
    session: Arc<SessionManager>,
    api: ApiClient,
    services: Services,
    categories: CategoryStore,
    guard: RouteGuard,
}

impl std::fmt::Debug for ConsoleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleState")
            .field("api", &self.inner.api)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl ConsoleState {
    /// Build the state with the session persisted at `config.session_file`.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the stored session is unreadable or the HTTP
    /// client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, StateError> {
        let storage = Arc::new(FileStorage::new(config.session_file.clone()));
        Self::with_storage(config, storage)
    }

    /// Build the state over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// See [`ConsoleState::new`].
    pub fn with_storage(
        config: AdminConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, StateError> {
        let session = Arc::new(SessionManager::load(storage)?);
        let api = ApiClient::new(&config, Arc::clone(&session))?;

        Ok(Self {
            inner: Arc::new(ConsoleStateInner {
                services: Services::new(&api),
                categories: CategoryStore::new(&api),
                guard: RouteGuard::new(Arc::clone(&session)),
                config,
                session,
                api,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.inner.session
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn services(&self) -> &Services {
        &self.inner.services
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryStore {
        &self.inner.categories
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }
}
