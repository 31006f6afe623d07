//! Authentication session for the admin console.
//!
//! The [`SessionManager`] owns the bearer token, user id and token expiry
//! returned by `/login`. It is constructed explicitly and shared via `Arc`
//! with the API client (for header injection) and the route guard.
//!
//! # Lifecycle
//!
//! 1. [`SessionManager::load`] rehydrates the session from storage at start-up
//! 2. [`SessionManager::set_auth`] stores a new session after a successful login
//! 3. [`SessionManager::clear_auth`] wipes it on logout
//!
//! Every mutation is written through to storage before returning.

mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

use std::sync::Arc;

use bluepenguin_core::UserId;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

/// Storage keys for the persisted session.
pub mod keys {
    /// Key for the bearer token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the authenticated user's id.
    pub const USER_ID: &str = "user_id";

    /// Key for the token expiry timestamp.
    pub const TOKEN_EXPIRATION: &str = "token_expiration";
}

/// Token values that upstream code produces when it stringifies a missing value.
const SENTINEL_TOKENS: &[&str] = &["null", "undefined"];

/// Whether `token` can be sent as a bearer credential.
#[must_use]
pub fn is_usable_token(token: &str) -> bool {
    !token.is_empty() && !SENTINEL_TOKENS.contains(&token)
}

/// Parse a token expiry as emitted by the backend.
///
/// Accepts RFC 3339 timestamps and offset-less ISO timestamps, which are
/// read as UTC.
#[must_use]
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Snapshot of the session state.
#[derive(Clone, Default)]
pub struct Session {
    /// Bearer token.
    pub token: Option<SecretString>,
    /// Authenticated user.
    pub user_id: Option<UserId>,
    /// When the token stops being valid.
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Session {
    /// Whether the session is authenticated at `now`.
    ///
    /// Requires a usable token and an expiry strictly after `now`.
    #[must_use]
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        let has_token = self
            .token
            .as_ref()
            .is_some_and(|t| is_usable_token(t.expose_secret()));
        has_token && self.expires_at.is_some_and(|exp| exp > now)
    }
}

/// Owner of the current authentication session.
pub struct SessionManager {
    state: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a manager with an empty session, without reading storage.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: RwLock::new(Session::default()),
            storage,
        }
    }

    /// Rehydrate the session persisted in `storage`.
    ///
    /// Sentinel tokens and unparseable expiries are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend cannot be read.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Result<Self, StorageError> {
        let token = storage
            .get(keys::AUTH_TOKEN)?
            .filter(|t| is_usable_token(t))
            .map(SecretString::from);
        let user_id = storage.get(keys::USER_ID)?.map(UserId::from);
        let expires_at = storage
            .get(keys::TOKEN_EXPIRATION)?
            .as_deref()
            .and_then(parse_expiration);

        debug!(
            has_token = token.is_some(),
            expires_at = ?expires_at,
            "Session loaded from storage"
        );

        Ok(Self {
            state: RwLock::new(Session {
                token,
                user_id,
                expires_at,
            }),
            storage,
        })
    }

    /// Store a new session.
    ///
    /// An empty or sentinel token is logged and ignored: the current session
    /// and storage are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the session fails. The current
    /// session is then left unchanged.
    pub fn set_auth(
        &self,
        token: &str,
        user_id: impl Into<UserId>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        if !is_usable_token(token) {
            warn!("Attempted to set an invalid token, keeping the current session");
            return Ok(());
        }

        let user_id = user_id.into();
        let expiration = expires_at.to_rfc3339_opts(SecondsFormat::Secs, true);

        self.storage.set_many(&[
            (keys::AUTH_TOKEN, token),
            (keys::USER_ID, user_id.as_str()),
            (keys::TOKEN_EXPIRATION, expiration.as_str()),
        ])?;

        *self.state.write() = Session {
            token: Some(SecretString::from(token)),
            user_id: Some(user_id.clone()),
            expires_at: Some(expires_at),
        };

        debug!(user_id = %user_id, expires_at = %expiration, "Session stored");
        Ok(())
    }

    /// Clear the session and its storage entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a storage entry cannot be removed. The
    /// in-memory session is cleared regardless.
    pub fn clear_auth(&self) -> Result<(), StorageError> {
        *self.state.write() = Session::default();

        self.storage
            .remove_many(&[keys::AUTH_TOKEN, keys::USER_ID, keys::TOKEN_EXPIRATION])?;

        debug!("Session cleared");
        Ok(())
    }

    /// Whether the session is authenticated right now.
    ///
    /// Expiry is evaluated on every call.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Whether the session is authenticated at `now`.
    #[must_use]
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.state.read().is_authenticated_at(now)
    }

    /// The token to send as a bearer credential, if one is usable.
    ///
    /// Expiry is not checked; the backend decides whether to accept it.
    #[must_use]
    pub fn bearer_token(&self) -> Option<SecretString> {
        self.state
            .read()
            .token
            .as_ref()
            .filter(|t| is_usable_token(t.expose_secret()))
            .cloned()
    }

    /// The authenticated user's id.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.state.read().user_id.clone()
    }

    /// When the current token expires.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().expires_at
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }
}
