//! Bluepenguin Admin library.
//!
//! Client-side core of the Bluepenguin admin console: everything between a
//! front end and the backend REST API.
//!
//! # Modules
//!
//! - [`api`] - Authenticated HTTP client with response normalization
//! - [`session`] - Bearer token, user id and expiry with durable storage
//! - [`services`] - One resource service per backend entity
//! - [`stores`] - In-memory domain stores (categories and the featured cap)
//! - [`guard`] - Navigation guard for console routes
//! - [`config`] - Environment configuration
//! - [`state`] - All of the above wired together
//!
//! # Security
//!
//! The session token grants full catalog write access. It is held as a
//! `SecretString` and never appears in `Debug` output or logs.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod guard;
pub mod services;
pub mod session;
pub mod state;
pub mod stores;

pub use api::{ApiClient, ApiError, RequestOptions, ResponseBody};
pub use config::{AdminConfig, ConfigError};
pub use guard::{Navigation, Route, RouteGuard};
pub use session::{FileStorage, MemoryStorage, SessionManager, SessionStorage, StorageError};
pub use state::{ConsoleState, StateError};
pub use stores::{CategoryStore, StoreError};
