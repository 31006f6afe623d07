//! CLI command implementations.
//!
//! Every command that reaches a console page first asks the route guard
//! whether navigation may proceed, exactly as the console does when a page
//! is opened.

pub mod auth;
pub mod catalog;
pub mod images;
pub mod occasions;
pub mod products;

use std::path::PathBuf;

use bluepenguin_admin::{
    ApiError, ConfigError, ConsoleState, Navigation, Route, StateError, StorageError, StoreError,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The guard refused navigation.
    #[error("Not logged in; run `bp-cli login` to continue to {redirect}")]
    NotAuthenticated { redirect: String },

    #[error("File error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CliError {
    /// Whether the backend rejected the stored credentials.
    pub const fn is_unauthorized(&self) -> bool {
        match self {
            Self::Api(e) => e.is_unauthorized(),
            Self::Store(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

/// Run the navigation guard for `route`.
fn require(state: &ConsoleState, route: &Route) -> Result<(), CliError> {
    match state.guard().check_route(route) {
        Navigation::Proceed => Ok(()),
        Navigation::RedirectToLogin { redirect } => Err(CliError::NotAuthenticated { redirect }),
    }
}

/// Print command output.
#[allow(clippy::print_stdout)]
fn emit(line: impl std::fmt::Display) {
    println!("{line}");
}

/// Render a yes/no column.
const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
