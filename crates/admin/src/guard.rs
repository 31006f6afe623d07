//! Navigation guard for the admin console.
//!
//! Every console route requires an authenticated session except the login
//! page. Unauthenticated navigation is redirected to login with the
//! original destination carried along for the post-login return.

use std::sync::Arc;

use bluepenguin_core::Sku;
use tracing::debug;

use crate::session::SessionManager;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH];

/// A console route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Categories,
    Features,
    AddFeature,
    Collections,
    AddCollection,
    Materials,
    CreateProduct,
    ProductDetails(Sku),
}

impl Route {
    /// Route name, as used in navigation links.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Categories => "categories",
            Self::Features => "features",
            Self::AddFeature => "add-feature",
            Self::Collections => "collections",
            Self::AddCollection => "add-collection",
            Self::Materials => "materials",
            Self::CreateProduct => "create-product",
            Self::ProductDetails(_) => "product-details",
        }
    }

    /// Absolute path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Dashboard => "/".to_string(),
            Self::Categories => "/categories".to_string(),
            Self::Features => "/features".to_string(),
            Self::AddFeature => "/features/add".to_string(),
            Self::Collections => "/collections".to_string(),
            Self::AddCollection => "/collections/add".to_string(),
            Self::Materials => "/materials".to_string(),
            Self::CreateProduct => "/products/create".to_string(),
            Self::ProductDetails(sku) => format!("/products/{sku}"),
        }
    }

    /// Match a path against the route table. Query strings and trailing
    /// slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        let route = match trimmed {
            "" => Self::Dashboard,
            LOGIN_PATH => Self::Login,
            "/categories" => Self::Categories,
            "/features" => Self::Features,
            "/features/add" => Self::AddFeature,
            "/collections" => Self::Collections,
            "/collections/add" => Self::AddCollection,
            "/materials" => Self::Materials,
            "/products/create" => Self::CreateProduct,
            other => {
                let sku = other.strip_prefix("/products/")?;
                if sku.is_empty() || sku.contains('/') {
                    return None;
                }
                Self::ProductDetails(Sku::new(sku))
            }
        };
        Some(route)
    }
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigation may continue.
    Proceed,
    /// Send the user to login, returning to `redirect` afterwards.
    RedirectToLogin { redirect: String },
}

impl Navigation {
    /// Whether navigation may continue.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Gatekeeper evaluated before every navigation.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Arc<SessionManager>,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    /// Whether `path` is reachable without a session.
    #[must_use]
    pub fn is_public(path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        PUBLIC_PATHS.contains(&path)
    }

    /// Decide whether navigation to `path` may proceed.
    ///
    /// Session validity is evaluated on every call, so an expired token
    /// redirects without any explicit logout.
    #[must_use]
    pub fn check(&self, path: &str) -> Navigation {
        if Self::is_public(path) || self.session.is_authenticated() {
            return Navigation::Proceed;
        }

        debug!(path, "Redirecting unauthenticated navigation to login");
        Navigation::RedirectToLogin {
            redirect: path.to_string(),
        }
    }

    /// [`RouteGuard::check`] for a known route.
    #[must_use]
    pub fn check_route(&self, route: &Route) -> Navigation {
        self.check(&route.path())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::session::MemoryStorage;

    fn guard() -> (RouteGuard, Arc<SessionManager>) {
        let session = Arc::new(SessionManager::new(Arc::new(MemoryStorage::new())));
        (RouteGuard::new(Arc::clone(&session)), session)
    }

    #[test]
    fn test_login_is_always_public() {
        let (guard, _) = guard();
        assert_eq!(guard.check("/login"), Navigation::Proceed);
        assert_eq!(guard.check("/login?redirect=/materials"), Navigation::Proceed);
    }

    #[test]
    fn test_unauthenticated_navigation_redirects() {
        let (guard, _) = guard();
        assert_eq!(
            guard.check("/products/BP-RNG-001"),
            Navigation::RedirectToLogin {
                redirect: "/products/BP-RNG-001".to_string()
            }
        );
        assert!(!guard.check_route(&Route::Dashboard).is_allowed());
    }

    #[test]
    fn test_authenticated_navigation_proceeds() {
        let (guard, session) = guard();
        session
            .set_auth("jwt", "u-1", Utc::now() + Duration::hours(1))
            .unwrap();
        assert!(guard.check_route(&Route::Categories).is_allowed());
    }

    #[test]
    fn test_expired_session_redirects() {
        let (guard, session) = guard();
        session
            .set_auth("jwt", "u-1", Utc::now() - Duration::seconds(1))
            .unwrap();
        assert!(!guard.check("/collections").is_allowed());
    }

    #[test]
    fn test_route_table_round_trip() {
        let routes = [
            Route::Dashboard,
            Route::Categories,
            Route::Features,
            Route::AddFeature,
            Route::Collections,
            Route::AddCollection,
            Route::Materials,
            Route::CreateProduct,
            Route::ProductDetails(Sku::new("BP-RNG-001")),
            Route::Login,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_route_parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/orders"), None);
        assert_eq!(Route::parse("/products/"), None);
        assert_eq!(Route::parse("/products/a/b"), None);
        assert_eq!(Route::parse("/materials/"), Some(Route::Materials));
    }
}
