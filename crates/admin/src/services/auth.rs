//! Login and key hashing.

use bluepenguin_core::UserId;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::{fields, logged, segment};
use crate::api::{ApiClient, ApiError, RequestOptions, ResponseBody};
use crate::session::parse_expiration;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Credentials issued by `/login`.
#[derive(Clone)]
pub struct LoginResponse {
    pub token: SecretString,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl LoginResponse {
    /// Read a `/login` payload (`{ token, expiration, userId }`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the token or expiry is missing or the
    /// expiry is not a timestamp.
    pub fn from_payload(payload: &Value) -> Result<Self, ApiError> {
        let token = fields::resolve_str(payload, &["token"])
            .ok_or_else(|| ApiError::Decode("login response has no token".to_string()))?;
        let raw_expiration = fields::resolve_str(payload, &["expiration"])
            .ok_or_else(|| ApiError::Decode("login response has no expiration".to_string()))?;
        let expires_at = parse_expiration(&raw_expiration).ok_or_else(|| {
            ApiError::Decode(format!("invalid token expiration: {raw_expiration}"))
        })?;

        Ok(Self {
            token: SecretString::from(token),
            user_id: fields::resolve_str(payload, &["userId"])
                .unwrap_or_default()
                .into(),
            expires_at,
        })
    }
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token.
    ///
    /// The session is not touched; callers decide whether to store it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` on rejected credentials and
    /// `ApiError::Decode` on a malformed response.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { username, password };
        let result = self.api.post("/login", &body, RequestOptions::new()).await;
        let payload = logged(result, "log in")?.into_json();
        let response = logged(LoginResponse::from_payload(&payload), "read login response")?;

        info!(user_id = %response.user_id, expires_at = %response.expires_at, "Logged in");
        Ok(response)
    }

    /// Hash `key` with the backend's hashing endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, key))]
    pub async fn hash(&self, key: &str) -> Result<String, ApiError> {
        let path = format!("/hashme/{}", segment(key));
        let body = logged(self.api.get(&path, RequestOptions::new()).await, "hash key")?;

        Ok(match body {
            ResponseBody::Json(Value::String(hash)) | ResponseBody::Text(hash) => hash,
            ResponseBody::Json(other) => other.to_string(),
            ResponseBody::Empty => String::new(),
        })
    }
}
