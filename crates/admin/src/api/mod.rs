//! HTTP client for the Bluepenguin backend API.
//!
//! # Architecture
//!
//! - One shared [`ApiClient`] per process, cheap to clone
//! - Bearer token read from the [`SessionManager`](crate::session::SessionManager)
//!   on every request
//! - Response bodies normalized to [`ResponseBody`] because the backend is
//!   inconsistent about `Content-Type` across endpoints
//! - Non-2xx responses become [`ApiError::Http`]; nothing is retried

mod client;

pub use client::ApiClient;
pub use reqwest::multipart::{Form, Part};

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// `message` is the body's `message` field when present, otherwise the
    /// status line (e.g. `404 Not Found`).
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

/// A normalized successful response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body parsed as JSON.
    Json(Value),
    /// Non-empty body that is not JSON.
    Text(String),
    /// No content.
    Empty,
}

impl ResponseBody {
    /// Classify raw body text.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// The body as a JSON value: text becomes a string, empty becomes null.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Empty => Value::Null,
        }
    }

    /// Deserialize the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.into_json()).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub params: Vec<(String, String)>,
    /// Extra headers.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}

/// Extract the error message from a failed response.
///
/// Uses the JSON body's `message` field when present, otherwise the status
/// line.
#[must_use]
pub fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_body_classification() {
        assert_eq!(ResponseBody::from_text(String::new()), ResponseBody::Empty);
        assert_eq!(ResponseBody::from_text("  \n".to_string()), ResponseBody::Empty);
        assert_eq!(
            ResponseBody::from_text(r#"{"a":1}"#.to_string()),
            ResponseBody::Json(json!({"a": 1}))
        );
        assert_eq!(
            ResponseBody::from_text("hashed-value".to_string()),
            ResponseBody::Text("hashed-value".to_string())
        );
    }

    #[test]
    fn test_into_json() {
        assert_eq!(ResponseBody::Empty.into_json(), Value::Null);
        assert_eq!(ResponseBody::Text("x".to_string()).into_json(), json!("x"));
    }

    #[test]
    fn test_decode_empty_into_option() {
        let decoded: Option<Vec<String>> = ResponseBody::Empty.decode().ok().flatten();
        assert!(decoded.is_none());

        let err = ResponseBody::Text("oops".to_string()).decode::<Vec<String>>();
        assert!(matches!(err, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":"not found"}"#),
            "not found"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status_line() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "<html>nope</html>"),
            "404 Not Found"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#),
            "500 Internal Server Error"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":""}"#),
            "400 Bad Request"
        );
    }

    #[test]
    fn test_http_error_display_is_message() {
        let err = ApiError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
    }
}
