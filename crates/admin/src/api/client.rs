//! Bluepenguin backend API client.
//!
//! Provides JSON, multipart and binary access to the backend REST API with
//! bearer-token authentication taken from the shared session.

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, RequestOptions, ResponseBody, error_message};
use crate::config::AdminConfig;
use crate::session::SessionManager;

/// Bluepenguin backend API client.
///
/// # Authentication
///
/// Whether to send `Authorization: Bearer <token>` is decided per request
/// from the current session, so a login or logout takes effect on the next
/// call without rebuilding the client.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash
    base_url: String,
    session: Arc<SessionManager>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &AdminConfig, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.trim_end_matches('/').to_string(),
                session,
            }),
        })
    }

    /// Backend base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.inner.session
    }

    /// Build the absolute URL for `path` with `params` as the query string.
    ///
    /// `path` may be given with or without a leading slash.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the result is not a valid URL.
    pub fn url(&self, path: &str, params: &[(String, String)]) -> Result<Url, ApiError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut url = Url::parse(&format!("{}/{path}", self.inner.base_url))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    // =========================================================================
    // JSON Requests
    // =========================================================================

    /// Execute a request, sending `body` as JSON when present.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` for non-2xx responses and
    /// `ApiError::Transport` on network failures.
    #[instrument(skip(self, options, body))]
    pub async fn request<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
        body: Option<&B>,
    ) -> Result<ResponseBody, ApiError> {
        let url = self.url(path, &options.params)?;
        let mut builder = self
            .inner
            .client
            .request(method, url)
            .headers(options.headers);

        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(ApiError::Serialize)?;
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json);
        }

        let response = self.send(builder).await?;
        let text = response.text().await?;
        Ok(ResponseBody::from_text(text))
    }

    /// Execute a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ResponseBody, ApiError> {
        self.request::<()>(Method::GET, path, options, None).await
    }

    /// Execute a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ResponseBody, ApiError> {
        self.request(Method::POST, path, options, Some(body)).await
    }

    /// Execute a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ResponseBody, ApiError> {
        self.request(Method::PUT, path, options, Some(body)).await
    }

    /// Execute a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody, ApiError> {
        self.request::<()>(Method::DELETE, path, options, None).await
    }

    // =========================================================================
    // Multipart & Binary
    // =========================================================================

    /// POST a multipart form. The body is sent as-is, never as JSON.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    #[instrument(skip(self, options, form))]
    pub async fn upload(
        &self,
        path: &str,
        options: RequestOptions,
        form: Form,
    ) -> Result<ResponseBody, ApiError> {
        let url = self.url(path, &options.params)?;
        let builder = self
            .inner
            .client
            .post(url)
            .headers(options.headers)
            .multipart(form);

        let response = self.send(builder).await?;
        let text = response.text().await?;
        Ok(ResponseBody::from_text(text))
    }

    /// GET raw bytes (e.g. image content).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    #[instrument(skip(self, options))]
    pub async fn download(&self, path: &str, options: RequestOptions) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path, &options.params)?;
        let builder = self.inner.client.get(url).headers(options.headers);

        let response = self.send(builder).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Attach the bearer token, send, and turn non-2xx statuses into errors.
    async fn send(&self, mut builder: RequestBuilder) -> Result<Response, ApiError> {
        if let Some(token) = self.inner.session.bearer_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }
}
