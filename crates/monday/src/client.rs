//! GraphQL transport for the monday.com API.
//!
//! A [`MondayClient`] carries exactly one short-lived token. Clients are
//! minted per request by [`MondayClientFactory::client_for`]; the factory
//! only holds the pooled [`reqwest::Client`] and endpoint settings, never a
//! credential.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Default GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// Default `API-Version` header value.
pub const DEFAULT_API_VERSION: &str = "2024-04";

/// Errors from the monday GraphQL layer.
#[derive(Debug, thiserror::Error)]
pub enum MondayApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status code.
    #[error("monday API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response carried GraphQL errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response had neither `data` nor errors.
    #[error("monday API response has no data")]
    MissingData,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Response envelope. Besides the standard `errors` array the platform may
/// report failures through a top-level `error_message`.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Builds per-token [`MondayClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct MondayClientFactory {
    http: reqwest::Client,
    api_url: String,
    api_version: String,
}

impl MondayClientFactory {
    /// Create a factory with its own HTTP connection pool.
    ///
    /// * `api_url` - GraphQL endpoint, e.g. [`DEFAULT_API_URL`].
    /// * `timeout` - per-request timeout applied by reqwest.
    pub fn new(
        api_url: impl Into<String>,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MondayApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, api_url, api_version))
    }

    /// Create a factory reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        api_url: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_version: api_version.into(),
        }
    }

    /// A client that authenticates every call with `token`.
    pub fn client_for(&self, token: &str) -> MondayClient {
        MondayClient {
            http: self.http.clone(),
            api_url: self.api_url.clone(),
            api_version: self.api_version.clone(),
            token: token.to_string(),
        }
    }
}

/// GraphQL client bound to a single short-lived token.
#[derive(Clone)]
pub struct MondayClient {
    http: reqwest::Client,
    api_url: String,
    api_version: String,
    token: String,
}

impl std::fmt::Debug for MondayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MondayClient")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl MondayClient {
    /// Run a query or mutation and decode its `data` object into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, MondayApiError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .http
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .header("API-Version", &self.api_version)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let envelope: GraphQlResponse<T> = response.json().await?;

        if !envelope.errors.is_empty() {
            return Err(MondayApiError::GraphQl(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        if let Some(message) = envelope.error_message {
            return Err(MondayApiError::GraphQl(vec![message]));
        }
        envelope.data.ok_or(MondayApiError::MissingData)
    }

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`MondayApiError::ApiError`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, MondayApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MondayApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
