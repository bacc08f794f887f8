//! Read-only JSON resource client.
//!
//! [`ResourceClient`] fetches the hub's reference documents. Relative
//! endpoints are resolved against the configured origin and API base;
//! endpoints that already start with `http` are used verbatim.
//!
//! There is no timeout, retry or backoff. A failure is returned to the
//! caller as soon as it happens.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::HubConfig;
use crate::error::HubError;

/// Endpoint of the site manifest.
pub const MANIFEST_ENDPOINT: &str = "/manifest.json";
/// Endpoint of the framework registry.
pub const REGISTRY_ENDPOINT: &str = "/frameworks/registry.json";
/// Endpoint of the framework categories.
pub const CATEGORIES_ENDPOINT: &str = "/frameworks/categories.json";
/// Endpoint of the search index.
pub const SEARCH_INDEX_ENDPOINT: &str = "/search/index.json";
/// Endpoint of the agent gate configuration.
pub const GATE_CONFIG_ENDPOINT: &str = "/agent/config.json";

/// Thin fetch-and-parse helper for named JSON endpoints.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResourceClient {
    /// Creates a client for `config.origin` + `config.api_base`.
    #[must_use]
    pub fn new(config: &HubConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &HubConfig) -> Self {
        let base_url = format!(
            "{}{}",
            config.origin.trim_end_matches('/'),
            config.api_base.trim_end_matches('/')
        );
        Self { http, base_url }
    }

    /// Returns the URL relative endpoints are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `endpoint` to the URL that will be requested.
    #[must_use]
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}{endpoint}", self.base_url)
        }
    }

    /// Fetches `endpoint` and parses the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// - [`HubError::InvalidUrl`] if the resolved URL cannot be parsed.
    /// - [`HubError::Transport`] if the request or body read fails.
    /// - [`HubError::Http`] if the status is not in the 2xx range.
    /// - [`HubError::Parse`] if the body is not valid JSON for `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, HubError> {
        let url = self.resolve(endpoint);
        let parsed =
            reqwest::Url::parse(&url).map_err(|e| HubError::InvalidUrl(format!("{url}: {e}")))?;

        tracing::debug!(%url, "fetching resource");
        let response = self.http.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "resource fetch failed");
            return Err(HubError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }

    /// Fetches the site manifest.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::fetch_json`].
    pub async fn fetch_manifest(&self) -> Result<Value, HubError> {
        self.fetch_json(MANIFEST_ENDPOINT).await
    }

    /// Fetches the framework registry.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::fetch_json`].
    pub async fn fetch_registry(&self) -> Result<Value, HubError> {
        self.fetch_json(REGISTRY_ENDPOINT).await
    }

    /// Fetches the framework categories.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::fetch_json`].
    pub async fn fetch_categories(&self) -> Result<Value, HubError> {
        self.fetch_json(CATEGORIES_ENDPOINT).await
    }

    /// Fetches the search index.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::fetch_json`].
    pub async fn fetch_search_index(&self) -> Result<Value, HubError> {
        self.fetch_json(SEARCH_INDEX_ENDPOINT).await
    }

    /// Fetches the agent gate configuration.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::fetch_json`].
    pub async fn fetch_gate_config(&self) -> Result<Value, HubError> {
        self.fetch_json(GATE_CONFIG_ENDPOINT).await
    }
}
