//! Hub configuration.
//!
//! [`HubConfig`] is an immutable value handed to [`crate::service::AgentCore`]
//! and [`crate::client::ResourceClient`] at construction. The defaults are the
//! fixed constants of the hub; the binary may override the deployment-specific
//! settings from environment variables (or a `.env` file via `dotenvy`).

use std::path::PathBuf;

use chrono::Duration;

use crate::error::HubError;

/// Storage key of the token slot.
pub const DEFAULT_TOKEN_KEY: &str = "wif_agent_token";

/// Storage key of the profile slot.
pub const DEFAULT_PROFILE_KEY: &str = "wif_agent_profile";

/// Days a saved token stays valid.
pub const DEFAULT_EXPIRY_DAYS: i64 = 90;

/// Days before expiry at which the renewal notice fires.
pub const DEFAULT_EXPIRY_NOTICE_DAYS: i64 = 7;

/// Path prefix prepended to relative resource endpoints.
pub const DEFAULT_API_BASE: &str = "/api";

/// Site origin used for resource fetches and referral links.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Top-level hub configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Storage key holding the serialized token record.
    pub token_key: String,

    /// Storage key holding the serialized profile record.
    pub profile_key: String,

    /// Lifetime of a saved token.
    pub expiry: Duration,

    /// Lead time before expiry during which the token counts as expiring soon.
    pub expiry_notice: Duration,

    /// Path prefix for relative resource endpoints (e.g. `/api`).
    pub api_base: String,

    /// Scheme and host of the site (e.g. `https://example.com`).
    pub origin: String,

    /// Directory used by the binary's file-backed store.
    pub storage_dir: PathBuf,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
            expiry: Duration::days(DEFAULT_EXPIRY_DAYS),
            expiry_notice: Duration::days(DEFAULT_EXPIRY_NOTICE_DAYS),
            api_base: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            storage_dir: PathBuf::from(".agent-hub"),
        }
    }
}

impl HubConfig {
    /// Loads configuration from environment variables.
    ///
    /// Only the deployment-specific settings can be overridden:
    /// `AGENT_HUB_ORIGIN`, `AGENT_HUB_API_BASE` and `AGENT_HUB_STORAGE_DIR`.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Config`] if `AGENT_HUB_ORIGIN` is set but is not
    /// an absolute `http(s)` origin.
    pub fn from_env() -> Result<Self, HubError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let origin = parse_env("AGENT_HUB_ORIGIN", defaults.origin);
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(HubError::Config(format!(
                "AGENT_HUB_ORIGIN must start with http:// or https://, got {origin:?}"
            )));
        }
        let origin = origin.trim_end_matches('/').to_string();

        let api_base = parse_env("AGENT_HUB_API_BASE", defaults.api_base);
        let storage_dir = parse_env("AGENT_HUB_STORAGE_DIR", defaults.storage_dir);

        Ok(Self {
            origin,
            api_base,
            storage_dir,
            ..Self::default()
        })
    }

    /// Returns a copy with a different token lifetime.
    #[must_use]
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Returns a copy with a different renewal-notice window.
    #[must_use]
    pub fn with_notice(mut self, notice: Duration) -> Self {
        self.expiry_notice = notice;
        self
    }

    /// Returns a copy pointing at a different site origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
