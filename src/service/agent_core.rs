//! Agent lifecycle core: issues tokens, persists them, and reports their
//! renewal status.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};
use crate::config::HubConfig;
use crate::domain::records::TIER_FIELD;
use crate::domain::{ProfileRecord, Tier, TierInfo, TokenRecord, calculate_tier, token};
use crate::persistence::{KeyValueStore, TokenStore};

/// Result of a successful [`AgentCore::enroll`].
#[derive(Debug, Clone, Serialize)]
pub struct Enrollment {
    /// Tier computed from the score.
    pub tier: Tier,
    /// Freshly issued token.
    pub token: String,
}

/// Composition of the token generator, token store and tier engine.
///
/// Holds no ambient state: storage, time and configuration are injected.
#[derive(Debug, Clone)]
pub struct AgentCore {
    store: TokenStore,
    clock: Arc<dyn Clock>,
    config: Arc<HubConfig>,
}

impl AgentCore {
    /// Creates a core over `backend` using the system clock.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>, config: HubConfig) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock), config)
    }

    /// Creates a core with an explicit clock.
    #[must_use]
    pub fn with_clock(
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: HubConfig,
    ) -> Self {
        let config = Arc::new(config);
        let store = TokenStore::new(backend, Arc::clone(&clock), Arc::clone(&config));
        Self {
            store,
            clock,
            config,
        }
    }

    /// Returns the crate version.
    #[must_use]
    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Returns the configuration this core was built with.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Returns the underlying token store.
    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Generates a token for `tier` from an optional identifier.
    #[must_use]
    pub fn generate_token(&self, tier: Tier, identifier: Option<&str>) -> String {
        token::generate_token(tier, identifier)
    }

    /// See [`TokenStore::save_token`].
    pub fn save_token(&self, token: &str) -> bool {
        self.store.save_token(token)
    }

    /// See [`TokenStore::get_token`].
    pub fn get_token(&self) -> Option<TokenRecord> {
        self.store.get_token()
    }

    /// See [`TokenStore::clear_token`].
    pub fn clear_token(&self) {
        self.store.clear_token();
        tracing::info!("token and profile cleared");
    }

    /// Returns `true` if a current token expires within the notice window.
    ///
    /// This is a renewal notice, not an expiry check: a perfectly valid
    /// token can be expiring soon. With no current token it is `false`.
    pub fn is_token_expiring_soon(&self) -> bool {
        let Some(record) = self.store.get_token() else {
            return false;
        };
        record.expires < self.clock.now() + self.config.expiry_notice
    }

    /// See [`TokenStore::save_profile`].
    pub fn save_profile(&self, profile: Map<String, Value>) -> bool {
        self.store.save_profile(profile)
    }

    /// See [`TokenStore::get_profile`].
    pub fn get_profile(&self) -> Option<ProfileRecord> {
        self.store.get_profile()
    }

    /// Classifies a score into a tier.
    #[must_use]
    pub fn calculate_tier(&self, score: f64, total_possible: f64) -> Tier {
        calculate_tier(score, total_possible)
    }

    /// Returns static metadata for a tier.
    #[must_use]
    pub fn tier_info(&self, tier: Tier) -> &'static TierInfo {
        tier.info()
    }

    /// Classifies the score, issues a token, and saves it together with
    /// `profile` (whose `tier` field is set to the computed tier).
    ///
    /// Returns `None` if either the token or the profile could not be saved.
    pub fn enroll(
        &self,
        score: f64,
        total_possible: f64,
        identifier: Option<&str>,
        mut profile: Map<String, Value>,
    ) -> Option<Enrollment> {
        let tier = calculate_tier(score, total_possible);
        let token = self.generate_token(tier, identifier);

        if !self.store.save_token(&token) {
            return None;
        }
        profile.insert(TIER_FIELD.to_string(), Value::String(tier.to_string()));
        if !self.store.save_profile(profile) {
            return None;
        }

        tracing::info!(%tier, %token, score, total_possible, "agent enrolled");
        Some(Enrollment { tier, token })
    }
}
