//! Token and profile slots on top of a [`KeyValueStore`].
//!
//! No operation here returns an error. Backend and (de)serialization
//! failures are logged with `tracing::warn!` and degraded to `false` or
//! `None`.
//!
//! Expiry is checked only on read: a record past its expiry stays in
//! storage, inert, until the next [`TokenStore::get_token`] evicts it
//! together with the profile.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::KeyValueStore;
use crate::clock::Clock;
use crate::config::HubConfig;
use crate::domain::{ProfileRecord, TokenRecord};

/// Owner of the token and profile slots.
#[derive(Debug, Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: Arc<HubConfig>,
}

impl TokenStore {
    /// Creates a token store writing through `backend`.
    #[must_use]
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: Arc<HubConfig>,
    ) -> Self {
        Self {
            backend,
            clock,
            config,
        }
    }

    /// Saves `token` with `created = now` and `expires = now + expiry`,
    /// replacing any previous record.
    ///
    /// Returns `false` if the record could not be written.
    pub fn save_token(&self, token: &str) -> bool {
        let now = self.clock.now();
        let record = TokenRecord {
            token: token.to_string(),
            created: now,
            expires: now + self.config.expiry,
        };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "unable to serialize token record");
                return false;
            }
        };
        match self.backend.set(&self.config.token_key, &raw) {
            Ok(()) => {
                tracing::debug!(%token, expires = %record.expires, "token saved");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "unable to save token");
                false
            }
        }
    }

    /// Returns the current token record.
    ///
    /// Returns `None` if nothing is stored, the slot is unreadable, or the
    /// record has expired. An expired record is evicted along with the
    /// profile.
    pub fn get_token(&self) -> Option<TokenRecord> {
        let raw = self.read_slot(&self.config.token_key)?;
        let record: TokenRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparsable token record");
                return None;
            }
        };
        if record.is_expired_at(self.clock.now()) {
            tracing::info!(token = %record.token, expires = %record.expires, "token expired; clearing");
            self.clear_token();
            return None;
        }
        Some(record)
    }

    /// Removes both the token and the profile slot. Failures are logged
    /// and otherwise ignored.
    pub fn clear_token(&self) {
        for key in [&self.config.token_key, &self.config.profile_key] {
            if let Err(e) = self.backend.remove(key) {
                tracing::warn!(error = %e, key = %key, "unable to clear slot");
            }
        }
    }

    /// Saves `profile` with `savedAt = now`, replacing the previous profile
    /// wholesale.
    ///
    /// Returns `false` if the profile could not be written.
    pub fn save_profile(&self, profile: Map<String, Value>) -> bool {
        let record = ProfileRecord::stamped(profile, self.clock.now());
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "unable to serialize profile");
                return false;
            }
        };
        match self.backend.set(&self.config.profile_key, &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "unable to save profile");
                false
            }
        }
    }

    /// Returns the saved profile, or `None` if absent or unparsable.
    pub fn get_profile(&self) -> Option<ProfileRecord> {
        let raw = self.read_slot(&self.config.profile_key)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparsable profile");
                None
            }
        }
    }

    fn read_slot(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(Some(raw)) if !raw.is_empty() => Some(raw),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, key, "unable to read slot");
                None
            }
        }
    }
}
