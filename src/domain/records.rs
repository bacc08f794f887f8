//! Persisted record shapes: the token record and the profile record.
//!
//! Both are stored as JSON. Timestamps are written as ISO 8601 UTC with
//! millisecond precision (`2026-01-31T12:00:00.000Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::tier::Tier;

/// Key injected into every saved profile.
pub const SAVED_AT_FIELD: &str = "savedAt";

/// Conventional key holding the profile's tier label.
pub const TIER_FIELD: &str = "tier";

/// A saved token with its validity window.
///
/// `expires` is always `created` plus the configured expiry window; records
/// are replaced wholesale on every save and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The token string.
    pub token: String,
    /// When the token was saved.
    #[serde(with = "iso_millis")]
    pub created: DateTime<Utc>,
    /// When the token stops being returned by reads.
    #[serde(with = "iso_millis")]
    pub expires: DateTime<Utc>,
}

impl TokenRecord {
    /// Returns `true` once `now` is strictly past the expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires < now
    }
}

/// A saved profile: the caller's fields plus `savedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord(Map<String, Value>);

impl ProfileRecord {
    /// Wraps a caller-supplied field map, stamping `savedAt = now`.
    ///
    /// A caller-supplied `savedAt` is overwritten.
    #[must_use]
    pub fn stamped(mut fields: Map<String, Value>, now: DateTime<Utc>) -> Self {
        fields.insert(SAVED_AT_FIELD.to_string(), Value::String(format_iso(now)));
        Self(fields)
    }

    /// Returns the raw field map.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the record and returns its field map.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Returns a single field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the conventional `tier` label, if it is a string.
    #[must_use]
    pub fn tier_label(&self) -> Option<&str> {
        self.0.get(TIER_FIELD).and_then(Value::as_str)
    }

    /// Returns the profile's tier, falling back to basic when the label is
    /// missing or unknown.
    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier_label().map(Tier::from_label).unwrap_or_default()
    }

    /// Returns the `savedAt` stamp if present and parsable.
    #[must_use]
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.0
            .get(SAVED_AT_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Formats a timestamp the way the records store it.
#[must_use]
pub fn format_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, format_iso};

    pub(super) fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_iso(*ts))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    #[test]
    fn token_record_uses_iso_millis() {
        let now = fixed_now();
        let record = TokenRecord {
            token: "WIF-USER-ABCD".to_string(),
            created: now,
            expires: now + Duration::days(90),
        };
        let Ok(json) = serde_json::to_value(&record) else {
            panic!("serialization failed");
        };
        assert_eq!(
            json,
            json!({
                "token": "WIF-USER-ABCD",
                "created": "2026-03-01T12:30:00.000Z",
                "expires": "2026-05-30T12:30:00.000Z",
            })
        );
    }

    #[test]
    fn token_record_reads_browser_written_json() {
        let raw = r#"{"token":"AGT-JANE-K7MQ2X","created":"2026-03-01T12:30:00.000Z","expires":"2026-05-30T12:30:00.000Z"}"#;
        let Ok(record) = serde_json::from_str::<TokenRecord>(raw) else {
            panic!("deserialization failed");
        };
        assert_eq!(record.token, "AGT-JANE-K7MQ2X");
        assert_eq!(record.expires - record.created, Duration::days(90));
    }

    #[test]
    fn expiry_is_strict() {
        let now = fixed_now();
        let record = TokenRecord {
            token: "t".to_string(),
            created: now - Duration::days(1),
            expires: now,
        };
        assert!(!record.is_expired_at(now));
        assert!(record.is_expired_at(now + Duration::milliseconds(1)));
    }

    #[test]
    fn profile_stamp_overwrites_saved_at() {
        let now = fixed_now();
        let Value::Object(fields) = json!({"name": "Jane", "tier": "advanced", "savedAt": "old"})
        else {
            panic!("object literal");
        };
        let profile = ProfileRecord::stamped(fields, now);
        assert_eq!(profile.saved_at(), Some(now));
        assert_eq!(profile.tier(), Tier::Advanced);
        assert_eq!(profile.get("name"), Some(&json!("Jane")));
    }

    #[test]
    fn profile_tier_defaults_to_basic() {
        let profile = ProfileRecord::stamped(Map::new(), fixed_now());
        assert_eq!(profile.tier_label(), None);
        assert_eq!(profile.tier(), Tier::Basic);
    }
}
