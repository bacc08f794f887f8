//! End-to-end token lifecycle over a file-backed store.

#![allow(clippy::panic, missing_docs)]

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::{Map, Value, json};

use agent_hub_core::clock::{Clock, ManualClock};
use agent_hub_core::config::HubConfig;
use agent_hub_core::domain::Tier;
use agent_hub_core::persistence::{FileStore, KeyValueStore};
use agent_hub_core::presentation::{HtmlDocument, show_token_bar};
use agent_hub_core::service::AgentCore;

struct Harness {
    _dir: tempfile::TempDir,
    store: Arc<FileStore>,
    clock: Arc<ManualClock>,
    core: AgentCore,
}

fn harness() -> Harness {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    let Ok(store) = FileStore::open(dir.path()) else {
        panic!("open file store");
    };
    let store = Arc::new(store);
    let Some(start) = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).single() else {
        panic!("valid start time");
    };
    let clock = Arc::new(ManualClock::new(start));
    let core = AgentCore::with_clock(
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
        Arc::clone(&clock) as Arc<dyn Clock>,
        HubConfig::default(),
    );
    Harness {
        _dir: dir,
        store,
        clock,
        core,
    }
}

fn object(value: Value) -> Map<String, Value> {
    let Value::Object(map) = value else {
        panic!("expected a JSON object");
    };
    map
}

#[test]
fn enrolled_agent_survives_until_expiry() {
    let h = harness();
    let Some(enrollment) = h
        .core
        .enroll(90.0, 100.0, Some("ops@acme"), object(json!({"org": "acme"})))
    else {
        panic!("enrollment failed");
    };
    assert_eq!(enrollment.tier, Tier::Enterprise);
    assert!(enrollment.token.starts_with("ENT-OPSACME-"));

    // A second core over the same directory sees the same state.
    let reader = AgentCore::with_clock(
        Arc::clone(&h.store) as Arc<dyn KeyValueStore>,
        Arc::clone(&h.clock) as Arc<dyn Clock>,
        HubConfig::default(),
    );
    assert_eq!(reader.get_token().map(|r| r.token), Some(enrollment.token));

    h.clock.advance(Duration::days(85));
    assert!(h.core.is_token_expiring_soon());

    let mut doc = HtmlDocument::new();
    assert!(show_token_bar(&h.core, &mut doc));
    assert!(doc.to_html().contains("Strategic Intelligence Agent"));

    h.clock.advance(Duration::days(6));
    assert!(h.core.get_token().is_none());
    assert!(h.core.get_profile().is_none());
    assert!(matches!(h.store.get("wif_agent_token"), Ok(None)));
    assert!(matches!(h.store.get("wif_agent_profile"), Ok(None)));

    let mut doc = HtmlDocument::new();
    assert!(!show_token_bar(&h.core, &mut doc));
}

#[test]
fn browser_written_record_is_honoured() {
    let h = harness();
    let raw = r#"{"token":"AGT-JANE-K7MQ2X","created":"2026-09-01T08:00:00.000Z","expires":"2026-10-05T08:00:00.000Z"}"#;
    assert!(h.store.set("wif_agent_token", raw).is_ok());

    let Some(record) = h.core.get_token() else {
        panic!("record should be valid");
    };
    assert_eq!(record.token, "AGT-JANE-K7MQ2X");
    assert!(h.core.is_token_expiring_soon());
}

#[test]
fn resave_replaces_record_and_resets_window() {
    let h = harness();
    assert!(h.core.save_token("WIF-USER-AAAA"));
    h.clock.advance(Duration::days(84));
    assert!(h.core.is_token_expiring_soon());

    assert!(h.core.save_token("WIF-USER-BBBB"));
    assert!(!h.core.is_token_expiring_soon());
    let Some(record) = h.core.get_token() else {
        panic!("new record");
    };
    assert_eq!(record.token, "WIF-USER-BBBB");
    assert_eq!(record.created, h.clock.now());
}
