//! Fire-and-forget analytics forwarding.
//!
//! [`Analytics`] wraps an optional [`EventSink`]. With no sink installed
//! every call is a silent no-op.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Category used when the caller supplies none.
pub const DEFAULT_CATEGORY: &str = "agent_hub";

/// A single analytics event, shaped like the `gtag('event', …)` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// Event action name.
    #[serde(skip)]
    pub action: String,
    /// Event category.
    #[serde(rename = "event_category")]
    pub category: String,
    /// Event label.
    #[serde(rename = "event_label")]
    pub label: String,
    /// Numeric value attached to the event.
    pub value: f64,
}

/// Destination of analytics events.
pub trait EventSink: Send + Sync + fmt::Debug {
    /// Delivers one event. Must not fail.
    fn emit(&self, event: &AnalyticsEvent);
}

/// Sink that records events as `tracing` events under the
/// `agent_hub::analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &AnalyticsEvent) {
        tracing::info!(
            target: "agent_hub::analytics",
            action = %event.action,
            category = %event.category,
            label = %event.label,
            value = event.value,
            "analytics event"
        );
    }
}

/// Analytics forwarder.
#[derive(Debug, Clone, Default)]
pub struct Analytics {
    sink: Option<Arc<dyn EventSink>>,
}

impl Analytics {
    /// Creates a forwarder delivering to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a forwarder with no sink; every event is dropped.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns `true` if a sink is installed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Forwards an event. Missing fields default to category
    /// `agent_hub`, an empty label and value `0`.
    pub fn track_event(
        &self,
        action: &str,
        category: Option<&str>,
        label: Option<&str>,
        value: Option<f64>,
    ) {
        let Some(sink) = &self.sink else {
            return;
        };
        let event = AnalyticsEvent {
            action: action.to_string(),
            category: category
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            label: label.unwrap_or_default().to_string(),
            value: value.filter(|v| !v.is_nan()).unwrap_or(0.0),
        };
        sink.emit(&event);
    }
}
