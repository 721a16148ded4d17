//! Events a session publishes to hosts and renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Stamp carried by every game event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Routing name, e.g. `session.spin_resolved`.
    pub event_type: String,
    /// Position in the session's stream, starting at 1.
    pub sequence_number: i64,
    /// Session time in virtual milliseconds.
    pub at_ms: u64,
    /// Wall-clock time the event was produced.
    pub occurred_at: DateTime<Utc>,
}

/// An event a session emits.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Routing name of the event.
    fn event_type(&self) -> &'static str;

    /// The event body as JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// The event's stamp.
    fn metadata(&self) -> &EventMetadata;

    /// Stamp and body flattened into the object written to an event
    /// stream, one per line.
    fn to_stream_line(&self) -> serde_json::Value {
        let meta = self.metadata();
        json!({
            "sequence": meta.sequence_number,
            "at_ms": meta.at_ms,
            "occurred_at": meta.occurred_at,
            "type": self.event_type(),
            "payload": self.to_payload(),
        })
    }
}
