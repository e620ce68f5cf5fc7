//! Tolerant parsing of contract `EVENT_JSON:` log lines.
//!
//! The contract emits structured events as
//! `EVENT_JSON:{"event": "<name>", "data": {...}}`, but older code paths
//! also emit bare tag lines like `liquidation_complete` with no JSON
//! wrapper. Both forms are valid signals of the same event, so presence
//! checks use loose substring matching while payload extraction requires
//! the structured form.

use serde_json::{Map, Value};

/// Marker prefix for structured event logs.
const EVENT_JSON_MARKER: &str = "EVENT_JSON:";

/// A parsed structured event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event: String,
    /// Raw `data` payload; `None` when the event carried none.
    pub data: Option<Value>,
}

/// Parse one log line into an [`EventRecord`].
///
/// Total: a line without the marker, with an empty remainder, with invalid
/// JSON, with a non-object payload, or without a string `event` field
/// yields `None` — never an error.
pub fn parse_event(line: &str) -> Option<EventRecord> {
    let (_, remainder) = line.split_once(EVENT_JSON_MARKER)?;
    let remainder = remainder.trim();
    if remainder.is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(remainder).ok()?;
    let object = value.as_object()?;
    let event = object.get("event")?.as_str()?.to_string();
    Some(EventRecord {
        event,
        data: object.get("data").cloned(),
    })
}

/// Return the `data` payload of the first structured event named
/// `event_name`.
///
/// An event whose `data` is missing or not an object yields an empty map;
/// no matching structured event yields `None`. Bare tag lines never match
/// here — use [`log_contains_event`] for presence checks.
pub fn find_event_data(logs: &[String], event_name: &str) -> Option<Map<String, Value>> {
    for log in logs {
        let Some(record) = parse_event(log) else {
            continue;
        };
        if record.event == event_name {
            return Some(match record.data {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            });
        }
    }
    None
}

/// True if any log line contains `event_name` as a substring.
///
/// Intentionally looser than structured parsing: it also matches bare tag
/// lines that are not EVENT_JSON-wrapped.
pub fn log_contains_event(logs: &[String], event_name: &str) -> bool {
    logs.iter().any(|log| log.contains(event_name))
}
