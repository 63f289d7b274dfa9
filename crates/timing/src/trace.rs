//! Trace Event Format document model
//!
//! Each completed scope becomes one duration event (`"ph": "X"`) carrying
//! both its start timestamp and its duration in microseconds:
//!
//! ```json
//! {"otherData":{},"traceEvents":[{"cat":"function","dur":12,"name":"load","ph":"X","pid":0,"tid":7,"ts":1042}]}
//! ```

use crate::scope::ScopeRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category stamped on every event.
pub const EVENT_CATEGORY: &str = "function";

/// Phase of a complete (duration) event.
pub const PHASE_COMPLETE: &str = "X";

/// Process id stamped on every event; only one process is modelled.
pub const PROCESS_ID: u32 = 0;

/// A single duration event.
///
/// Field order matches the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub cat: String,
    /// Duration in microseconds
    pub dur: u64,
    pub name: String,
    pub ph: String,
    pub pid: u32,
    pub tid: u64,
    /// Start timestamp in microseconds
    pub ts: u64,
}

impl TraceEvent {
    /// Build a complete event for `record`, attributed to thread `tid`.
    pub fn complete(record: &ScopeRecord, tid: u64) -> Self {
        Self {
            cat: EVENT_CATEGORY.to_string(),
            dur: record.duration_us,
            name: record.name.to_string(),
            ph: PHASE_COMPLETE.to_string(),
            pid: PROCESS_ID,
            tid,
            ts: record.start_us,
        }
    }
}

/// The outer trace document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    #[serde(rename = "otherData")]
    pub other_data: Map<String, Value>,
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,
}

impl TraceDocument {
    /// Create a document holding `events`, with empty metadata.
    pub fn new(trace_events: Vec<TraceEvent>) -> Self {
        Self {
            other_data: Map::new(),
            trace_events,
        }
    }

    /// Number of events in the document.
    pub fn len(&self) -> usize {
        self.trace_events.len()
    }

    /// Check if the document has no events.
    pub fn is_empty(&self) -> bool {
        self.trace_events.is_empty()
    }
}
