//! Test builders: ergonomic constructors for `Event` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{NaiveDate, NaiveDateTime};
use gtl::{Event, Message, NodeEvents, Registry, SequenceGen};

// ---------------------------------------------------------------------------
// EventFixture
// ---------------------------------------------------------------------------

/// Fluent builder for [`Event`] test fixtures.
///
/// ```rust
/// let event = EventFixture::new(0, 3).at("2017-05-06 16:53:13").message("x").build();
/// ```
pub struct EventFixture {
    node: usize,
    sequence: u64,
    timestamp: Option<NaiveDateTime>,
    message: Message,
    raw: String,
}

impl EventFixture {
    pub fn new(node: usize, sequence: u64) -> Self {
        Self {
            node,
            sequence,
            timestamp: None,
            message: Message::plain(format!("node{node} #{sequence}")),
            raw: String::new(),
        }
    }

    /// Set the timestamp from `YYYY-MM-DD HH:MM:SS`.
    pub fn at(mut self, ts: &str) -> Self {
        self.timestamp = Some(timestamp(ts));
        self
    }

    /// Set the timestamp from seconds after 2017-05-06 00:00:00.
    pub fn at_secs(mut self, secs: u32) -> Self {
        let base = NaiveDate::from_ymd_opt(2017, 5, 6)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid base date");
        self.timestamp = Some(base + chrono::Duration::seconds(i64::from(secs)));
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Message::plain(message);
        self
    }

    pub fn build(self) -> Event {
        Event {
            timestamp: self.timestamp,
            node: self.node,
            sequence: self.sequence,
            message: self.message,
            raw: self.raw,
        }
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").expect("fixture timestamp")
}

// ---------------------------------------------------------------------------
// Pipeline helpers
// ---------------------------------------------------------------------------

/// Run the standard registry over in-memory node logs, sequentially.
pub fn extract_texts(logs: &[&str]) -> Vec<NodeEvents> {
    let registry = Registry::standard();
    let seq = SequenceGen::new();
    logs.iter()
        .enumerate()
        .map(|(node, text)| gtl::extract_node(node, text, &registry, &seq))
        .collect()
}

/// Wrap per-node event lists as pipeline output.
pub fn node_events(lists: Vec<Vec<Event>>) -> Vec<NodeEvents> {
    lists
        .into_iter()
        .enumerate()
        .map(|(node, events)| NodeEvents {
            node,
            events,
            skipped: Vec::new(),
        })
        .collect()
}
