//! Event builder and the run-wide discovery counter.
//!
//! One [`SequenceGen`] exists per run and is shared by every node's
//! [`EventBuilder`]. It is the single serialization point for tie-break
//! order: whoever builds an event first gets the lower sequence.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;

use crate::error::ExtractError;
use crate::reader::Record;
use crate::types::{Event, Message};

/// Monotonic source of [`Event::sequence`] values.
#[derive(Debug, Default)]
pub struct SequenceGen {
    next: AtomicU64,
}

impl SequenceGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `first` instead of zero.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Hand out the next value.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The value the next call to [`SequenceGen::next`] will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Stamps events with their node and a fresh sequence number.
#[derive(Debug, Clone, Copy)]
pub struct EventBuilder<'s> {
    node: usize,
    seq: &'s SequenceGen,
}

impl<'s> EventBuilder<'s> {
    pub fn new(node: usize, seq: &'s SequenceGen) -> Self {
        Self { node, seq }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    /// Build an event from its parts.
    pub fn build(
        &self,
        timestamp: Option<NaiveDateTime>,
        message: Message,
        raw_lines: &[&str],
    ) -> Event {
        Event {
            timestamp,
            node: self.node,
            sequence: self.seq.next(),
            message,
            raw: raw_lines.join("\n"),
        }
    }

    /// Build an event from a record whose timestamp may have failed to parse.
    ///
    /// A malformed timestamp does not drop the event: it is logged and the
    /// event gets the `None` sentinel.
    pub fn from_record(
        &self,
        record: &Record<'_>,
        timestamp: Result<NaiveDateTime, ExtractError>,
        message: Message,
    ) -> Event {
        let timestamp = match timestamp {
            Ok(ts) => Some(ts),
            Err(err) => {
                tracing::warn!(
                    node = self.node,
                    line = record.start_line(),
                    "{err}; keeping event without a timestamp"
                );
                None
            }
        };
        let event = self.build(timestamp, message, record.lines());
        tracing::debug!(
            node = event.node,
            sequence = event.sequence,
            kind = record.kind(),
            "extracted event"
        );
        event
    }
}
