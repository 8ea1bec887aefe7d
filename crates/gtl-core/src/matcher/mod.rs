//! Matcher registry: the catalog of known event kinds.
//!
//! Each kind is an [`EventMatcher`]: a cheap substring test that recognises
//! the first line of a record, plus an extractor that consumes the whole
//! record from the [`RecordReader`] and builds one [`Event`].
//!
//! Matchers are tried in registry order and the first hit wins. Several
//! signatures can appear in the same line, so the order in
//! [`Registry::standard`] is part of the behaviour and must not be
//! rearranged.
//!
//! ```text
//! line ──► Registry::find ──► EventMatcher::extract ──► RecordReader::advance(n)
//!                                      │
//!                                      └──► payload parse ──► EventBuilder
//! ```

mod faults;
mod lifecycle;
mod membership;
mod transfer;

pub use faults::{FatalError, SqlError};
pub use membership::{state_rank, QuorumResult, StateShift, ViewChange};
pub use transfer::{Position, SstRole, TransferRequired};

use crate::builder::EventBuilder;
use crate::error::ExtractError;
use crate::reader::RecordReader;
use crate::timestamp::Layout;
use crate::types::{Event, Message, Tone};

/// Declare a lazily compiled, process-wide regex accessor.
macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| {
                regex::Regex::new($re).expect(concat!("valid ", stringify!($name), " regex"))
            })
        }
    };
}
pub(crate) use pattern;

/// One known event kind.
pub trait EventMatcher: Send + Sync {
    /// Human label. Not used for matching.
    fn description(&self) -> &'static str;

    /// Substring whose presence marks the first line of a record.
    fn signature(&self) -> &'static str;

    fn test(&self, line: &str) -> bool {
        line.contains(self.signature())
    }

    /// Consume this kind's record, starting at the reader's current line.
    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError>;
}

/// A single-line event kind whose message never varies.
#[derive(Debug, Clone)]
pub struct Fixed {
    pub description: &'static str,
    pub signature: &'static str,
    pub layout: Layout,
    pub message: &'static str,
    pub tone: Tone,
}

impl EventMatcher for Fixed {
    fn description(&self) -> &'static str {
        self.description
    }

    fn signature(&self) -> &'static str {
        self.signature
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description, 1)?;
        let ts = record.timestamp(self.layout, 0);
        let message = Message::new().push(self.tone, self.message);
        Ok(builder.from_record(&record, ts, message))
    }
}

/// Ordered, first-match-wins list of event kinds.
pub struct Registry {
    matchers: Vec<Box<dyn EventMatcher>>,
}

impl Registry {
    pub fn new(matchers: Vec<Box<dyn EventMatcher>>) -> Self {
        Self { matchers }
    }

    /// The full catalog of known node-log events, in priority order.
    pub fn standard() -> Self {
        let mut registry = Self::new(Vec::new());
        registry.push(membership::ShiftMatcher);
        registry.push(membership::QuorumMatcher);
        registry.push(transfer::TransferRequiredMatcher);
        registry.push(transfer::RecoveredMatcher);
        registry.push(transfer::INTERRUPTOR);
        registry.push(lifecycle::PID_ENDED);
        registry.push(lifecycle::NORMAL_SHUTDOWN);
        registry.push(lifecycle::STARTUP);
        registry.push(lifecycle::INNODB_SHUTDOWN);
        registry.push(lifecycle::SHUTDOWN_COMPLETE);
        registry.push(membership::PRIM_NOT_POSSIBLE);
        registry.push(membership::ViewMatcher);
        registry.push(transfer::SstRoleMatcher);
        registry.push(transfer::XidMatcher);
        registry.push(faults::FatalMatcher);
        registry.push(faults::CONSISTENCY_COMPROMISED);
        registry.push(faults::SqlErrorMatcher);
        registry
    }

    /// Append a kind with the lowest priority.
    pub fn push(&mut self, matcher: impl EventMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    /// The first matcher whose signature is in `line`.
    pub fn find(&self, line: &str) -> Option<&dyn EventMatcher> {
        self.matchers
            .iter()
            .map(|m| m.as_ref())
            .find(|m| m.test(line))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Descriptions in priority order.
    pub fn descriptions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.iter().map(|m| m.description())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.descriptions()).finish()
    }
}
