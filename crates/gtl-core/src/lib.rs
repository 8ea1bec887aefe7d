//! gtl-core: Galera timeline extraction engine.
//!
//! This crate turns the free-text logs of every node in a replicated database
//! cluster into one chronologically ordered list of [`Event`] values.
//!
//! # Architecture
//!
//! ```text
//! node0.log ──► Pipeline ──┐
//! node1.log ──► Pipeline ──┼──► Merge ──► Vec<Event>
//! node2.log ──► Pipeline ──┘
//!                  │
//!                  └── RecordReader + Registry + EventBuilder
//! ```
//!
//! Each pipeline walks its file line by line, asks the [`Registry`] for the
//! first matcher whose signature appears in the line, and lets that matcher
//! consume the whole multi-line record. Every event is stamped with a
//! run-wide sequence number by the [`EventBuilder`]; the merge stage sorts by
//! `(timestamp, sequence)`.

pub mod builder;
pub mod error;
pub mod matcher;
pub mod merge;
pub mod pipeline;
pub mod reader;
pub mod timestamp;
pub mod types;

pub use builder::{EventBuilder, SequenceGen};
pub use error::{ExtractError, TimelineError};
pub use matcher::{EventMatcher, Registry};
pub use merge::merge;
pub use pipeline::{extract_all, extract_all_parallel, extract_file, extract_node, NodeEvents};
pub use reader::{Record, RecordReader};
pub use timestamp::Layout;
pub use types::{Event, Message, Span, Tone};
