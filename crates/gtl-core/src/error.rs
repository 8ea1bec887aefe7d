//! Error types for gtl-core.
//!
//! [`ExtractError`] is scoped to a single record: the pipeline logs it and
//! moves on. [`TimelineError`] aborts the whole run.

use std::path::PathBuf;

use thiserror::Error;

use crate::timestamp::Layout;

/// Failures while turning one matched record into an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no {layout} timestamp in line: {line:?}")]
    MalformedTimestamp { layout: Layout, line: String },

    #[error("{kind}: record needs {wanted} lines, only {got} left")]
    TruncatedRecord {
        kind: &'static str,
        wanted: usize,
        got: usize,
    },

    #[error("{kind}: could not read {field} from {line:?}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
        line: String,
    },
}

/// Run-level failures.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("cannot read {}: {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("extraction task for node {node} failed: {reason}")]
    Join { node: usize, reason: String },
}
