//! Per-node extraction pipeline.
//!
//! [`extract_node`] walks one node's log text and returns every event it
//! recognises. Failures are scoped to the record in progress: a truncated or
//! unparseable record is logged, kept in [`NodeEvents::skipped`], and the
//! scan carries on with the next line.
//!
//! [`extract_all`] is the sequential baseline: node 0 is scanned to the end
//! before node 1 starts, so discovery order, and therefore the merge
//! tie-break, is "node-major, then line order". [`extract_all_parallel`]
//! scans every file on its own blocking task; sequence numbers stay unique
//! and increase in line order within a node, but the interleaving across
//! nodes depends on which task reaches the shared counter first.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::builder::{EventBuilder, SequenceGen};
use crate::error::{ExtractError, TimelineError};
use crate::matcher::Registry;
use crate::reader::RecordReader;
use crate::types::Event;

/// Everything one node's pipeline produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEvents {
    pub node: usize,
    /// Events in discovery (file line) order.
    pub events: Vec<Event>,
    /// Records that were recognised but abandoned.
    pub skipped: Vec<ExtractError>,
}

impl NodeEvents {
    /// Number of events kept with the missing-timestamp sentinel.
    pub fn malformed(&self) -> usize {
        self.events.iter().filter(|e| e.timestamp.is_none()).count()
    }

    /// Whether any record was cut short by the end of the file.
    pub fn truncated(&self) -> bool {
        self.skipped
            .iter()
            .any(|e| matches!(e, ExtractError::TruncatedRecord { .. }))
    }
}

/// Extract events from one node's log text.
pub fn extract_node(
    node: usize,
    content: &str,
    registry: &Registry,
    seq: &SequenceGen,
) -> NodeEvents {
    let builder = EventBuilder::new(node, seq);
    let mut reader = RecordReader::new(content);
    let mut out = NodeEvents {
        node,
        ..NodeEvents::default()
    };

    while let Some(line) = reader.next_line() {
        let Some(matcher) = registry.find(line) else {
            continue;
        };
        let line_no = reader.line_number();
        match matcher.extract(&mut reader, &builder) {
            Ok(event) => out.events.push(event),
            Err(err) => {
                tracing::warn!(node, line = line_no, "skipping record: {err}");
                out.skipped.push(err);
            }
        }
    }
    out
}

/// Read one node's log file and extract its events.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn extract_file(
    node: usize,
    path: &Path,
    registry: &Registry,
    seq: &SequenceGen,
) -> Result<NodeEvents, TimelineError> {
    let bytes = std::fs::read(path).map_err(|source| TimelineError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    let events = extract_node(node, &content, registry, seq);
    tracing::info!(
        node,
        path = %path.display(),
        events = events.events.len(),
        skipped = events.skipped.len(),
        "extracted node log"
    );
    Ok(events)
}

/// Extract every file in order, one after the other. File `i` is node `i`.
pub fn extract_all<P: AsRef<Path>>(
    paths: &[P],
    registry: &Registry,
) -> Result<Vec<NodeEvents>, TimelineError> {
    let seq = SequenceGen::new();
    paths
        .iter()
        .enumerate()
        .map(|(node, path)| extract_file(node, path.as_ref(), registry, &seq))
        .collect()
}

/// Extract every file concurrently, one blocking task per file.
///
/// Results come back in node order. Cross-node tie-break order is not
/// reproducible between runs; use [`extract_all`] when it must be.
pub async fn extract_all_parallel(
    paths: Vec<PathBuf>,
    registry: Arc<Registry>,
) -> Result<Vec<NodeEvents>, TimelineError> {
    let seq = Arc::new(SequenceGen::new());
    let handles: Vec<_> = paths
        .into_iter()
        .enumerate()
        .map(|(node, path)| {
            let registry = Arc::clone(&registry);
            let seq = Arc::clone(&seq);
            tokio::task::spawn_blocking(move || extract_file(node, &path, &registry, &seq))
        })
        .collect();

    let mut out = Vec::with_capacity(handles.len());
    for (node, handle) in handles.into_iter().enumerate() {
        let events = handle.await.map_err(|err| TimelineError::Join {
            node,
            reason: err.to_string(),
        })??;
        out.push(events);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NODE_LOG: &str = "\
2017-05-06 16:53:13 140445682804608 [Note] /usr/sbin/mysqld (mysqld 10.1.18-MariaDB) starting as process 24588 ...
2017-05-06 16:53:13 140445682804608 [Note] InnoDB: Using mutexes to ref count buffer pool pages
2015-10-28 14:28:50 553 [Note] WSREP: Quorum results:
\tversion    = 3,
\tcomponent  = PRIMARY,
\tconf_id    = 4,
\tmembers    = 3/3 (joined/total),
\tact_id     = 11152,
\tlast_appl. = -1,
\tprotocols  = 0/7/3 (gcs/repl/appl),
\tgroup UUID = 98ed75de-7c05-11e5-9743-de4abc22bd11
2015-10-28 16:36:52 10144 [Note] WSREP: Shifting PRIMARY -> JOINER (TO: 31389)";

    #[test]
    fn extracts_in_file_order() {
        let seq = SequenceGen::new();
        let out = extract_node(0, NODE_LOG, &Registry::standard(), &seq);
        let messages: Vec<_> = out.events.iter().map(|e| e.message.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "MySQL startup",
                "Component: PRIMARY, Members: 3/3",
                "PRIMARY => JOINER (TO: 31389)",
            ]
        );
        assert_eq!(
            out.events.iter().map(|e| e.sequence).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn truncated_record_keeps_earlier_events() {
        let text = "\
2017-05-06 16:53:13 1 [Note] mysqld (mysqld 10.1.18-MariaDB) starting as process 24588 ...
2015-10-28 14:28:50 553 [Note] WSREP: Quorum results:
\tversion    = 3,
\tcomponent  = PRIMARY,
\tconf_id    = 4,
\tmembers    = 3/3 (joined/total),";
        let seq = SequenceGen::new();
        let out = extract_node(1, text, &Registry::standard(), &seq);
        assert_eq!(out.events.len(), 1);
        assert!(out.truncated());
        assert_eq!(
            out.skipped,
            vec![ExtractError::TruncatedRecord {
                kind: "Quorum results",
                wanted: 9,
                got: 5,
            }]
        );
    }

    #[test]
    fn malformed_timestamp_is_counted_not_dropped() {
        let text = "Tue May 6 16:53:13 mysqld: Normal shutdown";
        let seq = SequenceGen::new();
        let out = extract_node(0, text, &Registry::standard(), &seq);
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.malformed(), 1);
    }

    #[test]
    fn missing_payload_skips_only_that_record() {
        let text = "\
2017-06-14 19:10:58 1 [Note] WSREP: Running: 'wsrep_sst_rsync'
2017-05-05 14:35:45 1 [Note] /usr/sbin/mysqld: Normal shutdown";
        let seq = SequenceGen::new();
        let out = extract_node(0, text, &Registry::standard(), &seq);
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.events[0].message.to_string(), "Normal Shutdown");
        assert!(matches!(
            out.skipped.as_slice(),
            [ExtractError::MissingField { kind: "SST role", .. }]
        ));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = extract_all(&["/definitely/not/here.log"], &Registry::standard()).unwrap_err();
        assert!(matches!(err, TimelineError::FileUnavailable { .. }));
    }
}
