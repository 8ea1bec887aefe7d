//! gtl: Galera timeline
//!
//! Reconstructs one chronologically ordered narrative from the logs of every
//! node in a replicated database cluster. This crate re-exports the
//! extraction engine from `gtl-core` and adds the outer layers the binary
//! needs, so integration tests can import them directly.
//!
//! # Architecture
//!
//! ```text
//! files ──► gtl_core::extract_all ──► gtl_core::merge ──► render
//!                                                           ▲
//!                                             config ───────┘
//! ```

pub mod config;
pub mod render;

pub use gtl_core::*;

use std::path::PathBuf;
use std::sync::Arc;

/// Extract and merge the given node logs. File `i` is node `i`.
pub fn build_timeline(paths: &[PathBuf], parallel: bool) -> anyhow::Result<Vec<Event>> {
    let registry = Registry::standard();
    let nodes = if parallel {
        tokio::runtime::Runtime::new()?
            .block_on(extract_all_parallel(paths.to_vec(), Arc::new(registry)))?
    } else {
        extract_all(paths, &registry)?
    };

    for node in &nodes {
        if node.malformed() > 0 {
            tracing::warn!(
                node = node.node,
                count = node.malformed(),
                "events without a parseable timestamp"
            );
        }
        if !node.skipped.is_empty() {
            tracing::warn!(
                node = node.node,
                count = node.skipped.len(),
                "records abandoned"
            );
        }
    }
    Ok(merge(nodes))
}
