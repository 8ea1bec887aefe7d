//! Cross-node merge.

use crate::pipeline::NodeEvents;
use crate::types::Event;

/// Pool every node's events and order them by `(timestamp, sequence)`.
///
/// Events whose timestamp is the missing sentinel come first. Equal
/// timestamps keep discovery order, because `sequence` is unique.
pub fn merge<I>(nodes: I) -> Vec<Event>
where
    I: IntoIterator<Item = NodeEvents>,
{
    let mut timeline: Vec<Event> = nodes.into_iter().flat_map(|n| n.events).collect();
    timeline.sort_by_key(Event::sort_key);
    timeline
}
