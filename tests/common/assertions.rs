//! Domain-specific assertion macros for gtl harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! timeline invariant was violated.

use gtl::Event;

/// Assert that an event's plain message text equals the expected string.
///
/// ```rust
/// assert_message!(event, "MySQL startup");
/// ```
#[macro_export]
macro_rules! assert_message {
    ($event:expr, $expected:expr) => {{
        let event: &gtl::Event = &$event;
        let expected: &str = $expected;
        let actual = event.message.to_string();
        if actual != expected {
            panic!(
                "assert_message! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw: {:?}",
                expected, actual, event.raw
            );
        }
    }};
}

/// Assert that an event's `raw` field splits back into exactly the given lines.
#[macro_export]
macro_rules! assert_raw_verbatim {
    ($event:expr, $text:expr) => {{
        let event: &gtl::Event = &$event;
        let expected: Vec<&str> = $text.lines().collect();
        let actual: Vec<&str> = event.raw_lines().collect();
        pretty_assertions::assert_eq!(actual, expected, "raw lines were altered");
    }};
}

/// Assert that a timeline is sorted by `(timestamp, sequence)`.
pub fn assert_time_ordered(timeline: &[Event]) {
    for pair in timeline.windows(2) {
        assert!(
            pair[0].sort_key() < pair[1].sort_key(),
            "timeline out of order:\n  {:?} (seq {})\n  before\n  {:?} (seq {})",
            pair[0].timestamp,
            pair[0].sequence,
            pair[1].timestamp,
            pair[1].sequence
        );
    }
}

/// Assert that no two events share a sequence number.
pub fn assert_unique_sequences(timeline: &[Event]) {
    let unique: std::collections::HashSet<u64> = timeline.iter().map(|e| e.sequence).collect();
    assert_eq!(
        unique.len(),
        timeline.len(),
        "sequence numbers must be unique across nodes"
    );
}
