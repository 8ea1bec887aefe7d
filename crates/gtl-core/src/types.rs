//! Core types for gtl-core.
//!
//! This module defines the data structures handed from the extraction
//! pipelines to the merge stage and on to renderers: the [`Event`] itself and
//! its annotated [`Message`].

use chrono::NaiveDateTime;
use serde::Serialize;

/// A single point-in-time occurrence attributable to one node.
///
/// Events are immutable once built; only [`crate::EventBuilder`] creates them
/// so that every event carries a run-wide unique `sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// When the event happened, at one-second resolution. `None` when the
    /// record's timestamp could not be parsed; such events sort first.
    pub timestamp: Option<NaiveDateTime>,
    /// 0-based position of the owning log file among the inputs.
    pub node: usize,
    /// Discovery order across the whole run. Only used to break timestamp ties.
    pub sequence: u64,
    /// Short, annotated, human-oriented summary.
    pub message: Message,
    /// The exact source line(s), newline-joined.
    pub raw: String,
}

impl Event {
    /// The compound key the merge stage sorts by.
    pub fn sort_key(&self) -> (Option<NaiveDateTime>, u64) {
        (self.timestamp, self.sequence)
    }

    /// Display label for the owning node, e.g. `node2`.
    pub fn node_label(&self) -> String {
        format!("node{}", self.node)
    }

    /// The source lines this event was built from.
    pub fn raw_lines(&self) -> impl Iterator<Item = &str> {
        self.raw.split('\n')
    }
}

/// Severity markup attached to part of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Plain,
    Good,
    Alert,
}

impl Tone {
    /// `Good` when the condition holds, `Alert` otherwise.
    pub fn good_if(ok: bool) -> Self {
        if ok {
            Tone::Good
        } else {
            Tone::Alert
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Plain => write!(f, "plain"),
            Tone::Good => write!(f, "good"),
            Tone::Alert => write!(f, "alert"),
        }
    }
}

/// A run of message text sharing one [`Tone`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

/// An event summary made of toned spans.
///
/// `Display` yields the plain text; renderers that support colour walk
/// [`Message::spans`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Message {
    spans: Vec<Span>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// A message consisting of one plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().push(Tone::Plain, text)
    }

    /// A message consisting of one alert span.
    pub fn alert(text: impl Into<String>) -> Self {
        Self::new().push(Tone::Alert, text)
    }

    /// Append a span. Empty text is dropped.
    pub fn push(mut self, tone: Tone, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span { text, tone });
        }
        self
    }

    /// Append a plain span.
    pub fn then(self, text: impl Into<String>) -> Self {
        self.push(Tone::Plain, text)
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether any part of the message is flagged.
    pub fn is_alert(&self) -> bool {
        self.spans.iter().any(|s| s.tone == Tone::Alert)
    }

    /// The tone of the first span whose text equals `text`.
    pub fn tone_of(&self, text: &str) -> Option<Tone> {
        self.spans.iter().find(|s| s.text == text).map(|s| s.tone)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}
