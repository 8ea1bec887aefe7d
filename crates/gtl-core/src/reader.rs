//! Record reader: a single-pass line cursor over one node's log.
//!
//! The pipeline moves the cursor one line at a time with
//! [`RecordReader::next_line`]. Once a matcher recognises the current line it
//! calls [`RecordReader::advance`] to take that line and the ones that belong
//! with it as a single [`Record`].

use std::str::Lines;

use crate::error::ExtractError;
use crate::timestamp::{self, Layout};

pub struct RecordReader<'a> {
    lines: Lines<'a>,
    current: Option<&'a str>,
    /// 1-based number of `current`; 0 before the first line.
    line_no: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            current: None,
            line_no: 0,
        }
    }

    /// Move to the next line and return it, or `None` at end of stream.
    pub fn next_line(&mut self) -> Option<&'a str> {
        self.current = self.lines.next();
        if self.current.is_some() {
            self.line_no += 1;
        }
        self.current
    }

    /// The line under the cursor, unless it has been consumed.
    pub fn current(&self) -> Option<&'a str> {
        self.current
    }

    /// 1-based number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Take exactly `n` lines starting at the current one.
    ///
    /// The cursor ends up past the record, so the next [`next_line`] call
    /// returns the first line after it. When the stream runs out first, all
    /// remaining lines are consumed and `TruncatedRecord` is returned.
    ///
    /// [`next_line`]: RecordReader::next_line
    pub fn advance(&mut self, kind: &'static str, n: usize) -> Result<Record<'a>, ExtractError> {
        let start = self.line_no;
        let mut lines = Vec::with_capacity(n);
        if let Some(first) = self.current.take() {
            lines.push(first);
        }
        while lines.len() < n {
            match self.lines.next() {
                Some(line) => {
                    self.line_no += 1;
                    lines.push(line);
                }
                None => {
                    return Err(ExtractError::TruncatedRecord {
                        kind,
                        wanted: n,
                        got: lines.len(),
                    })
                }
            }
        }
        Ok(Record {
            kind,
            start_line: start,
            lines,
        })
    }
}

/// Consecutive lines that together describe one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    kind: &'static str,
    start_line: usize,
    lines: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// Description of the event kind that claimed this record.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// 1-based line number of the first line.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Line `idx` of the record. Records are always built with their full
    /// line count, so out-of-range access is a matcher bug and yields "".
    pub fn line(&self, idx: usize) -> &'a str {
        self.lines.get(idx).copied().unwrap_or("")
    }

    /// The source lines, newline-joined.
    pub fn raw(&self) -> String {
        self.lines.join("\n")
    }

    /// Parse the `layout` timestamp found on line `idx`.
    pub fn timestamp(
        &self,
        layout: Layout,
        idx: usize,
    ) -> Result<chrono::NaiveDateTime, ExtractError> {
        timestamp::parse(layout, self.line(idx))
    }

    /// A `MissingField` error pointing at line `idx`.
    pub fn missing(&self, field: &'static str, idx: usize) -> ExtractError {
        ExtractError::MissingField {
            kind: self.kind,
            field,
            line: self.line(idx).to_string(),
        }
    }
}
