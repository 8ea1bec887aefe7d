//! Fatal and data-integrity errors.

use super::{pattern, EventMatcher, Fixed};
use crate::builder::EventBuilder;
use crate::error::ExtractError;
use crate::reader::{Record, RecordReader};
use crate::timestamp::Layout;
use crate::types::{Event, Message, Tone};

pattern!(fatal_re, r"Fatal error: (?P<text>.*)$");
pattern!(sql_error_re, r"Slave SQL: (?P<text>.*?)(?:, Error_code: (?P<code>\d+))?;?\s*$");

/// `[ERROR] Fatal error: Can't open and lock privilege tables: ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    pub text: String,
}

impl FatalError {
    pub fn parse(record: &Record<'_>) -> Result<Self, ExtractError> {
        let caps = fatal_re()
            .captures(record.line(0))
            .ok_or_else(|| record.missing("error text", 0))?;
        Ok(Self {
            text: caps["text"].trim().to_string(),
        })
    }

    pub fn message(&self) -> Message {
        Message::alert(format!("Fatal error: {}", self.text))
    }
}

pub(super) struct FatalMatcher;

impl EventMatcher for FatalMatcher {
    fn description(&self) -> &'static str {
        "Fatal error"
    }

    fn signature(&self) -> &'static str {
        "[ERROR] Fatal error: "
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let fatal = FatalError::parse(&record)?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, fatal.message()))
    }
}

/// `[ERROR] Slave SQL: Could not execute Write_rows event on table ..., Error_code: 1062;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlError {
    pub code: Option<u32>,
    pub text: String,
}

impl SqlError {
    pub fn parse(record: &Record<'_>) -> Result<Self, ExtractError> {
        let caps = sql_error_re()
            .captures(record.line(0))
            .ok_or_else(|| record.missing("error text", 0))?;
        Ok(Self {
            code: caps.name("code").and_then(|m| m.as_str().parse().ok()),
            text: caps["text"].trim().to_string(),
        })
    }

    pub fn message(&self) -> Message {
        let label = match self.code {
            Some(code) => format!("Replication SQL error {code}: "),
            None => "Replication SQL error: ".to_string(),
        };
        Message::alert(label).then(self.text.clone())
    }
}

pub(super) struct SqlErrorMatcher;

impl EventMatcher for SqlErrorMatcher {
    fn description(&self) -> &'static str {
        "Replication SQL error"
    }

    fn signature(&self) -> &'static str {
        "Slave SQL: "
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let error = SqlError::parse(&record)?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, error.message()))
    }
}

/// Galera logs both "compromised" and the historical "compromized".
pub(super) const CONSISTENCY_COMPROMISED: Fixed = Fixed {
    description: "Consistency compromised",
    signature: "WSREP: Node consistency compromi",
    layout: Layout::Primary,
    message: "Node consistency compromised",
    tone: Tone::Alert,
};
