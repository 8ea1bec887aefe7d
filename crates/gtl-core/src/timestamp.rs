//! Timestamp normalizer.
//!
//! Different subsystems of a node stamp their lines differently, so the
//! layout to apply is chosen by the matcher, never guessed from the text.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::ExtractError;

/// The textual timestamp layouts found in node logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// `2015-10-28 16:36:52` at the start of the line. The hour may be
    /// space padded (`2017-05-05  6:50:37`).
    Primary,
    /// `20170506 15:14:06` anywhere in the line, as written by the SST scripts.
    SstTool,
    /// `170505 14:35:47` anywhere in the line, as written by older servers
    /// and `mysqld_safe`.
    Legacy,
}

impl Layout {
    fn pattern(self) -> &'static Regex {
        static PRIMARY: OnceLock<Regex> = OnceLock::new();
        static SST_TOOL: OnceLock<Regex> = OnceLock::new();
        static LEGACY: OnceLock<Regex> = OnceLock::new();
        match self {
            Layout::Primary => PRIMARY.get_or_init(|| {
                Regex::new(r"^(\d{4}-\d{2}-\d{2}) +(\d{1,2}:\d{2}:\d{2})")
                    .expect("valid primary timestamp regex")
            }),
            Layout::SstTool => SST_TOOL.get_or_init(|| {
                Regex::new(r"\b(\d{8}) +(\d{1,2}:\d{2}:\d{2})")
                    .expect("valid sst timestamp regex")
            }),
            Layout::Legacy => LEGACY.get_or_init(|| {
                Regex::new(r"\b(\d{6}) +(\d{1,2}:\d{2}:\d{2})")
                    .expect("valid legacy timestamp regex")
            }),
        }
    }

    fn format(self) -> &'static str {
        match self {
            Layout::Primary => "%Y-%m-%d %H:%M:%S",
            Layout::SstTool => "%Y%m%d %H:%M:%S",
            Layout::Legacy => "%y%m%d %H:%M:%S",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Primary => write!(f, "primary"),
            Layout::SstTool => write!(f, "sst"),
            Layout::Legacy => write!(f, "legacy"),
        }
    }
}

/// Find and parse the `layout` timestamp embedded in `text`.
pub fn parse(layout: Layout, text: &str) -> Result<NaiveDateTime, ExtractError> {
    let malformed = || ExtractError::MalformedTimestamp {
        layout,
        line: text.to_string(),
    };
    let caps = layout.pattern().captures(text).ok_or_else(malformed)?;
    let stamp = format!("{} {}", &caps[1], &caps[2]);
    NaiveDateTime::parse_from_str(&stamp, layout.format()).map_err(|_| malformed())
}
