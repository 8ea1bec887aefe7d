//! Cluster membership events: state shifts, quorum results, views.

use phf::phf_map;

use super::{pattern, EventMatcher, Fixed};
use crate::builder::EventBuilder;
use crate::error::ExtractError;
use crate::reader::{Record, RecordReader};
use crate::timestamp::Layout;
use crate::types::{Event, Message, Tone};

/// Ordinal rank of each node state. A shift to a lower rank is a regression.
static STATE_RANK: phf::Map<&'static str, u32> = phf_map! {
    "ERROR" => 10,
    "DESTROYED" => 20,
    "CLOSED" => 30,
    "OPEN" => 40,
    "PRIMARY" => 50,
    "JOINER" => 60,
    "DONOR/DESYNCED" => 70,
    "DONOR" => 75,
    "JOINED" => 80,
    "SYNCED" => 90,
};

/// Rank of a named state; unknown states rank 0.
pub fn state_rank(state: &str) -> u32 {
    STATE_RANK.get(state).copied().unwrap_or(0)
}

pattern!(shift_re, r" Shifting (?P<from>\S+) -> (?P<to>\S+)(?: \(TO: (?P<seqno>-?\d+)\))?");
pattern!(component_re, r"component\s*=\s*(?P<component>[A-Za-z_-]+)");
pattern!(members_re, r"members\s*=\s*(?P<joined>\d+)/(?P<total>\d+)");
pattern!(view_re, r"view\(view_id\((?P<id>[A-Z_]*),");

// ---------------------------------------------------------------------------
// State shift
// ---------------------------------------------------------------------------

/// `WSREP: Shifting PRIMARY -> JOINER (TO: 31389)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateShift {
    pub from: String,
    pub to: String,
    /// Total-order sequence number at the time of the shift.
    pub seqno: Option<i64>,
}

impl StateShift {
    pub fn parse(record: &Record<'_>) -> Result<Self, ExtractError> {
        let caps = shift_re()
            .captures(record.line(0))
            .ok_or_else(|| record.missing("from/to states", 0))?;
        Ok(Self {
            from: caps["from"].to_string(),
            to: caps["to"].to_string(),
            seqno: caps.name("seqno").and_then(|m| m.as_str().parse().ok()),
        })
    }

    pub fn is_regressive(&self) -> bool {
        state_rank(&self.from) > state_rank(&self.to)
    }

    pub fn message(&self) -> Message {
        let msg = Message::plain(format!("{} => ", self.from))
            .push(Tone::good_if(!self.is_regressive()), self.to.clone());
        match self.seqno {
            Some(seqno) => msg.then(format!(" (TO: {seqno})")),
            None => msg,
        }
    }
}

pub(super) struct ShiftMatcher;

impl EventMatcher for ShiftMatcher {
    fn description(&self) -> &'static str {
        "Node is changing state"
    }

    fn signature(&self) -> &'static str {
        "WSREP: Shifting"
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let shift = StateShift::parse(&record)?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, shift.message()))
    }
}

// ---------------------------------------------------------------------------
// Quorum results
// ---------------------------------------------------------------------------

/// The nine-line `WSREP: Quorum results:` block.
///
/// ```text
/// 2015-10-28 14:28:50 553 [Note] WSREP: Quorum results:
///     version    = 3,
///     component  = PRIMARY,
///     conf_id    = 4,
///     members    = 3/3 (joined/total),
///     act_id     = 11152,
///     last_appl. = -1,
///     protocols  = 0/7/3 (gcs/repl/appl),
///     group UUID = 98ed75de-7c05-11e5-9743-de4abc22bd11
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuorumResult {
    pub component: String,
    pub joined: u32,
    pub total: u32,
}

impl QuorumResult {
    pub const LINES: usize = 9;
    const COMPONENT_LINE: usize = 2;
    const MEMBERS_LINE: usize = 4;

    pub fn parse(record: &Record<'_>) -> Result<Self, ExtractError> {
        let component = component_re()
            .captures(record.line(Self::COMPONENT_LINE))
            .ok_or_else(|| record.missing("component", Self::COMPONENT_LINE))?;
        let members = members_re()
            .captures(record.line(Self::MEMBERS_LINE))
            .ok_or_else(|| record.missing("members", Self::MEMBERS_LINE))?;
        let count = |name: &str| {
            members[name]
                .parse::<u32>()
                .map_err(|_| record.missing("members", Self::MEMBERS_LINE))
        };
        Ok(Self {
            component: component["component"].to_string(),
            joined: count("joined")?,
            total: count("total")?,
        })
    }

    pub fn is_primary(&self) -> bool {
        self.component == "PRIMARY"
    }

    /// Every member of the component has joined.
    pub fn is_complete(&self) -> bool {
        self.joined == self.total
    }

    pub fn message(&self) -> Message {
        Message::plain("Component: ")
            .push(Tone::good_if(self.is_primary()), self.component.clone())
            .then(", Members: ")
            .push(
                Tone::good_if(self.is_complete()),
                format!("{}/{}", self.joined, self.total),
            )
    }
}

pub(super) struct QuorumMatcher;

impl EventMatcher for QuorumMatcher {
    fn description(&self) -> &'static str {
        "Quorum results"
    }

    fn signature(&self) -> &'static str {
        "WSREP: Quorum results:"
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), QuorumResult::LINES)?;
        let quorum = QuorumResult::parse(&record)?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, quorum.message()))
    }
}

// ---------------------------------------------------------------------------
// Cluster view
// ---------------------------------------------------------------------------

/// `WSREP: view(view_id(NON_PRIM,55433460,408) memb {`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    Empty,
    Id(String),
    Unknown,
}

impl ViewChange {
    pub fn parse(line: &str) -> Self {
        if line.contains("empty") {
            return ViewChange::Empty;
        }
        match view_re().captures(line) {
            Some(caps) => ViewChange::Id(caps["id"].to_string()),
            None => ViewChange::Unknown,
        }
    }

    pub fn message(&self) -> Message {
        let msg = Message::plain("WSREP view => ");
        match self {
            ViewChange::Empty => msg.then("empty"),
            ViewChange::Id(id) => msg.push(Tone::good_if(id != "NON_PRIM"), id.clone()),
            ViewChange::Unknown => msg,
        }
    }
}

pub(super) struct ViewMatcher;

impl EventMatcher for ViewMatcher {
    fn description(&self) -> &'static str {
        "Cluster View"
    }

    fn signature(&self) -> &'static str {
        "WSREP: view("
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let view = ViewChange::parse(record.line(0));
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, view.message()))
    }
}

pub(super) const PRIM_NOT_POSSIBLE: Fixed = Fixed {
    description: "Primary not possible",
    signature: "WSREP: no nodes coming from prim view",
    layout: Layout::Primary,
    message: "Primary not possible",
    tone: Tone::Alert,
};
