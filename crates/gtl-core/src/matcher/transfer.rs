//! State-transfer events: positions, SST direction, interruptions.

use super::{pattern, EventMatcher, Fixed};
use crate::builder::EventBuilder;
use crate::error::ExtractError;
use crate::reader::{Record, RecordReader};
use crate::timestamp::Layout;
use crate::types::{Event, Message, Tone};

pattern!(group_state_re, r"Group state:\s*(?P<uuid>[^\s:]+):(?P<seqno>-?\d+)");
pattern!(local_state_re, r"Local state:\s*(?P<uuid>[^\s:]+):(?P<seqno>-?\d+)");
pattern!(recovered_re, r"Recovered position:?\s+(?P<uuid>[^\s:]+):(?P<seqno>-?\d+)");
pattern!(xid_re, r"Set WSREPXid for InnoDB:\s*(?P<uuid>[^\s:]+):(?P<seqno>-?\d+)");
pattern!(sst_role_re, r"--role '(?P<role>[^']*)' --address '(?P<address>[^']*)'");

/// A `uuid:seqno` replication position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub uuid: String,
    pub seqno: i64,
}

impl Position {
    fn from_line(
        re: &regex::Regex,
        record: &Record<'_>,
        idx: usize,
        field: &'static str,
    ) -> Result<Self, ExtractError> {
        let caps = re
            .captures(record.line(idx))
            .ok_or_else(|| record.missing(field, idx))?;
        Ok(Self {
            uuid: caps["uuid"].to_string(),
            seqno: caps["seqno"]
                .parse()
                .map_err(|_| record.missing(field, idx))?,
        })
    }

    /// A seqno of `-1` means the node does not know where it is.
    pub fn is_undefined(&self) -> bool {
        self.seqno == -1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.uuid, self.seqno)
    }
}

// ---------------------------------------------------------------------------
// State transfer required
// ---------------------------------------------------------------------------

/// ```text
/// 2015-10-28 16:36:51 10144 [Note] WSREP: State transfer required:
///     Group state: 98ed75de-7c05-11e5-9743-de4abc22bd11:31382
///     Local state: 98ed75de-7c05-11e5-9743-de4abc22bd11:11152
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequired {
    pub group: Position,
    pub local: Position,
}

impl TransferRequired {
    pub const LINES: usize = 3;

    pub fn parse(record: &Record<'_>) -> Result<Self, ExtractError> {
        Ok(Self {
            group: Position::from_line(group_state_re(), record, 1, "group state")?,
            local: Position::from_line(local_state_re(), record, 2, "local state")?,
        })
    }

    /// How many transactions the node is behind the group.
    pub fn gap(&self) -> Option<i64> {
        (self.group.uuid == self.local.uuid && !self.local.is_undefined())
            .then(|| self.group.seqno - self.local.seqno)
    }

    pub fn message(&self) -> Message {
        Message::plain(format!("Group: {}, Local: ", self.group))
            .push(Tone::good_if(!self.local.is_undefined()), self.local.to_string())
    }
}

pub(super) struct TransferRequiredMatcher;

impl EventMatcher for TransferRequiredMatcher {
    fn description(&self) -> &'static str {
        "State Transfer Required"
    }

    fn signature(&self) -> &'static str {
        "WSREP: State transfer required:"
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), TransferRequired::LINES)?;
        let transfer = TransferRequired::parse(&record)?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, transfer.message()))
    }
}

// ---------------------------------------------------------------------------
// Recovered position
// ---------------------------------------------------------------------------

/// `170614 14:02:28 mysqld_safe WSREP: Recovered position f3d1aa70-...:40847697`
pub(super) struct RecoveredMatcher;

impl EventMatcher for RecoveredMatcher {
    fn description(&self) -> &'static str {
        "WSREP recovered position"
    }

    fn signature(&self) -> &'static str {
        "WSREP: Recovered position "
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let position = Position::from_line(recovered_re(), &record, 0, "position")?;
        let message = Message::plain("Recovered position: ").push(
            Tone::good_if(!position.is_undefined()),
            position.to_string(),
        );
        let ts = record.timestamp(Layout::Legacy, 0);
        Ok(builder.from_record(&record, ts, message))
    }
}

// ---------------------------------------------------------------------------
// Transaction identifier
// ---------------------------------------------------------------------------

/// `WSREP: Set WSREPXid for InnoDB:  f3d1aa70-...:40847697`
pub(super) struct XidMatcher;

impl EventMatcher for XidMatcher {
    fn description(&self) -> &'static str {
        "Transaction identifier"
    }

    fn signature(&self) -> &'static str {
        "WSREP: Set WSREPXid for InnoDB:"
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let xid = Position::from_line(xid_re(), &record, 0, "xid")?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, Message::plain(format!("WSREP XID: {xid}"))))
    }
}

// ---------------------------------------------------------------------------
// SST role
// ---------------------------------------------------------------------------

/// Direction of a state snapshot transfer, from the `wsrep_sst_*` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SstRole {
    Joiner { address: String },
    Donor { address: String },
    Other { role: String, address: String },
}

impl SstRole {
    pub fn parse(record: &Record<'_>) -> Result<Self, ExtractError> {
        let caps = sst_role_re()
            .captures(record.line(0))
            .ok_or_else(|| record.missing("role/address", 0))?;
        let address = caps["address"].to_string();
        Ok(match &caps["role"] {
            "joiner" => SstRole::Joiner { address },
            "donor" => SstRole::Donor { address },
            role => SstRole::Other {
                role: role.to_string(),
                address,
            },
        })
    }

    pub fn message(&self) -> Message {
        match self {
            SstRole::Joiner { address } => Message::plain(format!("Joining from {address}")),
            SstRole::Donor { address } => Message::plain(format!("Donating to {address}")),
            SstRole::Other { role, .. } => Message::alert(format!("Unknown SST role {role}")),
        }
    }
}

pub(super) struct SstRoleMatcher;

impl EventMatcher for SstRoleMatcher {
    fn description(&self) -> &'static str {
        "SST role"
    }

    fn signature(&self) -> &'static str {
        "WSREP: Running: "
    }

    fn extract(
        &self,
        reader: &mut RecordReader<'_>,
        builder: &EventBuilder<'_>,
    ) -> Result<Event, ExtractError> {
        let record = reader.advance(self.description(), 1)?;
        let role = SstRole::parse(&record)?;
        let ts = record.timestamp(Layout::Primary, 0);
        Ok(builder.from_record(&record, ts, role.message()))
    }
}

pub(super) const INTERRUPTOR: Fixed = Fixed {
    description: "Interruptor",
    signature: "SST disabled due to danger of data loss",
    layout: Layout::SstTool,
    message: "++++++++++ Interruptor ++++++++++",
    tone: Tone::Alert,
};
