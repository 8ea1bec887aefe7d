//! Server lifecycle events. All single-line, fixed-message kinds.

use super::Fixed;
use crate::timestamp::Layout;
use crate::types::Tone;

/// `170505 14:35:47 mysqld_safe mysqld from pid file /tmp/tmp-mysql.pid ended`
pub(super) const PID_ENDED: Fixed = Fixed {
    description: "MySQL ended",
    signature: " from pid file ",
    layout: Layout::Legacy,
    message: "PID ended",
    tone: Tone::Plain,
};

pub(super) const NORMAL_SHUTDOWN: Fixed = Fixed {
    description: "MySQL normal shutdown",
    signature: "mysqld: Normal shutdown",
    layout: Layout::Primary,
    message: "Normal Shutdown",
    tone: Tone::Plain,
};

/// `... [Note] /usr/sbin/mysqld (mysqld 10.1.18-MariaDB) starting as process 24588 ...`
pub(super) const STARTUP: Fixed = Fixed {
    description: "MySQL startup",
    signature: "starting as process",
    layout: Layout::Primary,
    message: "MySQL startup",
    tone: Tone::Plain,
};

pub(super) const INNODB_SHUTDOWN: Fixed = Fixed {
    description: "InnoDB shutdown",
    signature: "InnoDB: Starting shutdown...",
    layout: Layout::Primary,
    message: "InnoDB shutdown",
    tone: Tone::Plain,
};

pub(super) const SHUTDOWN_COMPLETE: Fixed = Fixed {
    description: "InnoDB shutdown complete",
    signature: "mysqld: Shutdown complete",
    layout: Layout::Primary,
    message: "MySQL shutdown complete",
    tone: Tone::Plain,
};
