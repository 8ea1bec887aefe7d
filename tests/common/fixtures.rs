//! Canonical node-log samples used across harnesses.
//!
//! Each `SAMPLE_*` constant is one complete record exactly as a node writes
//! it, multi-line records included.

use std::path::PathBuf;

pub const SAMPLE_SHIFT: &str =
    "2015-10-28 16:36:52 10144 [Note] WSREP: Shifting PRIMARY -> JOINER (TO: 31389)";

pub const SAMPLE_QUORUM: &str = "2015-10-28 14:28:50 553 [Note] WSREP: Quorum results:
\tversion    = 3,
\tcomponent  = PRIMARY,
\tconf_id    = 4,
\tmembers    = 3/3 (joined/total),
\tact_id     = 11152,
\tlast_appl. = -1,
\tprotocols  = 0/7/3 (gcs/repl/appl),
\tgroup UUID = 98ed75de-7c05-11e5-9743-de4abc22bd11";

pub const SAMPLE_TRANSFER_REQUIRED: &str =
    "2015-10-28 16:36:51 10144 [Note] WSREP: State transfer required:
\tGroup state: 98ed75de-7c05-11e5-9743-de4abc22bd11:31382
\tLocal state: 98ed75de-7c05-11e5-9743-de4abc22bd11:11152";

pub const SAMPLE_RECOVERED: &str =
    "170614 14:02:28 mysqld_safe WSREP: Recovered position f3d1aa70-31a3-11e7-908c-f7a5ad9e63b1:40847697";

pub const SAMPLE_INTERRUPTOR: &str = "WSREP_SST: [ERROR] SST disabled due to danger of data loss. Verify data and bootstrap the cluster (20170506 15:14:06.902)";

pub const SAMPLE_PID_ENDED: &str =
    "170505 14:35:47 mysqld_safe mysqld from pid file /tmp/tmp-mysql.pid ended";

pub const SAMPLE_NORMAL_SHUTDOWN: &str =
    "2017-05-05 14:35:45 139716968405760 [Note] /var/vcap/packages/mariadb/bin/mysqld: Normal shutdown";

pub const SAMPLE_STARTUP: &str = "2017-05-06 16:53:13 140445682804608 [Note] /var/vcap/packages/mariadb/bin/mysqld (mysqld 10.1.18-MariaDB) starting as process 24588 ...";

pub const SAMPLE_INNODB_SHUTDOWN: &str =
    "2017-05-06 16:53:08 140348661906176 [Note] InnoDB: Starting shutdown...";

pub const SAMPLE_SHUTDOWN_COMPLETE: &str =
    "2017-05-05 14:35:47 139716968405760 [Note] /var/vcap/packages/mariadb/bin/mysqld: Shutdown complete";

pub const SAMPLE_PRIM_NOT_POSSIBLE: &str = "2017-05-05  6:50:37 140137601001344 [Warning] WSREP: no nodes coming from prim view, prim not possible";

pub const SAMPLE_VIEW: &str = "2017-06-14 10:11:35 139887269365504 [Note] WSREP: view(view_id(NON_PRIM,55433460,408) memb {";

pub const SAMPLE_SST_ROLE: &str = "2017-06-14 19:10:58 140682204215040 [Note] WSREP: Running: 'wsrep_sst_xtrabackup-v2 --role 'joiner' --address '10.19.148.90' --datadir '/var/vcap/store/mysql/'   --parent '32691' --binlog 'mysql-bin' '";

pub const SAMPLE_XID: &str = "2017-06-14 14:02:28 139993574066048 [Note] WSREP: Set WSREPXid for InnoDB:  f3d1aa70-31a3-11e7-908c-f7a5ad9e63b1:40847697";

pub const SAMPLE_FATAL: &str = "2017-05-06 16:53:14 140445682804608 [ERROR] Fatal error: Can't open and lock privilege tables: Table 'mysql.user' doesn't exist";

pub const SAMPLE_CONSISTENCY: &str = "2017-06-14 10:11:35 139887269365504 [ERROR] WSREP: Node consistency compromized, aborting...";

pub const SAMPLE_SQL_ERROR: &str = "2017-06-14 10:11:35 139887269365504 [ERROR] Slave SQL: Error in Xid_log_event: Commit could not be completed, 'Deadlock found when trying to get lock; try restarting transaction', Error_code: 1213";

/// Lines no matcher should claim.
pub const NOISE: &[&str] = &[
    "2017-05-06 16:53:13 140445682804608 [Note] InnoDB: Using mutexes to ref count buffer pool pages",
    "2017-05-06 16:53:13 140445682804608 [Note] InnoDB: The InnoDB memory heap is disabled",
    "2017-05-06 16:53:14 140445682804608 [Note] WSREP: gcomm: connecting to group 'cf-mariadb-galera-cluster'",
    "",
    "\tmembers    = 3/3 (joined/total),",
];

/// Write each node log into `dir` as `node<i>.log`, returning the paths in
/// node order.
pub fn write_node_logs(dir: &std::path::Path, logs: &[&str]) -> std::io::Result<Vec<PathBuf>> {
    logs.iter()
        .enumerate()
        .map(|(i, content)| {
            let path = dir.join(format!("node{i}.log"));
            std::fs::write(&path, content)?;
            Ok(path)
        })
        .collect()
}

/// Join lines into log text with a trailing newline.
pub fn log_text(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
