//! PRAGMA configuration applied to every SQLite connection.

use std::time::Duration;

use rusqlite::Connection;

use crate::{to_storage_err, StorageResult};

/// Writer pragmas: WAL, NORMAL sync, foreign keys on.
pub fn apply_write_pragmas(conn: &Connection, busy_timeout_ms: u32) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_millis(u64::from(busy_timeout_ms)))
        .map_err(to_storage_err)?;
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Reader pragmas. Readers never write, even on shared in-memory databases
/// where the connection cannot be opened read-only. Reads stay isolated from
/// the writer's open transaction.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_millis(u64::from(busy_timeout_ms)))
        .map_err(to_storage_err)?;
    conn.execute_batch("PRAGMA query_only = ON;")
        .map_err(to_storage_err)?;
    Ok(())
}

/// Whether WAL mode is active. In-memory databases report `memory`.
pub fn verify_wal_mode(conn: &Connection) -> StorageResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
