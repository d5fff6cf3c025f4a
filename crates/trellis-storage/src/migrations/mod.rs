//! Forward-only schema migrations tracked in `schema_version`.

mod v001_initial_schema;

use rusqlite::{params, Connection};
use tracing::info;
use trellis_core::errors::StorageError;

use crate::{to_storage_err, StorageResult};

type MigrationFn = fn(&Connection) -> StorageResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[(1, v001_initial_schema::migrate)];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
        .map_err(to_storage_err)?;
    let current = current_version(conn)?;

    for &(version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn.unchecked_transaction().map_err(to_storage_err)?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", params![version])
            .map_err(to_storage_err)?;
        tx.commit().map_err(to_storage_err)?;
        info!(version, "applied schema migration");
    }
    Ok(())
}

pub fn current_version(conn: &Connection) -> StorageResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}
