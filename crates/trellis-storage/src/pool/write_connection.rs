//! The single serialized write connection.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use trellis_core::errors::StorageError;

use super::pragmas::apply_write_pragmas;
use crate::{to_storage_err, StorageResult};

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> StorageResult<Self> {
        let conn = Connection::open(path).map_err(to_storage_err)?;
        apply_write_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_uri(uri: &str, busy_timeout_ms: u32) -> StorageResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(uri, flags).map_err(to_storage_err)?;
        apply_write_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn_sync<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| StorageError::ConnectionUnavailable {
                reason: format!("writer lock poisoned: {e}"),
            })?;
        f(&guard)
    }
}
