//! Pool of read connections, handed out round-robin.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use trellis_core::errors::StorageError;

use super::pragmas::apply_read_pragmas;
use crate::{to_storage_err, StorageResult};

/// Maximum number of read connections.
const MAX_POOL_SIZE: usize = 8;

pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open read-only connections to a database file.
    pub fn open(path: &Path, pool_size: usize, busy_timeout_ms: u32) -> StorageResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Self::open_with(pool_size, busy_timeout_ms, || {
            Connection::open_with_flags(path, flags)
        })
    }

    /// Open connections to a shared-cache URI.
    pub fn open_uri(uri: &str, pool_size: usize, busy_timeout_ms: u32) -> StorageResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Self::open_with(pool_size, busy_timeout_ms, || {
            Connection::open_with_flags(uri, flags)
        })
    }

    fn open_with<F>(pool_size: usize, busy_timeout_ms: u32, open: F) -> StorageResult<Self>
    where
        F: Fn() -> rusqlite::Result<Connection>,
    {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = open().map_err(to_storage_err)?;
            apply_read_pragmas(&conn, busy_timeout_ms)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Run `f` with the next connection. The lock is held only for the
    /// duration of `f`.
    pub fn with_conn<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|e| StorageError::ConnectionUnavailable {
                reason: format!("read pool lock poisoned: {e}"),
            })?;
        f(&guard)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}
