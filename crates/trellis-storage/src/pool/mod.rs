//! Connection pool: one write connection plus a round-robin read pool.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use trellis_core::config::StorageConfig;
use trellis_core::errors::StorageError;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

use crate::StorageResult;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
    closed: AtomicBool,
}

impl ConnectionPool {
    /// Open the pool for a database file. Migrations run on the writer
    /// before any reader is opened, so readers always see the schema.
    pub fn open(path: &Path, config: &StorageConfig) -> StorageResult<Self> {
        let writer = WriteConnection::open(path, config.busy_timeout_ms)?;
        writer.with_conn_sync(crate::migrations::run_migrations)?;
        let readers = ReadPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
            closed: AtomicBool::new(false),
        })
    }

    /// Open a private in-memory database. All connections share one cache
    /// through a uniquely named `mode=memory` URI, so readers see the
    /// writer's commits. The database lives as long as the writer.
    pub fn open_in_memory(config: &StorageConfig) -> StorageResult<Self> {
        let uri = format!("file:trellis-{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
        let writer = WriteConnection::open_uri(&uri, config.busy_timeout_ms)?;
        writer.with_conn_sync(crate::migrations::run_migrations)?;
        let readers = ReadPool::open_uri(&uri, config.read_pool_size, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
            closed: AtomicBool::new(false),
        })
    }

    /// Refuse all further reads and writes.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub(crate) fn ensure_open(&self) -> StorageResult<()> {
        if self.is_closed() {
            return Err(StorageError::ConnectionUnavailable {
                reason: "store is closed".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_storage_err;

    fn author_count(pool: &ConnectionPool) -> StorageResult<i64> {
        pool.readers.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM authors WHERE id = 'a-pending'", [], |row| row.get(0))
                .map_err(to_storage_err)
        })
    }

    #[test]
    fn shared_memory_readers_never_see_uncommitted_writes() {
        let pool = ConnectionPool::open_in_memory(&StorageConfig::default()).unwrap();

        let during = pool
            .writer
            .with_conn_sync(|conn| {
                conn.execute_batch("BEGIN; INSERT INTO authors (id, name) VALUES ('a-pending', 'Pending');")
                    .map_err(to_storage_err)?;
                let seen = author_count(&pool);
                conn.execute_batch("ROLLBACK;").map_err(to_storage_err)?;
                Ok(seen)
            })
            .unwrap();
        // Either blocked by the writer's table lock or reading the last commit.
        assert!(!matches!(during, Ok(n) if n > 0));

        assert_eq!(author_count(&pool).unwrap(), 0);
    }
}
