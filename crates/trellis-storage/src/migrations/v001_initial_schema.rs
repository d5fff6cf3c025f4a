//! v001: entities, typed edges, vector indexes, embeddings.

use rusqlite::Connection;

use crate::{to_storage_err, StorageResult};

pub fn migrate(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS authors (
            id    TEXT PRIMARY KEY,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS documents (
            id     TEXT PRIMARY KEY,
            title  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS fragments (
            id    TEXT PRIMARY KEY,
            text  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS edges (
            kind       TEXT NOT NULL,
            source_id  TEXT NOT NULL,
            target_id  TEXT NOT NULL,
            PRIMARY KEY (kind, source_id, target_id)
        );

        CREATE INDEX IF NOT EXISTS idx_edges_target ON edges(kind, target_id);

        CREATE TABLE IF NOT EXISTS vector_indexes (
            name        TEXT PRIMARY KEY,
            dimensions  INTEGER NOT NULL CHECK (dimensions > 0)
        );

        CREATE TABLE IF NOT EXISTS embeddings (
            index_name   TEXT NOT NULL REFERENCES vector_indexes(name) ON DELETE CASCADE,
            fragment_id  TEXT NOT NULL REFERENCES fragments(id) ON DELETE CASCADE,
            vector       BLOB NOT NULL,
            PRIMARY KEY (index_name, fragment_id)
        );
        ",
    )
    .map_err(to_storage_err)?;
    Ok(())
}
