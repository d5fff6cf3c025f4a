//! Insert helpers for entities and edges.

use rusqlite::{params, Connection};

use trellis_core::constants::{EDGE_AUTHORED, EDGE_CONTAINS};
use trellis_core::models::{Author, Document, Fragment};

use crate::{to_storage_err, StorageResult};

pub fn insert_author(conn: &Connection, author: &Author) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO authors (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![author.id, author.name],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Insert a document and, when it has an author, the `authored` edge.
pub fn insert_document(conn: &Connection, document: &Document) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO documents (id, title) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET title = excluded.title",
        params![document.id, document.title],
    )
    .map_err(to_storage_err)?;
    if let Some(author_id) = &document.author_id {
        add_edge(conn, EDGE_AUTHORED, author_id, &document.id)?;
    }
    Ok(())
}

/// Insert a fragment and, when it has a document, the `contains` edge.
pub fn insert_fragment(conn: &Connection, fragment: &Fragment) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO fragments (id, text) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET text = excluded.text",
        params![fragment.id, fragment.text],
    )
    .map_err(to_storage_err)?;
    if let Some(document_id) = &fragment.document_id {
        add_edge(conn, EDGE_CONTAINS, document_id, &fragment.id)?;
    }
    Ok(())
}

pub fn add_edge(conn: &Connection, kind: &str, source_id: &str, target_id: &str) -> StorageResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO edges (kind, source_id, target_id) VALUES (?1, ?2, ?3)",
        params![kind, source_id, target_id],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: CountedTable) -> StorageResult<usize> {
    let sql = match table {
        CountedTable::Authors => "SELECT COUNT(*) FROM authors",
        CountedTable::Documents => "SELECT COUNT(*) FROM documents",
        CountedTable::Fragments => "SELECT COUNT(*) FROM fragments",
        CountedTable::Edges => "SELECT COUNT(*) FROM edges",
    };
    let n: i64 = conn.query_row(sql, [], |row| row.get(0)).map_err(to_storage_err)?;
    Ok(n as usize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountedTable {
    Authors,
    Documents,
    Fragments,
    Edges,
}
