//! Relation lookups over the `edges` table.

use rusqlite::{params, Connection, OptionalExtension};

use trellis_core::constants::{EDGE_AUTHORED, EDGE_CONTAINS};
use trellis_core::models::{AuthorRef, DocumentRef, FragmentRef};

use crate::{to_storage_err, StorageResult};

pub fn fragment_document(conn: &Connection, fragment_id: &str) -> StorageResult<Option<DocumentRef>> {
    conn.query_row(
        "SELECT d.id, d.title
         FROM edges e
         JOIN documents d ON d.id = e.source_id
         WHERE e.kind = ?1 AND e.target_id = ?2
         ORDER BY d.id
         LIMIT 1",
        params![EDGE_CONTAINS, fragment_id],
        |row| {
            Ok(DocumentRef {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn document_author(conn: &Connection, document_id: &str) -> StorageResult<Option<AuthorRef>> {
    conn.query_row(
        "SELECT a.id, a.name
         FROM edges e
         JOIN authors a ON a.id = e.source_id
         WHERE e.kind = ?1 AND e.target_id = ?2
         ORDER BY a.id
         LIMIT 1",
        params![EDGE_AUTHORED, document_id],
        |row| {
            Ok(AuthorRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn document_fragments(
    conn: &Connection,
    document_id: &str,
    exclude_fragment: &str,
    limit: usize,
) -> StorageResult<Vec<FragmentRef>> {
    let mut stmt = conn
        .prepare(
            "SELECT f.id, f.text
             FROM edges e
             JOIN fragments f ON f.id = e.target_id
             WHERE e.kind = ?1 AND e.source_id = ?2 AND f.id <> ?3
             ORDER BY f.id
             LIMIT ?4",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(
            params![EDGE_CONTAINS, document_id, exclude_fragment, limit as i64],
            |row| {
                Ok(FragmentRef {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            },
        )
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

pub fn author_documents(
    conn: &Connection,
    author_id: &str,
    exclude_document: &str,
    limit: usize,
) -> StorageResult<Vec<DocumentRef>> {
    let mut stmt = conn
        .prepare(
            "SELECT d.id, d.title
             FROM edges e
             JOIN documents d ON d.id = e.target_id
             WHERE e.kind = ?1 AND e.source_id = ?2 AND d.id <> ?3
             ORDER BY d.id
             LIMIT ?4",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(
            params![EDGE_AUTHORED, author_id, exclude_document, limit as i64],
            |row| {
                Ok(DocumentRef {
                    id: row.get(0)?,
                    title: row.get(1)?,
                })
            },
        )
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}
