//! Brute-force cosine scan over one named vector index.

use rusqlite::{params, Connection, OptionalExtension};

use trellis_core::errors::StorageError;
use trellis_core::models::SearchHit;

use crate::{to_storage_err, StorageResult};

/// Outcome of scanning an index, before it is mapped to a search error.
#[derive(Debug)]
pub enum IndexScan {
    Missing,
    DimensionMismatch { dimensions: usize },
    Hits(Vec<SearchHit>),
}

/// Dimension of a registered index, or `None` if it does not exist.
pub fn index_dimensions(conn: &Connection, index_name: &str) -> StorageResult<Option<usize>> {
    let dims: Option<i64> = conn
        .query_row(
            "SELECT dimensions FROM vector_indexes WHERE name = ?1",
            params![index_name],
            |row| row.get(0),
        )
        .optional()
        .map_err(to_storage_err)?;
    Ok(dims.map(|d| d as usize))
}

/// Score every vector in `index_name` against `query` and keep the top
/// `limit` by score descending, fragment id ascending.
pub fn scan_index(
    conn: &Connection,
    index_name: &str,
    query: &[f32],
    limit: usize,
) -> StorageResult<IndexScan> {
    let Some(dimensions) = index_dimensions(conn, index_name)? else {
        return Ok(IndexScan::Missing);
    };
    if dimensions != query.len() {
        return Ok(IndexScan::DimensionMismatch { dimensions });
    }

    let query_norm = norm(query);
    if query_norm == 0.0 || limit == 0 {
        return Ok(IndexScan::Hits(Vec::new()));
    }

    let mut stmt = conn
        .prepare(
            "SELECT e.fragment_id, e.vector, f.text
             FROM embeddings e
             JOIN fragments f ON f.id = e.fragment_id
             WHERE e.index_name = ?1",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![index_name], |row| {
            let fragment_id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let text: String = row.get(2)?;
            Ok((fragment_id, blob, text))
        })
        .map_err(to_storage_err)?;

    let mut hits = Vec::new();
    for row in rows {
        let (fragment_id, blob, text) = row.map_err(to_storage_err)?;
        let stored = bytes_to_f32_vec(&blob);
        if stored.len() != dimensions {
            return Err(StorageError::SqliteError {
                message: format!(
                    "embedding for {fragment_id} in {index_name} has {} values, index has {dimensions}",
                    stored.len()
                ),
            });
        }
        let score = dot(query, &stored) / (query_norm * norm(&stored)).max(f64::MIN_POSITIVE);
        hits.push(SearchHit::new(fragment_id, score, text));
    }

    hits.sort_by(|a, b| a.rank_cmp(b));
    hits.truncate(limit);
    Ok(IndexScan::Hits(hits))
}

/// Register an index, or confirm an existing one has the same dimension.
pub fn create_index(conn: &Connection, index_name: &str, dimensions: usize) -> StorageResult<()> {
    match index_dimensions(conn, index_name)? {
        Some(existing) if existing != dimensions => Err(StorageError::SqliteError {
            message: format!(
                "index {index_name} already exists with {existing} dimensions, not {dimensions}"
            ),
        }),
        Some(_) => Ok(()),
        None => {
            conn.execute(
                "INSERT INTO vector_indexes (name, dimensions) VALUES (?1, ?2)",
                params![index_name, dimensions as i64],
            )
            .map_err(to_storage_err)?;
            Ok(())
        }
    }
}

/// Store or replace the vector for one fragment.
pub fn upsert_embedding(
    conn: &Connection,
    index_name: &str,
    fragment_id: &str,
    vector: &[f32],
) -> StorageResult<()> {
    match index_dimensions(conn, index_name)? {
        None => Err(StorageError::SqliteError {
            message: format!("vector index not found: {index_name}"),
        }),
        Some(dims) if dims != vector.len() => Err(StorageError::SqliteError {
            message: format!(
                "index {index_name} holds {dims}-dimensional vectors, got {}",
                vector.len()
            ),
        }),
        Some(_) => {
            conn.execute(
                "INSERT INTO embeddings (index_name, fragment_id, vector) VALUES (?1, ?2, ?3)
                 ON CONFLICT(index_name, fragment_id) DO UPDATE SET vector = excluded.vector",
                params![index_name, fragment_id, f32_vec_to_bytes(vector)],
            )
            .map_err(to_storage_err)?;
            Ok(())
        }
    }
}

/// Little-endian f32 encoding.
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

fn norm(v: &[f32]) -> f64 {
    dot(v, v).sqrt()
}
