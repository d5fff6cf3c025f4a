//! # trellis-storage
//!
//! SQLite persistence for fragments, documents, authors, their edges, and
//! named vector indexes. [`SqliteStore`] implements the relation-level
//! `IGraphStore` port and hands out [`SqliteVectorIndex`] handles that
//! implement `IVectorSearch`.

pub mod migrations;
pub mod pool;
pub mod queries;
mod store;
mod vector_index;

pub use store::{ImportSummary, SqliteStore};
pub use vector_index::SqliteVectorIndex;

use rusqlite::ErrorCode;
use trellis_core::errors::StorageError;

pub type StorageResult<T> = Result<T, StorageError>;

/// Classify a rusqlite error. Failures of the database handle itself become
/// `ConnectionUnavailable`; everything else is a statement-level error.
pub(crate) fn to_storage_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(
            ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::DatabaseCorrupt
            | ErrorCode::SystemIoFailure
            | ErrorCode::PermissionDenied,
        ) => StorageError::ConnectionUnavailable {
            reason: e.to_string(),
        },
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
