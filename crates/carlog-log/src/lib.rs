//! Event-log ingestion for carlog
//!
//! Provides:
//! - Raw tables (header + string cells), the shape a spreadsheet export has
//! - Typed event records validated at the ingestion boundary
//! - Log sources: JSON file, SQLite, in-memory
//! - A time-to-live cache with explicit invalidation

mod cache;
mod json;
mod memory;
mod record;
mod sqlite;
mod table;
mod traits;

pub use cache::*;
pub use json::*;
pub use memory::*;
pub use record::*;
pub use sqlite::*;
pub use table::*;
pub use traits::*;

use carlog_util::CarlogError;
use thiserror::Error;

/// Log source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The fetched table does not have the expected shape or contents
    #[error(transparent)]
    Schema(#[from] CarlogError),

    #[error("Source lock poisoned")]
    LockPoisoned,
}

impl From<rusqlite::Error> for SourceError {
    fn from(e: rusqlite::Error) -> Self {
        SourceError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Serialization(e.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
