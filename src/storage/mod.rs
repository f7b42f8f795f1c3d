//! Snapshot cache for harvested records
//!
//! The harvester persists one artifact: a JSON snapshot of every profile
//! record it knows about. This module owns that file, including:
//! - Freshness checks against the file's modification time
//! - Tolerant loading (a missing or corrupt snapshot is an empty corpus)
//! - Atomic replacement via a sibling temp file

mod cache;

pub use cache::CacheStore;

use thiserror::Error;

/// Errors that can occur while reading or writing the snapshot
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
