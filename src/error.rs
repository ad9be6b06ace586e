//! Error types for seed persistence.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeedError>;

/// Failures while loading, decoding or saving a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong-rank nesting or otherwise malformed JSON.
    #[error("seed is not a two-level boolean matrix: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("seed contains no rows")]
    Empty,

    #[error("seed row {row} is empty")]
    EmptyRow { row: usize },

    #[error("seed row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("seed is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
}
