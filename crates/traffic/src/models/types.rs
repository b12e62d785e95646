//! Error type shared by the engine and the loader.

use crate::identifiers::*;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrafficError {
    #[error("Station not found: {0}")]
    StationNotFound(StationIdentifier),

    #[error("Time filter out of range: {0} (expected -1 or 0..=1439)")]
    InvalidTimeFilter(i32),

    #[error("Invalid timestamp on line {line}: {value:?}")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrafficError>;
