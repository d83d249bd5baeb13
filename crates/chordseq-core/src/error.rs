//! Error types for chordseq

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChordSeqError {
    #[error("Scale index {index} out of range (catalog has {count} scales)")]
    OutOfRange { index: usize, count: usize },
    #[error("Invalid scale '{name}': {reason}")]
    InvalidScale { name: String, reason: String },
    #[error("Scale catalog is empty")]
    EmptyCatalog,
    #[error("Invalid trigger thresholds: low {low}, high {high}")]
    InvalidThresholds { low: f32, high: f32 },
}

pub type Result<T> = std::result::Result<T, ChordSeqError>;
