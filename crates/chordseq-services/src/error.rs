//! Error types for the service layer

use std::path::PathBuf;

use chordseq_core::ChordSeqError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Engine error: {0}")]
    Engine(#[from] ChordSeqError),
    #[error("Failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    WriteConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    ParseConfig(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),
    #[error("Invalid clock: {sample_rate} Hz at {bpm} bpm")]
    InvalidClock { sample_rate: f32, bpm: f32 },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
