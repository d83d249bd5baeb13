//! chordseq-services: Config storage and clocked playback around the engine

pub mod config;
mod error;
pub mod runner;

pub use config::{
    config_path, load_config, load_config_from, parse_config, save_config, save_config_to,
};
pub use error::{Result, ServiceError};
pub use runner::ClockedRunner;
