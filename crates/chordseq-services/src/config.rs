//! Engine config on disk: `<config dir>/chordseq/config.toml`

use std::path::{Path, PathBuf};

use chordseq_core::{EngineConfig, ScaleCatalog};

use crate::error::{Result, ServiceError};

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chordseq")
        .join("config.toml")
}

/// Parse and validate thresholds and user scales
pub fn parse_config(source: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(source)?;
    config.trigger.validate()?;
    ScaleCatalog::builtin_with(&config.scales)?;
    Ok(config)
}

/// A missing file is not an error: the engine runs on defaults
pub fn load_config_from(path: &Path) -> Result<EngineConfig> {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            let config = parse_config(&source)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(EngineConfig::default())
        }
        Err(source) => Err(ServiceError::ReadConfig {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn load_config() -> Result<EngineConfig> {
    load_config_from(&config_path())
}

pub fn save_config_to(path: &Path, config: &EngineConfig) -> Result<()> {
    let write_err = |source| ServiceError::WriteConfig {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let source = toml::to_string_pretty(config)?;
    std::fs::write(path, source).map_err(write_err)?;
    tracing::info!("Saved config to {}", path.display());
    Ok(())
}

pub fn save_config(config: &EngineConfig) -> Result<()> {
    save_config_to(&config_path(), config)
}
