//! Configuration loading and validation

pub mod schema;
pub mod validate;

pub use schema::{
    AppConfig, ArtifactConfig, DataConfig, SchemaConfig, ServerConfig, TrainingConfig,
};
pub use validate::validate_config;

use crate::error::{Error, Result};
use std::path::Path;

/// Load and validate a YAML configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read config file {}: {e}", path.display()))
    })?;

    let config: AppConfig = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse YAML config: {e}")))?;

    validate_config(&config)?;
    Ok(config)
}
