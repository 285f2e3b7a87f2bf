//! Configuration validation
//!
//! Structural checks applied after parsing, before any stage runs.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Validate a parsed configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let schema = &config.schema;

    if schema.numeric.is_empty() && schema.categorical.is_empty() {
        return Err(Error::Config(
            "schema declares no numeric or categorical columns".to_string(),
        ));
    }
    if schema.target.trim().is_empty() {
        return Err(Error::Config("schema target column is empty".to_string()));
    }

    let mut seen = HashSet::new();
    for col in schema.numeric.iter().chain(&schema.categorical) {
        if col.trim().is_empty() {
            return Err(Error::Config("schema contains an empty column name".to_string()));
        }
        if !seen.insert(col.as_str()) {
            return Err(Error::Config(format!(
                "column '{col}' declared more than once in the schema"
            )));
        }
    }
    if seen.contains(schema.target.as_str()) {
        return Err(Error::Config(format!(
            "target column '{}' must not appear in the feature roles",
            schema.target
        )));
    }

    for sentinel in &schema.sentinels {
        if sentinel.is_empty() {
            return Err(Error::Config("sentinel tokens must be non-empty".to_string()));
        }
    }

    if config.training.folds < 2 {
        return Err(Error::Config(format!(
            "cross-validation needs at least 2 folds, got {}",
            config.training.folds
        )));
    }

    if config.server.address.parse::<std::net::SocketAddr>().is_err() {
        return Err(Error::Config(format!(
            "invalid server address '{}'",
            config.server.address
        )));
    }

    Ok(())
}
