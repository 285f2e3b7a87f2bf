//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, ValidateArgs};
use crate::config::load_config;

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Config is valid");
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Schema: {} numeric, {} categorical, target '{}'",
            config.schema.numeric.len(),
            config.schema.categorical.len(),
            config.schema.target
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Sentinels: {:?}", config.schema.sentinels),
    );

    Ok(())
}
