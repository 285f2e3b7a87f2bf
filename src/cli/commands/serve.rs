//! Serve command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, ServeArgs};
use crate::config::{load_config, validate_config};
use crate::server::run_server;

pub fn run_serve(args: ServeArgs, level: LogLevel) -> Result<(), String> {
    let mut config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    if let Some(address) = args.address {
        config.server.address = address;
        validate_config(&config).map_err(|e| format!("Config error: {e}"))?;
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Corazon: serving predictions on {}", config.server.address),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Bundle: {}", config.artifacts.bundle_path.display()),
    );

    run_server(&config).map_err(|e| format!("Server error: {e}"))
}
