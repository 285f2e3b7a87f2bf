//! Data command implementation

use crate::cli::logging::log;
use crate::cli::{DataArgs, LogLevel};
use crate::config::load_config;
use crate::data::run_data_pipeline;

pub fn run_data(args: DataArgs, level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Corazon: running data pipeline from {}", args.config.display()),
    );

    let profile = run_data_pipeline(&config).map_err(|e| format!("Data pipeline error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Processed {} rows -> {}",
            profile.n_rows,
            config.data.processed_path.display()
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Class balance: {:?}", profile.class_balance),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Profile report: {}",
            config.artifacts.reports_dir.join("dataset_profile.json").display()
        ),
    );

    Ok(())
}
