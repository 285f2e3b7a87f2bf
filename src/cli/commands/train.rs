//! Train command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, TrainArgs};
use crate::config::load_config;
use crate::train::run_training;

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    let mut config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    if let Some(folds) = args.folds {
        config.training.folds = folds;
    }
    if let Some(seed) = args.seed {
        config.training.seed = seed;
    }

    log(
        level,
        LogLevel::Normal,
        &format!("Corazon: training from {}", args.config.display()),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Folds: {}, seed: {}",
            config.training.folds, config.training.seed
        ),
    );

    let report = run_training(&config).map_err(|e| format!("Training error: {e}"))?;

    for (kind, scores) in &report.scores {
        log(level, LogLevel::Normal, &format!("\n{}", kind.name()));
        log(level, LogLevel::Normal, &format!("  accuracy:  {:.4}", scores.accuracy));
        log(level, LogLevel::Normal, &format!("  precision: {:.4}", scores.precision));
        log(level, LogLevel::Normal, &format!("  recall:    {:.4}", scores.recall));
        log(level, LogLevel::Normal, &format!("  roc_auc:   {:.4}", scores.roc_auc));
    }

    log(
        level,
        LogLevel::Normal,
        &format!(
            "\nBest model: {} -> {}",
            report.best.name(),
            config.artifacts.bundle_path.display()
        ),
    );

    Ok(())
}
