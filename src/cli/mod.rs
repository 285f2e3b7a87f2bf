//! CLI module
//!
//! Command definitions, dispatch, and output helpers for the `corazon`
//! binary.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::{log, LogLevel};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Heart-disease classification pipeline
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "corazon")]
#[command(version)]
#[command(about = "Tabular heart-disease classification: data pipeline, training, and serving")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Download, clean, and profile the dataset
    Data(DataArgs),

    /// Compare models with cross-validation and persist the winner
    Train(TrainArgs),

    /// Serve predictions over HTTP
    Serve(ServeArgs),

    /// Validate a configuration file without running anything
    Validate(ValidateArgs),
}

/// Arguments for the data command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DataArgs {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "configs/corazon.yaml")]
    pub config: PathBuf,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "configs/corazon.yaml")]
    pub config: PathBuf,

    /// Override cross-validation fold count
    #[arg(long)]
    pub folds: Option<usize>,

    /// Override the shuffle/forest seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the serve command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ServeArgs {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "configs/corazon.yaml")]
    pub config: PathBuf,

    /// Override the bind address
    #[arg(short, long)]
    pub address: Option<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}
