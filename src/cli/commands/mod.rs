//! CLI command implementations

mod data;
mod serve;
mod train;
mod validate;

use crate::cli::{Cli, Command, LogLevel};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Data(args) => data::run_data(args, log_level),
        Command::Train(args) => train::run_train(args, log_level),
        Command::Serve(args) => serve::run_serve(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}
