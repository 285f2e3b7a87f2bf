//! Corazon CLI
//!
//! End-to-end heart-disease classification: data pipeline, model training,
//! and a prediction service.
//!
//! # Usage
//!
//! ```bash
//! # Download, clean, and profile the dataset
//! corazon data
//!
//! # Compare models and persist the winner
//! corazon train
//!
//! # Serve predictions
//! corazon serve
//!
//! # Validate a config file
//! corazon validate configs/corazon.yaml
//! ```

use clap::Parser;
use corazon::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
