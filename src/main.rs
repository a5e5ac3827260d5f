//! Evaluar CLI
//!
//! Single-command evaluation entry point for the evaluar library.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate a model from config
//! evaluar evaluate evaluation.yaml
//!
//! # Validate config
//! evaluar validate evaluation.yaml
//!
//! # Show config info
//! evaluar info evaluation.yaml
//! ```

use clap::Parser;
use evaluar::cli::{run_command, Cli};
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
