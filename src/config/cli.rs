//! CLI argument types - Cli, Command, and per-command argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Evaluar: Regression Model Evaluation
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "evaluar")]
#[command(version)]
#[command(about = "Evaluate a trained regression model and record metrics to an experiment tracker")]
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
    /// Run an evaluation from YAML configuration
    Evaluate(EvaluateArgs),

    /// Validate a configuration file without evaluating
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),
}

/// Arguments for the evaluate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override the run name from the configuration
    #[arg(short, long)]
    pub run_name: Option<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from(["evaluar", "evaluate", "config.yaml"]).unwrap();
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(args.run_name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_evaluate_with_run_name() {
        let cli = Cli::try_parse_from([
            "evaluar",
            "evaluate",
            "config.yaml",
            "--run-name",
            "baseline",
        ])
        .unwrap();
        match cli.command {
            Command::Evaluate(args) => assert_eq!(args.run_name.as_deref(), Some("baseline")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["evaluar", "validate", "config.yaml", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn test_missing_config_rejected() {
        assert!(Cli::try_parse_from(["evaluar", "evaluate"]).is_err());
    }
}
