//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, validate_config, ValidateArgs};

pub fn run_validate(args: ValidateArgs, log_level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Failed to load config: {e}"))?;
    validate_config(&config).map_err(|e| format!("Invalid config: {e}"))?;

    log(
        log_level,
        LogLevel::Normal,
        &format!("✓ {} is valid", args.config.display()),
    );
    log(
        log_level,
        LogLevel::Verbose,
        &format!(
            "  Target column: {}\n  Experiment: {}",
            config.target_column, config.experiment_name
        ),
    );

    Ok(())
}
