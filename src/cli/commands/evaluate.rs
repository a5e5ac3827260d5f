//! Evaluate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, validate_config, EvaluateArgs};
use crate::eval::Evaluator;

pub fn run_evaluate(args: EvaluateArgs, log_level: LogLevel) -> Result<(), String> {
    let mut config =
        load_config(&args.config).map_err(|e| format!("Failed to load config: {e}"))?;
    validate_config(&config).map_err(|e| format!("Invalid config: {e}"))?;

    if let Some(run_name) = args.run_name {
        config.run_name = Some(run_name);
    }

    log(log_level, LogLevel::Normal, "✓ Config loaded and validated");
    log(
        log_level,
        LogLevel::Verbose,
        &format!("  Test data: {}", config.test_data_path.display()),
    );
    log(
        log_level,
        LogLevel::Verbose,
        &format!("  Model: {}", config.model_path.display()),
    );
    log(
        log_level,
        LogLevel::Verbose,
        &format!("  Tracking URI: {}", config.tracking_uri),
    );

    let metrics_path = config.metrics_path.clone();
    let mut evaluator =
        Evaluator::from_config(config).map_err(|e| format!("Failed to initialize: {e}"))?;
    let report = evaluator.run().map_err(|e| format!("Evaluation failed: {e}"))?;

    log(log_level, LogLevel::Normal, "✓ Evaluation complete");
    log(log_level, LogLevel::Normal, &format!("{report}"));
    log(
        log_level,
        LogLevel::Normal,
        &format!("✓ Metrics written to {}", metrics_path.display()),
    );

    Ok(())
}
