//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, EvaluationConfig, InfoArgs};

/// Format input locations as a string
pub fn format_input_info(config: &EvaluationConfig) -> String {
    format!(
        "  Test data: {}\n  Model: {}\n  Target column: {}",
        config.test_data_path.display(),
        config.model_path.display(),
        config.target_column
    )
}

/// Format output locations as a string
pub fn format_output_info(config: &EvaluationConfig) -> String {
    format!(
        "  Metrics file: {}\n  Artifact dir: {}",
        config.metrics_path.display(),
        config.artifact_dir.display()
    )
}

/// Format tracking configuration as a string
pub fn format_tracking_info(config: &EvaluationConfig) -> String {
    let mut lines = vec![
        format!("  Tracking URI: {}", config.tracking_uri),
        format!("  Experiment: {}", config.experiment_name),
    ];
    if let Some(run_name) = &config.run_name {
        lines.push(format!("  Run name: {run_name}"));
    }
    lines.join("\n")
}

/// Format logged hyperparameters as a string
pub fn format_params_info(config: &EvaluationConfig) -> Option<String> {
    if config.params.is_empty() {
        return None;
    }
    let mut params: Vec<(String, String)> = config.params_as_strings().into_iter().collect();
    params.sort();
    let lines: Vec<String> = params
        .into_iter()
        .map(|(key, value)| format!("    {key}: {value}"))
        .collect();
    Some(format!("  Params:\n{}", lines.join("\n")))
}

pub fn run_info(args: InfoArgs, log_level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Failed to load config: {e}"))?;

    log(
        log_level,
        LogLevel::Normal,
        &format!("Evaluation config: {}", args.config.display()),
    );
    log(log_level, LogLevel::Normal, &format_input_info(&config));
    log(log_level, LogLevel::Normal, &format_output_info(&config));
    log(log_level, LogLevel::Normal, &format_tracking_info(&config));
    if let Some(params) = format_params_info(&config) {
        log(log_level, LogLevel::Normal, &params);
    }

    Ok(())
}
