//! Configuration validation
//!
//! Validates an evaluation specification for correctness before execution.

use super::schema::EvaluationConfig;

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Test data path does not exist: {0}")]
    TestDataNotFound(String),

    #[error("Model path does not exist: {0}")]
    ModelNotFound(String),

    #[error("Target column must not be empty")]
    EmptyTargetColumn,

    #[error("Metrics path must not be empty")]
    EmptyMetricsPath,

    #[error("Tracking URI must not be empty")]
    EmptyTrackingUri,

    #[error("Experiment name must not be empty")]
    EmptyExperimentName,
}

/// Validate an evaluation specification
///
/// Checks:
/// - Input file paths exist
/// - Required string fields are non-empty
pub fn validate_config(config: &EvaluationConfig) -> Result<(), ValidationError> {
    // Validate input paths (skip in tests where files may not exist)
    #[cfg(not(test))]
    {
        if !config.test_data_path.exists() {
            return Err(ValidationError::TestDataNotFound(
                config.test_data_path.display().to_string(),
            ));
        }

        if !config.model_path.exists() {
            return Err(ValidationError::ModelNotFound(
                config.model_path.display().to_string(),
            ));
        }
    }

    if config.target_column.trim().is_empty() {
        return Err(ValidationError::EmptyTargetColumn);
    }

    if config.metrics_path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyMetricsPath);
    }

    if config.tracking_uri.trim().is_empty() {
        return Err(ValidationError::EmptyTrackingUri);
    }

    if config.experiment_name.trim().is_empty() {
        return Err(ValidationError::EmptyExperimentName);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn valid_config() -> EvaluationConfig {
        EvaluationConfig {
            test_data_path: PathBuf::from("test.csv"),
            model_path: PathBuf::from("model.json"),
            target_column: "quality".into(),
            metrics_path: PathBuf::from("metrics.json"),
            tracking_uri: "http://localhost:5000".into(),
            experiment_name: "model_evaluation".into(),
            run_name: None,
            params: HashMap::new(),
            artifact_dir: PathBuf::from("artifacts/model_evaluation"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_target_column_rejected() {
        let mut config = valid_config();
        config.target_column = "  ".into();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::EmptyTargetColumn)
        ));
    }

    #[test]
    fn test_empty_metrics_path_rejected() {
        let mut config = valid_config();
        config.metrics_path = PathBuf::new();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::EmptyMetricsPath)
        ));
    }

    #[test]
    fn test_empty_tracking_uri_rejected() {
        let mut config = valid_config();
        config.tracking_uri = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::EmptyTrackingUri)
        ));
    }

    #[test]
    fn test_empty_experiment_name_rejected() {
        let mut config = valid_config();
        config.experiment_name = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::EmptyExperimentName)
        ));
    }
}
