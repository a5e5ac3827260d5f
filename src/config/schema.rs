//! Configuration schema for an evaluation run

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

fn default_experiment_name() -> String {
    "model_evaluation".to_string()
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("artifacts/model_evaluation")
}

/// Complete specification of one evaluation run
///
/// Supplied externally (typically a YAML file produced by the pipeline's
/// configuration stage) and treated as immutable for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Path to the held-out test dataset (CSV with a header row)
    pub test_data_path: PathBuf,

    /// Path to the serialized model produced by the training stage
    pub model_path: PathBuf,

    /// Name of the target column in the test dataset
    pub target_column: String,

    /// Path where the metrics record is written (overwritten if present)
    pub metrics_path: PathBuf,

    /// Tracking service URI: `http(s)://` for a remote server, `file://` or
    /// a bare directory path for the local file store
    pub tracking_uri: String,

    /// Experiment the run is recorded under
    #[serde(default = "default_experiment_name")]
    pub experiment_name: String,

    /// Optional human-readable run name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_name: Option<String>,

    /// Hyperparameters logged to the tracking run alongside the metrics
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,

    /// Directory the model copy is re-serialized into
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
}

impl EvaluationConfig {
    /// Hyperparameters rendered as strings for parameter logging
    ///
    /// String values are passed through unquoted; everything else uses its
    /// JSON representation.
    #[must_use]
    pub fn params_as_strings(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> EvaluationConfig {
        EvaluationConfig {
            test_data_path: PathBuf::from("test.csv"),
            model_path: PathBuf::from("model.json"),
            target_column: "quality".into(),
            metrics_path: PathBuf::from("metrics.json"),
            tracking_uri: "http://localhost:5000".into(),
            experiment_name: default_experiment_name(),
            run_name: None,
            params: HashMap::new(),
            artifact_dir: default_artifact_dir(),
        }
    }

    #[test]
    fn test_params_as_strings_rendering() {
        let mut config = sample_config();
        config
            .params
            .insert("alpha".into(), serde_json::json!(0.2));
        config
            .params
            .insert("solver".into(), serde_json::json!("qr"));
        config
            .params
            .insert("normalize".into(), serde_json::json!(true));

        let rendered = config.params_as_strings();
        assert_eq!(rendered["alpha"], "0.2");
        assert_eq!(rendered["solver"], "qr");
        assert_eq!(rendered["normalize"], "true");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = sample_config();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: EvaluationConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.target_column, "quality");
        assert_eq!(back.tracking_uri, config.tracking_uri);
    }
}
