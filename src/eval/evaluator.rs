//! Evaluator for one configured evaluation run

use crate::config::EvaluationConfig;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::io::{load_model, save_model, ModelFormat, Predictor, SaveConfig};
use crate::metrics::{self, RegressionReport};
use crate::tracking::{backend_for_uri, TrackingBackend, TrackingClient};

/// File name of the re-serialized model inside the artifact directory
pub const MODEL_ARTIFACT_FILE: &str = "model.json";

/// Evaluates a trained regression model against a held-out test set
///
/// The whole procedure is a straight line: load the dataset, load the model,
/// split off the target column, then inside a scoped tracking run predict,
/// compute the metrics, persist them locally, and report parameters,
/// metrics, and the model artifact to the tracking backend.
pub struct Evaluator<B: TrackingBackend> {
    config: EvaluationConfig,
    client: TrackingClient<B>,
}

impl Evaluator<Box<dyn TrackingBackend>> {
    /// Create an evaluator with the backend chosen from the configured
    /// tracking URI
    pub fn from_config(config: EvaluationConfig) -> Result<Self> {
        let backend = backend_for_uri(&config.tracking_uri)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: TrackingBackend> Evaluator<B> {
    /// Create an evaluator with an explicit tracking backend
    pub fn with_backend(config: EvaluationConfig, backend: B) -> Self {
        let client = TrackingClient::new(config.experiment_name.clone(), backend);
        Self { config, client }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Get the tracking client
    #[must_use]
    pub fn tracker(&self) -> &TrackingClient<B> {
        &self.client
    }

    /// Run the evaluation
    ///
    /// Load and split failures abort before any tracking run is created.
    /// Failures inside the run still finalize it as failed; locally written
    /// state up to that point is left as-is.
    pub fn run(&mut self) -> Result<RegressionReport> {
        let dataset = Dataset::from_csv_path(&self.config.test_data_path)?;
        let model = load_model(&self.config.model_path)?;
        let (features, target) = dataset.split(&self.config.target_column)?;

        let config = &self.config;
        self.client.with_run(config.run_name.as_deref(), |run| {
            let predicted = model.predict(&features)?;
            let report = metrics::evaluate(&target, &predicted)?;

            report.save(&config.metrics_path)?;

            run.log_params(&config.params_as_strings())?;
            for (name, value) in report.entries() {
                run.log_metric(name, value)?;
            }

            std::fs::create_dir_all(&config.artifact_dir).map_err(|e| Error::Persistence {
                path: config.artifact_dir.clone(),
                message: e.to_string(),
            })?;
            let artifact_path = config.artifact_dir.join(MODEL_ARTIFACT_FILE);
            save_model(
                &model,
                &artifact_path,
                &SaveConfig::new(ModelFormat::Json).with_pretty(true),
            )?;
            run.log_artifact(&artifact_path)?;

            Ok(report)
        })
    }
}
