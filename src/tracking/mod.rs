//! Experiment tracking
//!
//! Records one evaluation run's parameters, metrics, and artifacts against a
//! tracking service. Backed by pluggable storage via the [`TrackingBackend`]
//! trait: an MLflow-compatible REST backend for `http(s)` URIs and a local
//! JSON-file backend for `file` URIs or bare paths.
//!
//! # Example
//!
//! ```
//! use evaluar::tracking::{InMemoryBackend, TrackingClient};
//!
//! # fn main() -> evaluar::Result<()> {
//! let mut client = TrackingClient::new("my-experiment", InMemoryBackend::new());
//! let report = client.with_run(Some("baseline"), |run| {
//!     run.log_param("alpha", "0.2")?;
//!     run.log_metric("rmse", 0.7)?;
//!     Ok(42)
//! })?;
//! assert_eq!(report, 42);
//! # Ok(())
//! # }
//! ```

pub mod rest;
pub mod storage;


pub use rest::RestBackend;
pub use storage::{InMemoryBackend, JsonFileBackend};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Status of a tracking run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is actively recording
    Active,
    /// Run completed successfully
    Completed,
    /// Run failed
    Failed,
}

/// A single tracked evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Unique identifier for the run
    pub run_id: String,
    /// Optional human-readable name
    pub run_name: Option<String>,
    /// Parent experiment name
    pub experiment_name: String,
    /// Current status
    pub status: RunStatus,
    /// Parameters: key -> value (string-encoded)
    pub params: HashMap<String, String>,
    /// Metrics: key -> value
    pub metrics: HashMap<String, f64>,
    /// Artifact names
    pub artifacts: Vec<String>,
    /// Unix timestamp (ms) when the run started
    pub start_time_ms: Option<u64>,
    /// Unix timestamp (ms) when the run ended
    pub end_time_ms: Option<u64>,
}

impl Run {
    pub(crate) fn new(run_id: String, run_name: Option<String>, experiment_name: String) -> Self {
        Self {
            run_id,
            run_name,
            experiment_name,
            status: RunStatus::Active,
            params: HashMap::new(),
            metrics: HashMap::new(),
            artifacts: Vec::new(),
            start_time_ms: Some(now_ms()),
            end_time_ms: None,
        }
    }
}

/// Trait for tracking backends
///
/// Each operation corresponds to one call against the tracking service;
/// errors propagate to the caller unretried.
pub trait TrackingBackend {
    /// Create a new run under the experiment, returning its id
    fn create_run(&mut self, experiment_name: &str, run_name: Option<&str>) -> Result<String>;

    /// Record a single parameter
    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()>;

    /// Record a single metric value
    fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()>;

    /// Upload a local file as a run artifact
    fn log_artifact(&mut self, run_id: &str, artifact: &Path) -> Result<()>;

    /// Finalize a run with the given status
    fn terminate_run(&mut self, run_id: &str, status: RunStatus) -> Result<()>;
}

impl<B: TrackingBackend + ?Sized> TrackingBackend for Box<B> {
    fn create_run(&mut self, experiment_name: &str, run_name: Option<&str>) -> Result<String> {
        (**self).create_run(experiment_name, run_name)
    }

    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        (**self).log_param(run_id, key, value)
    }

    fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()> {
        (**self).log_metric(run_id, key, value)
    }

    fn log_artifact(&mut self, run_id: &str, artifact: &Path) -> Result<()> {
        (**self).log_artifact(run_id, artifact)
    }

    fn terminate_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        (**self).terminate_run(run_id, status)
    }
}

/// Build a tracking backend from a tracking URI
///
/// `http(s)://` URIs get the REST backend; `file://` URIs and bare paths get
/// the local JSON-file store.
pub fn backend_for_uri(uri: &str) -> Result<Box<dyn TrackingBackend>> {
    match url::Url::parse(uri) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            Ok(Box::new(RestBackend::new(uri)?))
        }
        Ok(parsed) if parsed.scheme() == "file" => {
            let path = parsed.to_file_path().map_err(|()| {
                Error::Tracking(format!("invalid file URI: {uri}"))
            })?;
            Ok(Box::new(JsonFileBackend::new(path)))
        }
        Ok(parsed) => Err(Error::Tracking(format!(
            "unsupported tracking URI scheme '{}'",
            parsed.scheme()
        ))),
        // Not a URL at all: treat as a local directory path
        Err(_) => Ok(Box::new(JsonFileBackend::new(uri))),
    }
}

/// Client for recording runs under a named experiment
#[derive(Debug)]
pub struct TrackingClient<B: TrackingBackend> {
    experiment_name: String,
    backend: B,
}

impl<B: TrackingBackend> TrackingClient<B> {
    /// Create a new client for the given experiment name
    pub fn new(experiment_name: impl Into<String>, backend: B) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            backend,
        }
    }

    /// Get the experiment name
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the underlying backend
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Execute `body` inside a scoped run
    ///
    /// The run is created before the body executes and is always terminated:
    /// with `Completed` when the body returns `Ok`, with `Failed` when it
    /// returns `Err`. The failing terminate call is best-effort so the body's
    /// error is never masked.
    pub fn with_run<T, F>(&mut self, run_name: Option<&str>, body: F) -> Result<T>
    where
        F: FnOnce(&mut ActiveRun<'_, B>) -> Result<T>,
    {
        let run_id = self.backend.create_run(&self.experiment_name, run_name)?;
        let mut active = ActiveRun {
            backend: &mut self.backend,
            run_id: &run_id,
        };

        match body(&mut active) {
            Ok(value) => {
                self.backend.terminate_run(&run_id, RunStatus::Completed)?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.backend.terminate_run(&run_id, RunStatus::Failed);
                Err(e)
            }
        }
    }
}

/// Handle to the run currently open inside [`TrackingClient::with_run`]
pub struct ActiveRun<'a, B: TrackingBackend> {
    backend: &'a mut B,
    run_id: &'a str,
}

impl<B: TrackingBackend> ActiveRun<'_, B> {
    /// The id assigned to this run
    #[must_use]
    pub fn run_id(&self) -> &str {
        self.run_id
    }

    /// Record a single parameter
    pub fn log_param(&mut self, key: &str, value: &str) -> Result<()> {
        self.backend.log_param(self.run_id, key, value)
    }

    /// Record multiple parameters at once
    pub fn log_params(&mut self, params: &HashMap<String, String>) -> Result<()> {
        for (key, value) in params {
            self.backend.log_param(self.run_id, key, value)?;
        }
        Ok(())
    }

    /// Record a single metric value
    pub fn log_metric(&mut self, key: &str, value: f64) -> Result<()> {
        self.backend.log_metric(self.run_id, key, value)
    }

    /// Upload a local file as a run artifact
    pub fn log_artifact(&mut self, artifact: &Path) -> Result<()> {
        self.backend.log_artifact(self.run_id, artifact)
    }
}
