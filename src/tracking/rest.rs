//! MLflow-compatible REST tracking backend
//!
//! Speaks the MLflow tracking protocol: experiment resolution via
//! `experiments/get-by-name` (created on demand), run lifecycle via
//! `runs/create` / `runs/update`, per-call `runs/log-parameter` and
//! `runs/log-metric`, and artifact upload through the proxied
//! `mlflow-artifacts` endpoint.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

use super::{now_ms, RunStatus, TrackingBackend};

/// Wire representation of a run status
fn wire_status(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Active => "RUNNING",
        RunStatus::Completed => "FINISHED",
        RunStatus::Failed => "FAILED",
    }
}

/// REST tracking backend
pub struct RestBackend {
    base: String,
    client: reqwest::blocking::Client,
    /// Resolved lazily on the first run creation
    experiment_id: Option<String>,
}

impl RestBackend {
    /// Create a backend for the given tracking server base URI
    pub fn new(base_uri: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("evaluar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Tracking(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base: base_uri.trim_end_matches('/').to_string(),
            client,
            experiment_id: None,
        })
    }

    /// Server base URI (no trailing slash)
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/2.0/mlflow/{name}", self.base)
    }

    fn artifact_url(&self, run_id: &str, file_name: &str) -> String {
        format!(
            "{}/api/2.0/mlflow-artifacts/artifacts/{run_id}/{file_name}",
            self.base
        )
    }

    fn post(&self, name: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let url = self.endpoint(name);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| Error::Tracking(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(Error::Tracking(format!(
                "{url} returned {status}: {detail}"
            )));
        }

        // Several endpoints return an empty body
        let text = response
            .text()
            .map_err(|e| Error::Tracking(format!("failed to read response from {url}: {e}")))?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| Error::Tracking(format!("invalid JSON from {url}: {e}")))
    }

    /// Resolve the experiment id, creating the experiment when absent
    fn resolve_experiment(&mut self, experiment_name: &str) -> Result<String> {
        if let Some(id) = &self.experiment_id {
            return Ok(id.clone());
        }

        let url = self.endpoint("experiments/get-by-name");
        let lookup = self
            .client
            .get(&url)
            .query(&[("experiment_name", experiment_name)])
            .send()
            .map_err(|e| Error::Tracking(format!("request to {url} failed: {e}")))?;

        let id = if lookup.status().is_success() {
            let body: serde_json::Value = lookup
                .json()
                .map_err(|e| Error::Tracking(format!("invalid JSON from {url}: {e}")))?;
            body.pointer("/experiment/experiment_id")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| {
                    Error::Tracking(format!("missing experiment id in response from {url}"))
                })?
                .to_string()
        } else {
            let body = self.post(
                "experiments/create",
                &serde_json::json!({ "name": experiment_name }),
            )?;
            body.get("experiment_id")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| {
                    Error::Tracking("missing experiment id in create response".to_string())
                })?
                .to_string()
        };

        self.experiment_id = Some(id.clone());
        Ok(id)
    }
}

impl TrackingBackend for RestBackend {
    fn create_run(&mut self, experiment_name: &str, run_name: Option<&str>) -> Result<String> {
        let experiment_id = self.resolve_experiment(experiment_name)?;

        let mut body = serde_json::json!({
            "experiment_id": experiment_id,
            "start_time": now_ms(),
        });
        if let Some(name) = run_name {
            body["run_name"] = serde_json::json!(name);
        }

        let response = self.post("runs/create", &body)?;
        response
            .pointer("/run/info/run_id")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| Error::Tracking("missing run id in create response".to_string()))
    }

    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        self.post(
            "runs/log-parameter",
            &serde_json::json!({ "run_id": run_id, "key": key, "value": value }),
        )?;
        Ok(())
    }

    fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()> {
        self.post(
            "runs/log-metric",
            &serde_json::json!({
                "run_id": run_id,
                "key": key,
                "value": value,
                "timestamp": now_ms(),
                "step": 0,
            }),
        )?;
        Ok(())
    }

    fn log_artifact(&mut self, run_id: &str, artifact: &Path) -> Result<()> {
        let file_name = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Tracking(format!("artifact has no file name: {}", artifact.display()))
            })?;

        let content = fs::read(artifact).map_err(|e| {
            Error::Tracking(format!("failed to read artifact {}: {e}", artifact.display()))
        })?;

        let url = self.artifact_url(run_id, file_name);
        let response = self
            .client
            .put(&url)
            .body(content)
            .send()
            .map_err(|e| Error::Tracking(format!("artifact upload to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Tracking(format!(
                "artifact upload to {url} returned {status}"
            )));
        }
        Ok(())
    }

    fn terminate_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        self.post(
            "runs/update",
            &serde_json::json!({
                "run_id": run_id,
                "status": wire_status(status),
                "end_time": now_ms(),
            }),
        )?;
        Ok(())
    }
}
