//! Local tracking backends
//!
//! A JSON file-based store for `file://` tracking URIs and an in-memory
//! backend for tests. Each finished run is persisted as `{run_id}.json`;
//! artifacts are copied under `{run_id}/artifacts/`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{now_ms, Run, RunStatus, TrackingBackend};

fn unknown_run(run_id: &str) -> Error {
    Error::Tracking(format!("run not active: {run_id}"))
}

/// JSON file-based tracking backend
///
/// Active runs are held in memory and written to `{dir}/{run_id}.json` when
/// terminated.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
    active_runs: HashMap<String, Run>,
    next_run_id: u64,
}

impl JsonFileBackend {
    /// Create a new JSON file backend rooted at `dir`
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            active_runs: HashMap::new(),
            next_run_id: 1,
        }
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        self.dir.join(format!("{run_id}.json"))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| Error::Persistence {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Load a persisted run by id
    pub fn load_run(&self, run_id: &str) -> Result<Run> {
        let path = self.run_path(run_id);
        if !path.exists() {
            return Err(Error::Tracking(format!("run not found: {run_id}")));
        }
        let json = fs::read_to_string(&path)?;
        let run: Run = serde_json::from_str(&json)
            .map_err(|e| Error::Tracking(format!("corrupt run record {run_id}: {e}")))?;
        Ok(run)
    }

    /// List all persisted runs, ordered by run id
    pub fn list_runs(&self) -> Result<Vec<Run>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                let json = fs::read_to_string(&path)?;
                let run: Run = serde_json::from_str(&json).map_err(|e| {
                    Error::Tracking(format!("corrupt run record {}: {e}", path.display()))
                })?;
                runs.push(run);
            }
        }
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(runs)
    }
}

impl TrackingBackend for JsonFileBackend {
    fn create_run(&mut self, experiment_name: &str, run_name: Option<&str>) -> Result<String> {
        // Timestamp plus counter: unique across processes sharing the store
        let run_id = format!("run-{}-{}", now_ms(), self.next_run_id);
        self.next_run_id += 1;

        let run = Run::new(
            run_id.clone(),
            run_name.map(String::from),
            experiment_name.to_string(),
        );
        self.active_runs.insert(run_id.clone(), run);
        Ok(run_id)
    }

    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        let run = self
            .active_runs
            .get_mut(run_id)
            .ok_or_else(|| unknown_run(run_id))?;
        run.params.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()> {
        let run = self
            .active_runs
            .get_mut(run_id)
            .ok_or_else(|| unknown_run(run_id))?;
        run.metrics.insert(key.to_string(), value);
        Ok(())
    }

    fn log_artifact(&mut self, run_id: &str, artifact: &Path) -> Result<()> {
        let file_name = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Tracking(format!("artifact has no file name: {}", artifact.display()))
            })?
            .to_string();

        let artifact_dir = self.dir.join(run_id).join("artifacts");
        self.ensure_dir(&artifact_dir)?;
        fs::copy(artifact, artifact_dir.join(&file_name)).map_err(|e| Error::Tracking(format!(
            "failed to store artifact {}: {e}",
            artifact.display()
        )))?;

        let run = self
            .active_runs
            .get_mut(run_id)
            .ok_or_else(|| unknown_run(run_id))?;
        run.artifacts.push(file_name);
        Ok(())
    }

    fn terminate_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        let mut run = self
            .active_runs
            .remove(run_id)
            .ok_or_else(|| unknown_run(run_id))?;

        run.status = status;
        run.end_time_ms = Some(now_ms());

        let dir = self.dir.clone();
        self.ensure_dir(&dir)?;
        let json = serde_json::to_string_pretty(&run)
            .map_err(|e| Error::Tracking(format!("failed to serialize run {run_id}: {e}")))?;
        let path = self.run_path(run_id);
        fs::write(&path, json).map_err(|e| Error::Persistence {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// In-memory tracking backend for testing
///
/// Stores runs in a `HashMap`. No persistence.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    runs: HashMap<String, Run>,
    next_run_id: u64,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a recorded run by id
    #[must_use]
    pub fn run(&self, run_id: &str) -> Option<&Run> {
        self.runs.get(run_id)
    }

    /// All recorded runs, ordered by run id
    #[must_use]
    pub fn runs(&self) -> Vec<&Run> {
        let mut runs: Vec<&Run> = self.runs.values().collect();
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        runs
    }

    /// Whether any run was ever created
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl TrackingBackend for InMemoryBackend {
    fn create_run(&mut self, experiment_name: &str, run_name: Option<&str>) -> Result<String> {
        self.next_run_id += 1;
        let run_id = format!("run-{}", self.next_run_id);
        let run = Run::new(
            run_id.clone(),
            run_name.map(String::from),
            experiment_name.to_string(),
        );
        self.runs.insert(run_id.clone(), run);
        Ok(run_id)
    }

    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        let run = self.runs.get_mut(run_id).ok_or_else(|| unknown_run(run_id))?;
        run.params.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()> {
        let run = self.runs.get_mut(run_id).ok_or_else(|| unknown_run(run_id))?;
        run.metrics.insert(key.to_string(), value);
        Ok(())
    }

    fn log_artifact(&mut self, run_id: &str, artifact: &Path) -> Result<()> {
        if !artifact.exists() {
            return Err(Error::Tracking(format!(
                "artifact does not exist: {}",
                artifact.display()
            )));
        }
        let run = self.runs.get_mut(run_id).ok_or_else(|| unknown_run(run_id))?;
        run.artifacts.push(artifact.display().to_string());
        Ok(())
    }

    fn terminate_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        let run = self.runs.get_mut(run_id).ok_or_else(|| unknown_run(run_id))?;
        run.status = status;
        run.end_time_ms = Some(now_ms());
        Ok(())
    }
}
