//! Experiment tracking
//!
//! Records training runs (parameters, final metrics, artifacts) through a
//! pluggable [`TrackingBackend`]. The trainer opens one run per candidate
//! model plus one for the persisted winner, so a training session leaves a
//! comparable trail on disk.

pub mod storage;

pub use storage::{InMemoryBackend, JsonDirBackend, TrackingBackend};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use storage::TrackingStorageError;

/// Status of a tracked run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is actively recording
    Active,
    /// Run completed successfully
    Completed,
    /// Run failed
    Failed,
}

/// A single training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Unique identifier within the experiment
    pub run_id: String,
    /// Optional human-readable name
    pub run_name: Option<String>,
    /// Parent experiment name
    pub experiment_name: String,
    /// Current status
    pub status: RunStatus,
    /// Hyperparameters, string-encoded
    pub params: BTreeMap<String, String>,
    /// Final metric values
    pub metrics: BTreeMap<String, f64>,
    /// Artifact paths
    pub artifacts: Vec<String>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run ended, if it has
    pub ended_at: Option<DateTime<Utc>>,
}

impl Run {
    fn new(run_id: String, run_name: Option<String>, experiment_name: String) -> Self {
        Self {
            run_id,
            run_name,
            experiment_name,
            status: RunStatus::Active,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            artifacts: Vec::new(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}

/// Errors from experiment tracking operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Run is not active: {0}")]
    RunNotActive(String),

    #[error("Storage error: {0}")]
    Storage(#[from] TrackingStorageError),
}

/// Result alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Manages runs under one experiment name
#[derive(Debug)]
pub struct ExperimentTracker<B: TrackingBackend> {
    experiment_name: String,
    backend: B,
    active_runs: BTreeMap<String, Run>,
    next_run_id: u64,
}

impl<B: TrackingBackend> ExperimentTracker<B> {
    /// Tracker for the given experiment name
    pub fn new(experiment_name: impl Into<String>, backend: B) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            backend,
            active_runs: BTreeMap::new(),
            next_run_id: 1,
        }
    }

    /// Start a run; returns its ID
    pub fn start_run(&mut self, run_name: Option<&str>) -> Result<String> {
        let run_id = format!("run-{:04}", self.next_run_id);
        self.next_run_id += 1;

        let run = Run::new(
            run_id.clone(),
            run_name.map(str::to_string),
            self.experiment_name.clone(),
        );
        self.backend.save_run(&run)?;
        self.active_runs.insert(run_id.clone(), run);
        Ok(run_id)
    }

    /// Record a hyperparameter on an active run
    pub fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.params.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Record a final metric value on an active run
    pub fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.metrics.insert(key.to_string(), value);
        Ok(())
    }

    /// Record an artifact path on an active run
    pub fn log_artifact(&mut self, run_id: &str, path: &str) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.artifacts.push(path.to_string());
        Ok(())
    }

    /// Close a run with a final status and persist it
    pub fn end_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        let mut run = self
            .active_runs
            .remove(run_id)
            .ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))?;
        run.status = status;
        run.ended_at = Some(Utc::now());
        self.backend.save_run(&run)?;
        Ok(())
    }

    /// Load a run from the backend
    pub fn get_run(&self, run_id: &str) -> Result<Run> {
        if let Some(run) = self.active_runs.get(run_id) {
            return Ok(run.clone());
        }
        Ok(self.backend.load_run(run_id)?)
    }

    /// All persisted runs for this experiment
    pub fn list_runs(&self) -> Result<Vec<Run>> {
        Ok(self.backend.list_runs()?)
    }

    fn active_run_mut(&mut self, run_id: &str) -> Result<&mut Run> {
        self.active_runs
            .get_mut(run_id)
            .ok_or_else(|| TrackingError::RunNotActive(run_id.to_string()))
    }
}
