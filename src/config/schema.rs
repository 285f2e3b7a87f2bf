//! YAML configuration schema
//!
//! One declarative file parameterizes every stage: data paths, the raw
//! column schema with sentinel tokens, training, tracking, artifacts, and
//! the server bind address. The schema section must be identical between the
//! training run that produced a bundle and any process serving it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset location and cache paths
    #[serde(default)]
    pub data: DataConfig,

    /// Raw column schema
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Model selection settings
    #[serde(default)]
    pub training: TrainingConfig,

    /// Artifact output locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Prediction service settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Dataset source and cache paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Upstream dataset URL (headerless CSV)
    #[serde(default = "default_url")]
    pub url: String,

    /// Cached raw CSV with headers prepended
    #[serde(default = "default_raw_path")]
    pub raw_path: PathBuf,

    /// Cleaned CSV written by the data pipeline
    #[serde(default = "default_processed_path")]
    pub processed_path: PathBuf,
}

/// Declared raw column roles and missing-value tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Numeric-role columns
    #[serde(default = "default_numeric")]
    pub numeric: Vec<String>,

    /// Categorical-role columns
    #[serde(default = "default_categorical")]
    pub categorical: Vec<String>,

    /// Class label column
    #[serde(default = "default_target")]
    pub target: String,

    /// Sentinel tokens that mean "missing" in the raw source
    #[serde(default = "default_sentinels")]
    pub sentinels: Vec<String>,
}

/// Model selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Cross-validation fold count
    #[serde(default = "default_folds")]
    pub folds: usize,

    /// Seed for fold shuffling and the forest
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Experiment name for tracked runs
    #[serde(default = "default_experiment")]
    pub experiment: String,
}

/// Artifact output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Trained bundle path
    #[serde(default = "default_bundle_path")]
    pub bundle_path: PathBuf,

    /// Dataset profile report directory
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Tracked-run directory
    #[serde(default = "default_tracking_dir")]
    pub tracking_dir: PathBuf,
}

/// Prediction service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. `127.0.0.1:8080`
    #[serde(default = "default_address")]
    pub address: String,
}

fn default_url() -> String {
    "https://archive.ics.uci.edu/ml/machine-learning-databases/heart-disease/processed.cleveland.data"
        .to_string()
}

fn default_raw_path() -> PathBuf {
    PathBuf::from("data/raw/heart_disease.csv")
}

fn default_processed_path() -> PathBuf {
    PathBuf::from("data/processed/heart_disease_clean.csv")
}

fn default_numeric() -> Vec<String> {
    [
        "age",
        "resting_bp",
        "cholesterol",
        "max_heart_rate",
        "st_depression",
        "num_major_vessels",
    ]
    .map(String::from)
    .to_vec()
}

fn default_categorical() -> Vec<String> {
    [
        "sex",
        "chest_pain_type",
        "fasting_blood_sugar",
        "resting_ecg",
        "exercise_angina",
        "st_slope",
        "thalassemia",
    ]
    .map(String::from)
    .to_vec()
}

fn default_target() -> String {
    "target".to_string()
}

fn default_sentinels() -> Vec<String> {
    vec!["?".to_string()]
}

fn default_folds() -> usize {
    3
}

fn default_seed() -> u64 {
    42
}

fn default_experiment() -> String {
    "heart-disease-classification".to_string()
}

fn default_bundle_path() -> PathBuf {
    PathBuf::from("artifacts/model.json")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_tracking_dir() -> PathBuf {
    PathBuf::from("runs")
}

fn default_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            raw_path: default_raw_path(),
            processed_path: default_processed_path(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            numeric: default_numeric(),
            categorical: default_categorical(),
            target: default_target(),
            sentinels: default_sentinels(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            folds: default_folds(),
            seed: default_seed(),
            experiment: default_experiment(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            bundle_path: default_bundle_path(),
            reports_dir: default_reports_dir(),
            tracking_dir: default_tracking_dir(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}
