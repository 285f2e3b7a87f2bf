//! Crate-wide error type
//!
//! One taxonomy for the whole pipeline. Integrity and schema errors are never
//! swallowed inside a stage; they propagate to the CLI or HTTP boundary, which
//! translates them into a failure response exactly once.

use std::path::PathBuf;

/// Errors produced by the data pipeline, training, and serving paths
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read, parsed, or validated
    #[error("Config error: {0}")]
    Config(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP fetch failure during dataset download
    #[error("HTTP error: {0}")]
    Http(String),

    /// Malformed input data (ragged CSV rows, missing columns, bad shapes)
    #[error("Data error: {0}")]
    Data(String),

    /// A sentinel missing-value token survived cleaning. Fatal to the run:
    /// the declared sentinel list no longer matches the raw source.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    /// The fitted feature names cannot be reconciled with a transform output
    /// at all. Surfaced per request during serving; the process keeps going.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The persisted model bundle does not exist at the configured path.
    #[error("Model artifact missing at {}: run training first", path.display())]
    ArtifactMissing {
        /// Path that was probed for the bundle
        path: PathBuf,
    },

    /// Experiment tracking failure
    #[error("Tracking error: {0}")]
    Tracking(#[from] crate::tracking::TrackingError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_missing_names_path_and_remedy() {
        let err = Error::ArtifactMissing {
            path: PathBuf::from("artifacts/model.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("artifacts/model.json"));
        assert!(msg.contains("run training first"));
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/corazon")?)
        }
        assert!(matches!(read(), Err(Error::Io(_))));
    }
}
