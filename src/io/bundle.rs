//! Trained bundle persistence
//!
//! The bundle pairs the fitted feature pipeline and classifier with the
//! ordered feature-name list captured at fit time. It is written once per
//! training run and read-only afterward; serving never re-fits, only replays.
//! The JSON layout is tied to this crate's transform and model
//! implementations; a bundle is only readable by the version that wrote it.

use crate::error::{Error, Result};
use crate::features::FittedPipeline;
use crate::model::Classifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Provenance recorded alongside the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMetadata {
    /// Winning model family name
    pub model_kind: String,
    /// Target column the model predicts
    pub target: String,
    /// Mean cross-validation scores from the selection run
    pub cv_metrics: BTreeMap<String, f64>,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// Crate version that wrote the bundle
    pub version: String,
}

/// The persisted pair of fitted transform+model and its feature-name contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedBundle {
    /// Fitted feature pipeline, frozen
    pub pipeline: FittedPipeline,
    /// Fitted winning classifier
    pub model: Classifier,
    /// Ordered feature names captured at fit time; the alignment target
    pub feature_names: Vec<String>,
    /// Provenance
    pub metadata: BundleMetadata,
}

/// Serialize a bundle to pretty JSON at `path`, creating parent directories
pub fn save_bundle(bundle: &TrainedBundle, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(bundle)
        .map_err(|e| Error::Serialization(format!("bundle serialization failed: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a bundle from `path`.
///
/// A missing file is `Error::ArtifactMissing` (the well-defined
/// "run training first" failure), while a present-but-unreadable file is a
/// serialization error.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<TrainedBundle> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ArtifactMissing {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Serialization(format!("bundle deserialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::RawFrame;
    use crate::features::FeaturePipeline;
    use crate::model::ModelKind;

    fn sample_bundle() -> TrainedBundle {
        let frame = RawFrame::from_rows(
            vec!["age".to_string(), "sex".to_string()],
            &[
                vec!["63".to_string(), "1".to_string()],
                vec!["41".to_string(), "0".to_string()],
                vec!["55".to_string(), "1".to_string()],
                vec!["49".to_string(), "0".to_string()],
            ],
        )
        .unwrap();
        let pipeline = FeaturePipeline::new(
            &["age".to_string()],
            &["sex".to_string()],
            &["?".to_string()],
        )
        .unwrap();
        let (fitted, matrix) = pipeline.fit_transform(&frame).unwrap();

        let mut model = ModelKind::LogisticRegression.build();
        model.fit(&matrix, &[1, 0, 1, 0]).unwrap();

        TrainedBundle {
            feature_names: fitted.feature_names().to_vec(),
            pipeline: fitted,
            model,
            metadata: BundleMetadata {
                model_kind: "logistic_regression".to_string(),
                target: "target".to_string(),
                cv_metrics: BTreeMap::new(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifacts/model.json");
        let bundle = sample_bundle();
        save_bundle(&bundle, &path).unwrap();
        let loaded = load_bundle(&path).unwrap();
        assert_eq!(loaded, bundle);
    }

    #[test]
    fn test_missing_bundle_is_artifact_missing() {
        let err = load_bundle("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, Error::ArtifactMissing { .. }));
    }

    #[test]
    fn test_corrupt_bundle_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_bundle(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
