//! Serving-time inference
//!
//! Maps one raw JSON record through the frozen bundle: transform, align onto
//! the training-time feature names, classify. The bundle itself is loaded at
//! most once per process through [`BundleCache`] and shared immutably from
//! then on.

pub mod cache;

pub use cache::BundleCache;

use crate::data::frame::RawFrame;
use crate::error::{Error, Result};
use crate::features::align_features;
use crate::io::bundle::TrainedBundle;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One prediction with optional confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class label
    pub prediction: i64,
    /// Probability of the predicted class, when the model supports
    /// probabilities. Absent — not zero — for hard-label models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Predict a single raw record against a frozen bundle.
///
/// The record's unknown keys are ignored and missing declared fields are
/// treated as null; the transform output is reindexed onto the bundle's
/// feature names, with features the live record failed to produce filled
/// with the neutral default 0.0. Any categorical value unseen at fit time
/// has already collapsed to all-zero indicators inside the transform.
pub fn predict_record(
    bundle: &TrainedBundle,
    record: &serde_json::Map<String, serde_json::Value>,
) -> Result<PredictionResult> {
    let frame = RawFrame::from_record(bundle.pipeline.raw_columns(), record);
    let produced = bundle.pipeline.transform(&frame)?;
    if produced.nrows() != 1 {
        return Err(Error::Data(format!(
            "expected one transformed row for a single record, got {}",
            produced.nrows()
        )));
    }
    let produced_row: Vec<f64> = produced.row(0).to_vec();

    let aligned = align_features(
        bundle.pipeline.feature_names(),
        &produced_row,
        &bundle.feature_names,
        0.0,
    )?;

    let width = aligned.len();
    let matrix = Array2::from_shape_vec((1, width), aligned)
        .map_err(|e| Error::Data(format!("aligned vector has bad shape: {e}")))?;

    let label = bundle
        .model
        .predict(&matrix)?
        .first()
        .copied()
        .ok_or_else(|| Error::Data("model returned no prediction".to_string()))?;

    let confidence = match bundle.model.predict_proba(&matrix) {
        Some(proba) => {
            let p = proba?
                .first()
                .copied()
                .ok_or_else(|| Error::Data("model returned no probability".to_string()))?;
            // probability of the *predicted* class
            Some(if label == 1 { p } else { 1.0 - p })
        }
        None => None,
    };

    Ok(PredictionResult {
        prediction: i64::from(label),
        confidence,
    })
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use crate::data::frame::RawFrame;
    use crate::features::FeaturePipeline;
    use crate::io::bundle::{BundleMetadata, TrainedBundle};
    use crate::model::ModelKind;
    use std::collections::BTreeMap;

    /// Small fitted bundle over two columns, for inference and cache tests
    pub(crate) fn trained_bundle() -> TrainedBundle {
        let frame = RawFrame::from_rows(
            vec!["age".to_string(), "sex".to_string()],
            &[
                vec!["63".to_string(), "1".to_string()],
                vec!["67".to_string(), "1".to_string()],
                vec!["41".to_string(), "2".to_string()],
                vec!["39".to_string(), "2".to_string()],
            ],
        )
        .unwrap();
        let (fitted, matrix) = FeaturePipeline::new(
            &["age".to_string()],
            &["sex".to_string()],
            &["?".to_string()],
        )
        .unwrap()
        .fit_transform(&frame)
        .unwrap();

        let mut model = ModelKind::LogisticRegression.build();
        model.fit(&matrix, &[1, 1, 0, 0]).unwrap();

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
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::trained_bundle;
    use super::*;

    fn record(json: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        json.as_object().cloned().expect("object record")
    }

    #[test]
    fn test_predict_known_record() {
        let bundle = trained_bundle();
        let result =
            predict_record(&bundle, &record(serde_json::json!({"age": 65, "sex": 1}))).unwrap();
        assert_eq!(result.prediction, 1);
        let confidence = result.confidence.expect("probabilistic model");
        assert!((0.0..=1.0).contains(&confidence));
        assert!(confidence >= 0.5, "confidence covers the predicted class");
    }

    #[test]
    fn test_unseen_category_still_predicts() {
        let bundle = trained_bundle();
        // sex=3 never appeared at fit; its indicators are all zero
        let result =
            predict_record(&bundle, &record(serde_json::json!({"age": 50, "sex": 3}))).unwrap();
        assert!((0.0..=1.0).contains(&result.confidence.unwrap()));
    }

    #[test]
    fn test_missing_and_unknown_fields_tolerated() {
        let bundle = trained_bundle();
        let result = predict_record(
            &bundle,
            &record(serde_json::json!({"bogus_field": "x"})),
        )
        .unwrap();
        assert!(result.prediction == 0 || result.prediction == 1);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let bundle = trained_bundle();
        let rec = record(serde_json::json!({"age": 55, "sex": 2}));
        let a = predict_record(&bundle, &rec).unwrap();
        let b = predict_record(&bundle, &rec).unwrap();
        assert_eq!(a, b);
    }
}
