//! Fit/transform orchestrator
//!
//! Composes cleaning, feature construction, and the column transformer into
//! one pipeline. Fitting consumes the unfitted declaration and returns a
//! frozen [`FittedPipeline`], the only state that is ever persisted or
//! served.
//!
//! Fitting a second pipeline on different data produces parameters that are
//! incompatible with every feature matrix the first one emitted: columns are
//! scaled and imputed against the new data. Callers must keep exactly one
//! fitted pipeline per deployed bundle; retraining replaces the bundle as a
//! whole rather than updating it in place.

use crate::data::clean::clean_frame;
use crate::data::frame::RawFrame;
use crate::error::Result;
use crate::features::engineer::{engineer_features, DERIVED_COLUMNS};
use crate::features::transform::{ColumnTransformer, FittedColumnTransformer};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Unfitted pipeline declaration: sentinel tokens plus column roles.
///
/// The derived feature columns are appended to the declared numeric role
/// automatically, mirroring what feature construction emits.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    sentinels: Vec<String>,
    transformer: ColumnTransformer,
}

/// Fitted pipeline: transform-only, serializable across the bundle boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    sentinels: Vec<String>,
    /// Raw input columns present at fit time, in order. Serving uses this to
    /// shape a single-record frame from JSON.
    raw_columns: Vec<String>,
    transformer: FittedColumnTransformer,
}

impl FeaturePipeline {
    /// Declare a pipeline over the configured schema
    pub fn new(
        numeric_cols: &[String],
        categorical_cols: &[String],
        sentinels: &[String],
    ) -> Result<Self> {
        let mut numeric: Vec<String> = numeric_cols.to_vec();
        for derived in DERIVED_COLUMNS {
            if !numeric.iter().any(|c| c == derived) {
                numeric.push(derived.to_string());
            }
        }
        Ok(Self {
            sentinels: sentinels.to_vec(),
            transformer: ColumnTransformer::new(numeric, categorical_cols.to_vec())?,
        })
    }

    /// Fit on the training frame and transform it in one pass.
    ///
    /// This is the single fit of the pipeline's lifetime; everything after
    /// (cross-validation folds, serving requests) goes through
    /// [`FittedPipeline::transform`].
    pub fn fit_transform(self, frame: &RawFrame) -> Result<(FittedPipeline, Array2<f64>)> {
        let engineered = engineer_features(&clean_frame(frame, &self.sentinels)?)?;
        let fitted_transformer = self.transformer.fit(&engineered)?;
        let matrix = fitted_transformer.transform(&engineered)?;

        let fitted = FittedPipeline {
            sentinels: self.sentinels,
            raw_columns: frame.columns().to_vec(),
            transformer: fitted_transformer,
        };
        Ok((fitted, matrix))
    }
}

impl FittedPipeline {
    /// Replay the transform chain with the parameters learned at fit time
    pub fn transform(&self, frame: &RawFrame) -> Result<Array2<f64>> {
        let engineered = engineer_features(&clean_frame(frame, &self.sentinels)?)?;
        self.transformer.transform(&engineered)
    }

    /// Ordered output feature names captured at fit time
    pub fn feature_names(&self) -> &[String] {
        self.transformer.feature_names()
    }

    /// Raw input columns seen at fit time
    pub fn raw_columns(&self) -> &[String] {
        &self.raw_columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[[&str; 3]]) -> RawFrame {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        RawFrame::from_rows(
            vec!["age".to_string(), "max_heart_rate".to_string(), "sex".to_string()],
            &rows,
        )
        .unwrap()
    }

    fn pipeline() -> FeaturePipeline {
        FeaturePipeline::new(
            &["age".to_string(), "max_heart_rate".to_string()],
            &["sex".to_string()],
            &["?".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_fit_transform_shapes_and_names() {
        let frame = raw(&[["63", "150", "1"], ["41", "120", "0"]]);
        let (fitted, matrix) = pipeline().fit_transform(&frame).unwrap();
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), fitted.feature_names().len());
        // numeric block: declared numerics then derived columns
        assert_eq!(fitted.feature_names()[0], "num__age");
        assert!(fitted
            .feature_names()
            .iter()
            .any(|n| n == "num__age_to_heart_rate_ratio"));
        assert_eq!(fitted.raw_columns(), frame.columns());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let frame = raw(&[["63", "150", "1"], ["41", "?", "0"], ["57", "130", "1"]]);
        let (fitted, _) = pipeline().fit_transform(&frame).unwrap();
        let once = fitted.transform(&frame).unwrap();
        let twice = fitted.transform(&frame).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fit_transform_matches_replayed_transform() {
        let frame = raw(&[["63", "150", "1"], ["41", "120", "0"]]);
        let (fitted, matrix) = pipeline().fit_transform(&frame).unwrap();
        assert_eq!(fitted.transform(&frame).unwrap(), matrix);
    }

    #[test]
    fn test_fitted_pipeline_serde_round_trip() {
        let frame = raw(&[["63", "150", "1"], ["41", "120", "0"]]);
        let (fitted, _) = pipeline().fit_transform(&frame).unwrap();
        let json = serde_json::to_string(&fitted).unwrap();
        let back: FittedPipeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fitted);
        assert_eq!(back.transform(&frame).unwrap(), fitted.transform(&frame).unwrap());
    }

    #[test]
    fn test_transform_with_missing_declared_column_keeps_width() {
        let train = raw(&[["63", "150", "1"], ["41", "120", "0"]]);
        let (fitted, _) = pipeline().fit_transform(&train).unwrap();

        let partial = RawFrame::from_rows(
            vec!["age".to_string(), "sex".to_string()],
            &[vec!["57".to_string(), "1".to_string()]],
        )
        .unwrap();
        let out = fitted.transform(&partial).unwrap();
        assert_eq!(out.ncols(), fitted.feature_names().len());
    }
}
