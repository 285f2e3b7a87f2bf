//! Training orchestrator
//!
//! Compares the candidate model families with stratified cross-validation,
//! refits the winner on the full training frame, and persists the trained
//! bundle. Every candidate gets a tracked run; the winner's final fit gets
//! one more with the bundle logged as its artifact.

use crate::config::AppConfig;
use crate::data::clean::clean_frame;
use crate::data::frame::{NumFrame, RawFrame};
use crate::data::load::load_raw_data;
use crate::data::pipeline::run_data_pipeline;
use crate::error::{Error, Result};
use crate::eval::{roc_auc, stratified_kfold, ConfusionMatrix};
use crate::features::FeaturePipeline;
use crate::io::bundle::{save_bundle, BundleMetadata, TrainedBundle};
use crate::model::ModelKind;
use crate::tracking::{ExperimentTracker, JsonDirBackend, RunStatus};
use std::collections::BTreeMap;

/// Model families compared on every training run
pub const CANDIDATES: [ModelKind; 2] = [ModelKind::LogisticRegression, ModelKind::RandomForest];

/// Mean cross-validation scores for one model family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvScores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub roc_auc: f64,
}

impl CvScores {
    fn mean(folds: &[CvScores]) -> CvScores {
        let n = folds.len().max(1) as f64;
        CvScores {
            accuracy: folds.iter().map(|s| s.accuracy).sum::<f64>() / n,
            precision: folds.iter().map(|s| s.precision).sum::<f64>() / n,
            recall: folds.iter().map(|s| s.recall).sum::<f64>() / n,
            roc_auc: folds.iter().map(|s| s.roc_auc).sum::<f64>() / n,
        }
    }

    /// Scores as named metric entries, for tracking and bundle metadata
    pub fn entries(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("accuracy".to_string(), self.accuracy),
            ("precision".to_string(), self.precision),
            ("recall".to_string(), self.recall),
            ("roc_auc".to_string(), self.roc_auc),
        ])
    }
}

/// Outcome of a training session
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Mean CV scores per candidate, in `CANDIDATES` order
    pub scores: Vec<(ModelKind, CvScores)>,
    /// Winner by mean ROC-AUC
    pub best: ModelKind,
}

/// Full training session driven by the configuration
pub fn run_training(config: &AppConfig) -> Result<TrainReport> {
    if !config.data.processed_path.exists() {
        run_data_pipeline(config)?;
    }
    let frame = load_raw_data(&config.data.processed_path)?;

    let cleaned = clean_frame(&frame, &config.schema.sentinels)?;
    let y = extract_labels(&cleaned, &config.schema.target)?;
    let x_frame = frame.drop_column(&config.schema.target);

    let mut tracker = ExperimentTracker::new(
        config.training.experiment.clone(),
        JsonDirBackend::new(&config.artifacts.tracking_dir),
    );

    let mut scores = Vec::with_capacity(CANDIDATES.len());
    for kind in CANDIDATES {
        let cv = evaluate_model(config, &x_frame, &y, kind)?;
        log_candidate_run(&mut tracker, config, kind, &cv)?;
        scores.push((kind, cv));
    }

    let best = scores
        .iter()
        .max_by(|(_, a), (_, b)| a.roc_auc.total_cmp(&b.roc_auc))
        .map(|(kind, _)| *kind)
        .ok_or_else(|| Error::Data("no candidate models evaluated".to_string()))?;
    let best_scores = scores
        .iter()
        .find(|(kind, _)| *kind == best)
        .map(|(_, s)| *s)
        .unwrap_or(CvScores {
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
            roc_auc: 0.0,
        });

    let bundle = fit_final(config, &x_frame, &y, best, best_scores.entries())?;
    save_bundle(&bundle, &config.artifacts.bundle_path)?;

    let run_id = tracker.start_run(Some("best_model"))?;
    tracker.log_param(&run_id, "selected_model", best.name())?;
    for (key, value) in best_scores.entries() {
        tracker.log_metric(&run_id, &key, value)?;
    }
    tracker.log_artifact(&run_id, &config.artifacts.bundle_path.to_string_lossy())?;
    tracker.end_run(&run_id, RunStatus::Completed)?;

    Ok(TrainReport { scores, best })
}

/// Mean stratified-CV scores for one candidate. Each fold fits a fresh
/// pipeline on the fold's training rows only, so no test-row statistics leak
/// into imputation or scaling.
pub fn evaluate_model(
    config: &AppConfig,
    x_frame: &RawFrame,
    y: &[u8],
    kind: ModelKind,
) -> Result<CvScores> {
    let folds = stratified_kfold(y, config.training.folds, config.training.seed)?;
    let mut fold_scores = Vec::with_capacity(folds.len());

    for fold in &folds {
        let pipeline = declared_pipeline(config)?;
        let (fitted, train_matrix) = pipeline.fit_transform(&x_frame.select_rows(&fold.train))?;

        let train_y: Vec<u8> = fold.train.iter().map(|&i| y[i]).collect();
        let test_y: Vec<u8> = fold.test.iter().map(|&i| y[i]).collect();

        let mut model = kind.build();
        model.fit(&train_matrix, &train_y)?;

        let test_matrix = fitted.transform(&x_frame.select_rows(&fold.test))?;
        let predictions = model.predict(&test_matrix)?;
        let cm = ConfusionMatrix::from_predictions(&predictions, &test_y);

        let auc = match model.predict_proba(&test_matrix) {
            Some(proba) => roc_auc(&proba?, &test_y),
            None => 0.5,
        };

        fold_scores.push(CvScores {
            accuracy: cm.accuracy(),
            precision: cm.precision(),
            recall: cm.recall(),
            roc_auc: auc,
        });
    }

    Ok(CvScores::mean(&fold_scores))
}

/// Fit the final pipeline and model on the full frame and assemble the bundle
pub fn fit_final(
    config: &AppConfig,
    x_frame: &RawFrame,
    y: &[u8],
    kind: ModelKind,
    cv_metrics: BTreeMap<String, f64>,
) -> Result<TrainedBundle> {
    let (fitted, matrix) = declared_pipeline(config)?.fit_transform(x_frame)?;

    let mut model = kind.build();
    model.fit(&matrix, y)?;

    Ok(TrainedBundle {
        feature_names: fitted.feature_names().to_vec(),
        pipeline: fitted,
        model,
        metadata: BundleMetadata {
            model_kind: kind.name().to_string(),
            target: config.schema.target.clone(),
            cv_metrics,
            created_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

/// Binarized labels from the cleaned target column (`target > 0` is positive)
pub fn extract_labels(cleaned: &NumFrame, target: &str) -> Result<Vec<u8>> {
    let cells = cleaned
        .column(target)
        .ok_or_else(|| Error::Data(format!("target column '{target}' not in training frame")))?;

    cells
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            Some(value) => Ok(u8::from(*value > 0.0)),
            None => Err(Error::Data(format!(
                "target column '{target}' is missing a value at row {row}"
            ))),
        })
        .collect()
}

fn declared_pipeline(config: &AppConfig) -> Result<FeaturePipeline> {
    FeaturePipeline::new(
        &config.schema.numeric,
        &config.schema.categorical,
        &config.schema.sentinels,
    )
}

fn log_candidate_run(
    tracker: &mut ExperimentTracker<JsonDirBackend>,
    config: &AppConfig,
    kind: ModelKind,
    cv: &CvScores,
) -> Result<()> {
    let run_id = tracker.start_run(Some(kind.name()))?;
    tracker.log_param(&run_id, "model_type", kind.name())?;
    tracker.log_param(&run_id, "cv_folds", &config.training.folds.to_string())?;
    tracker.log_param(&run_id, "cv_seed", &config.training.seed.to_string())?;
    for (key, value) in kind.build().params() {
        tracker.log_param(&run_id, &key, &value)?;
    }
    for (key, value) in cv.entries() {
        tracker.log_metric(&run_id, &key, value)?;
    }
    tracker.end_run(&run_id, RunStatus::Completed)?;
    Ok(())
}
