//! Classifiers
//!
//! The two model families the trainer compares, behind one tagged
//! [`Classifier`] enum. Probability support is an explicit capability rather
//! than a structural guess: [`Classifier::predict_proba`] exists only for
//! [`Capability::Probabilistic`] variants, and callers that need confidence
//! values check the capability instead of probing method presence.

pub mod forest;
pub mod logistic;

pub use forest::RandomForestClassifier;
pub use logistic::LogisticRegression;

use crate::error::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Whether a classifier can produce class probabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Exposes `predict_proba`; confidence values are available
    Probabilistic,
    /// Hard labels only; confidence is absent, not zero
    HardLabel,
}

/// Which model family to train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    RandomForest,
}

impl ModelKind {
    /// Human-readable name used in run names and reports
    pub fn name(self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic_regression",
            Self::RandomForest => "random_forest",
        }
    }

    /// Fresh unfitted classifier with this crate's default hyperparameters
    pub fn build(self) -> Classifier {
        match self {
            Self::LogisticRegression => Classifier::Logistic(LogisticRegression::new()),
            Self::RandomForest => Classifier::Forest(RandomForestClassifier::new()),
        }
    }
}

/// A classifier of either family, fitted or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Logistic(LogisticRegression),
    Forest(RandomForestClassifier),
}

impl Classifier {
    /// The model family
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Logistic(_) => ModelKind::LogisticRegression,
            Self::Forest(_) => ModelKind::RandomForest,
        }
    }

    /// Probability capability of this variant
    pub fn capability(&self) -> Capability {
        match self {
            Self::Logistic(_) | Self::Forest(_) => Capability::Probabilistic,
        }
    }

    /// Fit on a feature matrix and 0/1 labels
    pub fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()> {
        match self {
            Self::Logistic(model) => model.fit(x, y),
            Self::Forest(model) => model.fit(x, y),
        }
    }

    /// Hard 0/1 predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>> {
        match self {
            Self::Logistic(model) => model.predict(x),
            Self::Forest(model) => model.predict(x),
        }
    }

    /// Positive-class probabilities, or `None` for hard-label models
    pub fn predict_proba(&self, x: &Array2<f64>) -> Option<Result<Vec<f64>>> {
        match self.capability() {
            Capability::HardLabel => None,
            Capability::Probabilistic => Some(match self {
                Self::Logistic(model) => model.predict_proba(x),
                Self::Forest(model) => model.predict_proba(x),
            }),
        }
    }

    /// Loggable hyperparameters for experiment tracking
    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            Self::Logistic(model) => vec![
                ("max_iter".to_string(), model.max_iter.to_string()),
                ("learning_rate".to_string(), model.learning_rate.to_string()),
                ("l2_penalty".to_string(), model.l2_penalty.to_string()),
            ],
            Self::Forest(model) => vec![
                ("n_estimators".to_string(), model.n_estimators.to_string()),
                ("max_depth".to_string(), model.max_depth.to_string()),
                (
                    "min_samples_split".to_string(),
                    model.min_samples_split.to_string(),
                ),
                ("seed".to_string(), model.seed.to_string()),
            ],
        }
    }
}
