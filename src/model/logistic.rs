//! Logistic regression
//!
//! Binary classifier trained by full-batch gradient descent with L2
//! regularization. Inputs are the standardized feature matrix, so plain
//! gradient descent converges without per-feature learning rates. Training is
//! deterministic: no sampling, no initialization randomness.

use crate::error::{Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// L2-regularized logistic regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Gradient descent iterations
    pub max_iter: usize,
    /// Step size
    pub learning_rate: f64,
    /// L2 penalty strength
    pub l2_penalty: f64,
    weights: Vec<f64>,
    intercept: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.1,
            l2_penalty: 1e-3,
            weights: Vec::new(),
            intercept: 0.0,
        }
    }
}

impl LogisticRegression {
    /// Classifier with the default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit on a feature matrix and 0/1 labels
    pub fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()> {
        let (n_rows, n_cols) = x.dim();
        if y.len() != n_rows {
            return Err(Error::Data(format!(
                "{} labels for {} rows",
                y.len(),
                n_rows
            )));
        }
        if n_rows == 0 {
            return Err(Error::Data("cannot fit on an empty matrix".to_string()));
        }

        let mut weights = vec![0.0; n_cols];
        let mut intercept = 0.0;
        let scale = 1.0 / n_rows as f64;

        for _ in 0..self.max_iter {
            let mut grad_w = vec![0.0; n_cols];
            let mut grad_b = 0.0;

            for (row, &label) in y.iter().enumerate() {
                let mut z = intercept;
                for col in 0..n_cols {
                    z += weights[col] * x[[row, col]];
                }
                let err = sigmoid(z) - f64::from(label);
                for col in 0..n_cols {
                    grad_w[col] += err * x[[row, col]];
                }
                grad_b += err;
            }

            for col in 0..n_cols {
                let grad = grad_w[col] * scale + self.l2_penalty * weights[col];
                weights[col] -= self.learning_rate * grad;
            }
            intercept -= self.learning_rate * grad_b * scale;
        }

        self.weights = weights;
        self.intercept = intercept;
        Ok(())
    }

    /// Probability of the positive class, per row
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        if self.weights.is_empty() {
            return Err(Error::Data("logistic model is not fitted".to_string()));
        }
        if x.ncols() != self.weights.len() {
            return Err(Error::Data(format!(
                "matrix has {} features, model has {}",
                x.ncols(),
                self.weights.len()
            )));
        }

        Ok((0..x.nrows())
            .map(|row| {
                let mut z = self.intercept;
                for col in 0..x.ncols() {
                    z += self.weights[col] * x[[row, col]];
                }
                sigmoid(z)
            })
            .collect())
    }

    /// Hard 0/1 predictions at the 0.5 threshold
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| u8::from(p >= 0.5))
            .collect())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
