//! Column transformer
//!
//! Applies independent numeric and categorical sub-pipelines per declared
//! column role and concatenates the outputs into one ordered feature matrix:
//!
//! - numeric: median imputation, then standardization (both learned at fit)
//! - categorical: mode imputation, then one-hot expansion over the categories
//!   seen at fit time; a category never seen at fit produces an all-zero
//!   indicator row rather than an error
//!
//! Output order is all numeric columns followed by all categorical one-hot
//! blocks. Columns not declared in either role are dropped. After fitting,
//! the ordered output feature names are exposed; that list is the contract
//! the serving-time alignment step replays against.

use crate::data::frame::NumFrame;
use crate::error::{Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Unfitted transformer: the declared column roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformer {
    numeric_cols: Vec<String>,
    categorical_cols: Vec<String>,
}

/// Per-column state learned for the numeric role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub name: String,
    /// Training-time median, used to fill nulls
    pub median: f64,
    /// Mean of the imputed training column
    pub mean: f64,
    /// Std of the imputed training column (1.0 when the column is constant)
    pub std: f64,
}

/// Per-column state learned for the categorical role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub name: String,
    /// Training-time most-frequent category, used to fill nulls
    pub mode: f64,
    /// Categories in first-seen fit order; one indicator column each
    pub categories: Vec<f64>,
}

/// Fitted transformer. Frozen: transform-only from here on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedColumnTransformer {
    numeric: Vec<NumericStats>,
    categorical: Vec<CategoricalStats>,
    feature_names: Vec<String>,
}

impl ColumnTransformer {
    /// Declare the column roles. Duplicate declarations (within or across
    /// roles) are rejected so output feature names stay unique.
    pub fn new(numeric_cols: Vec<String>, categorical_cols: Vec<String>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for col in numeric_cols.iter().chain(&categorical_cols) {
            if !seen.insert(col.as_str()) {
                return Err(Error::Config(format!(
                    "column '{col}' declared more than once"
                )));
            }
        }
        Ok(Self {
            numeric_cols,
            categorical_cols,
        })
    }

    /// Learn imputation, scaling, and category state from a training frame.
    ///
    /// A declared column absent from the frame is treated as all-null, so the
    /// fitted output width is a function of the declaration alone.
    pub fn fit(&self, frame: &NumFrame) -> Result<FittedColumnTransformer> {
        let numeric: Vec<NumericStats> = self
            .numeric_cols
            .iter()
            .map(|name| fit_numeric(name, column_or_null(frame, name)))
            .collect();

        let categorical: Vec<CategoricalStats> = self
            .categorical_cols
            .iter()
            .map(|name| fit_categorical(name, column_or_null(frame, name)))
            .collect();

        let mut feature_names =
            Vec::with_capacity(numeric.len() + categorical.iter().map(|c| c.categories.len()).sum::<usize>());
        for stats in &numeric {
            feature_names.push(format!("num__{}", stats.name));
        }
        for stats in &categorical {
            for category in &stats.categories {
                feature_names.push(format!("cat__{}_{}", stats.name, render_category(*category)));
            }
        }

        Ok(FittedColumnTransformer {
            numeric,
            categorical,
            feature_names,
        })
    }
}

impl FittedColumnTransformer {
    /// Transform a frame into the fitted feature matrix.
    ///
    /// Width always equals `feature_names().len()`, whatever the frame holds.
    pub fn transform(&self, frame: &NumFrame) -> Result<Array2<f64>> {
        let n_rows = frame.n_rows();
        let width = self.feature_names.len();
        let mut out = Array2::zeros((n_rows, width));

        let mut offset = 0;
        for stats in &self.numeric {
            let cells = column_or_null(frame, &stats.name);
            for row in 0..n_rows {
                let value = cells.get(row).copied().flatten().unwrap_or(stats.median);
                out[[row, offset]] = (value - stats.mean) / stats.std;
            }
            offset += 1;
        }

        for stats in &self.categorical {
            let cells = column_or_null(frame, &stats.name);
            for row in 0..n_rows {
                let value = cells.get(row).copied().flatten().unwrap_or(stats.mode);
                // Unseen categories leave the whole block at zero.
                if let Some(pos) = stats.categories.iter().position(|c| *c == value) {
                    out[[row, offset + pos]] = 1.0;
                }
            }
            offset += stats.categories.len();
        }

        Ok(out)
    }

    /// Ordered output feature names captured at fit time
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Column cells by name, or an owned all-null column when absent
fn column_or_null(frame: &NumFrame, name: &str) -> Vec<Option<f64>> {
    frame
        .column(name)
        .map(<[Option<f64>]>::to_vec)
        .unwrap_or_else(|| vec![None; frame.n_rows()])
}

fn fit_numeric(name: &str, cells: Vec<Option<f64>>) -> NumericStats {
    let median = median(&cells);
    let imputed: Vec<f64> = cells.iter().map(|c| c.unwrap_or(median)).collect();

    let (mean, std) = if imputed.is_empty() {
        (0.0, 1.0)
    } else {
        let mean = imputed.iter().sum::<f64>() / imputed.len() as f64;
        let var = imputed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / imputed.len() as f64;
        let std = var.sqrt();
        (mean, if std == 0.0 { 1.0 } else { std })
    };

    NumericStats {
        name: name.to_string(),
        median,
        mean,
        std,
    }
}

fn fit_categorical(name: &str, cells: Vec<Option<f64>>) -> CategoricalStats {
    let mode = mode(&cells);
    let mut categories = Vec::new();
    for cell in &cells {
        let value = cell.unwrap_or(mode);
        if !categories.contains(&value) {
            categories.push(value);
        }
    }

    CategoricalStats {
        name: name.to_string(),
        mode,
        categories,
    }
}

/// Median of the non-null cells; 0.0 for an all-null column so the imputed
/// value stays a neutral constant.
fn median(cells: &[Option<f64>]) -> f64 {
    let mut values: Vec<f64> = cells.iter().flatten().copied().collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Most frequent non-null cell; ties break toward the smaller value, 0.0 for
/// an all-null column.
fn mode(cells: &[Option<f64>]) -> f64 {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for cell in cells.iter().flatten() {
        match counts.iter_mut().find(|(v, _)| v == cell) {
            Some((_, n)) => *n += 1,
            None => counts.push((*cell, 1)),
        }
    }
    counts
        .into_iter()
        .max_by(|(va, na), (vb, nb)| na.cmp(nb).then(vb.total_cmp(va)))
        .map_or(0.0, |(v, _)| v)
}

fn render_category(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(columns: &[(&str, Vec<Option<f64>>)], n_rows: usize) -> NumFrame {
        let mut f = NumFrame::with_rows(n_rows);
        for (name, cells) in columns {
            f.push_column(*name, cells.clone()).unwrap();
        }
        f
    }

    fn fitted_simple() -> FittedColumnTransformer {
        let train = frame(
            &[
                ("age", vec![Some(40.0), Some(50.0), Some(60.0), None]),
                ("sex", vec![Some(1.0), Some(0.0), Some(1.0), Some(1.0)]),
                ("noise", vec![Some(9.0), Some(9.0), Some(9.0), Some(9.0)]),
            ],
            4,
        );
        ColumnTransformer::new(vec!["age".to_string()], vec!["sex".to_string()])
            .unwrap()
            .fit(&train)
            .unwrap()
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let err = ColumnTransformer::new(vec!["a".to_string()], vec!["a".to_string()]);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_feature_names_order_and_uniqueness() {
        let fitted = fitted_simple();
        assert_eq!(
            fitted.feature_names(),
            &["num__age".to_string(), "cat__sex_1".to_string(), "cat__sex_0".to_string()]
        );
        let mut unique = fitted.feature_names().to_vec();
        unique.dedup();
        assert_eq!(unique.len(), fitted.feature_names().len());
    }

    #[test]
    fn test_undeclared_column_dropped() {
        let fitted = fitted_simple();
        assert!(!fitted.feature_names().iter().any(|n| n.contains("noise")));
    }

    #[test]
    fn test_median_impute_then_standardize() {
        let fitted = fitted_simple();
        // age nulls fill with median 50; imputed column is [40, 50, 60, 50]
        let test = frame(&[("age", vec![None]), ("sex", vec![Some(1.0)])], 1);
        let out = fitted.transform(&test).unwrap();
        assert_relative_eq!(out[[0, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_numeric_column_scales_to_zero() {
        let train = frame(&[("flat", vec![Some(7.0), Some(7.0)])], 2);
        let fitted = ColumnTransformer::new(vec!["flat".to_string()], vec![])
            .unwrap()
            .fit(&train)
            .unwrap();
        let out = fitted.transform(&train).unwrap();
        assert_relative_eq!(out[[0, 0]], 0.0);
        assert_relative_eq!(out[[1, 0]], 0.0);
    }

    #[test]
    fn test_unseen_category_is_all_zero() {
        let fitted = fitted_simple();
        let test = frame(&[("age", vec![Some(50.0)]), ("sex", vec![Some(3.0)])], 1);
        let out = fitted.transform(&test).unwrap();
        assert_relative_eq!(out[[0, 1]], 0.0);
        assert_relative_eq!(out[[0, 2]], 0.0);
    }

    #[test]
    fn test_null_category_fills_with_mode() {
        let fitted = fitted_simple();
        // mode of sex is 1 -> indicator for category 1 fires
        let test = frame(&[("age", vec![Some(50.0)]), ("sex", vec![None])], 1);
        let out = fitted.transform(&test).unwrap();
        assert_relative_eq!(out[[0, 1]], 1.0);
        assert_relative_eq!(out[[0, 2]], 0.0);
    }

    #[test]
    fn test_declared_column_absent_keeps_width() {
        let fitted = fitted_simple();
        let test = frame(&[("sex", vec![Some(0.0)])], 1);
        let out = fitted.transform(&test).unwrap();
        assert_eq!(out.ncols(), fitted.feature_names().len());
        // absent numeric column imputes to median then standardizes to 0
        assert_relative_eq!(out[[0, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_tie_breaks_to_smaller_value() {
        let cells = vec![Some(2.0), Some(1.0), Some(2.0), Some(1.0)];
        assert_relative_eq!(mode(&cells), 1.0);
    }

    #[test]
    fn test_fitted_state_serde_round_trip() {
        let fitted = fitted_simple();
        let json = serde_json::to_string(&fitted).unwrap();
        let back: FittedColumnTransformer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fitted);
    }
}
