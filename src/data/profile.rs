//! Dataset profiling
//!
//! Produces the exploratory numbers for a cleaned frame as a serializable
//! report: class balance, per-column summary statistics with histogram bins,
//! and a Pearson correlation matrix.

use crate::data::frame::NumFrame;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const HISTOGRAM_BINS: usize = 20;

/// Summary report for a cleaned dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Number of rows profiled
    pub n_rows: usize,
    /// Count of rows per class label, keyed by rendered label
    pub class_balance: BTreeMap<String, usize>,
    /// Per-column summaries, in frame column order
    pub columns: Vec<ColumnSummary>,
    /// Pearson correlation over pairwise-complete observations
    pub correlation: CorrelationMatrix,
}

/// Statistics for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Non-null cell count
    pub count: usize,
    /// Null cell count
    pub nulls: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// Equal-width histogram over the observed range
    pub histogram: Vec<HistogramBin>,
}

/// One histogram bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Column-labelled correlation matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `matrix[i][j]` is the correlation of `columns[i]` with `columns[j]`
    pub matrix: Vec<Vec<f64>>,
}

/// Profile a cleaned frame. `target` selects the class-balance column and
/// must exist in the frame.
pub fn profile_frame(frame: &NumFrame, target: &str) -> Result<DatasetProfile> {
    let target_cells = frame
        .column(target)
        .ok_or_else(|| Error::Data(format!("target column '{target}' not in frame")))?;

    let mut class_balance = BTreeMap::new();
    for cell in target_cells.iter().flatten() {
        *class_balance.entry(format!("{cell}")).or_insert(0) += 1;
    }

    let columns = frame
        .iter_columns()
        .map(|(name, cells)| summarize_column(name, cells))
        .collect();

    Ok(DatasetProfile {
        n_rows: frame.n_rows(),
        class_balance,
        columns,
        correlation: correlation_matrix(frame),
    })
}

/// Serialize a profile to pretty JSON at `path`, creating parent directories
pub fn write_report(profile: &DatasetProfile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(profile)
        .map_err(|e| Error::Serialization(format!("profile serialization failed: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

fn summarize_column(name: &str, cells: &[Option<f64>]) -> ColumnSummary {
    let values: Vec<f64> = cells.iter().flatten().copied().collect();
    let nulls = cells.len() - values.len();

    if values.is_empty() {
        return ColumnSummary {
            name: name.to_string(),
            count: 0,
            nulls,
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            histogram: Vec::new(),
        };
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ColumnSummary {
        name: name.to_string(),
        count,
        nulls,
        mean,
        std: var.sqrt(),
        min,
        max,
        histogram: histogram(&values, min, max),
    }
}

fn histogram(values: &[f64], min: f64, max: f64) -> Vec<HistogramBin> {
    let span = max - min;
    if span <= 0.0 {
        return vec![HistogramBin {
            lo: min,
            hi: max,
            count: values.len(),
        }];
    }

    let width = span / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Pearson correlation over rows where both columns are non-null
fn correlation_matrix(frame: &NumFrame) -> CorrelationMatrix {
    let names: Vec<String> = frame.columns().to_vec();
    let n = names.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i..n {
            let a = frame.column(&names[i]).unwrap_or(&[]);
            let b = frame.column(&names[j]).unwrap_or(&[]);
            let r = pairwise_pearson(a, b);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    CorrelationMatrix { columns: names, matrix }
}

fn pairwise_pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        cov / denom
    }
}
