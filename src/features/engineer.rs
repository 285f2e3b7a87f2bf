//! Derived feature construction
//!
//! Computes the engineered numeric columns from the cleaned frame. Each
//! derived column is always appended (as all-null when its inputs are
//! missing) so downstream column ordering never depends on which raw fields
//! a particular record happened to carry. The input frame is not mutated.

use crate::data::frame::NumFrame;
use crate::error::Result;

/// Age relative to peak exercise heart rate
pub const AGE_TO_HEART_RATE_RATIO: &str = "age_to_heart_rate_ratio";
/// Serum cholesterol times resting blood pressure
pub const CHOLESTEROL_PRESSURE_PRODUCT: &str = "cholesterol_pressure_product";

/// Names of all derived columns, in output order
pub const DERIVED_COLUMNS: [&str; 2] = [AGE_TO_HEART_RATE_RATIO, CHOLESTEROL_PRESSURE_PRODUCT];

/// Return a new frame with the derived columns appended.
pub fn engineer_features(frame: &NumFrame) -> Result<NumFrame> {
    let mut out = frame.clone();

    // The +1 keeps a zero max-heart-rate cell from dividing by zero.
    out.push_column(
        AGE_TO_HEART_RATE_RATIO,
        derive(frame, "age", "max_heart_rate", |age, hr| age / (hr + 1.0)),
    )?;
    out.push_column(
        CHOLESTEROL_PRESSURE_PRODUCT,
        derive(frame, "cholesterol", "resting_bp", |chol, bp| chol * bp),
    )?;

    Ok(out)
}

/// Compute `f(a, b)` per row over two columns; null when either input cell is
/// null or either column is absent from the frame.
fn derive(
    frame: &NumFrame,
    a: &str,
    b: &str,
    f: impl Fn(f64, f64) -> f64,
) -> Vec<Option<f64>> {
    match (frame.column(a), frame.column(b)) {
        (Some(col_a), Some(col_b)) => col_a
            .iter()
            .zip(col_b)
            .map(|(x, y)| Some(f((*x)?, (*y)?)))
            .collect(),
        _ => vec![None; frame.n_rows()],
    }
}
