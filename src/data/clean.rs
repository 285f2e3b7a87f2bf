//! Cleaning stage
//!
//! Replaces sentinel missing-value tokens with null and coerces every cell to
//! numeric. A postcondition scan re-renders the coerced table and fails hard
//! if any sentinel is still representable: the raw source grew a
//! missing-value marker the schema does not declare yet.

use crate::data::frame::{NumFrame, RawFrame};
use crate::error::{Error, Result};

/// Clean a raw frame: sentinel cells become null, everything else is coerced
/// to `f64` (coercion failures also become null).
///
/// Returns `Error::DataIntegrity` when a sentinel token survives coercion.
pub fn clean_frame(raw: &RawFrame, sentinels: &[String]) -> Result<NumFrame> {
    let mut cleaned = NumFrame::with_rows(raw.n_rows());

    for name in raw.columns() {
        let cells = raw
            .column(name)
            .ok_or_else(|| Error::Data(format!("column '{name}' disappeared mid-clean")))?;
        let coerced = cells
            .iter()
            .map(|cell| {
                let cell = cell.trim();
                if cell.is_empty() || sentinels.iter().any(|s| s == cell) {
                    None
                } else {
                    cell.parse::<f64>().ok()
                }
            })
            .collect();
        cleaned.push_column(name.clone(), coerced)?;
    }

    scan_for_sentinels(&cleaned, sentinels)?;
    Ok(cleaned)
}

/// Render every numeric cell back to a string and check it against the
/// sentinel list. Catches sentinels that parse as numbers (e.g. a source
/// switching from `?` to `-9`) before they poison the feature matrix.
fn scan_for_sentinels(frame: &NumFrame, sentinels: &[String]) -> Result<()> {
    for (name, cells) in frame.iter_columns() {
        for (row, cell) in cells.iter().enumerate() {
            if let Some(value) = cell {
                let rendered = render_cell(*value);
                if sentinels.iter().any(|s| *s == rendered) {
                    return Err(Error::DataIntegrity(format!(
                        "sentinel '{rendered}' present in column '{name}' row {row} after cleaning"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn render_cell(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
