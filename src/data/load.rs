//! Raw CSV loading
//!
//! Reads the headered comma-separated file produced by the download step into
//! a [`RawFrame`]. The UCI heart-disease export is plain unquoted CSV, so the
//! loader handles exactly that dialect and rejects quoted fields instead of
//! mis-parsing them.

use crate::data::frame::RawFrame;
use crate::error::{Error, Result};
use std::path::Path;

/// Load a headered CSV file into a raw frame
pub fn load_raw_data(path: impl AsRef<Path>) -> Result<RawFrame> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Data(format!("failed to read {}: {e}", path.display())))?;
    parse_csv(&content)
}

/// Parse headered CSV text into a raw frame
pub fn parse_csv(content: &str) -> Result<RawFrame> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| Error::Data("empty CSV input".to_string()))?;
    let columns = split_line(header, 0)?;

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        rows.push(split_line(line, i + 1)?);
    }

    RawFrame::from_rows(columns, &rows)
}

fn split_line(line: &str, line_no: usize) -> Result<Vec<String>> {
    if line.contains('"') {
        return Err(Error::Data(format!(
            "line {line_no}: quoted CSV fields are not supported"
        )));
    }
    Ok(line
        .trim_end_matches('\r')
        .split(',')
        .map(|cell| cell.trim().to_string())
        .collect())
}
