//! End-to-end data pipeline
//!
//! Download-if-missing, load, clean, persist the processed CSV, and write the
//! dataset profile report. The training orchestrator runs this automatically
//! when the processed file is absent.

use crate::config::AppConfig;
use crate::data::clean::clean_frame;
use crate::data::download::download_dataset;
use crate::data::frame::NumFrame;
use crate::data::load::load_raw_data;
use crate::data::profile::{profile_frame, write_report, DatasetProfile};
use crate::error::Result;
use std::path::Path;

/// Run the full data pipeline and return the dataset profile
pub fn run_data_pipeline(config: &AppConfig) -> Result<DatasetProfile> {
    download_dataset(&config.data.url, &config.data.raw_path)?;

    let raw = load_raw_data(&config.data.raw_path)?;
    let cleaned = clean_frame(&raw, &config.schema.sentinels)?;

    write_csv(&cleaned, &config.data.processed_path)?;

    let profile = profile_frame(&cleaned, &config.schema.target)?;
    write_report(&profile, config.artifacts.reports_dir.join("dataset_profile.json"))?;

    Ok(profile)
}

/// Write a numeric frame as headered CSV; nulls become empty cells
pub fn write_csv(frame: &NumFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut out = frame.columns().join(",");
    out.push('\n');
    for row in 0..frame.n_rows() {
        let line: Vec<String> = frame
            .columns()
            .iter()
            .map(|name| {
                frame
                    .column(name)
                    .and_then(|cells| cells[row])
                    .map_or_else(String::new, |v| format!("{v}"))
            })
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    std::fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load::parse_csv;

    #[test]
    fn test_write_csv_round_trips_through_loader() {
        let mut frame = NumFrame::with_rows(2);
        frame
            .push_column("age", vec![Some(63.0), None])
            .unwrap();
        frame
            .push_column("st_depression", vec![Some(2.3), Some(0.0)])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed/clean.csv");
        write_csv(&frame, &path).unwrap();

        let loaded = parse_csv(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.columns(), frame.columns());
        assert_eq!(loaded.column("age").unwrap(), &["63".to_string(), String::new()]);
        assert_eq!(loaded.column("st_depression").unwrap()[0], "2.3");
    }

    #[test]
    fn test_pipeline_on_local_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw/heart.csv");
        std::fs::create_dir_all(raw_path.parent().unwrap()).unwrap();

        // pre-seeded raw file, so the URL is never contacted
        let header = crate::data::download::COLUMN_NAMES.join(",");
        let body = "\
63,1,1,145,233,1,2,150,0,2.3,3,0,6,0
67,1,4,160,286,0,2,108,1,1.5,2,3,3,2
41,0,2,130,204,0,2,172,0,1.4,1,0,3,0
56,1,3,120,236,0,0,178,0,0.8,0,?,3,1";
        std::fs::write(&raw_path, format!("{header}\n{body}\n")).unwrap();

        let mut config = AppConfig::default();
        config.data.raw_path = raw_path;
        config.data.processed_path = dir.path().join("processed/clean.csv");
        config.artifacts.reports_dir = dir.path().join("reports");

        let profile = run_data_pipeline(&config).unwrap();
        assert_eq!(profile.n_rows, 4);
        assert!(config.data.processed_path.exists());
        assert!(config.artifacts.reports_dir.join("dataset_profile.json").exists());

        // the '?' cell became an empty (null) cell in the processed file
        let processed = std::fs::read_to_string(&config.data.processed_path).unwrap();
        assert!(!processed.contains('?'));
    }
}
