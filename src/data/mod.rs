//! Data pipeline: download, loading, cleaning, profiling
//!
//! Raw frame in, cleaned numeric frame out. The stages here feed the feature
//! pipeline and never learn anything from the data; everything that fits
//! lives in [`crate::features`].

pub mod clean;
pub mod download;
pub mod frame;
pub mod load;
pub mod pipeline;
pub mod profile;

pub use clean::clean_frame;
pub use download::{download_dataset, COLUMN_NAMES};
pub use frame::{NumFrame, RawFrame};
pub use load::{load_raw_data, parse_csv};
pub use pipeline::{run_data_pipeline, write_csv};
pub use profile::{profile_frame, write_report, DatasetProfile};
