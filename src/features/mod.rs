//! Feature engineering and the train/serve feature contract
//!
//! The pipeline here turns raw heterogeneous records into a fixed, ordered
//! numeric feature matrix, identically at training time and at single-record
//! serving time. The ordered feature-name list captured at fit is the one
//! contract the serving path replays against (see [`align`]).

pub mod align;
pub mod engineer;
pub mod pipeline;
pub mod transform;

pub use align::align_features;
pub use engineer::{engineer_features, DERIVED_COLUMNS};
pub use pipeline::{FeaturePipeline, FittedPipeline};
pub use transform::{ColumnTransformer, FittedColumnTransformer};
