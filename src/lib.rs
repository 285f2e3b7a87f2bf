//! # Corazon
//!
//! End-to-end tabular classification on the UCI heart-disease dataset:
//! dataset download and cleaning, feature engineering, model comparison with
//! cross-validation, bundle persistence, and an HTTP prediction service.
//!
//! The load-bearing piece is the feature pipeline in [`features`]: raw
//! heterogeneous records become a fixed, ordered numeric feature matrix the
//! same way at training time and at single-record serving time. The ordered
//! feature-name list captured at fit crosses the serialization boundary
//! inside the [`io::bundle::TrainedBundle`], and serving reindexes every
//! transform output onto it ([`features::align`]) before the classifier sees
//! a single value.
//!
//! # Training
//!
//! ```no_run
//! use corazon::config::AppConfig;
//! use corazon::train::run_training;
//!
//! let config = AppConfig::default();
//! let report = run_training(&config)?;
//! println!("best model: {}", report.best.name());
//! # Ok::<(), corazon::Error>(())
//! ```
//!
//! # Serving
//!
//! ```no_run
//! use corazon::infer::{predict_record, BundleCache};
//!
//! let cache = BundleCache::new();
//! let bundle = cache.get_or_load("artifacts/model.json")?;
//! let record = serde_json::json!({"age": 63, "sex": 1, "cholesterol": 233});
//! let result = predict_record(&bundle, record.as_object().expect("object"))?;
//! println!("class {} ({:?})", result.prediction, result.confidence);
//! # Ok::<(), corazon::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod features;
pub mod infer;
pub mod io;
pub mod model;
pub mod server;
pub mod tracking;
pub mod train;

pub use error::{Error, Result};
