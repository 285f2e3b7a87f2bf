//! Shared server state

use crate::infer::BundleCache;
use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

/// Request counters, incremented by the predict handler
#[derive(Debug, Default)]
pub struct Counters {
    pub requests: AtomicU64,
    pub predictions: AtomicU64,
    pub errors: AtomicU64,
}

/// State shared across request handlers.
///
/// The bundle cache is read-only from the handlers' perspective: the first
/// request to need the model populates it, every later request reuses the
/// same instance.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configured bundle location
    pub bundle_path: Arc<PathBuf>,
    /// Load-once bundle cache
    pub cache: Arc<BundleCache>,
    /// Request counters
    pub counters: Arc<Counters>,
    /// Service start time, for uptime reporting
    pub started: Instant,
}

impl AppState {
    /// Fresh state around a bundle path; nothing is loaded yet
    pub fn new(bundle_path: PathBuf) -> Self {
        Self {
            bundle_path: Arc::new(bundle_path),
            cache: Arc::new(BundleCache::new()),
            counters: Arc::new(Counters::default()),
            started: Instant::now(),
        }
    }

    /// Seconds since the service started
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
