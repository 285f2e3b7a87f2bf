//! Bundle cache
//!
//! Loads the trained bundle from disk at most once per process and hands out
//! shared references from then on. The cached bundle is immutable; replacing
//! a deployed model means writing a new artifact and restarting (or calling
//! [`BundleCache::invalidate`], which exists for tests).

use crate::error::Result;
use crate::io::bundle::{load_bundle, TrainedBundle};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Load-once cache for the trained bundle
#[derive(Debug, Default)]
pub struct BundleCache {
    slot: Mutex<Option<Arc<TrainedBundle>>>,
}

impl BundleCache {
    /// Empty cache; nothing is read until the first `get_or_load`
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached bundle, loading it from `path` on first use.
    ///
    /// A failed load leaves the cache empty, so the next caller retries:
    /// a missing artifact fails that request, not the process.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<TrainedBundle>> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(bundle) = slot.as_ref() {
            return Ok(Arc::clone(bundle));
        }

        let bundle = Arc::new(load_bundle(path)?);
        *slot = Some(Arc::clone(&bundle));
        Ok(bundle)
    }

    /// Drop the cached bundle so the next `get_or_load` re-reads storage
    pub fn invalidate(&self) {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = None;
    }

    /// Whether a bundle is currently cached
    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }
}
