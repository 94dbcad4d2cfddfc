use super::{FixedViewAssemblySource, ViewAssembly, ViewAssemblySource};

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Caches the result of scanning for view assemblies.
///
/// Shared by every dictionary built with it. The scan runs once, on first
/// use, and its result is kept until [`AssemblyCache::clear`] is called.
#[derive(Debug)]
pub struct AssemblyCache {
    source: Box<dyn ViewAssemblySource>,
    scanned: Mutex<Option<Arc<[Arc<dyn ViewAssembly>]>>>,
}

impl AssemblyCache {
    pub fn new(source: impl ViewAssemblySource) -> Self {
        Self {
            source: Box::new(source),
            scanned: Mutex::new(None),
        }
    }

    /// A cache over no assemblies at all.
    pub fn empty() -> Self {
        Self::new(FixedViewAssemblySource::default())
    }

    /// Returns the candidate assemblies, scanning on first use.
    pub fn candidates(&self) -> Arc<[Arc<dyn ViewAssembly>]> {
        let mut scanned = self.scanned.lock();

        if let Some(candidates) = &*scanned {
            return candidates.clone();
        }

        let candidates: Arc<[_]> = self.source.candidates().into();
        debug!(count = candidates.len(), "scanned for view assemblies");

        *scanned = Some(candidates.clone());
        candidates
    }

    /// Forgets the scan result; the next lookup scans again.
    pub fn clear(&self) {
        *self.scanned.lock() = None;
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned.lock().is_some()
    }
}

impl Default for AssemblyCache {
    fn default() -> Self {
        Self::empty()
    }
}
