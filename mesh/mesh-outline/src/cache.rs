//! Scheduling and result caching around the outline pass.
//!
//! The pass itself is synchronous and single-threaded; what can run in
//! parallel is independent documents. This module provides the two
//! pieces of plumbing a host needs for that: a single-flight cache keyed
//! by model content hash, and a bounded worker pool for batches of
//! documents. One document's primitives are never split across workers,
//! since all primitives sharing a buffer view must be solved by one run
//! against one numbering scope.

use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

use mesh_gltf::Document;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{OutlineError, OutlineResult};
use crate::pipeline::{add_outlines, OutlineSummary};

/// A single-flight result cache keyed by content hash.
///
/// At most one computation runs per distinct key; concurrent requests
/// for a key that is being computed block until the in-flight
/// computation finishes and then share its result. Useful when a scene
/// instantiates the same model many times.
///
/// # Example
///
/// ```
/// use mesh_outline::OutlineCache;
///
/// let cache: OutlineCache<u64> = OutlineCache::new();
/// let value = cache.get_or_compute(0xfeed, || 42);
/// // Second request hits the cache; the closure does not run.
/// let again = cache.get_or_compute(0xfeed, || unreachable!());
/// assert_eq!(value, again);
/// ```
#[derive(Debug, Default)]
pub struct OutlineCache<V> {
    entries: Mutex<hashbrown::HashMap<u64, Arc<OnceLock<V>>>>,
}

impl<V: Clone> OutlineCache<V> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(hashbrown::HashMap::new()),
        }
    }

    /// Return the cached value for `key`, computing it if absent.
    ///
    /// The lock over the entry table is held only long enough to find or
    /// insert the entry cell; the computation itself runs outside it, so
    /// distinct keys compute concurrently while requests for the same
    /// key serialize on the cell.
    pub fn get_or_compute(&self, key: u64, compute: impl FnOnce() -> V) -> V {
        let cell = {
            let mut entries = self.lock_entries();
            Arc::clone(entries.entry(key).or_default())
        };
        cell.get_or_init(|| {
            debug!(key, "computing outline result for uncached content");
            compute()
        })
        .clone()
    }

    /// The completed value for `key`, if one has been computed.
    pub fn get(&self, key: u64) -> Option<V> {
        self.lock_entries()
            .get(&key)
            .and_then(|cell| cell.get())
            .cloned()
    }

    /// Number of keys with a completed or in-flight computation.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries. In-flight computations finish but their results
    /// are no longer shared with later requests.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Lock the entry table, recovering from a poisoned lock: a panic in
    /// another requester leaves the table itself consistent.
    fn lock_entries(&self) -> std::sync::MutexGuard<'_, hashbrown::HashMap<u64, Arc<OnceLock<V>>>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Default worker count for batch processing: available parallelism
/// minus one (leaving a core for the host), never less than one.
#[must_use]
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}

/// Run the outline pass over independent documents on a bounded worker
/// pool.
///
/// `workers` defaults to [`default_worker_count`] when `None`. Each
/// document is processed whole by a single worker.
///
/// # Errors
///
/// Returns the first per-document error, or
/// [`OutlineError::WorkerPool`] if the pool cannot be built.
pub fn add_outlines_batch(
    docs: &mut [Document],
    workers: Option<usize>,
) -> OutlineResult<Vec<OutlineSummary>> {
    let workers = workers.unwrap_or_else(default_worker_count).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| OutlineError::WorkerPool {
            message: e.to_string(),
        })?;

    debug!(documents = docs.len(), workers, "processing outline batch");
    pool.install(|| docs.par_iter_mut().map(add_outlines).collect())
}
