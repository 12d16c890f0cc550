//! Running ingestion work outside the caller's thread.
//!
//! This module sits "above" [`crate::ingestion`] and provides:
//!
//! - Parallel batch ingestion of independent files ([`ingest_batch`], [`BatchIngestor`])
//! - A periodic live-sync publisher with an explicit stop handle ([`LiveSync`])
//!
//! Ingestions never share mutable state, so a batch is simply a parallel map whose results keep
//! input order. One failing file does not affect the others.

mod live_sync;

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

use crate::error::IngestionResult;
use crate::ingestion::{ingest_from_path, IngestionOptions, IngestionRequest};
use crate::types::Dataset;

pub use live_sync::{LiveSync, LiveSyncHandle, DEFAULT_SYNC_INTERVAL};

/// Ingest every path on rayon's global pool.
///
/// Result `i` belongs to `paths[i]`.
pub fn ingest_batch<P>(paths: &[P], options: &IngestionOptions) -> Vec<IngestionResult<Dataset>>
where
    P: AsRef<Path> + Sync,
{
    let start = Instant::now();
    let out: Vec<IngestionResult<Dataset>> = paths
        .par_iter()
        .map(|p| ingest_from_path(p, options))
        .collect();
    debug!(
        files = paths.len(),
        failed = out.iter().filter(|r| r.is_err()).count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch ingestion finished"
    );
    out
}

/// Configuration for a [`BatchIngestor`].
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

/// Batch ingestion on a dedicated thread pool.
pub struct BatchIngestor {
    pool: ThreadPool,
}

impl BatchIngestor {
    /// Build the worker pool.
    pub fn new(opts: BatchOptions) -> Result<Self, ThreadPoolBuildError> {
        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run each request; result `i` belongs to `requests[i]`.
    pub fn run(&self, requests: &[IngestionRequest]) -> Vec<IngestionResult<Dataset>> {
        self.pool
            .install(|| requests.par_iter().map(IngestionRequest::run).collect())
    }
}
