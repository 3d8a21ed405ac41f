//! Worker pool for parallel chunk evaluation.
//!
//! Wraps an owned rayon thread pool. Every chunk decodes its own private
//! copy of the context from one shared snapshot, so no evaluation state is
//! shared between threads.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use super::diagnostics::BatchDiagnostics;
use super::shim::{evaluate_chunk, ChunkResult};
use super::SwapCandidate;
use crate::models::{Context, SwapPair};
use crate::SwapError;

/// A fixed-size set of evaluation threads.
///
/// Threads stop when the pool is dropped.
pub(crate) struct WorkerPool {
    threads: ThreadPool,
}

impl WorkerPool {
    /// Starts `size` workers (at least one).
    pub(crate) fn spawn(size: usize) -> Result<Self, SwapError> {
        let threads = ThreadPoolBuilder::new()
            .num_threads(size.max(1))
            .thread_name(|i| format!("u-swap-worker-{i}"))
            .build()?;
        debug!(workers = threads.current_num_threads(), "worker pool started");
        Ok(Self { threads })
    }

    pub(crate) fn size(&self) -> usize {
        self.threads.current_num_threads()
    }

    /// Splits `pairs` into `ceil(len / size)`-sized chunks and evaluates
    /// them on the pool.
    ///
    /// Results come back in chunk order.
    pub(crate) fn run(
        &self,
        pairs: &[SwapPair],
        ctx: &Context,
        sample_limit: usize,
    ) -> Result<Vec<ChunkResult>, SwapError> {
        let snapshot = ctx.to_snapshot()?;
        let chunk_size = pairs.len().div_ceil(self.size()).max(1);
        debug!(
            pairs = pairs.len(),
            chunk_size,
            snapshot_bytes = snapshot.len(),
            "dispatching chunks"
        );

        self.threads.install(|| {
            pairs
                .par_chunks(chunk_size)
                .enumerate()
                .map(|(index, chunk)| -> Result<ChunkResult, SwapError> {
                    let private = Context::from_snapshot(&snapshot).map_err(|err| {
                        warn!(chunk = index, error = %err, "chunk failed");
                        err
                    })?;
                    Ok(evaluate_chunk(chunk, &private, sample_limit))
                })
                .collect()
        })
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        debug!(workers = self.size(), "worker pool stopped");
    }
}

/// Concatenates chunk results and merges their diagnostics.
///
/// Returns `None` when the merged result is inconsistent: a chunk without
/// diagnostics, an accepted count that differs from the candidate count, or
/// a pair total that differs from the batch size.
pub(crate) fn merge_chunks(
    chunks: Vec<ChunkResult>,
    pair_count: usize,
    sample_limit: usize,
) -> Option<(Vec<SwapCandidate>, BatchDiagnostics)> {
    let mut candidates = Vec::new();
    let mut merged = BatchDiagnostics::default();
    for chunk in chunks {
        candidates.extend(chunk.candidates);
        merged.merge(chunk.diagnostics?, sample_limit);
    }
    (merged.accepted == candidates.len() && merged.total == pair_count)
        .then_some((candidates, merged))
}
