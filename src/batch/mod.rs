//! Batch evaluation of candidate swaps.
//!
//! Runs the feasibility rules and then the pressure score over a list of
//! [`SwapPair`]s, either serially in the calling thread or across a pool of
//! worker threads.
//!
//! # Execution
//!
//! Batches below [`BatchConfig::parallel_threshold`], empty batches, and
//! single-worker configurations run serially. Otherwise the evaluator
//! starts its pool on first use, snapshots the context once, and hands
//! each worker one contiguous chunk. Merged worker output is checked for
//! consistency; if the check fails, or a worker fails, the batch is
//! recomputed serially and reported as [`ExecutionMode::SerialFallback`].
//!
//! Serial and parallel runs produce the same candidates, scores, and
//! diagnostics.
//!
//! # Usage
//!
//! ```
//! use u_swap::batch::{BatchConfig, ExecutionMode, SwapEvaluator};
//! use u_swap::models::{Context, Dataset, SwapPair};
//!
//! let context = Context::build(Dataset::default()).unwrap();
//! let mut evaluator = SwapEvaluator::open(BatchConfig::default()).unwrap();
//!
//! let outcome = evaluator.evaluate_batch(&[SwapPair::new("x", "y")], &context);
//! assert_eq!(outcome.mode, ExecutionMode::Serial);
//! assert_eq!(outcome.diagnostics.rejections["missing-input"], 1);
//!
//! evaluator.close();
//! assert!(!evaluator.is_pool_live());
//! ```

mod config;
mod diagnostics;
mod pool;
mod shim;

pub use config::{default_worker_count, BatchConfig};
pub use diagnostics::{BatchDiagnostics, RejectionSample};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::feasibility::Advisory;
use crate::models::{Context, Shift, SwapPair};
use crate::pressure::PressureBreakdown;
use crate::SwapError;
use pool::{merge_chunks, WorkerPool};
use shim::{evaluate_chunk, ChunkResult};

/// An accepted, scored swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapCandidate {
    /// Shift given away by its owner.
    pub a: Shift,
    /// Shift received in exchange.
    pub b: Shift,
    /// Pressure score (positive = relief).
    pub score: f64,
    /// Per-call explanation of `score`.
    pub breakdown: PressureBreakdown,
    /// Soft conflicts noted while accepting the swap.
    pub advisories: Vec<Advisory>,
}

impl SwapCandidate {
    /// The pair of shift ids.
    pub fn pair(&self) -> SwapPair {
        SwapPair::new(self.a.id.as_str(), self.b.id.as_str())
    }
}

/// How a batch was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// In the calling thread.
    Serial,
    /// Across the worker pool.
    Parallel { workers: usize },
    /// Parallel output was discarded and the batch recomputed serially.
    SerialFallback,
}

/// Result of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Accepted candidates. Unordered; see [`BatchOutcome::ranked`].
    pub candidates: Vec<SwapCandidate>,
    /// Counts, rejection histogram, and samples for the whole batch.
    pub diagnostics: BatchDiagnostics,
    /// How the batch ran.
    pub mode: ExecutionMode,
}

impl BatchOutcome {
    /// Sorts candidates by score (highest first), then by shift ids.
    pub fn ranked(mut self) -> Self {
        self.candidates.sort_by(|x, y| {
            y.score
                .total_cmp(&x.score)
                .then_with(|| x.a.id.cmp(&y.a.id))
                .then_with(|| x.b.id.cmp(&y.b.id))
        });
        self
    }
}

/// Evaluates a batch serially with default settings.
pub fn evaluate_batch_sync(pairs: &[SwapPair], ctx: &Context) -> BatchOutcome {
    serial_outcome(pairs, ctx, BatchConfig::default().sample_limit, ExecutionMode::Serial)
}

/// Batch evaluator owning a lazily started worker pool.
///
/// The pool lives until [`SwapEvaluator::close`] or drop.
pub struct SwapEvaluator {
    config: BatchConfig,
    pool: Option<WorkerPool>,
}

impl SwapEvaluator {
    /// Creates an evaluator. No threads start until a batch needs them.
    ///
    /// # Errors
    /// [`SwapError::InvalidConfig`] if the configuration is invalid.
    pub fn open(config: BatchConfig) -> Result<Self, SwapError> {
        config.validate().map_err(SwapError::InvalidConfig)?;
        Ok(Self { config, pool: None })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Whether worker threads are currently running.
    pub fn is_pool_live(&self) -> bool {
        self.pool.is_some()
    }

    /// Evaluates a batch, in parallel when it is large enough.
    ///
    /// Never fails: worker problems degrade to the serial path.
    pub fn evaluate_batch(&mut self, pairs: &[SwapPair], ctx: &Context) -> BatchOutcome {
        let workers = self.config.effective_worker_count();
        if pairs.is_empty() || pairs.len() < self.config.parallel_threshold || workers <= 1 {
            debug!(pairs = pairs.len(), workers, "evaluating batch serially");
            return self.evaluate_batch_sync(pairs, ctx);
        }

        debug!(pairs = pairs.len(), workers, "evaluating batch in parallel");
        match self.run_parallel(pairs, ctx, workers) {
            Ok(chunks) => self.finish_parallel(chunks, pairs, ctx, workers),
            Err(err) => {
                warn!(error = %err, "parallel batch failed, recomputing serially");
                self.fallback(pairs, ctx)
            }
        }
    }

    /// Evaluates a batch in the calling thread.
    pub fn evaluate_batch_sync(&self, pairs: &[SwapPair], ctx: &Context) -> BatchOutcome {
        serial_outcome(pairs, ctx, self.config.sample_limit, ExecutionMode::Serial)
    }

    /// Stops the worker pool. Safe to call repeatedly; a later parallel
    /// batch starts a fresh pool.
    pub fn close(&mut self) {
        self.pool = None;
    }

    fn run_parallel(
        &mut self,
        pairs: &[SwapPair],
        ctx: &Context,
        workers: usize,
    ) -> Result<Vec<ChunkResult>, SwapError> {
        let pool = match self.pool.take() {
            Some(pool) => pool,
            None => WorkerPool::spawn(workers)?,
        };
        let chunks = pool.run(pairs, ctx, self.config.sample_limit);
        self.pool = Some(pool);
        chunks
    }

    fn finish_parallel(
        &self,
        chunks: Vec<ChunkResult>,
        pairs: &[SwapPair],
        ctx: &Context,
        workers: usize,
    ) -> BatchOutcome {
        match merge_chunks(chunks, pairs.len(), self.config.sample_limit) {
            Some((candidates, diagnostics)) => BatchOutcome {
                candidates,
                diagnostics,
                mode: ExecutionMode::Parallel { workers },
            },
            None => {
                warn!(
                    pairs = pairs.len(),
                    "merged worker output failed consistency check, recomputing serially"
                );
                self.fallback(pairs, ctx)
            }
        }
    }

    fn fallback(&self, pairs: &[SwapPair], ctx: &Context) -> BatchOutcome {
        serial_outcome(pairs, ctx, self.config.sample_limit, ExecutionMode::SerialFallback)
    }
}

impl Drop for SwapEvaluator {
    fn drop(&mut self) {
        self.close();
    }
}

fn serial_outcome(
    pairs: &[SwapPair],
    ctx: &Context,
    sample_limit: usize,
    mode: ExecutionMode,
) -> BatchOutcome {
    let chunk = evaluate_chunk(pairs, ctx, sample_limit);
    BatchOutcome {
        candidates: chunk.candidates,
        diagnostics: chunk.diagnostics.unwrap_or_default(),
        mode,
    }
}
