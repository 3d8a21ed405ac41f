//! Batch orchestration configuration.

use serde::{Deserialize, Serialize};

/// Upper bound on automatically sized pools.
const MAX_AUTO_WORKERS: usize = 4;

/// Orchestrator settings.
///
/// # Defaults
///
/// ```
/// use u_swap::batch::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.parallel_threshold, 200);
/// assert_eq!(config.worker_count, None);
/// assert_eq!(config.sample_limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Batches smaller than this run serially in the calling thread.
    pub parallel_threshold: usize,

    /// Pool size. `None` sizes the pool from the hardware.
    #[serde(default)]
    pub worker_count: Option<usize>,

    /// Maximum rejection samples kept in diagnostics.
    pub sample_limit: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 200,
            worker_count: None,
            sample_limit: 10,
        }
    }
}

impl BatchConfig {
    /// Sets the serial/parallel cutoff.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Fixes the pool size.
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = Some(workers);
        self
    }

    /// Sets the rejection sample cap.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Number of workers the pool should run.
    pub fn effective_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(default_worker_count)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == Some(0) {
            return Err("worker_count must be at least 1".into());
        }
        Ok(())
    }
}

/// `max(1, min(4, available_parallelism - 1))`, leaving one core to the
/// calling thread. 1 when parallelism cannot be queried.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1).clamp(1, MAX_AUTO_WORKERS))
        .unwrap_or(1)
}
