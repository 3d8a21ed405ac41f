use thiserror::Error;

use crate::validation::ValidationError;

/// Failures outside the swap domain itself.
///
/// Rejections and zero scores are ordinary results, not errors; this type
/// only covers bad input datasets, bad configuration, and worker plumbing.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("dataset failed validation with {} error(s)", .0.len())]
    InvalidDataset(Vec<ValidationError>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("context snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("failed to start worker pool: {0}")]
    WorkerSpawn(#[from] rayon::ThreadPoolBuildError),
}
