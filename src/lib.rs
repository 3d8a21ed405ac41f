//! On-call swap evaluation for residency rosters.
//!
//! Decides whether two residents may exchange two call shifts under the
//! program's scheduling policies and, when they may, how much the exchange
//! relieves or burdens each of them. The crate is a pure evaluation core:
//! roster ingestion, UI, and persistence live with the caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Shift`, `Resident`, `RotationAssignment`,
//!   `RuleConfig`) and the read-only `Context` index built from a `Dataset`
//! - **`validation`**: Dataset integrity checks run before indexing
//! - **`feasibility`**: Sequential, short-circuiting swap rules that accept a
//!   pair (optionally with advisories) or reject it with a typed reason
//! - **`pressure`**: Rest-gap "pressure" scoring with a per-call breakdown
//! - **`batch`**: Serial and worker-pool evaluation of candidate batches with
//!   a consistency-checked serial fallback
//!
//! # Example
//!
//! ```
//! use u_swap::batch::{BatchConfig, SwapEvaluator};
//! use u_swap::models::{Context, Dataset, SwapPair};
//!
//! let context = Context::build(Dataset::default()).unwrap();
//! let mut evaluator = SwapEvaluator::open(BatchConfig::default()).unwrap();
//! let outcome = evaluator.evaluate_batch(&[SwapPair::new("s1", "s2")], &context);
//! assert!(outcome.candidates.is_empty());
//! evaluator.close();
//! ```

pub mod batch;
mod error;
pub mod feasibility;
pub mod models;
pub mod pressure;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::SwapError;
