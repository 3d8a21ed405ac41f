//! Rejection bookkeeping for batch runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::feasibility::RejectReason;
use crate::models::SwapPair;

/// A concrete rejected pair kept for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionSample {
    /// Rejected pair.
    pub pair: SwapPair,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// Summary of a batch (or one chunk of it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchDiagnostics {
    /// Pairs seen.
    pub total: usize,
    /// Pairs accepted.
    pub accepted: usize,
    /// Rejection count per reason tag.
    pub rejections: BTreeMap<String, usize>,
    /// First few rejections, capped by the sample limit.
    pub samples: Vec<RejectionSample>,
}

impl BatchDiagnostics {
    /// Counts an accepted pair.
    pub fn record_accepted(&mut self) {
        self.total += 1;
        self.accepted += 1;
    }

    /// Counts a rejected pair, keeping it as a sample while under `sample_limit`.
    pub fn record_rejected(&mut self, pair: &SwapPair, reason: &RejectReason, sample_limit: usize) {
        self.total += 1;
        *self.rejections.entry(reason.tag().to_string()).or_default() += 1;
        if self.samples.len() < sample_limit {
            self.samples.push(RejectionSample {
                pair: pair.clone(),
                reason: reason.clone(),
            });
        }
    }

    /// Number of rejected pairs.
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    /// Folds another summary into this one.
    ///
    /// Counts and histograms add up; samples are concatenated up to
    /// `sample_limit` in total.
    pub fn merge(&mut self, other: BatchDiagnostics, sample_limit: usize) {
        self.total += other.total;
        self.accepted += other.accepted;
        for (tag, count) in other.rejections {
            *self.rejections.entry(tag).or_default() += count;
        }
        let room = sample_limit.saturating_sub(self.samples.len());
        self.samples.extend(other.samples.into_iter().take(room));
    }
}
