//! Per-chunk evaluation shared by the serial path and every worker.

use tracing::trace;

use super::diagnostics::BatchDiagnostics;
use super::SwapCandidate;
use crate::feasibility::{self, FeasibilityResult};
use crate::models::{Context, SwapPair};
use crate::pressure;

/// Output of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ChunkResult {
    /// Accepted and scored pairs, in input order.
    pub(crate) candidates: Vec<SwapCandidate>,
    /// Chunk summary. Always present for chunks produced by [`evaluate_chunk`].
    pub(crate) diagnostics: Option<BatchDiagnostics>,
}

/// Runs the rule engine, then the scoring engine, over every pair.
pub(crate) fn evaluate_chunk(pairs: &[SwapPair], ctx: &Context, sample_limit: usize) -> ChunkResult {
    let mut candidates = Vec::new();
    let mut diagnostics = BatchDiagnostics::default();

    for pair in pairs {
        match feasibility::evaluate_pair(pair, ctx) {
            FeasibilityResult::Accepted { advisories } => {
                // Accepted pairs always resolve
                let Some((a, b)) = ctx.resolve(pair) else {
                    continue;
                };
                let breakdown = pressure::score(a, b, ctx);
                diagnostics.record_accepted();
                candidates.push(SwapCandidate {
                    a: a.clone(),
                    b: b.clone(),
                    score: breakdown.score,
                    breakdown,
                    advisories,
                });
            }
            FeasibilityResult::Rejected { reason } => {
                trace!(a = %pair.a, b = %pair.b, reason = reason.tag(), "pair rejected");
                diagnostics.record_rejected(pair, &reason, sample_limit);
            }
        }
    }

    ChunkResult {
        candidates,
        diagnostics: Some(diagnostics),
    }
}
