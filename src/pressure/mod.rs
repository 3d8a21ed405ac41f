//! Swap pressure scoring.
//!
//! Scores how much a swap improves (positive) or worsens (negative) each
//! resident's rest around the traded calls.
//!
//! # Algorithm
//!
//! For each side (the resident giving away A and receiving B, then the
//! resident giving away B and receiving A):
//!
//! 1. Take the resident's other non-backup shifts.
//! 2. Keep neighbors starting within 96 hours of either traded call's start;
//!    weight each by linear decay over that distance (floored at 1e-3).
//! 3. Map the rest gap between the traded call and the neighbor into a
//!    penalty in [-1, 0]: gaps at or below the minimum rest cost -1, gaps at
//!    or beyond `max(min_rest + 12, 96)` hours cost nothing.
//! 4. Compute the penalty once against the outgoing call (baseline) and
//!    once against the incoming call (swapped); the weighted difference is
//!    the side's delta.
//!
//! The two deltas are averaged and scaled by `100 × m(A) × m(B)`, where
//! `m` is the shift multiplier (see [`shift_multiplier`]). Fixed consult
//! pairing and rotation adjustments are then added as synthetic calls.
//!
//! Totals are always sums over the visible calls.

mod adjustments;
mod breakdown;

pub use adjustments::{shift_multiplier, CONSULT_PAIRING_PENALTY, ROTATION_PRESSURE};
pub use breakdown::{CalendarContext, Call, CallKind, PressureBreakdown, Section};

use crate::models::{hours_between, Context, Resident, Shift, SwapPair};

/// Neighborhood radius around a traded call.
pub const WINDOW_HOURS: f64 = 96.0;

/// Weight floor so a neighbor at the window edge still registers.
pub const WEIGHT_EPSILON: f64 = 1e-3;

/// Hours above the minimum rest at which a gap stops being penalized,
/// unless the window itself is larger.
const COMFORT_MARGIN_HOURS: f64 = 12.0;

/// Points per unit of raw score.
const SCORE_SCALE: f64 = 100.0;

/// Scores the exchange of `a` and `b` between their owners.
///
/// Returns [`PressureBreakdown::zero`] for pairs that cannot be scored:
/// identical shifts, same owner, unknown owners, or cross-ineligible types.
pub fn score(a: &Shift, b: &Shift, ctx: &Context) -> PressureBreakdown {
    if a.id == b.id || a.resident_id == b.resident_id {
        return PressureBreakdown::zero();
    }
    let (Some(resident_a), Some(resident_b)) =
        (ctx.resident(&a.resident_id), ctx.resident(&b.resident_id))
    else {
        return PressureBreakdown::zero();
    };
    if !resident_a.is_eligible(b.shift_type) || !resident_b.is_eligible(a.shift_type) {
        return PressureBreakdown::zero();
    }

    // Each side carries half of the raw score.
    let scale = SCORE_SCALE / 2.0 * shift_multiplier(a) * shift_multiplier(b);

    let mut original = neighbor_section(ctx, resident_a, a, b, scale);
    let mut counterpart = neighbor_section(ctx, resident_b, b, a, scale);

    adjustments::consult_pairing(ctx, a, b, &mut original, &mut counterpart);
    adjustments::rotation_pressure(resident_a, a, b, &mut original);
    adjustments::rotation_pressure(resident_b, b, a, &mut counterpart);

    original.finalize();
    counterpart.finalize();
    PressureBreakdown::from_sections(original, counterpart)
}

/// Scores a pair of shift ids, resolving them through the index.
pub fn score_pair(pair: &SwapPair, ctx: &Context) -> PressureBreakdown {
    match ctx.resolve(pair) {
        Some((a, b)) => score(a, b, ctx),
        None => PressureBreakdown::zero(),
    }
}

fn neighbor_section(
    ctx: &Context,
    resident: &Resident,
    outgoing: &Shift,
    incoming: &Shift,
    scale: f64,
) -> Section {
    let min_rest = ctx.config().min_rest_hours;
    let mut section = Section::new(&resident.id, &outgoing.id, WINDOW_HOURS);

    let scenario: Vec<(&Shift, f64)> = ctx
        .shifts_for(&resident.id)
        .iter()
        .filter(|s| s.id != outgoing.id && !s.shift_type.is_soft())
        .filter_map(|s| {
            let distance = focal_distance(s, outgoing, incoming);
            (distance <= WINDOW_HOURS).then(|| (s, decay_weight(distance)))
        })
        .collect();
    let total_weight: f64 = scenario.iter().map(|(_, w)| w).sum();

    for (neighbor, weight) in scenario {
        let share = weight / total_weight;
        let baseline = share * rest_penalty(outgoing, neighbor, min_rest) * scale;
        let swapped = share * rest_penalty(incoming, neighbor, min_rest) * scale;
        section.push(Call {
            id: neighbor.id.clone(),
            kind: CallKind::Neighbor,
            shift_type: neighbor.shift_type,
            start: neighbor.start,
            end: neighbor.end,
            weight: share,
            baseline,
            swapped,
            delta: swapped - baseline,
            calendar: Some(CalendarContext::of(neighbor)),
            rotation: resident
                .rotation_on(neighbor.start_date())
                .map(|r| r.rotation.clone()),
        });
    }

    section
}

/// Hours from the neighbor's start to the nearer traded call's start.
fn focal_distance(neighbor: &Shift, outgoing: &Shift, incoming: &Shift) -> f64 {
    let to_outgoing = hours_between(outgoing.start, neighbor.start).abs();
    let to_incoming = hours_between(incoming.start, neighbor.start).abs();
    to_outgoing.min(to_incoming)
}

fn decay_weight(distance_hours: f64) -> f64 {
    (1.0 - distance_hours / WINDOW_HOURS).max(WEIGHT_EPSILON)
}

/// Rest penalty in [-1, 0] for holding `focal` next to `neighbor`.
fn rest_penalty(focal: &Shift, neighbor: &Shift, min_rest: f64) -> f64 {
    let gap = focal.window().gap_hours(&neighbor.window());
    let comfortable = (min_rest + COMFORT_MARGIN_HOURS).max(WINDOW_HOURS);
    let normalized = ((gap - min_rest) / (comfortable - min_rest)).clamp(0.0, 1.0);
    -(1.0 - normalized)
}
