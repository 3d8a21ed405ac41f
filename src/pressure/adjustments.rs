//! Score multipliers and fixed adjustments.

use super::breakdown::{Call, CallKind, Section};
use crate::models::{Context, MosesTier, Resident, Shift};

/// Per-side penalty for breaking a senior/consult pairing on one side only.
pub const CONSULT_PAIRING_PENALTY: f64 = 25.0;

/// Relief for giving away, or burden for receiving, a call during a busy rotation.
pub const ROTATION_PRESSURE: f64 = 100.0;

/// Weight of a traded shift.
///
/// 1 normally; 2 for a weekend/holiday call or a weekday night float; 4
/// for both at once. Backup is always 1.
pub fn shift_multiplier(shift: &Shift) -> f64 {
    if shift.shift_type.is_soft() {
        return 1.0;
    }
    match (shift.is_weekend_or_holiday(), shift.is_weekday_night_float()) {
        (true, true) => 4.0,
        (true, false) | (false, true) => 2.0,
        (false, false) => 1.0,
    }
}

/// Whether the resident holds a consult call on the same day as `shift`.
fn has_paired_consult(ctx: &Context, resident_id: &str, shift: &Shift) -> bool {
    ctx.shifts_for(resident_id).iter().any(|s| {
        s.id != shift.id && s.shift_type.is_consult() && s.start_date() == shift.start_date()
    })
}

/// Penalizes swapping two senior tiered calls when exactly one of the two
/// residents has a same-day consult paired with theirs.
///
/// The penalty is split evenly across both sections.
pub(crate) fn consult_pairing(
    ctx: &Context,
    a: &Shift,
    b: &Shift,
    original: &mut Section,
    counterpart: &mut Section,
) {
    if a.tier() != Some(MosesTier::Senior) || b.tier() != Some(MosesTier::Senior) {
        return;
    }
    let paired_a = has_paired_consult(ctx, &a.resident_id, a);
    let paired_b = has_paired_consult(ctx, &b.resident_id, b);
    if paired_a == paired_b {
        return;
    }
    original.push(Call::adjustment(
        format!("penalty:consult-pairing:{}", a.id),
        CallKind::Penalty,
        a,
        -CONSULT_PAIRING_PENALTY,
    ));
    counterpart.push(Call::adjustment(
        format!("penalty:consult-pairing:{}", b.id),
        CallKind::Penalty,
        b,
        -CONSULT_PAIRING_PENALTY,
    ));
}

/// Adds rotation relief for the outgoing call and rotation burden for the
/// incoming call, based on the rotation in effect on each call's date.
pub(crate) fn rotation_pressure(
    resident: &Resident,
    outgoing: &Shift,
    incoming: &Shift,
    section: &mut Section,
) {
    if let Some(rotation) = resident
        .rotation_on(outgoing.start_date())
        .filter(|r| r.is_high_priority())
    {
        section.push(
            Call::adjustment(
                format!("bonus:rotation:{}", outgoing.id),
                CallKind::Bonus,
                outgoing,
                ROTATION_PRESSURE,
            )
            .with_rotation(Some(rotation.rotation.clone())),
        );
    }
    if let Some(rotation) = resident
        .rotation_on(incoming.start_date())
        .filter(|r| r.is_high_priority())
    {
        section.push(
            Call::adjustment(
                format!("penalty:rotation:{}", incoming.id),
                CallKind::Penalty,
                incoming,
                -ROTATION_PRESSURE,
            )
            .with_rotation(Some(rotation.rotation.clone())),
        );
    }
}
