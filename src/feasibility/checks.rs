//! Individual swap gates.
//!
//! Each gate returns `Ok(())` to let evaluation continue or the
//! [`RejectReason`] that stops it. Person-side gates take the resident who
//! would *receive* `incoming`.

use super::{RejectReason, ShabbosClause};
use crate::models::{Context, Resident, RuleConfig, Shift};

/// Tiered calls may only be exchanged within the same tier.
///
/// Passes when either tier is unknown.
pub(crate) fn moses_tier(a: &Shift, b: &Shift) -> Result<(), RejectReason> {
    match (a.tier(), b.tier()) {
        (Some(tier_a), Some(tier_b)) if tier_a != tier_b => Err(RejectReason::MosesTierMismatch {
            shift_a: a.id.clone(),
            tier_a,
            shift_b: b.id.clone(),
            tier_b,
        }),
        _ => Ok(()),
    }
}

/// Weekend/holiday calls only trade for weekend/holiday calls.
pub(crate) fn weekend_parity(a: &Shift, b: &Shift) -> Result<(), RejectReason> {
    let weekend_a = a.is_weekend_or_holiday();
    let weekend_b = b.is_weekend_or_holiday();
    if weekend_a == weekend_b {
        return Ok(());
    }
    Err(RejectReason::WeekendMismatch {
        shift_a: a.id.clone(),
        weekend_a,
        shift_b: b.id.clone(),
        weekend_b,
    })
}

pub(crate) fn type_whitelist(shift: &Shift, config: &RuleConfig) -> Result<(), RejectReason> {
    if config.allows(shift.shift_type) {
        return Ok(());
    }
    Err(RejectReason::TypeWhitelist {
        shift_id: shift.id.clone(),
        shift_type: shift.shift_type,
    })
}

/// Sabbath-observance restriction on the incoming shift.
///
/// Night float starting on Saturday night is always allowed. Other night
/// float is refused to everyone; observers additionally refuse Friday calls
/// and Saturday daytime calls.
pub(crate) fn shabbos(
    receiver: &Resident,
    incoming: &Shift,
    ctx: &Context,
) -> Result<(), RejectReason> {
    let clause = if ctx.is_shabbos_observer(&receiver.id) {
        if incoming.is_weekday_night_float() {
            Some(ShabbosClause::ObserverNightFloat)
        } else if incoming.is_friday_call() {
            Some(ShabbosClause::ObserverFridayCall)
        } else if incoming.is_saturday_day_call() {
            Some(ShabbosClause::ObserverSaturdayCall)
        } else {
            None
        }
    } else if incoming.is_weekday_night_float() {
        Some(ShabbosClause::NightFloat)
    } else {
        None
    };

    match clause {
        Some(clause) => Err(RejectReason::ShabbosRestriction {
            resident_id: receiver.id.clone(),
            shift_id: incoming.id.clone(),
            clause,
        }),
        None => Ok(()),
    }
}

/// The incoming shift may not touch any of the receiver's vacation days.
pub(crate) fn vacation(receiver: &Resident, incoming: &Shift) -> Result<(), RejectReason> {
    let vacation_days = receiver.vacation_days();
    if vacation_days.is_empty() {
        return Ok(());
    }
    let dates: Vec<_> = incoming
        .days()
        .iter()
        .filter(|d| vacation_days.contains(d))
        .collect();
    if dates.is_empty() {
        return Ok(());
    }
    Err(RejectReason::VacationConflict {
        resident_id: receiver.id.clone(),
        shift_id: incoming.id.clone(),
        dates,
    })
}

/// The incoming shift may not land inside the reach of a blocking rotation.
///
/// Rotations are checked in roster order; the first one that blocks wins.
pub(crate) fn rotation_block(receiver: &Resident, incoming: &Shift) -> Result<(), RejectReason> {
    let span = incoming.days();
    for rotation in &receiver.rotations {
        let reach = rotation.block_reach();
        let dates = span.intersection(&reach);
        if dates.is_empty() {
            continue;
        }
        let class = receiver.academic_label_on(rotation.week_start);
        if rotation.is_blocking(class) {
            return Err(RejectReason::RotationBlock {
                resident_id: receiver.id.clone(),
                shift_id: incoming.id.clone(),
                rotation: rotation.rotation.clone(),
                week_start: rotation.week_start,
                dates,
            });
        }
    }
    Ok(())
}
