//! Post-swap timeline re-validation.
//!
//! Rebuilds one resident's timeline as it would look after the swap and
//! checks the incoming shift's type and eligibility, then rest and overlap
//! between chronologically adjacent shifts. Consecutive hard calls are
//! compared directly and reject the swap; conflicts touching a soft
//! (backup) call with its neighbors become advisories.

use super::{Advisory, RejectReason, ViolationCode};
use crate::models::{Resident, RuleConfig, Shift};

/// Outcome of a failed timeline check.
#[derive(Debug)]
pub(crate) enum TimelineError {
    /// The swap breaks a policy.
    Rejected(RejectReason),
    /// The timeline itself is malformed.
    Fault(String),
}

impl From<RejectReason> for TimelineError {
    fn from(reason: RejectReason) -> Self {
        Self::Rejected(reason)
    }
}

/// Re-validates `resident`'s timeline after giving away `outgoing` and
/// receiving `incoming`.
///
/// Faults in the timeline surface as `unexpected-error` so one malformed
/// pair never aborts a batch.
pub(crate) fn revalidate(
    resident: &Resident,
    existing: &[Shift],
    outgoing: &Shift,
    incoming: &Shift,
    config: &RuleConfig,
) -> Result<Vec<Advisory>, RejectReason> {
    check_timeline(resident, existing, outgoing, incoming, config).map_err(|e| match e {
        TimelineError::Rejected(reason) => reason,
        TimelineError::Fault(detail) => RejectReason::UnexpectedError { detail },
    })
}

fn check_timeline(
    resident: &Resident,
    existing: &[Shift],
    outgoing: &Shift,
    incoming: &Shift,
    config: &RuleConfig,
) -> Result<Vec<Advisory>, TimelineError> {
    if !config.min_rest_hours.is_finite() {
        return Err(TimelineError::Fault(format!(
            "min_rest_hours is not finite: {}",
            config.min_rest_hours
        )));
    }

    let mut timeline: Vec<&Shift> = existing
        .iter()
        .filter(|s| s.id != outgoing.id)
        .chain(std::iter::once(incoming))
        .collect();
    timeline.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    for shift in &timeline {
        if !shift.window().is_valid() {
            return Err(TimelineError::Fault(format!(
                "shift {} has a non-positive interval ({} to {})",
                shift.id, shift.start, shift.end
            )));
        }
    }

    // Held shifts are not re-checked for type or eligibility.
    if !config.allows(incoming.shift_type) {
        return Err(violation(
            resident,
            ViolationCode::TypeWhitelist,
            vec![incoming.id.clone()],
            format!("{} is a {} call outside the whitelist", incoming.id, incoming.shift_type),
        ));
    }
    if !resident.is_eligible(incoming.shift_type) {
        return Err(violation(
            resident,
            ViolationCode::Eligibility,
            vec![incoming.id.clone()],
            format!("{} is a {} call", incoming.id, incoming.shift_type),
        ));
    }

    // Hard calls are walked on their own so a soft call between two of
    // them cannot hide their conflict.
    let hard: Vec<&Shift> = timeline
        .iter()
        .copied()
        .filter(|s| !s.shift_type.is_soft())
        .collect();
    for pair in hard.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if let Some(conflict) = Conflict::between(prev, next, config) {
            return Err(violation(
                resident,
                conflict.code,
                vec![prev.id.clone(), next.id.clone()],
                conflict.detail,
            ));
        }
    }

    let mut advisories = Vec::new();
    for pair in timeline.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if !prev.shift_type.is_soft() && !next.shift_type.is_soft() {
            continue;
        }
        if let Some(conflict) = Conflict::between(prev, next, config) {
            advisories.push(Advisory {
                code: conflict.code,
                message: conflict.detail,
                resident_id: resident.id.clone(),
                shift_ids: vec![prev.id.clone(), next.id.clone()],
                gap_hours: conflict.gap_hours,
                required_hours: config.min_rest_hours,
            });
        }
    }

    Ok(advisories)
}

/// Overlap or short rest between two chronologically ordered shifts.
struct Conflict {
    code: ViolationCode,
    gap_hours: f64,
    detail: String,
}

impl Conflict {
    fn between(prev: &Shift, next: &Shift, config: &RuleConfig) -> Option<Self> {
        let gap_hours = prev.window().gap_hours(&next.window());
        if prev.window().overlaps(&next.window()) {
            Some(Self {
                code: ViolationCode::Overlap,
                gap_hours,
                detail: format!("{} overlaps {}", prev.id, next.id),
            })
        } else if gap_hours < config.min_rest_hours {
            Some(Self {
                code: ViolationCode::RestWindow,
                gap_hours,
                detail: format!(
                    "{gap_hours:.1}h between {} and {} (minimum {:.1}h)",
                    prev.id, next.id, config.min_rest_hours
                ),
            })
        } else {
            None
        }
    }
}

fn violation(
    resident: &Resident,
    code: ViolationCode,
    shift_ids: Vec<String>,
    detail: String,
) -> TimelineError {
    RejectReason::RuleViolation {
        resident_id: resident.id.clone(),
        code,
        shift_ids,
        detail,
    }
    .into()
}
