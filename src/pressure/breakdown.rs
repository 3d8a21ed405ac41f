//! Explainable score breakdown.
//!
//! Every contribution to a score is a [`Call`] entry; section and overall
//! totals are always sums over the visible calls, so a UI can show exactly
//! where a number came from.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{Shift, ShiftType};

/// Origin of a call contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    /// A nearby shift of the resident whose rest gap changes.
    Neighbor,
    /// A fixed relief adjustment.
    Bonus,
    /// A fixed burden adjustment.
    Penalty,
}

/// Calendar facts about a call, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarContext {
    /// Date the call starts on.
    pub date: NaiveDate,
    /// Weekday of `date`.
    pub weekday: Weekday,
    /// Whether the call counts as a weekend/holiday call.
    pub weekend_or_holiday: bool,
    /// Explicit holiday flag of the call.
    pub holiday: bool,
}

impl CalendarContext {
    pub fn of(shift: &Shift) -> Self {
        let date = shift.start_date();
        Self {
            date,
            weekday: date.weekday(),
            weekend_or_holiday: shift.is_weekend_or_holiday(),
            holiday: shift.holiday,
        }
    }
}

/// One contribution to a section's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Shift id for neighbors; a synthetic id for bonuses and penalties.
    pub id: String,
    /// Neighbor, bonus, or penalty.
    pub kind: CallKind,
    /// Type of the underlying shift.
    pub shift_type: ShiftType,
    /// Start of the underlying shift.
    pub start: NaiveDateTime,
    /// End of the underlying shift.
    pub end: NaiveDateTime,
    /// Share of the section's neighbor weight (0 for bonuses and penalties).
    pub weight: f64,
    /// Contribution before the swap.
    pub baseline: f64,
    /// Contribution after the swap.
    pub swapped: f64,
    /// `swapped - baseline`.
    pub delta: f64,
    /// Calendar facts of the underlying shift.
    pub calendar: Option<CalendarContext>,
    /// Rotation the resident is on at the call's date.
    pub rotation: Option<String>,
}

impl Call {
    /// A fixed adjustment attached to a traded shift.
    pub(crate) fn adjustment(id: String, kind: CallKind, shift: &Shift, delta: f64) -> Self {
        Self {
            id,
            kind,
            shift_type: shift.shift_type,
            start: shift.start,
            end: shift.end,
            weight: 0.0,
            baseline: 0.0,
            swapped: delta,
            delta,
            calendar: Some(CalendarContext::of(shift)),
            rotation: None,
        }
    }

    /// Sets the rotation label.
    pub(crate) fn with_rotation(mut self, rotation: Option<String>) -> Self {
        self.rotation = rotation;
        self
    }
}

/// One resident's side of a swap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Resident this section scores.
    pub resident_id: String,
    /// Shift the resident gives away.
    pub focus_shift_id: String,
    /// Neighborhood radius in hours.
    pub window_hours: f64,
    /// Contributions, sorted by |delta| desc, weight desc, id asc.
    pub calls: Vec<Call>,
    /// Sum of call baselines.
    pub baseline_total: f64,
    /// Sum of call swapped values.
    pub swapped_total: f64,
    /// Sum of call deltas.
    pub delta_total: f64,
}

impl Section {
    pub(crate) fn new(resident_id: &str, focus_shift_id: &str, window_hours: f64) -> Self {
        Self {
            resident_id: resident_id.to_string(),
            focus_shift_id: focus_shift_id.to_string(),
            window_hours,
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, call: Call) {
        self.calls.push(call);
    }

    /// Sorts calls and recomputes totals from them.
    pub(crate) fn finalize(&mut self) {
        self.calls.sort_by(|a, b| {
            b.delta
                .abs()
                .total_cmp(&a.delta.abs())
                .then_with(|| b.weight.total_cmp(&a.weight))
                .then_with(|| a.id.cmp(&b.id))
        });
        self.baseline_total = self.calls.iter().map(|c| c.baseline).sum();
        self.swapped_total = self.calls.iter().map(|c| c.swapped).sum();
        self.delta_total = self.calls.iter().map(|c| c.delta).sum();
    }
}

/// Full explanation of a swap score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureBreakdown {
    /// `original.delta_total + counterpart.delta_total`.
    pub score: f64,
    /// Aggregate before the swap.
    pub baseline_total: f64,
    /// Aggregate after the swap.
    pub swapped_total: f64,
    /// Side of the resident giving away shift A.
    pub original: Section,
    /// Side of the resident giving away shift B.
    pub counterpart: Section,
}

impl PressureBreakdown {
    /// The neutral breakdown returned for pairs that cannot be scored.
    pub fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn from_sections(original: Section, counterpart: Section) -> Self {
        Self {
            score: original.delta_total + counterpart.delta_total,
            baseline_total: original.baseline_total + counterpart.baseline_total,
            swapped_total: original.swapped_total + counterpart.swapped_total,
            original,
            counterpart,
        }
    }

    /// Whether this is the neutral breakdown.
    pub fn is_zero(&self) -> bool {
        self.score == 0.0 && self.original.calls.is_empty() && self.counterpart.calls.is_empty()
    }
}
