//! Rejection reasons and advisories.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{MosesTier, ShiftType};

/// Sub-code of a timeline violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    /// Two shifts overlap in time.
    Overlap,
    /// Two shifts leave less than the minimum rest gap.
    RestWindow,
    /// A resident would hold a call type they are not eligible for.
    Eligibility,
    /// A resident would hold a call type outside the whitelist.
    TypeWhitelist,
}

impl ViolationCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overlap => "OVERLAP",
            Self::RestWindow => "REST_WINDOW",
            Self::Eligibility => "ELIGIBILITY",
            Self::TypeWhitelist => "TYPE_WHITELIST",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which Sabbath-observance clause rejected a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShabbosClause {
    /// Observer would receive night float starting on a day other than Saturday.
    ObserverNightFloat,
    /// Observer would receive a Friday call.
    ObserverFridayCall,
    /// Observer would receive a Saturday daytime call.
    ObserverSaturdayCall,
    /// Non-observer would receive night float starting on a day other than Saturday.
    NightFloat,
}

impl ShabbosClause {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ObserverNightFloat => "observer-night-float",
            Self::ObserverFridayCall => "observer-friday-call",
            Self::ObserverSaturdayCall => "observer-saturday-call",
            Self::NightFloat => "night-float",
        }
    }
}

impl fmt::Display for ShabbosClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a swap was rejected.
///
/// Each variant carries exactly the data needed to explain the rejection
/// without re-deriving it. [`RejectReason::tag`] gives the stable tag used
/// in diagnostics histograms.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum RejectReason {
    #[error("shift(s) not found: {}", .missing.join(", "))]
    MissingInput { missing: Vec<String> },

    #[error("shift {shift_id} cannot be swapped with itself")]
    IdenticalShift { shift_id: String },

    #[error("both shifts belong to resident {resident_id}")]
    SameResident { resident_id: String },

    #[error("resident {resident_id} is not in the roster")]
    ResidentMissing { resident_id: String },

    #[error("{shift_a} is a {tier_a} call but {shift_b} is a {tier_b} call")]
    MosesTierMismatch {
        shift_a: String,
        tier_a: MosesTier,
        shift_b: String,
        tier_b: MosesTier,
    },

    #[error("{shift_a} weekend/holiday={weekend_a} but {shift_b} weekend/holiday={weekend_b}")]
    WeekendMismatch {
        shift_a: String,
        weekend_a: bool,
        shift_b: String,
        weekend_b: bool,
    },

    #[error("{shift_type} shift {shift_id} is not a swappable call type")]
    TypeWhitelist {
        shift_id: String,
        shift_type: ShiftType,
    },

    #[error("resident {resident_id} is not eligible for {shift_type} call")]
    EligibilityA {
        resident_id: String,
        shift_type: ShiftType,
    },

    #[error("resident {resident_id} is not eligible for {shift_type} call")]
    EligibilityB {
        resident_id: String,
        shift_type: ShiftType,
    },

    #[error("{code} for resident {resident_id}: {detail}")]
    RuleViolation {
        resident_id: String,
        code: ViolationCode,
        shift_ids: Vec<String>,
        detail: String,
    },

    #[error("resident {resident_id} is on vacation on {}", join_dates(.dates))]
    VacationConflict {
        resident_id: String,
        shift_id: String,
        dates: Vec<NaiveDate>,
    },

    #[error(
        "resident {resident_id} is on {rotation} (week of {week_start}), blocked on {}",
        join_dates(.dates)
    )]
    RotationBlock {
        resident_id: String,
        shift_id: String,
        rotation: String,
        week_start: NaiveDate,
        dates: Vec<NaiveDate>,
    },

    #[error("resident {resident_id} cannot take shift {shift_id} ({clause})")]
    ShabbosRestriction {
        resident_id: String,
        shift_id: String,
        clause: ShabbosClause,
    },

    #[error("unexpected error: {detail}")]
    UnexpectedError { detail: String },
}

impl RejectReason {
    /// Stable tag for histograms and logs.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing-input",
            Self::IdenticalShift { .. } => "identical-shift",
            Self::SameResident { .. } => "same-resident",
            Self::ResidentMissing { .. } => "resident-missing",
            Self::MosesTierMismatch { .. } => "moses-tier-mismatch",
            Self::WeekendMismatch { .. } => "weekend-mismatch",
            Self::TypeWhitelist { .. } => "type-whitelist",
            Self::EligibilityA { .. } => "eligibility-a",
            Self::EligibilityB { .. } => "eligibility-b",
            Self::RuleViolation { .. } => "rule-violation",
            Self::VacationConflict { .. } => "vacation-conflict",
            Self::RotationBlock { .. } => "rotation-block",
            Self::ShabbosRestriction { .. } => "shabbos-restriction",
            Self::UnexpectedError { .. } => "unexpected-error",
        }
    }
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(NaiveDate::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A non-blocking note on an accepted swap.
///
/// Raised when a timeline violation only involves a soft (backup) call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    /// Violation the advisory downgrades.
    pub code: ViolationCode,
    /// Human-readable description.
    pub message: String,
    /// Resident whose post-swap timeline raised it.
    pub resident_id: String,
    /// The two shifts involved, in chronological order.
    pub shift_ids: Vec<String>,
    /// Idle hours between the two shifts (0 when overlapping).
    pub gap_hours: f64,
    /// Configured minimum rest hours.
    pub required_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    #[test]
    fn test_tags_match_serde_names() {
        let reasons = vec![
            RejectReason::SameResident {
                resident_id: "ada".into(),
            },
            RejectReason::EligibilityB {
                resident_id: "ben".into(),
                shift_type: ShiftType::NightFloat,
            },
            RejectReason::ShabbosRestriction {
                resident_id: "ada".into(),
                shift_id: "s1".into(),
                clause: ShabbosClause::ObserverNightFloat,
            },
        ];
        for reason in reasons {
            let json = serde_json::to_value(&reason).unwrap();
            assert_eq!(json["reason"], reason.tag());
        }
    }

    #[test]
    fn test_messages_render_structured_fields() {
        let reason = RejectReason::VacationConflict {
            resident_id: "ada".into(),
            shift_id: "s1".into(),
            dates: vec![date(2025, 3, 4), date(2025, 3, 5)],
        };
        assert_eq!(
            reason.to_string(),
            "resident ada is on vacation on 2025-03-04, 2025-03-05"
        );

        let violation = RejectReason::RuleViolation {
            resident_id: "ben".into(),
            code: ViolationCode::RestWindow,
            shift_ids: vec!["a".into(), "b".into()],
            detail: "6.0h between a and b".into(),
        };
        assert!(violation.to_string().starts_with("REST_WINDOW for resident ben"));
    }

    #[test]
    fn test_reason_round_trips() {
        let reason = RejectReason::RotationBlock {
            resident_id: "ada".into(),
            shift_id: "s1".into(),
            rotation: "Research".into(),
            week_start: date(2025, 3, 3),
            dates: vec![date(2025, 3, 8)],
        };
        let json = serde_json::to_string(&reason).unwrap();
        let back: RejectReason = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reason);
    }
}
