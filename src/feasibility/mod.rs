//! Swap feasibility rules.
//!
//! Gates are applied in a fixed order and short-circuit: the first gate
//! that fails determines the [`RejectReason`].
//!
//! 1. Distinct shifts owned by different residents
//! 2. Both residents present in the index
//! 3. Matching tier for tiered calls
//! 4. Matching weekend/holiday status
//! 5. Call-type whitelist
//! 6. Cross eligibility (each resident can take the shift they receive)
//! 7. Sabbath-observance restriction on each incoming shift
//! 8. Vacation days of each receiver
//! 9. Blocking rotations of each receiver
//! 10. Post-swap timeline re-validation (overlap, rest gap)
//!
//! Person-side gates (7-10) check the resident receiving `b` first, then
//! the resident receiving `a`.
//!
//! # Usage
//!
//! ```
//! use u_swap::feasibility::evaluate_pair;
//! use u_swap::models::{Context, Dataset, SwapPair};
//!
//! let context = Context::build(Dataset::default()).unwrap();
//! let result = evaluate_pair(&SwapPair::new("s1", "s2"), &context);
//! assert_eq!(result.reason().map(|r| r.tag()), Some("missing-input"));
//! ```

mod checks;
mod reason;
mod timeline;

pub use reason::{Advisory, RejectReason, ShabbosClause, ViolationCode};

use serde::{Deserialize, Serialize};

use crate::models::{Context, Shift, SwapPair};

/// Verdict on a proposed swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FeasibilityResult {
    /// The swap is legal. Advisories note soft conflicts.
    Accepted { advisories: Vec<Advisory> },
    /// The swap breaks a policy.
    Rejected { reason: RejectReason },
}

impl FeasibilityResult {
    /// Whether the swap is legal.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Rejection reason, if rejected.
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { reason } => Some(reason),
        }
    }

    /// Advisories attached to an accepted swap (empty when rejected).
    pub fn advisories(&self) -> &[Advisory] {
        match self {
            Self::Accepted { advisories } => advisories,
            Self::Rejected { .. } => &[],
        }
    }
}

impl From<Result<Vec<Advisory>, RejectReason>> for FeasibilityResult {
    fn from(result: Result<Vec<Advisory>, RejectReason>) -> Self {
        match result {
            Ok(advisories) => Self::Accepted { advisories },
            Err(reason) => Self::Rejected { reason },
        }
    }
}

/// Evaluates whether the owners of `a` and `b` may exchange them.
///
/// Pure: reads `ctx` only, never mutates it, and never panics or errors on
/// domain conditions.
pub fn evaluate(a: &Shift, b: &Shift, ctx: &Context) -> FeasibilityResult {
    check_swap(a, b, ctx).into()
}

/// Evaluates a pair of shift ids, resolving them through the index.
///
/// Unknown ids yield `missing-input`.
pub fn evaluate_pair(pair: &SwapPair, ctx: &Context) -> FeasibilityResult {
    match ctx.resolve(pair) {
        Some((a, b)) => evaluate(a, b, ctx),
        None => FeasibilityResult::Rejected {
            reason: RejectReason::MissingInput {
                missing: [&pair.a, &pair.b]
                    .into_iter()
                    .filter(|id| ctx.shift(id).is_none())
                    .cloned()
                    .collect(),
            },
        },
    }
}

fn check_swap(a: &Shift, b: &Shift, ctx: &Context) -> Result<Vec<Advisory>, RejectReason> {
    if a.id == b.id {
        return Err(RejectReason::IdenticalShift {
            shift_id: a.id.clone(),
        });
    }
    if a.resident_id == b.resident_id {
        return Err(RejectReason::SameResident {
            resident_id: a.resident_id.clone(),
        });
    }

    let resident_a = ctx
        .resident(&a.resident_id)
        .ok_or_else(|| RejectReason::ResidentMissing {
            resident_id: a.resident_id.clone(),
        })?;
    let resident_b = ctx
        .resident(&b.resident_id)
        .ok_or_else(|| RejectReason::ResidentMissing {
            resident_id: b.resident_id.clone(),
        })?;

    checks::moses_tier(a, b)?;
    checks::weekend_parity(a, b)?;

    let config = ctx.config();
    checks::type_whitelist(a, config)?;
    checks::type_whitelist(b, config)?;

    if !resident_a.is_eligible(b.shift_type) {
        return Err(RejectReason::EligibilityA {
            resident_id: resident_a.id.clone(),
            shift_type: b.shift_type,
        });
    }
    if !resident_b.is_eligible(a.shift_type) {
        return Err(RejectReason::EligibilityB {
            resident_id: resident_b.id.clone(),
            shift_type: a.shift_type,
        });
    }

    checks::shabbos(resident_a, b, ctx)?;
    checks::shabbos(resident_b, a, ctx)?;

    checks::vacation(resident_a, b)?;
    checks::vacation(resident_b, a)?;

    checks::rotation_block(resident_a, b)?;
    checks::rotation_block(resident_b, a)?;

    let mut advisories = timeline::revalidate(
        resident_a,
        ctx.shifts_for(&resident_a.id),
        a,
        b,
        config,
    )?;
    advisories.extend(timeline::revalidate(
        resident_b,
        ctx.shifts_for(&resident_b.id),
        b,
        a,
        config,
    )?);

    Ok(advisories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resident, RotationAssignment, RuleConfig, ShiftType};
    use crate::testing::{all_types_resident, date, dt, roster_strategy, shift, two_resident_context};
    use proptest::prelude::*;

    fn swap(ctx: &Context, a: &str, b: &str) -> FeasibilityResult {
        evaluate_pair(&SwapPair::new(a, b), ctx)
    }

    fn tag(result: &FeasibilityResult) -> Option<&'static str> {
        result.reason().map(RejectReason::tag)
    }

    #[test]
    fn test_plain_weekday_swap_accepted() {
        let ctx = two_resident_context(RuleConfig::default(), vec![]);
        let result = swap(&ctx, "a1", "b1");
        assert!(result.is_accepted(), "{result:?}");
        assert!(result.advisories().is_empty());
    }

    #[test]
    fn test_missing_and_identical() {
        let ctx = two_resident_context(RuleConfig::default(), vec![]);
        match swap(&ctx, "a1", "nope").reason() {
            Some(RejectReason::MissingInput { missing }) => assert_eq!(missing, &vec!["nope".to_string()]),
            other => panic!("expected missing input, got {other:?}"),
        }
        assert_eq!(tag(&swap(&ctx, "a1", "a1")), Some("identical-shift"));
    }

    #[test]
    fn test_same_resident_rejected() {
        let ctx = two_resident_context(
            RuleConfig::default(),
            vec![shift("a2", "ada", ShiftType::Weiler, dt(2025, 3, 20, 8), 12)],
        );
        assert_eq!(tag(&swap(&ctx, "a1", "a2")), Some("same-resident"));
    }

    #[test]
    fn test_resident_missing() {
        let ctx = two_resident_context(
            RuleConfig::default(),
            vec![shift("g1", "ghost", ShiftType::Weiler, dt(2025, 3, 20, 8), 12)],
        );
        match swap(&ctx, "a1", "g1").reason() {
            Some(RejectReason::ResidentMissing { resident_id }) => assert_eq!(resident_id, "ghost"),
            other => panic!("expected resident missing, got {other:?}"),
        }
    }

    #[test]
    fn test_weekend_mismatch() {
        let ctx = two_resident_context(RuleConfig::default(), vec![]);
        // a1 is a Tuesday call, b-sat a Saturday call
        assert_eq!(tag(&swap(&ctx, "a1", "b-sat")), Some("weekend-mismatch"));
    }

    #[test]
    fn test_type_whitelist() {
        let config = RuleConfig::default().with_allowed_types([ShiftType::Ir]);
        let ctx = two_resident_context(config, vec![]);
        assert_eq!(tag(&swap(&ctx, "a1", "b1")), Some("type-whitelist"));
    }

    #[test]
    fn test_cross_eligibility() {
        let shifts = vec![
            shift("a1", "ada", ShiftType::Weiler, dt(2025, 3, 4, 8), 12),
            shift("c1", "cy", ShiftType::Ir, dt(2025, 3, 12, 8), 12),
        ];
        let residents = vec![
            Resident::new("ada").with_eligibility(ShiftType::Weiler),
            all_types_resident("cy"),
        ];
        let ctx = Context::new(RuleConfig::default(), residents, shifts);
        assert_eq!(tag(&swap(&ctx, "a1", "c1")), Some("eligibility-a"));
        assert_eq!(tag(&swap(&ctx, "c1", "a1")), Some("eligibility-b"));
    }

    #[test]
    fn test_vacation_conflict_lists_date() {
        let residents = vec![
            all_types_resident("ada").with_rotation(
                RotationAssignment::new(date(2025, 3, 10), "Body").with_vacation(date(2025, 3, 12)),
            ),
            all_types_resident("ben"),
        ];
        let shifts = vec![
            shift("a1", "ada", ShiftType::Weiler, dt(2025, 3, 4, 8), 12),
            shift("a-sat", "ada", ShiftType::Weiler, dt(2025, 3, 15, 8), 8),
            shift("b1", "ben", ShiftType::Weiler, dt(2025, 3, 12, 8), 12),
        ];
        let ctx = Context::new(RuleConfig::default(), residents, shifts);
        match swap(&ctx, "a1", "b1").reason() {
            Some(RejectReason::VacationConflict {
                resident_id, dates, ..
            }) => {
                assert_eq!(resident_id, "ada");
                assert_eq!(dates, &vec![date(2025, 3, 12)]);
            }
            other => panic!("expected vacation conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_weekday_night_float_refused_to_non_observer() {
        // ben holds no Saturday daytime call, so ben is an observer; ada is not
        let shifts = vec![
            shift("a-nf", "ada", ShiftType::NightFloat, dt(2025, 3, 4, 20), 12),
            shift("a-sat", "ada", ShiftType::Weiler, dt(2025, 3, 15, 8), 8),
            shift("b-nf", "ben", ShiftType::NightFloat, dt(2025, 3, 12, 20), 12),
        ];
        let ctx = Context::new(
            RuleConfig::default(),
            vec![all_types_resident("ada"), all_types_resident("ben")],
            shifts,
        );
        assert!(ctx.is_shabbos_observer("ben"));
        match swap(&ctx, "a-nf", "b-nf").reason() {
            // ada receives b-nf first: non-observer night-float clause
            Some(RejectReason::ShabbosRestriction { clause, .. }) => {
                assert_eq!(*clause, ShabbosClause::NightFloat)
            }
            other => panic!("expected shabbos restriction, got {other:?}"),
        }
    }

    #[test]
    fn test_observer_clauses() {
        let shifts = vec![
            shift("a-fri", "ada", ShiftType::Weiler, dt(2025, 3, 7, 8), 10),
            shift("a-nf", "ada", ShiftType::NightFloat, dt(2025, 3, 4, 20), 12),
            shift("a-sat", "ada", ShiftType::Weiler, dt(2025, 3, 15, 8), 8),
            shift("a-satnf", "ada", ShiftType::NightFloat, dt(2025, 3, 22, 20), 12),
            shift("b-wed", "ben", ShiftType::Weiler, dt(2025, 3, 19, 8), 10),
            shift("b-sun", "ben", ShiftType::Weiler, dt(2025, 3, 30, 8), 10),
        ];
        let ctx = Context::new(
            RuleConfig::default(),
            vec![all_types_resident("ada"), all_types_resident("ben")],
            shifts,
        );
        assert!(ctx.is_shabbos_observer("ben"));

        let clause = |a: &str, b: &str| match swap(&ctx, a, b).reason() {
            Some(RejectReason::ShabbosRestriction { clause, resident_id, .. }) => {
                assert_eq!(resident_id, "ben");
                Some(*clause)
            }
            _ => None,
        };
        assert_eq!(clause("a-fri", "b-wed"), Some(ShabbosClause::ObserverFridayCall));
        assert_eq!(clause("a-sat", "b-sun"), Some(ShabbosClause::ObserverSaturdayCall));
        // Saturday night float is always permitted
        assert_eq!(clause("a-satnf", "b-sun"), None);
        assert!(swap(&ctx, "a-satnf", "b-sun").is_accepted());
    }

    #[test]
    fn test_observer_night_float_clause() {
        let shifts = vec![
            shift("a-nf", "ada", ShiftType::NightFloat, dt(2025, 3, 4, 20), 12),
            shift("a-sat", "ada", ShiftType::Weiler, dt(2025, 3, 15, 8), 8),
            shift("b-wed", "ben", ShiftType::Weiler, dt(2025, 3, 19, 20), 12),
        ];
        let ctx = Context::new(
            RuleConfig::default(),
            vec![all_types_resident("ada"), all_types_resident("ben")],
            shifts,
        );
        match swap(&ctx, "a-nf", "b-wed").reason() {
            Some(RejectReason::ShabbosRestriction {
                resident_id, clause, ..
            }) => {
                assert_eq!(resident_id, "ben");
                assert_eq!(*clause, ShabbosClause::ObserverNightFloat);
            }
            other => panic!("expected observer night-float, got {other:?}"),
        }
    }

    #[test]
    fn test_rotation_block() {
        let residents = vec![
            all_types_resident("ada")
                .with_rotation(RotationAssignment::new(date(2025, 3, 10), "AIRP")),
            all_types_resident("ben"),
        ];
        let ctx = Context::new(
            RuleConfig::default(),
            residents,
            vec![
                shift("a1", "ada", ShiftType::Weiler, dt(2025, 3, 4, 8), 12),
                shift("b1", "ben", ShiftType::Weiler, dt(2025, 3, 12, 8), 12),
            ],
        );
        assert_eq!(tag(&swap(&ctx, "a1", "b1")), Some("rotation-block"));
    }

    #[test]
    fn test_rest_gap_exactly_minimum_accepted() {
        let config = RuleConfig::default().with_min_rest_hours(10.0);
        // ada keeps a call ending Tue 2025-03-11 22:00; b1 starts Wed 08:00 -> 10h gap
        let extra = vec![shift("a2", "ada", ShiftType::Weiler, dt(2025, 3, 11, 10), 12)];
        let ctx = two_resident_context(config.clone(), extra);
        assert!(swap(&ctx, "a1", "b1").is_accepted());

        // One more hour of call leaves a 9h gap
        let extra = vec![shift("a2", "ada", ShiftType::Weiler, dt(2025, 3, 11, 11), 12)];
        let ctx = two_resident_context(config, extra);
        match swap(&ctx, "a1", "b1").reason() {
            Some(RejectReason::RuleViolation { code, .. }) => assert_eq!(*code, ViolationCode::RestWindow),
            other => panic!("expected rest window, got {other:?}"),
        }
    }

    #[test]
    fn test_backup_rest_conflict_accepted_with_advisory() {
        let extra = vec![shift("a-bk", "ada", ShiftType::Backup, dt(2025, 3, 12, 0), 6)];
        let ctx = two_resident_context(RuleConfig::default(), extra);
        let result = swap(&ctx, "a1", "b1");
        assert!(result.is_accepted(), "{result:?}");
        assert_eq!(result.advisories().len(), 1);
        assert_eq!(result.advisories()[0].resident_id, "ada");
    }

    #[test]
    fn test_symmetric_acceptance() {
        let ctx = two_resident_context(RuleConfig::default(), vec![]);
        for (a, b) in [("a1", "b1"), ("a1", "b-sat"), ("a-sat", "b-sat")] {
            assert_eq!(
                swap(&ctx, a, b).is_accepted(),
                swap(&ctx, b, a).is_accepted(),
                "asymmetric verdict for {a}/{b}"
            );
        }
    }

    #[test]
    fn test_distant_shift_does_not_change_verdict() {
        let before = two_resident_context(RuleConfig::default(), vec![]);
        let after = two_resident_context(
            RuleConfig::default(),
            vec![shift("far", "ada", ShiftType::Weiler, dt(2025, 5, 6, 8), 12)],
        );
        assert_eq!(swap(&before, "a1", "b1"), swap(&after, "a1", "b1"));
    }

    #[test]
    fn test_distant_off_whitelist_shift_does_not_change_verdict() {
        let whitelist = || RuleConfig::default().with_allowed_types([ShiftType::Weiler]);
        let before = two_resident_context(whitelist(), vec![]);
        let after = two_resident_context(
            whitelist(),
            vec![shift("far", "ada", ShiftType::Backup, dt(2025, 6, 6, 8), 12)],
        );
        assert!(swap(&before, "a1", "b1").is_accepted());
        assert_eq!(swap(&before, "a1", "b1"), swap(&after, "a1", "b1"));
    }

    #[test]
    fn test_backup_does_not_mask_hard_rest_violation() {
        // ada keeps a2 (Tue 18:00 to Wed 06:00) and would receive b1 (Wed 08:00)
        let base = vec![
            shift("a2", "ada", ShiftType::Weiler, dt(2025, 3, 11, 18), 12),
            shift("a3", "ada", ShiftType::Weiler, dt(2025, 3, 19, 8), 12),
        ];
        let plain = two_resident_context(RuleConfig::default(), base.clone());
        let mut with_backup = base;
        with_backup.push(shift("a-bk", "ada", ShiftType::Backup, dt(2025, 3, 12, 6), 1));
        let masked = two_resident_context(RuleConfig::default(), with_backup);

        assert_eq!(tag(&swap(&plain, "a3", "b1")), Some("rule-violation"));
        assert_eq!(tag(&swap(&masked, "a3", "b1")), Some("rule-violation"));
    }

    proptest! {
        #[test]
        fn prop_verdict_is_symmetric(ctx in roster_strategy()) {
            let ids: Vec<String> = (0..ctx.shift_count()).map(|i| format!("s{i}")).collect();
            for a in &ids {
                for b in &ids {
                    prop_assert_eq!(
                        swap(&ctx, a, b).is_accepted(),
                        swap(&ctx, b, a).is_accepted()
                    );
                }
            }
        }
    }
}
