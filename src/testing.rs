//! Roster fixtures shared by unit tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use crate::models::{Context, Resident, RuleConfig, Shift, ShiftType};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub(crate) fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).expect("valid test time")
}

/// A shift of `hours` length starting at `start`.
pub(crate) fn shift(
    id: &str,
    resident: &str,
    shift_type: ShiftType,
    start: NaiveDateTime,
    hours: i64,
) -> Shift {
    Shift::new(id, resident, shift_type, start, start + Duration::hours(hours))
}

/// A resident eligible for every call type.
pub(crate) fn all_types_resident(id: &str) -> Resident {
    Resident::new(id)
        .with_name(id.to_uppercase())
        .with_eligibilities(ShiftType::ALL)
}

/// Two residents with one weekday call each, far apart in time.
///
/// - `ada` holds `a1` (Tue 2025-03-04 08:00-20:00) and a Saturday daytime
///   call `a-sat` (2025-03-15), which makes `ada` a non-observer.
/// - `ben` holds `b1` (Wed 2025-03-12 08:00-20:00) and a Saturday daytime
///   call `b-sat` (2025-03-22).
///
/// Any other shifts are appended to the base roster.
pub(crate) fn two_resident_context(config: RuleConfig, extra: Vec<Shift>) -> Context {
    let mut shifts = vec![
        shift("a1", "ada", ShiftType::Weiler, dt(2025, 3, 4, 8), 12),
        shift("a-sat", "ada", ShiftType::Weiler, dt(2025, 3, 15, 8), 8),
        shift("b1", "ben", ShiftType::Weiler, dt(2025, 3, 12, 8), 12),
        shift("b-sat", "ben", ShiftType::Weiler, dt(2025, 3, 22, 8), 8),
    ];
    shifts.extend(extra);
    Context::new(
        config,
        vec![all_types_resident("ada"), all_types_resident("ben")],
        shifts,
    )
}

/// Random rosters of three all-type residents with shift ids `s0..sN`.
///
/// Shifts carry no location, holiday flag, or rotation, so no fixed
/// adjustments apply when scoring them.
pub(crate) fn roster_strategy() -> impl Strategy<Value = Context> {
    let entry = (
        0i64..28,
        prop::sample::select(vec![0i64, 8, 17, 20]),
        prop::sample::select(vec![6i64, 10, 12, 24]),
        prop::sample::select(ShiftType::ALL.to_vec()),
        0usize..3,
    );
    prop::collection::vec(entry, 2..10).prop_map(|entries| {
        let base = dt(2025, 3, 3, 0);
        let shifts = entries
            .into_iter()
            .enumerate()
            .map(|(i, (day, hour, hours, shift_type, owner))| {
                let start = base + Duration::days(day) + Duration::hours(hour);
                shift(&format!("s{i}"), &format!("r{owner}"), shift_type, start, hours)
            })
            .collect();
        let residents = (0..3).map(|i| all_types_resident(&format!("r{i}"))).collect();
        Context::new(RuleConfig::default(), residents, shifts)
    })
}
