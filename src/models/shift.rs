//! Call shift model.
//!
//! A shift is one scheduled coverage block owned by one resident. Its type is
//! drawn from the closed set of call types the program staffs.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::calendar::{is_weekend_day, DateRange, TimeWindow};

/// Saturday calls starting at or after this hour are evening calls, not daytime.
const SATURDAY_DAYTIME_END_HOUR: u32 = 17;

/// Call type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftType {
    /// Daytime call split into junior and senior tiers.
    #[serde(rename = "MOSES")]
    Moses,
    /// General call.
    #[serde(rename = "WEILER")]
    Weiler,
    /// Interventional consult call.
    #[serde(rename = "IR")]
    Ir,
    /// Overnight night-float coverage.
    #[serde(rename = "NF")]
    NightFloat,
    /// Backup coverage. Conflicts involving backup are advisories, not rejections.
    #[serde(rename = "BACKUP")]
    Backup,
}

impl ShiftType {
    /// All call types.
    pub const ALL: [ShiftType; 5] = [
        ShiftType::Moses,
        ShiftType::Weiler,
        ShiftType::Ir,
        ShiftType::NightFloat,
        ShiftType::Backup,
    ];

    /// Roster tag for this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Moses => "MOSES",
            Self::Weiler => "WEILER",
            Self::Ir => "IR",
            Self::NightFloat => "NF",
            Self::Backup => "BACKUP",
        }
    }

    /// Whether conflicts involving this type are downgraded to advisories.
    #[inline]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::Backup)
    }

    /// Whether this is a consult call that pairs with a senior daytime call.
    #[inline]
    pub const fn is_consult(&self) -> bool {
        matches!(self, Self::Ir)
    }

    /// Whether the type encodes a junior/senior tier in its location.
    #[inline]
    pub const fn is_tiered(&self) -> bool {
        matches!(self, Self::Moses)
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority tier of a tiered call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MosesTier {
    Junior,
    Senior,
}

impl fmt::Display for MosesTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Junior => f.write_str("junior"),
            Self::Senior => f.write_str("senior"),
        }
    }
}

/// A call shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier (within the dataset).
    pub id: String,
    /// Owning resident.
    pub resident_id: String,
    /// Start instant (inclusive).
    pub start: NaiveDateTime,
    /// End instant (exclusive). Must be after `start`.
    pub end: NaiveDateTime,
    /// Call type.
    pub shift_type: ShiftType,
    /// Location label, e.g. "Senior" or "Main Campus".
    #[serde(default)]
    pub location: Option<String>,
    /// Explicit holiday flag.
    #[serde(default)]
    pub holiday: bool,
}

impl Shift {
    /// Creates a new shift.
    pub fn new(
        id: impl Into<String>,
        resident_id: impl Into<String>,
        shift_type: ShiftType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            resident_id: resident_id.into(),
            start,
            end,
            shift_type,
            location: None,
            holiday: false,
        }
    }

    /// Sets the location label.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Marks the shift as a holiday call.
    pub fn with_holiday(mut self, holiday: bool) -> Self {
        self.holiday = holiday;
        self
    }

    /// Time window of the shift.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Calendar date the shift starts on.
    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar days the shift touches.
    pub fn days(&self) -> DateRange {
        self.window().days()
    }

    /// Whether the shift is a weekend or holiday call.
    ///
    /// True when explicitly flagged, or when the first or last day the shift
    /// touches is a Saturday or Sunday. An end at midnight does not touch
    /// the following day.
    pub fn is_weekend_or_holiday(&self) -> bool {
        let days = self.days();
        self.holiday || is_weekend_day(days.first) || is_weekend_day(days.last)
    }

    /// Whether this is night float starting on a Saturday.
    pub fn is_saturday_night_float(&self) -> bool {
        self.shift_type == ShiftType::NightFloat && self.start.weekday() == Weekday::Sat
    }

    /// Whether this is night float starting on any day other than Saturday.
    pub fn is_weekday_night_float(&self) -> bool {
        self.shift_type == ShiftType::NightFloat && self.start.weekday() != Weekday::Sat
    }

    /// Whether this is a Friday call (any non-night-float type starting on Friday).
    pub fn is_friday_call(&self) -> bool {
        self.shift_type != ShiftType::NightFloat && self.start.weekday() == Weekday::Fri
    }

    /// Whether this is a Saturday daytime call.
    ///
    /// A non-night-float, non-backup call starting on Saturday before 17:00.
    pub fn is_saturday_day_call(&self) -> bool {
        !matches!(self.shift_type, ShiftType::NightFloat | ShiftType::Backup)
            && self.start.weekday() == Weekday::Sat
            && self.start.hour() < SATURDAY_DAYTIME_END_HOUR
    }

    /// Seniority tier for tiered call types.
    ///
    /// Read from the words of the location label; `None` for untiered types
    /// or when the label names no tier.
    pub fn tier(&self) -> Option<MosesTier> {
        if !self.shift_type.is_tiered() {
            return None;
        }
        let location = self.location.as_deref()?;
        location
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find_map(|word| match word.to_ascii_uppercase().as_str() {
                "SENIOR" | "SR" => Some(MosesTier::Senior),
                "JUNIOR" | "JR" => Some(MosesTier::Junior),
                _ => None,
            })
    }
}
