//! Rotation and academic-year assignments.
//!
//! Residents rotate through clinical services week by week. Some rotations
//! (leave, research, board review courses) make a resident unavailable for
//! call during the rotation week and the weekends on either side of it;
//! others are busy enough that picking up call during them is a burden.
//!
//! Rotation labels are matched as upper-cased word sequences, so `"Vac"`
//! matches `VAC` but `"Vacuum Lab"` does not.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::calendar::DateRange;

/// Rotations that block call for their whole reach.
pub const BLOCKING_ROTATION_PATTERNS: &[&str] = &[
    "VACATION",
    "VAC",
    "LEAVE",
    "PTO",
    "RESEARCH",
    "AIRP",
    "CORE REVIEW",
    "BOARD REVIEW",
    "BOARDS",
    "ABR",
    "CONFERENCE",
];

/// MRI course rotations; these block call only for the most junior class.
pub const MRI_COURSE_PATTERNS: &[&str] = &["MRI COURSE", "MR COURSE"];

/// Rotations busy enough that call during them is a burden.
pub const HIGH_PRIORITY_ROTATION_PATTERNS: &[&str] = &[
    "NIGHT FLOAT",
    "NF",
    "ER",
    "EMERGENCY",
    "IR",
    "INTERVENTIONAL",
];

/// Academic-year label of the most junior tracked class.
pub const JUNIOR_ACADEMIC_LABEL: &str = "R1";

/// Days of block reach before the rotation week start (the prior weekend).
const BLOCK_LEAD_DAYS: i64 = 2;
/// Days of block reach after the rotation week end (the following weekend).
const BLOCK_TRAIL_DAYS: i64 = 2;
/// The rotation work week runs Monday through Friday.
const WORK_WEEK_DAYS: i64 = 5;

/// A weekly rotation assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationAssignment {
    /// Monday the rotation week starts on.
    pub week_start: NaiveDate,
    /// Canonical rotation label.
    pub rotation: String,
    /// Label as it appeared on the source roster (may embed vacation ranges).
    pub raw_rotation: String,
    /// Vacation days recorded against this rotation week.
    #[serde(default)]
    pub vacation_dates: Vec<NaiveDate>,
}

impl RotationAssignment {
    /// Creates a rotation assignment whose raw label equals the canonical one.
    pub fn new(week_start: NaiveDate, rotation: impl Into<String>) -> Self {
        let rotation = rotation.into();
        Self {
            week_start,
            raw_rotation: rotation.clone(),
            rotation,
            vacation_dates: Vec::new(),
        }
    }

    /// Sets the raw roster label.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw_rotation = raw.into();
        self
    }

    /// Adds a vacation day.
    pub fn with_vacation(mut self, date: NaiveDate) -> Self {
        self.vacation_dates.push(date);
        self
    }

    /// Whether `week_start` is a Monday.
    pub fn starts_on_monday(&self) -> bool {
        self.week_start.weekday() == Weekday::Mon
    }

    /// Friday closing the rotation work week.
    pub fn week_end(&self) -> NaiveDate {
        self.week_start + Duration::days(WORK_WEEK_DAYS - 1)
    }

    /// Whether a date falls within the rotation's calendar week (Monday to Sunday).
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date < self.week_start + Duration::days(7)
    }

    /// Dates a blocking rotation keeps clear of call.
    ///
    /// Runs from the Saturday before the week through the Sunday after it.
    pub fn block_reach(&self) -> DateRange {
        DateRange::new(
            self.week_start - Duration::days(BLOCK_LEAD_DAYS),
            self.week_end() + Duration::days(BLOCK_TRAIL_DAYS),
        )
    }

    /// Whether the canonical or raw label matches any pattern.
    pub fn matches_any(&self, patterns: &[&str]) -> bool {
        label_matches_any(&self.rotation, patterns) || label_matches_any(&self.raw_rotation, patterns)
    }

    /// Whether this rotation blocks call for a resident of the given class.
    pub fn is_blocking(&self, academic_label: Option<&str>) -> bool {
        if self.matches_any(BLOCKING_ROTATION_PATTERNS) {
            return true;
        }
        self.matches_any(MRI_COURSE_PATTERNS) && academic_label == Some(JUNIOR_ACADEMIC_LABEL)
    }

    /// Whether call during this rotation is a burden.
    pub fn is_high_priority(&self) -> bool {
        self.matches_any(HIGH_PRIORITY_ROTATION_PATTERNS)
    }
}

/// An academic-year class assignment (e.g. "R2" for 2024-25).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicYearAssignment {
    /// July 1 the academic year starts on.
    pub year_start: NaiveDate,
    /// Class label.
    pub label: String,
}

impl AcademicYearAssignment {
    /// Creates an academic-year assignment.
    pub fn new(year_start: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            year_start,
            label: label.into(),
        }
    }

    /// Whether `year_start` is July 1.
    pub fn starts_on_july_first(&self) -> bool {
        self.year_start.month() == 7 && self.year_start.day() == 1
    }

    /// Whether a date falls within this academic year.
    pub fn covers(&self, date: NaiveDate) -> bool {
        if date < self.year_start {
            return false;
        }
        match self.year_start.checked_add_months(Months::new(12)) {
            Some(next_year) => date < next_year,
            None => true,
        }
    }
}

/// Upper-cased alphanumeric words of a label.
fn label_words(label: &str) -> Vec<String> {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_uppercase())
        .collect()
}

/// Whether the label contains any pattern as a contiguous word sequence.
pub fn label_matches_any(label: &str, patterns: &[&str]) -> bool {
    let words = label_words(label);
    patterns.iter().any(|pattern| {
        let needle: Vec<&str> = pattern.split_whitespace().collect();
        !needle.is_empty()
            && words
                .windows(needle.len())
                .any(|window| window.iter().zip(&needle).all(|(w, n)| w == n))
    })
}
