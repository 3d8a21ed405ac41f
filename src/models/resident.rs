//! Resident model.
//!
//! A resident owns call shifts, holds eligibilities for call types, and
//! carries their weekly rotation schedule and academic-year classes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{AcademicYearAssignment, RotationAssignment, ShiftType};

/// A resident on the call roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    /// Unique resident identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Call types this resident may take.
    pub eligible_types: Vec<ShiftType>,
    /// Weekly rotations, ordered by week start.
    #[serde(default)]
    pub rotations: Vec<RotationAssignment>,
    /// Academic-year classes, ordered by year start.
    #[serde(default)]
    pub academic_years: Vec<AcademicYearAssignment>,
}

impl Resident {
    /// Creates a resident with no eligibilities.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            eligible_types: Vec::new(),
            rotations: Vec::new(),
            academic_years: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an eligible call type.
    pub fn with_eligibility(mut self, shift_type: ShiftType) -> Self {
        self.eligible_types.push(shift_type);
        self
    }

    /// Adds several eligible call types.
    pub fn with_eligibilities(mut self, types: impl IntoIterator<Item = ShiftType>) -> Self {
        self.eligible_types.extend(types);
        self
    }

    /// Adds a rotation assignment.
    pub fn with_rotation(mut self, rotation: RotationAssignment) -> Self {
        self.rotations.push(rotation);
        self
    }

    /// Adds an academic-year class.
    pub fn with_academic_year(mut self, year: AcademicYearAssignment) -> Self {
        self.academic_years.push(year);
        self
    }

    /// Whether this resident may take the given call type.
    pub fn is_eligible(&self, shift_type: ShiftType) -> bool {
        self.eligible_types.contains(&shift_type)
    }

    /// Vacation days across all rotations.
    pub fn vacation_days(&self) -> BTreeSet<NaiveDate> {
        self.rotations
            .iter()
            .flat_map(|r| r.vacation_dates.iter().copied())
            .collect()
    }

    /// Rotation in effect on a date.
    ///
    /// When several rotation weeks cover the date, the latest week start wins.
    pub fn rotation_on(&self, date: NaiveDate) -> Option<&RotationAssignment> {
        self.rotations
            .iter()
            .filter(|r| r.covers(date))
            .max_by_key(|r| r.week_start)
    }

    /// Academic-year class label in effect on a date.
    pub fn academic_label_on(&self, date: NaiveDate) -> Option<&str> {
        self.academic_years
            .iter()
            .filter(|y| y.covers(date))
            .max_by_key(|y| y.year_start)
            .map(|y| y.label.as_str())
    }
}
