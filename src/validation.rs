//! Input validation for roster datasets.
//!
//! Checks structural integrity of residents, shifts, and rotations before
//! the evaluation index is built. Detects:
//! - Duplicate resident and shift IDs
//! - Missing or duplicate eligibilities
//! - Shifts owned by unknown residents, or of a type the owner cannot take
//! - Empty or inverted shift intervals
//! - Rotation weeks not starting on Monday, repeated vacation dates
//! - Academic years not starting on July 1
//! - Invalid policy configuration

use crate::models::Dataset;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A resident has no eligible call types.
    EmptyEligibility,
    /// A resident lists the same call type twice.
    DuplicateEligibility,
    /// A shift references a resident that doesn't exist.
    UnknownResident,
    /// A shift's owner is not eligible for its type.
    IneligibleShift,
    /// A shift ends at or before its start.
    InvalidInterval,
    /// A rotation week does not start on Monday.
    MisalignedWeek,
    /// A rotation lists the same vacation date twice.
    DuplicateVacationDate,
    /// An academic year does not start on July 1.
    MisalignedAcademicYear,
    /// The policy configuration is unusable.
    InvalidConfig,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster dataset.
///
/// Collects every problem rather than stopping at the first one.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_dataset(dataset: &Dataset) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(message) = dataset.config.validate() {
        errors.push(ValidationError::new(ValidationErrorKind::InvalidConfig, message));
    }

    let mut residents = HashMap::new();
    for r in &dataset.residents {
        if residents.insert(r.id.as_str(), r).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resident ID: {}", r.id),
            ));
        }

        if r.eligible_types.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyEligibility,
                format!("Resident '{}' has no eligible call types", r.id),
            ));
        }

        let mut seen_types = HashSet::new();
        for t in &r.eligible_types {
            if !seen_types.insert(t) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateEligibility,
                    format!("Resident '{}' lists call type {t} twice", r.id),
                ));
            }
        }

        for rotation in &r.rotations {
            if !rotation.starts_on_monday() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MisalignedWeek,
                    format!(
                        "Resident '{}' rotation '{}' starts on {} which is not a Monday",
                        r.id, rotation.rotation, rotation.week_start
                    ),
                ));
            }
            let mut seen_dates = HashSet::new();
            for d in &rotation.vacation_dates {
                if !seen_dates.insert(d) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateVacationDate,
                        format!(
                            "Resident '{}' rotation week {} repeats vacation date {d}",
                            r.id, rotation.week_start
                        ),
                    ));
                }
            }
        }

        for year in &r.academic_years {
            if !year.starts_on_july_first() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MisalignedAcademicYear,
                    format!(
                        "Resident '{}' academic year '{}' starts on {} instead of July 1",
                        r.id, year.label, year.year_start
                    ),
                ));
            }
        }
    }

    let mut shift_ids = HashSet::new();
    for s in &dataset.shifts {
        if !shift_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", s.id),
            ));
        }

        if s.end <= s.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("Shift '{}' ends at {} which is not after its start {}", s.id, s.end, s.start),
            ));
        }

        match residents.get(s.resident_id.as_str()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownResident,
                format!("Shift '{}' references unknown resident '{}'", s.id, s.resident_id),
            )),
            Some(owner) if !owner.is_eligible(s.shift_type) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IneligibleShift,
                    format!(
                        "Shift '{}' is {} but resident '{}' is not eligible for it",
                        s.id, s.shift_type, s.resident_id
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AcademicYearAssignment, Resident, RotationAssignment, RuleConfig, ShiftType,
    };
    use crate::testing::{all_types_resident, date, dt, shift};

    fn sample_dataset() -> Dataset {
        Dataset::new(
            RuleConfig::default(),
            vec![
                all_types_resident("ada")
                    .with_rotation(
                        RotationAssignment::new(date(2025, 3, 3), "Body")
                            .with_vacation(date(2025, 3, 5)),
                    )
                    .with_academic_year(AcademicYearAssignment::new(date(2024, 7, 1), "R2")),
                all_types_resident("ben"),
            ],
            vec![
                shift("s1", "ada", ShiftType::Weiler, dt(2025, 3, 4, 8), 12),
                shift("s2", "ben", ShiftType::NightFloat, dt(2025, 3, 5, 20), 12),
            ],
        )
    }

    fn kinds(dataset: &Dataset) -> Vec<ValidationErrorKind> {
        validate_dataset(dataset)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_dataset() {
        assert!(validate_dataset(&sample_dataset()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut ds = sample_dataset();
        ds.residents.push(all_types_resident("ada"));
        ds.shifts.push(shift("s1", "ben", ShiftType::Weiler, dt(2025, 3, 10, 8), 12));

        let errors = validate_dataset(&ds).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("resident")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("shift")));
    }

    #[test]
    fn test_eligibility_problems() {
        let mut ds = sample_dataset();
        ds.residents.push(Resident::new("cy"));
        ds.residents.push(
            Resident::new("dee")
                .with_eligibility(ShiftType::Weiler)
                .with_eligibility(ShiftType::Weiler),
        );
        ds.shifts.push(shift("s3", "dee", ShiftType::NightFloat, dt(2025, 3, 10, 20), 12));

        let k = kinds(&ds);
        assert!(k.contains(&ValidationErrorKind::EmptyEligibility));
        assert!(k.contains(&ValidationErrorKind::DuplicateEligibility));
        assert!(k.contains(&ValidationErrorKind::IneligibleShift));
    }

    #[test]
    fn test_unknown_resident_and_interval() {
        let mut ds = sample_dataset();
        ds.shifts.push(shift("s3", "ghost", ShiftType::Weiler, dt(2025, 3, 10, 8), 12));
        ds.shifts.push(shift("s4", "ada", ShiftType::Weiler, dt(2025, 3, 11, 8), 0));

        let k = kinds(&ds);
        assert!(k.contains(&ValidationErrorKind::UnknownResident));
        assert!(k.contains(&ValidationErrorKind::InvalidInterval));
    }

    #[test]
    fn test_calendar_alignment() {
        let mut ds = sample_dataset();
        ds.residents[1] = all_types_resident("ben")
            .with_rotation(
                RotationAssignment::new(date(2025, 3, 4), "Neuro") // Tuesday
                    .with_vacation(date(2025, 3, 6))
                    .with_vacation(date(2025, 3, 6)),
            )
            .with_academic_year(AcademicYearAssignment::new(date(2024, 9, 1), "R3"));

        let k = kinds(&ds);
        assert!(k.contains(&ValidationErrorKind::MisalignedWeek));
        assert!(k.contains(&ValidationErrorKind::DuplicateVacationDate));
        assert!(k.contains(&ValidationErrorKind::MisalignedAcademicYear));
    }

    #[test]
    fn test_invalid_config() {
        let mut ds = sample_dataset();
        ds.config = RuleConfig::default().with_min_rest_hours(-4.0);
        assert_eq!(kinds(&ds), vec![ValidationErrorKind::InvalidConfig]);
    }

    #[test]
    fn test_multiple_errors() {
        let ds = Dataset::new(
            RuleConfig::default(),
            vec![Resident::new("empty")],
            vec![shift("s1", "ghost", ShiftType::Weiler, dt(2025, 3, 4, 8), 12)],
        );
        let errors = validate_dataset(&ds).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
