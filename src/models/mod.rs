//! On-call roster domain models.
//!
//! Immutable value types describing residents, their call shifts, their
//! rotation schedule, and the policy configuration, plus the read-only
//! [`Context`] index every evaluation runs against.
//!
//! # Domain Mappings
//!
//! | u-swap | Roster term |
//! |--------|-------------|
//! | Resident | Person on the call pool |
//! | Shift | Assignment / call block |
//! | RotationAssignment | Weekly clinical rotation |
//! | AcademicYearAssignment | Training class (R1..R4) |
//! | Context | Shared session index |

mod calendar;
mod config;
mod context;
mod pair;
mod resident;
mod rotation;
mod shift;

pub use calendar::{hours_between, is_weekend_day, DateRange, TimeWindow};
pub use config::RuleConfig;
pub use context::{Context, Dataset};
pub use pair::SwapPair;
pub use resident::Resident;
pub use rotation::{
    label_matches_any, AcademicYearAssignment, RotationAssignment, BLOCKING_ROTATION_PATTERNS,
    HIGH_PRIORITY_ROTATION_PATTERNS, JUNIOR_ACADEMIC_LABEL, MRI_COURSE_PATTERNS,
};
pub use shift::{MosesTier, Shift, ShiftType};
