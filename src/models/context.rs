//! Read-only evaluation index.
//!
//! A [`Context`] is built once per evaluation session from a [`Dataset`] and
//! shared by every rule, score, and worker for the lifetime of that session.
//! Nothing in the crate mutates it after construction.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Resident, RuleConfig, Shift, SwapPair};
use crate::validation::validate_dataset;
use crate::SwapError;

/// Raw roster input, as handed over by the ingestion layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Policy configuration.
    #[serde(default)]
    pub config: RuleConfig,
    /// All residents.
    pub residents: Vec<Resident>,
    /// All call shifts.
    pub shifts: Vec<Shift>,
}

impl Dataset {
    /// Creates a dataset.
    pub fn new(config: RuleConfig, residents: Vec<Resident>, shifts: Vec<Shift>) -> Self {
        Self {
            config,
            residents,
            shifts,
        }
    }
}

/// Shared evaluation index.
///
/// Holds residents by id, each resident's shifts sorted by start time, a
/// shift-id locator, and the derived set of Sabbath observers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    config: RuleConfig,
    residents: HashMap<String, Resident>,
    shifts_by_resident: HashMap<String, Vec<Shift>>,
    /// shift id → (resident id, position in that resident's sorted shifts)
    shift_locator: HashMap<String, (String, usize)>,
    shabbos_observers: HashSet<String>,
}

impl Context {
    /// Validates a dataset and indexes it.
    ///
    /// # Errors
    /// [`SwapError::InvalidDataset`] listing every integrity problem found.
    pub fn build(dataset: Dataset) -> Result<Self, SwapError> {
        validate_dataset(&dataset).map_err(SwapError::InvalidDataset)?;
        Ok(Self::new(dataset.config, dataset.residents, dataset.shifts))
    }

    /// Indexes residents and shifts without validating them.
    ///
    /// For callers whose ingestion layer has already validated the roster.
    pub fn new(config: RuleConfig, residents: Vec<Resident>, shifts: Vec<Shift>) -> Self {
        let mut shifts_by_resident: HashMap<String, Vec<Shift>> = HashMap::new();
        for shift in shifts {
            shifts_by_resident
                .entry(shift.resident_id.clone())
                .or_default()
                .push(shift);
        }

        let mut shift_locator = HashMap::new();
        for (resident_id, list) in &mut shifts_by_resident {
            list.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
            for (pos, shift) in list.iter().enumerate() {
                shift_locator.insert(shift.id.clone(), (resident_id.clone(), pos));
            }
        }

        let residents: HashMap<String, Resident> =
            residents.into_iter().map(|r| (r.id.clone(), r)).collect();

        // Observance follows the standing schedule, never a hypothetical swap.
        let shabbos_observers = residents
            .keys()
            .filter(|id| {
                !shifts_by_resident
                    .get(id.as_str())
                    .is_some_and(|list| list.iter().any(Shift::is_saturday_day_call))
            })
            .cloned()
            .collect();

        Self {
            config,
            residents,
            shifts_by_resident,
            shift_locator,
            shabbos_observers,
        }
    }

    /// Policy configuration.
    #[inline]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Looks up a resident.
    pub fn resident(&self, id: &str) -> Option<&Resident> {
        self.residents.get(id)
    }

    /// All residents, in no particular order.
    pub fn residents(&self) -> impl Iterator<Item = &Resident> {
        self.residents.values()
    }

    /// A resident's shifts, sorted ascending by start (ties by id).
    pub fn shifts_for(&self, resident_id: &str) -> &[Shift] {
        self.shifts_by_resident
            .get(resident_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a shift by id.
    pub fn shift(&self, id: &str) -> Option<&Shift> {
        let (resident_id, pos) = self.shift_locator.get(id)?;
        self.shifts_by_resident.get(resident_id)?.get(*pos)
    }

    /// Resolves both shifts of a pair.
    pub fn resolve(&self, pair: &SwapPair) -> Option<(&Shift, &Shift)> {
        Some((self.shift(&pair.a)?, self.shift(&pair.b)?))
    }

    /// Total number of indexed shifts.
    pub fn shift_count(&self) -> usize {
        self.shift_locator.len()
    }

    /// Whether a resident is classified as a Sabbath observer.
    ///
    /// Observers are residents whose standing schedule holds no Saturday
    /// daytime call.
    pub fn is_shabbos_observer(&self, resident_id: &str) -> bool {
        self.shabbos_observers.contains(resident_id)
    }

    /// Serializes the index into an immutable snapshot for worker hand-off.
    ///
    /// # Errors
    /// [`SwapError::Snapshot`] if encoding fails.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, SwapError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Restores a private copy of an index from a snapshot.
    ///
    /// # Errors
    /// [`SwapError::Snapshot`] if the bytes are not a valid snapshot.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, SwapError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
