//! Candidate swap pairs.

use serde::{Deserialize, Serialize};

/// Two shifts, by id, proposed for exchange between their owners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwapPair {
    /// Shift given away by its owner.
    pub a: String,
    /// Shift received in exchange.
    pub b: String,
}

impl SwapPair {
    /// Creates a pair.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// The same pair seen from the other owner's side.
    pub fn reversed(&self) -> Self {
        Self {
            a: self.b.clone(),
            b: self.a.clone(),
        }
    }
}
