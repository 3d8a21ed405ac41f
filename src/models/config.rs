//! Swap policy configuration.

use serde::{Deserialize, Serialize};

use super::ShiftType;

/// Policy knobs shared by the feasibility rules and the pressure model.
///
/// # Defaults
///
/// ```
/// use u_swap::models::RuleConfig;
///
/// let config = RuleConfig::default();
/// assert_eq!(config.min_rest_hours, 8.0);
/// assert!(config.allowed_types.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Minimum idle hours between two shifts of one resident.
    ///
    /// A gap of exactly this many hours is allowed.
    pub min_rest_hours: f64,

    /// Call types that may be swapped. Empty = no restriction.
    #[serde(default)]
    pub allowed_types: Vec<ShiftType>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_rest_hours: 8.0,
            allowed_types: Vec::new(),
        }
    }
}

impl RuleConfig {
    /// Sets the minimum rest gap.
    pub fn with_min_rest_hours(mut self, hours: f64) -> Self {
        self.min_rest_hours = hours;
        self
    }

    /// Restricts swaps to the given call types.
    pub fn with_allowed_types(mut self, types: impl IntoIterator<Item = ShiftType>) -> Self {
        self.allowed_types = types.into_iter().collect();
        self
    }

    /// Whether a call type passes the whitelist.
    pub fn allows(&self, shift_type: ShiftType) -> bool {
        self.allowed_types.is_empty() || self.allowed_types.contains(&shift_type)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_rest_hours.is_finite() {
            return Err("min_rest_hours must be finite".into());
        }
        if self.min_rest_hours < 0.0 {
            return Err("min_rest_hours must be non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist() {
        let open = RuleConfig::default();
        assert!(open.allows(ShiftType::NightFloat));

        let restricted = RuleConfig::default().with_allowed_types([ShiftType::Weiler]);
        assert!(restricted.allows(ShiftType::Weiler));
        assert!(!restricted.allows(ShiftType::NightFloat));
    }

    #[test]
    fn test_validate() {
        assert!(RuleConfig::default().validate().is_ok());
        assert!(RuleConfig::default().with_min_rest_hours(-1.0).validate().is_err());
        assert!(RuleConfig::default()
            .with_min_rest_hours(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_without_whitelist() {
        let config: RuleConfig = serde_json::from_str(r#"{"min_rest_hours": 10}"#).unwrap();
        assert_eq!(config.min_rest_hours, 10.0);
        assert!(config.allowed_types.is_empty());
    }
}
