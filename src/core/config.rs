//! Engine configuration with documented defaults
//!
//! These are the tuning values the engine falls back on when a loadout
//! configuration leaves something unspecified. They can be loaded from TOML
//! or left at their defaults.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::QualityTier;
use crate::core::error::{LoadoutError, Result};
use crate::core::types::{EntityKindId, FloatRange};

/// Default budget ranges for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindBudget {
    /// Ceiling range sampled for the weapon pass
    pub weapons: FloatRange,
    /// Ceiling range sampled for the worn/carried pass
    pub apparel: FloatRange,
}

/// Configuration for the loadout engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Budget used for both passes when neither the loadout nor
    /// `kind_budgets` provides one.
    pub default_budget: FloatRange,

    /// Per entity kind budget defaults.
    ///
    /// Overridden entirely by a loadout's own budget range.
    pub kind_budgets: AHashMap<EntityKindId, KindBudget>,

    /// Quality tier assigned when no override applies.
    ///
    /// Only used for items that have a quality dimension at all.
    pub default_quality: QualityTier,

    /// Upper bound for the weapon ownership-bind roll.
    ///
    /// A loadout asking for a bind chance above this is clamped.
    pub max_bind_chance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_budget: FloatRange::new(200.0, 600.0),
            kind_budgets: AHashMap::new(),
            default_quality: QualityTier::Normal,
            max_bind_chance: 1.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Budget range for the weapon pass of an entity kind
    pub fn weapon_budget(&self, kind: &EntityKindId) -> FloatRange {
        self.kind_budgets
            .get(kind)
            .map(|b| b.weapons)
            .unwrap_or(self.default_budget)
    }

    /// Budget range for the apparel pass of an entity kind
    pub fn apparel_budget(&self, kind: &EntityKindId) -> FloatRange {
        self.kind_budgets
            .get(kind)
            .map(|b| b.apparel)
            .unwrap_or(self.default_budget)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_bind_chance) {
            return Err(LoadoutError::InvalidConfig(format!(
                "max_bind_chance ({}) must be within 0.0..=1.0",
                self.max_bind_chance
            )));
        }

        if self.default_budget.max < 0.0 {
            return Err(LoadoutError::InvalidConfig(format!(
                "default_budget max ({}) must not be negative",
                self.default_budget.max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_kind_budgets() {
        let toml = r#"
            default_quality = "Good"
            max_bind_chance = 0.5

            [default_budget]
            min = 100.0
            max = 300.0

            [kind_budgets.raider.weapons]
            min = 50.0
            max = 150.0

            [kind_budgets.raider.apparel]
            min = 400.0
            max = 800.0
        "#;

        let config = EngineConfig::from_toml_str(toml).unwrap();
        let raider = EntityKindId::new("raider");

        assert_eq!(config.default_quality, QualityTier::Good);
        assert_eq!(config.weapon_budget(&raider), FloatRange::new(50.0, 150.0));
        assert_eq!(config.apparel_budget(&raider), FloatRange::new(400.0, 800.0));
        assert_eq!(
            config.weapon_budget(&EntityKindId::new("trader")),
            FloatRange::new(100.0, 300.0)
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EngineConfig::from_toml_str("max_bind_chance = 0.25").unwrap();
        assert_eq!(config.default_quality, QualityTier::Normal);
        assert_eq!(config.max_bind_chance, 0.25);
    }

    #[test]
    fn test_bind_chance_out_of_range_rejected() {
        let result = EngineConfig::from_toml_str("max_bind_chance = 3.0");
        assert!(matches!(result, Err(LoadoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = EngineConfig::from_toml_str("default_budget = [");
        assert!(matches!(result, Err(LoadoutError::ParseError(_))));
    }
}
