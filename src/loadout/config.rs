//! Loadout configuration
//!
//! Declarative description of what an entity kind carries, wears and suffers
//! from. Built by the host; the engine only reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::catalog::ItemCategory;
use crate::catalog::{BodyLocation, QualityTier};
use crate::core::types::{
    Color, ConditionId, CountRange, EntityKindId, FloatRange, ItemDefId, MaterialId, StyleId,
};

/// Simple-mode candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearPoolEntry {
    pub item: ItemDefId,
    pub weight: f32,
}

impl GearPoolEntry {
    pub fn new(item: impl Into<ItemDefId>, weight: f32) -> Self {
        Self {
            item: item.into(),
            weight,
        }
    }
}

/// Numbered competition group for [`SelectionMode::FromPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PoolTag {
    One,
    Two,
    Three,
    Four,
}

impl PoolTag {
    /// Resolution order
    pub fn all() -> [PoolTag; 4] {
        [PoolTag::One, PoolTag::Two, PoolTag::Three, PoolTag::Four]
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PoolTag::One),
            2 => Some(PoolTag::Two),
            3 => Some(PoolTag::Three),
            4 => Some(PoolTag::Four),
            _ => None,
        }
    }
}

/// How a specific requirement competes for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Always emitted
    AlwaysTake,
    /// Emitted iff its own chance roll succeeds
    RandomChance,
    /// Competes with the other entries of the same pool; one winner at most
    FromPool(PoolTag),
}

/// Advanced-mode rule for a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificRequirement {
    pub item: ItemDefId,
    pub material: Option<MaterialId>,
    pub style: Option<StyleId>,
    pub quality: Option<QualityTier>,
    /// Always bind to the wearer, regardless of the bind chance
    pub force_bind: bool,
    pub color: Option<Color>,
    pub mode: SelectionMode,
    /// Roll for `RandomChance`; scales pool weight for `FromPool`
    pub chance: f32,
    pub weight: f32,
    /// Stack size
    pub count: CountRange,
}

impl SpecificRequirement {
    pub fn new(item: impl Into<ItemDefId>, mode: SelectionMode) -> Self {
        Self {
            item: item.into(),
            material: None,
            style: None,
            quality: None,
            force_bind: false,
            color: None,
            mode,
            chance: 1.0,
            weight: 1.0,
            count: CountRange::exactly(1),
        }
    }

    pub fn always(item: impl Into<ItemDefId>) -> Self {
        Self::new(item, SelectionMode::AlwaysTake)
    }

    pub fn with_chance(item: impl Into<ItemDefId>, chance: f32) -> Self {
        let mut req = Self::new(item, SelectionMode::RandomChance);
        req.chance = chance;
        req
    }

    pub fn in_pool(item: impl Into<ItemDefId>, pool: PoolTag, weight: f32) -> Self {
        let mut req = Self::new(item, SelectionMode::FromPool(pool));
        req.weight = weight;
        req
    }

    pub fn material(mut self, material: impl Into<MaterialId>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn style(mut self, style: impl Into<StyleId>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn quality(mut self, quality: QualityTier) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bound(mut self) -> Self {
        self.force_bind = true;
        self
    }

    pub fn count(mut self, count: CountRange) -> Self {
        self.count = count;
        self
    }

    /// Weight used when competing inside a pool
    pub fn pool_weight(&self) -> f32 {
        self.weight * self.chance
    }
}

/// Configuration for one item category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryLoadout {
    /// Simple weighted pool, one pick
    pub pool: Vec<GearPoolEntry>,
    /// Advanced rules; take precedence over `pool` when non-empty
    pub requirements: Vec<SpecificRequirement>,
    /// Strip the category and select nothing
    pub force_unequipped: bool,
    /// Strip everything in the category before selecting
    pub force_only_configured: bool,
}

impl CategoryLoadout {
    pub fn pooled(pool: Vec<GearPoolEntry>) -> Self {
        Self {
            pool,
            ..Self::default()
        }
    }

    pub fn advanced(requirements: Vec<SpecificRequirement>) -> Self {
        Self {
            requirements,
            ..Self::default()
        }
    }

    pub fn stripped() -> Self {
        Self {
            force_unequipped: true,
            ..Self::default()
        }
    }

    pub fn only_configured(mut self) -> Self {
        self.force_only_configured = true;
        self
    }

    /// Has anything to select from?
    pub fn has_candidates(&self) -> bool {
        !self.pool.is_empty() || !self.requirements.is_empty()
    }

    /// Any reason to touch this category at all?
    pub fn is_configured(&self) -> bool {
        self.has_candidates() || self.force_unequipped || self.force_only_configured
    }
}

/// Pooled condition category, resolved to a concrete condition by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolCategory {
    AnyDebuff,
    AnyDrugEffect,
    AnyAddiction,
    AnyImplant,
    AnyIllness,
    AnyBuff,
}

/// What a forced condition applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionSource {
    Explicit(ConditionId),
    Pooled(PoolCategory),
}

/// A condition forced onto the entity at spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedCondition {
    pub source: ConditionSource,
    /// Fixed application count; 0 means sample `max_count_range`
    pub max_count: u32,
    pub max_count_range: CountRange,
    /// Gate for the whole entry
    pub chance: f32,
    pub severity: FloatRange,
    /// Requested locations; empty means any compatible location
    pub target_locations: Vec<BodyLocation>,
}

impl ForcedCondition {
    pub fn new(source: ConditionSource) -> Self {
        Self {
            source,
            max_count: 1,
            max_count_range: CountRange::exactly(1),
            chance: 1.0,
            severity: FloatRange::new(0.1, 0.5),
            target_locations: Vec::new(),
        }
    }

    pub fn explicit(condition: impl Into<ConditionId>) -> Self {
        Self::new(ConditionSource::Explicit(condition.into()))
    }

    pub fn pooled(category: PoolCategory) -> Self {
        Self::new(ConditionSource::Pooled(category))
    }

    pub fn times(mut self, count: u32) -> Self {
        self.max_count = count;
        self
    }

    pub fn times_between(mut self, range: CountRange) -> Self {
        self.max_count = 0;
        self.max_count_range = range;
        self
    }

    pub fn chance(mut self, chance: f32) -> Self {
        self.chance = chance;
        self
    }

    pub fn severity(mut self, severity: FloatRange) -> Self {
        self.severity = severity;
        self
    }

    pub fn at(mut self, locations: &[BodyLocation]) -> Self {
        self.target_locations = locations.to_vec();
        self
    }
}

/// Full loadout configuration for an entity kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadoutConfig {
    pub kind: Option<EntityKindId>,
    pub categories: BTreeMap<ItemCategory, CategoryLoadout>,
    pub conditions: Vec<ForcedCondition>,
    /// Accept every candidate regardless of cost
    pub ignore_budget: bool,
    /// Overrides the kind's default budget for both passes
    pub budget: Option<FloatRange>,
    pub quality: Option<QualityTier>,
    /// Weapons only; wins over `quality`
    pub weapon_quality: Option<QualityTier>,
    /// Chance to bind each generated weapon to the entity
    pub bind_chance: f32,
    pub color: Option<Color>,
}

impl LoadoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: ItemCategory) -> Option<&CategoryLoadout> {
        self.categories.get(&category)
    }

    pub fn with_category(mut self, category: ItemCategory, loadout: CategoryLoadout) -> Self {
        self.categories.insert(category, loadout);
        self
    }

    pub fn with_condition(mut self, condition: ForcedCondition) -> Self {
        self.conditions.push(condition);
        self
    }
}
