//! Item, material, condition and entity-kind definitions
//!
//! Definitions are static data. The engine reads them through
//! [`DefinitionCatalog`](super::DefinitionCatalog) and never changes them.

use serde::{Deserialize, Serialize};

use crate::catalog::body::BodyLocation;
use crate::core::types::{ConditionId, EntityKindId, ItemDefId, MaterialId, StyleId};
use crate::loadout::config::PoolCategory;

/// Loadout category an item definition belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Ranged weapons
    Weapon,
    MeleeWeapon,
    Armor,
    Apparel,
    /// Carried items: food, medicine, tools
    Miscellaneous,
}

impl ItemCategory {
    /// Does this category occupy the primary weapon slot?
    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemCategory::Weapon | ItemCategory::MeleeWeapon)
    }

    /// Is this category worn on the body?
    pub fn is_worn(&self) -> bool {
        matches!(self, ItemCategory::Armor | ItemCategory::Apparel)
    }
}

/// Quality tiers, worst to best
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum QualityTier {
    Awful,
    Poor,
    #[default]
    Normal,
    Good,
    Excellent,
    Masterwork,
    Legendary,
}

impl QualityTier {
    /// Market value multiplier relative to Normal
    pub fn value_multiplier(&self) -> f32 {
        match self {
            QualityTier::Awful => 0.5,
            QualityTier::Poor => 0.75,
            QualityTier::Normal => 1.0,
            QualityTier::Good => 1.25,
            QualityTier::Excellent => 1.5,
            QualityTier::Masterwork => 2.5,
            QualityTier::Legendary => 5.0,
        }
    }
}

/// Families of materials an item can be made from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialFamily {
    Metallic,
    Woody,
    Stony,
    Fabric,
    Leathery,
}

/// Apparel layers. Two worn items conflict when they share a layer and a
/// covered location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApparelLayer {
    Skin,
    Middle,
    Outer,
    Overhead,
    Belt,
}

/// An item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemDefId,
    pub label: String,
    pub category: ItemCategory,
    /// Market value at Normal quality with no material
    pub base_value: f32,
    /// Material families this item can be made from; non-empty means a
    /// material is required
    #[serde(default)]
    pub material_families: Vec<MaterialFamily>,
    #[serde(default)]
    pub has_quality: bool,
    #[serde(default)]
    pub styleable: bool,
    /// Styles this item accepts; empty accepts any style when styleable
    #[serde(default)]
    pub styles: Vec<StyleId>,
    #[serde(default)]
    pub colorable: bool,
    #[serde(default)]
    pub bindable: bool,
    /// Destroyed instead of dropped ("destroy on drop")
    #[serde(default)]
    pub disposable: bool,
    #[serde(default = "default_stack_limit")]
    pub stack_limit: u32,
    /// Locations covered when worn
    #[serde(default)]
    pub covers: Vec<BodyLocation>,
    #[serde(default)]
    pub layers: Vec<ApparelLayer>,
    /// Entity kinds allowed to use this item; empty allows all
    #[serde(default)]
    pub allowed_kinds: Vec<EntityKindId>,
}

fn default_stack_limit() -> u32 {
    1
}

impl ItemDef {
    /// Minimal definition; fill the rest with the builder methods
    pub fn new(id: impl Into<String>, category: ItemCategory, base_value: f32) -> Self {
        let id = ItemDefId::new(id);
        Self {
            label: id.to_string(),
            id,
            category,
            base_value,
            material_families: Vec::new(),
            has_quality: false,
            styleable: false,
            styles: Vec::new(),
            colorable: false,
            bindable: false,
            disposable: false,
            stack_limit: 1,
            covers: Vec::new(),
            layers: Vec::new(),
            allowed_kinds: Vec::new(),
        }
    }

    pub fn made_from(mut self, families: &[MaterialFamily]) -> Self {
        self.material_families = families.to_vec();
        self
    }

    pub fn with_quality(mut self) -> Self {
        self.has_quality = true;
        self
    }

    pub fn styleable(mut self, styles: &[&str]) -> Self {
        self.styleable = true;
        self.styles = styles.iter().map(|s| StyleId::from(*s)).collect();
        self
    }

    pub fn colorable(mut self) -> Self {
        self.colorable = true;
        self
    }

    pub fn bindable(mut self) -> Self {
        self.bindable = true;
        self
    }

    pub fn disposable(mut self) -> Self {
        self.disposable = true;
        self
    }

    pub fn stackable(mut self, limit: u32) -> Self {
        self.stack_limit = limit.max(1);
        self
    }

    pub fn worn_on(mut self, covers: &[BodyLocation], layers: &[ApparelLayer]) -> Self {
        self.covers = covers.to_vec();
        self.layers = layers.to_vec();
        self
    }

    pub fn only_for(mut self, kinds: &[&str]) -> Self {
        self.allowed_kinds = kinds.iter().map(|k| EntityKindId::from(*k)).collect();
        self
    }

    pub fn requires_material(&self) -> bool {
        !self.material_families.is_empty()
    }

    pub fn accepts_style(&self, style: &StyleId) -> bool {
        self.styles.is_empty() || self.styles.contains(style)
    }

    /// Does this item share a layer and a covered location with `other`?
    pub fn conflicts_with(&self, other: &ItemDef) -> bool {
        self.layers.iter().any(|l| other.layers.contains(l))
            && self.covers.iter().any(|c| other.covers.contains(c))
    }
}

/// A material definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDef {
    pub id: MaterialId,
    pub family: MaterialFamily,
    /// Multiplier applied to an item's base value
    pub value_factor: f32,
}

impl MaterialDef {
    pub fn new(id: impl Into<String>, family: MaterialFamily, value_factor: f32) -> Self {
        Self {
            id: MaterialId::new(id),
            family,
            value_factor,
        }
    }
}

/// A condition definition (injury, illness, implant, addiction, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDef {
    pub id: ConditionId,
    pub label: String,
    /// Applied to the whole body rather than a location
    #[serde(default)]
    pub location_agnostic: bool,
    /// Locations this condition can attach to; empty allows all
    #[serde(default)]
    pub allowed_locations: Vec<BodyLocation>,
    /// Severity cap
    #[serde(default = "default_max_severity")]
    pub max_severity: f32,
    /// Pooled categories this condition can stand in for
    #[serde(default)]
    pub pools: Vec<PoolCategory>,
}

fn default_max_severity() -> f32 {
    1.0
}

impl ConditionDef {
    pub fn new(id: impl Into<String>) -> Self {
        let id = ConditionId::new(id);
        Self {
            label: id.to_string(),
            id,
            location_agnostic: false,
            allowed_locations: Vec::new(),
            max_severity: 1.0,
            pools: Vec::new(),
        }
    }

    pub fn whole_body(mut self) -> Self {
        self.location_agnostic = true;
        self
    }

    pub fn on(mut self, locations: &[BodyLocation]) -> Self {
        self.allowed_locations = locations.to_vec();
        self
    }

    pub fn max_severity(mut self, max: f32) -> Self {
        self.max_severity = max;
        self
    }

    pub fn in_pools(mut self, pools: &[PoolCategory]) -> Self {
        self.pools = pools.to_vec();
        self
    }

    pub fn allows_location(&self, location: BodyLocation) -> bool {
        self.allowed_locations.is_empty() || self.allowed_locations.contains(&location)
    }
}

/// An entity kind definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityKindDef {
    pub id: EntityKindId,
    pub body: Vec<BodyLocation>,
    #[serde(default = "default_true")]
    pub uses_weapons: bool,
    #[serde(default = "default_true")]
    pub wears_apparel: bool,
}

fn default_true() -> bool {
    true
}

impl EntityKindDef {
    /// A kind with the full body that can use weapons and wear apparel
    pub fn humanlike(id: impl Into<String>) -> Self {
        Self {
            id: EntityKindId::new(id),
            body: BodyLocation::all().to_vec(),
            uses_weapons: true,
            wears_apparel: true,
        }
    }

    /// A kind that can neither wield weapons nor wear apparel
    pub fn animal(id: impl Into<String>, body: &[BodyLocation]) -> Self {
        Self {
            id: EntityKindId::new(id),
            body: body.to_vec(),
            uses_weapons: false,
            wears_apparel: false,
        }
    }
}
