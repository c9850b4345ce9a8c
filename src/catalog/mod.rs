//! Definition catalog: read-only lookups the engine consults
//!
//! The engine only sees the [`DefinitionCatalog`] trait. Hosts can back it
//! with anything; [`DefinitionRegistry`] is the in-memory implementation.

pub mod body;
pub mod definitions;
pub mod registry;

pub use body::BodyLocation;
pub use definitions::{
    ApparelLayer, ConditionDef, EntityKindDef, ItemCategory, ItemDef, MaterialDef,
    MaterialFamily, QualityTier,
};
pub use registry::DefinitionRegistry;

use std::collections::BTreeSet;

use crate::core::random::RandomSource;
use crate::core::types::{ConditionId, EntityKindId, ItemDefId, MaterialId};
use crate::loadout::config::PoolCategory;

/// Read-only lookup of item, material, condition and entity-kind data.
///
/// Implementations must be pure: the same question always gets the same
/// answer, apart from `resolve_pool_category`, which draws from the supplied
/// random source.
pub trait DefinitionCatalog: Send + Sync {
    fn item(&self, id: &ItemDefId) -> Option<&ItemDef>;

    fn material(&self, id: &MaterialId) -> Option<&MaterialDef>;

    fn condition(&self, id: &ConditionId) -> Option<&ConditionDef>;

    /// Body locations an entity of this kind possesses
    fn body_locations(&self, kind: &EntityKindId) -> BTreeSet<BodyLocation>;

    /// Can an entity of this kind use or wear this item at all?
    fn is_compatible(&self, kind: &EntityKindId, item: &ItemDefId) -> bool;

    /// Materials this item can be made from, in a stable order
    fn compatible_materials(&self, item: &ItemDefId) -> Vec<MaterialId>;

    /// Pick a concrete condition standing in for a pooled category
    fn resolve_pool_category(
        &self,
        category: PoolCategory,
        kind: &EntityKindId,
        rng: &mut dyn RandomSource,
    ) -> Option<ConditionId>;

    /// Market value of one unit. `None` when the item or material is unknown.
    fn cost(
        &self,
        item: &ItemDefId,
        material: Option<&MaterialId>,
        quality: Option<QualityTier>,
    ) -> Option<f32> {
        let def = self.item(item)?;
        let material_factor = match material {
            Some(id) => self.material(id)?.value_factor,
            None => 1.0,
        };
        let quality_factor = match quality {
            Some(tier) if self.supports_quality(item) => tier.value_multiplier(),
            _ => 1.0,
        };
        Some(def.base_value * material_factor * quality_factor)
    }

    fn requires_material(&self, item: &ItemDefId) -> bool {
        self.item(item).is_some_and(|d| d.requires_material())
    }

    fn is_material_compatible(&self, item: &ItemDefId, material: &MaterialId) -> bool {
        match (self.item(item), self.material(material)) {
            (Some(i), Some(m)) => i.material_families.contains(&m.family),
            _ => false,
        }
    }

    fn supports_quality(&self, item: &ItemDefId) -> bool {
        self.item(item).is_some_and(|d| d.has_quality)
    }

    fn supports_style(&self, item: &ItemDefId) -> bool {
        self.item(item).is_some_and(|d| d.styleable)
    }

    fn supports_color(&self, item: &ItemDefId) -> bool {
        self.item(item).is_some_and(|d| d.colorable)
    }

    fn supports_ownership_binding(&self, item: &ItemDefId) -> bool {
        self.item(item).is_some_and(|d| d.bindable)
    }

    /// Destroyed rather than dropped, and stripped on every clearing step
    fn is_disposable(&self, item: &ItemDefId) -> bool {
        self.item(item).is_some_and(|d| d.disposable)
    }
}
