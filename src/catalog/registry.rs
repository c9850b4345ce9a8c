//! In-memory definition registry
//!
//! Indexes definitions by id. Lists handed back to the engine are sorted by
//! id so that seeded runs stay reproducible regardless of hash order.

use ahash::AHashMap;
use std::collections::BTreeSet;

use super::body::BodyLocation;
use super::definitions::{ConditionDef, EntityKindDef, ItemCategory, ItemDef, MaterialDef};
use super::DefinitionCatalog;
use crate::core::random::RandomSource;
use crate::core::types::{ConditionId, EntityKindId, ItemDefId, MaterialId};
use crate::loadout::config::PoolCategory;

/// Registry of all known definitions
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    items: AHashMap<ItemDefId, ItemDef>,
    materials: AHashMap<MaterialId, MaterialDef>,
    conditions: AHashMap<ConditionId, ConditionDef>,
    kinds: AHashMap<EntityKindId, EntityKindDef>,
}

impl DefinitionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item definition, replacing any previous one with the same id
    pub fn register_item(&mut self, def: ItemDef) {
        self.items.insert(def.id.clone(), def);
    }

    pub fn register_material(&mut self, def: MaterialDef) {
        self.materials.insert(def.id.clone(), def);
    }

    pub fn register_condition(&mut self, def: ConditionDef) {
        self.conditions.insert(def.id.clone(), def);
    }

    pub fn register_kind(&mut self, def: EntityKindDef) {
        self.kinds.insert(def.id.clone(), def);
    }

    pub fn with_item(mut self, def: ItemDef) -> Self {
        self.register_item(def);
        self
    }

    pub fn with_material(mut self, def: MaterialDef) -> Self {
        self.register_material(def);
        self
    }

    pub fn with_condition(mut self, def: ConditionDef) -> Self {
        self.register_condition(def);
        self
    }

    pub fn with_kind(mut self, def: EntityKindDef) -> Self {
        self.register_kind(def);
        self
    }
}

impl DefinitionCatalog for DefinitionRegistry {
    fn item(&self, id: &ItemDefId) -> Option<&ItemDef> {
        self.items.get(id)
    }

    fn material(&self, id: &MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id)
    }

    fn condition(&self, id: &ConditionId) -> Option<&ConditionDef> {
        self.conditions.get(id)
    }

    /// Unknown kinds get the full body
    fn body_locations(&self, kind: &EntityKindId) -> BTreeSet<BodyLocation> {
        match self.kinds.get(kind) {
            Some(def) => def.body.iter().copied().collect(),
            None => BodyLocation::all().into_iter().collect(),
        }
    }

    fn is_compatible(&self, kind: &EntityKindId, item: &ItemDefId) -> bool {
        let Some(def) = self.items.get(item) else {
            return false;
        };
        if !def.allowed_kinds.is_empty() && !def.allowed_kinds.contains(kind) {
            return false;
        }

        let kind_def = self.kinds.get(kind);
        match def.category {
            ItemCategory::Weapon | ItemCategory::MeleeWeapon => {
                kind_def.map_or(true, |k| k.uses_weapons)
            }
            ItemCategory::Armor | ItemCategory::Apparel => {
                if !kind_def.map_or(true, |k| k.wears_apparel) {
                    return false;
                }
                let body = self.body_locations(kind);
                def.covers.iter().all(|loc| body.contains(loc))
            }
            ItemCategory::Miscellaneous => true,
        }
    }

    fn compatible_materials(&self, item: &ItemDefId) -> Vec<MaterialId> {
        let Some(def) = self.items.get(item) else {
            return Vec::new();
        };
        let mut ids: Vec<MaterialId> = self
            .materials
            .values()
            .filter(|m| def.material_families.contains(&m.family))
            .map(|m| m.id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn resolve_pool_category(
        &self,
        category: PoolCategory,
        _kind: &EntityKindId,
        rng: &mut dyn RandomSource,
    ) -> Option<ConditionId> {
        let mut members: Vec<&ConditionId> = self
            .conditions
            .values()
            .filter(|c| c.pools.contains(&category))
            .map(|c| &c.id)
            .collect();
        if members.is_empty() {
            return None;
        }
        members.sort();
        Some(members[rng.next_index(members.len())].clone())
    }
}
