//! Condition injector
//!
//! Applies forced conditions (injuries, illnesses, implants) at spawn time.
//! Each entry is gated by its own chance, resolves to a concrete condition,
//! then repeats up to its application count over the valid locations.

use crate::catalog::{BodyLocation, ConditionDef, DefinitionCatalog};
use crate::core::error::{LoadoutError, Result};
use crate::core::random::RandomSource;
use crate::core::types::{ConditionId, EntityKindId};
use crate::entity::{AppliedCondition, Entity};
use crate::loadout::config::{ConditionSource, ForcedCondition};

pub struct ConditionInjector<'a> {
    catalog: &'a dyn DefinitionCatalog,
}

impl<'a> ConditionInjector<'a> {
    pub fn new(catalog: &'a dyn DefinitionCatalog) -> Self {
        Self { catalog }
    }

    /// Apply every entry in order. Returns the number of conditions added.
    pub fn apply_all(
        &self,
        entity: &mut Entity,
        conditions: &[ForcedCondition],
        rng: &mut dyn RandomSource,
    ) -> usize {
        conditions
            .iter()
            .map(|forced| self.apply(entity, forced, rng))
            .sum()
    }

    /// Apply a single entry. Returns the number of conditions added.
    pub fn apply(
        &self,
        entity: &mut Entity,
        forced: &ForcedCondition,
        rng: &mut dyn RandomSource,
    ) -> usize {
        if !rng.chance(forced.chance) {
            tracing::trace!("Condition {:?} failed its chance roll", forced.source);
            return 0;
        }

        let Some(condition) = self.resolve_source(&forced.source, &entity.kind, rng) else {
            tracing::debug!("No condition available for {:?}", forced.source);
            return 0;
        };
        let def = match self.definition(&condition) {
            Ok(def) => def,
            Err(e) => {
                tracing::debug!("Skipping forced condition: {}", e);
                return 0;
            }
        };

        let targets = self.targets(entity, def, &forced.target_locations);
        if targets.is_empty() {
            tracing::debug!("No valid location for {}, skipping", def.id);
            return 0;
        }

        let repetitions = if forced.max_count > 0 {
            forced.max_count
        } else {
            rng.next_count(forced.max_count_range).max(1)
        };

        let max_severity = def.max_severity.max(0.0);
        let mut covered = targets
            .iter()
            .filter(|loc| entity.body.has_condition(&def.id, **loc))
            .count();
        let mut applied = 0;
        for _ in 0..repetitions {
            if covered >= targets.len() {
                tracing::trace!("{} present at every target, stopping", def.id);
                break;
            }
            let location = targets[rng.next_index(targets.len())];
            if entity.body.has_condition(&def.id, location) {
                tracing::trace!("{} already present at {:?}", def.id, location);
                continue;
            }
            let severity = rng.next_in_range(forced.severity).clamp(0.0, max_severity);
            if entity
                .body
                .add_condition(AppliedCondition::new(def.id.clone(), location, severity))
            {
                applied += 1;
                covered += 1;
            }
        }

        applied
    }

    fn definition(&self, id: &ConditionId) -> Result<&'a ConditionDef> {
        self.catalog
            .condition(id)
            .ok_or_else(|| LoadoutError::UnknownCondition(id.clone()))
    }

    fn resolve_source(
        &self,
        source: &ConditionSource,
        kind: &EntityKindId,
        rng: &mut dyn RandomSource,
    ) -> Option<ConditionId> {
        match source {
            ConditionSource::Explicit(id) => Some(id.clone()),
            ConditionSource::Pooled(category) => {
                self.catalog.resolve_pool_category(*category, kind, rng)
            }
        }
    }

    /// Locations a repetition may pick from. `None` stands for the whole
    /// body. Empty means the entry cannot be applied.
    fn targets(
        &self,
        entity: &Entity,
        def: &ConditionDef,
        requested: &[BodyLocation],
    ) -> Vec<Option<BodyLocation>> {
        let structure = entity
            .body
            .structure(&self.catalog.body_locations(&entity.kind));

        if def.location_agnostic {
            let reachable =
                requested.is_empty() || requested.iter().any(|l| structure.contains(l));
            return if reachable { vec![None] } else { Vec::new() };
        }

        structure
            .into_iter()
            .filter(|loc| def.allows_location(*loc))
            .filter(|loc| requested.is_empty() || requested.contains(loc))
            .map(Some)
            .collect()
    }
}
