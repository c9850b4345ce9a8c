//! Loadout engine entry point

use crate::catalog::DefinitionCatalog;
use crate::core::config::EngineConfig;
use crate::core::random::RandomSource;
use crate::entity::Entity;
use crate::loadout::conditions::ConditionInjector;
use crate::loadout::config::LoadoutConfig;
use crate::loadout::equip::{EquipCoordinator, Pass};

/// Applies loadout configurations to entities.
///
/// Holds only shared, read-only references, so one engine can serve any
/// number of calls. Each call borrows the entity it equips exclusively.
pub struct LoadoutEngine<'a> {
    catalog: &'a dyn DefinitionCatalog,
    config: &'a EngineConfig,
}

impl<'a> LoadoutEngine<'a> {
    pub fn new(catalog: &'a dyn DefinitionCatalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Equip `entity` according to `loadout`: weapons first, then worn and
    /// carried items, then forced conditions. Individual failures are
    /// logged and skipped; nothing is reported back.
    pub fn apply_loadout(
        &self,
        entity: &mut Entity,
        loadout: &LoadoutConfig,
        rng: &mut dyn RandomSource,
    ) {
        let span = tracing::debug_span!("apply_loadout", entity = ?entity.id, kind = %entity.kind);
        let _guard = span.enter();

        if let Some(kind) = &loadout.kind {
            if *kind != entity.kind {
                tracing::warn!(
                    "Loadout for {} applied to entity of kind {}",
                    kind,
                    entity.kind
                );
            }
        }

        let coordinator = EquipCoordinator::new(self.catalog, self.config);
        let weapons = coordinator.run_pass(Pass::Weapons, entity, loadout, rng);
        let worn = coordinator.run_pass(Pass::Worn, entity, loadout, rng);
        let conditions =
            ConditionInjector::new(self.catalog).apply_all(entity, &loadout.conditions, rng);

        tracing::debug!(
            "Loadout applied: weapons {:?}, worn {:?}, {} condition(s)",
            weapons,
            worn,
            conditions
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        ApparelLayer, BodyLocation, ConditionDef, DefinitionRegistry, EntityKindDef, ItemCategory,
        ItemDef,
    };
    use crate::core::random::ScriptedRandom;
    use crate::loadout::config::{CategoryLoadout, ForcedCondition, SpecificRequirement};

    fn catalog() -> DefinitionRegistry {
        DefinitionRegistry::new()
            .with_item(ItemDef::new("bow", ItemCategory::Weapon, 80.0))
            .with_item(
                ItemDef::new("cloak", ItemCategory::Apparel, 40.0)
                    .worn_on(&[BodyLocation::Torso], &[ApparelLayer::Outer]),
            )
            .with_condition(ConditionDef::new("bruise"))
            .with_kind(EntityKindDef::humanlike("human"))
    }

    #[test]
    fn test_all_passes_run() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let engine = LoadoutEngine::new(&catalog, &config);
        let mut entity = Entity::new("human");

        let mut loadout = LoadoutConfig::new()
            .with_category(
                ItemCategory::Weapon,
                CategoryLoadout::advanced(vec![SpecificRequirement::always("bow")]),
            )
            .with_category(
                ItemCategory::Apparel,
                CategoryLoadout::advanced(vec![SpecificRequirement::always("cloak")]),
            )
            .with_condition(ForcedCondition::explicit("bruise").at(&[BodyLocation::Head]));
        loadout.ignore_budget = true;

        let mut rng = ScriptedRandom::new(vec![0.5]);
        engine.apply_loadout(&mut entity, &loadout, &mut rng);

        assert_eq!(entity.primary.as_ref().unwrap().def.as_str(), "bow");
        assert_eq!(entity.worn.len(), 1);
        assert_eq!(entity.body.conditions.len(), 1);
    }

    #[test]
    fn test_empty_loadout_changes_nothing() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let engine = LoadoutEngine::new(&catalog, &config);
        let mut entity = Entity::new("human");
        let mut rng = ScriptedRandom::new(vec![0.5]);

        engine.apply_loadout(&mut entity, &LoadoutConfig::new(), &mut rng);

        assert_eq!(entity.item_count(), 0);
        assert!(entity.body.conditions.is_empty());
        assert_eq!(rng.draws_taken(), 0);
    }
}
