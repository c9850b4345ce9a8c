//! Equip coordinator
//!
//! Runs one pass over a group of categories: clear, select, budget, commit.
//! Weapons share the single primary slot; worn items go on the body and
//! displace whatever they conflict with; carried items go to the inventory.

use std::collections::BTreeSet;

use crate::catalog::{BodyLocation, DefinitionCatalog, ItemCategory};
use crate::core::config::EngineConfig;
use crate::core::error::{LoadoutError, Result};
use crate::core::random::RandomSource;
use crate::core::types::{EntityKindId, FloatRange};
use crate::entity::{Entity, ItemInstance, Release};
use crate::loadout::budget::BudgetLedger;
use crate::loadout::config::{CategoryLoadout, LoadoutConfig};
use crate::loadout::materialize::{ItemDescriptor, MaterializeContext, Materializer};
use crate::loadout::selection::{resolve_pool, resolve_requirements};

/// A group of categories sharing one budget ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Weapons,
    /// Armor, apparel and carried items
    Worn,
}

impl Pass {
    pub fn categories(&self) -> &'static [ItemCategory] {
        match self {
            Pass::Weapons => &[ItemCategory::Weapon, ItemCategory::MeleeWeapon],
            Pass::Worn => &[
                ItemCategory::Armor,
                ItemCategory::Apparel,
                ItemCategory::Miscellaneous,
            ],
        }
    }

    /// Budget range for this pass: the loadout's own range, else the kind's
    /// default from the engine config
    pub fn budget_range(
        &self,
        loadout: &LoadoutConfig,
        config: &EngineConfig,
        kind: &EntityKindId,
    ) -> FloatRange {
        loadout.budget.unwrap_or_else(|| match self {
            Pass::Weapons => config.weapon_budget(kind),
            Pass::Worn => config.apparel_budget(kind),
        })
    }
}

/// What happened to each candidate during a pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Items removed while clearing
    pub cleared: usize,
    pub committed: usize,
    pub over_budget: usize,
    /// Unknown definitions or failed materialization
    pub failed: usize,
    /// Materialized but not usable by this entity
    pub unwearable: usize,
    /// Held items pushed out by a newly committed item
    pub displaced: usize,
}

enum Outcome {
    Committed { displaced: usize },
    OverBudget,
    Failed,
    Unwearable,
}

pub struct EquipCoordinator<'a> {
    catalog: &'a dyn DefinitionCatalog,
    config: &'a EngineConfig,
    materializer: Materializer<'a>,
}

impl<'a> EquipCoordinator<'a> {
    pub fn new(catalog: &'a dyn DefinitionCatalog, config: &'a EngineConfig) -> Self {
        Self {
            catalog,
            config,
            materializer: Materializer::new(catalog, config),
        }
    }

    /// Run one pass. Never fails; each candidate that cannot be placed is
    /// dropped and counted in the report.
    pub fn run_pass(
        &self,
        pass: Pass,
        entity: &mut Entity,
        loadout: &LoadoutConfig,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let mut report = PassReport::default();

        // Clearing
        let mut active: Vec<&CategoryLoadout> = Vec::new();
        for &category in pass.categories() {
            let Some(settings) = loadout.category(category) else {
                continue;
            };
            if !settings.is_configured() {
                continue;
            }
            report.cleared += self.clear_category(entity, category, settings);
            if !settings.force_unequipped && settings.has_candidates() {
                active.push(settings);
            }
        }

        if active.is_empty() {
            return report;
        }

        let range = pass.budget_range(loadout, self.config, &entity.kind);
        let spend = entity.value_in(pass.categories());
        let mut ledger = BudgetLedger::sample(range, loadout.ignore_budget, spend, rng);
        tracing::debug!(
            "{:?} pass: ceiling {:?}, starting spend {}",
            pass,
            ledger.ceiling(),
            ledger.spend()
        );

        let structure = entity
            .body
            .structure(&self.catalog.body_locations(&entity.kind));

        for settings in active {
            // Selecting
            let selected = self.select(&entity.kind, settings, rng);

            // Budgeting and committing
            for desc in &selected {
                match self.place(entity, desc, &structure, &mut ledger, loadout, rng) {
                    Outcome::Committed { displaced } => {
                        report.committed += 1;
                        report.displaced += displaced;
                    }
                    Outcome::OverBudget => report.over_budget += 1,
                    Outcome::Failed => report.failed += 1,
                    Outcome::Unwearable => report.unwearable += 1,
                }
            }
        }

        report
    }

    /// Remove held items according to the category's strip flags. Returns
    /// how many were removed.
    fn clear_category(
        &self,
        entity: &mut Entity,
        category: ItemCategory,
        settings: &CategoryLoadout,
    ) -> usize {
        let catalog = self.catalog;
        let removed = if settings.force_unequipped || settings.force_only_configured {
            entity.take_items(category, |_| true)
        } else {
            entity.take_items(category, |i| catalog.is_disposable(&i.def))
        };

        if !removed.is_empty() {
            tracing::debug!("Cleared {} item(s) from {:?}", removed.len(), category);
        }
        removed.len()
    }

    /// Candidates for one category. The advanced list wins over the simple
    /// pool when it has any entries.
    pub fn select(
        &self,
        kind: &EntityKindId,
        settings: &CategoryLoadout,
        rng: &mut dyn RandomSource,
    ) -> Vec<ItemDescriptor> {
        let catalog = self.catalog;
        if !settings.requirements.is_empty() {
            resolve_requirements(
                &settings.requirements,
                |r| catalog.is_compatible(kind, &r.item),
                rng,
            )
            .into_iter()
            .map(ItemDescriptor::from)
            .collect()
        } else {
            resolve_pool(
                &settings.pool,
                |e| catalog.is_compatible(kind, &e.item),
                rng,
            )
            .map(ItemDescriptor::from)
            .into_iter()
            .collect()
        }
    }

    fn place(
        &self,
        entity: &mut Entity,
        desc: &ItemDescriptor,
        structure: &BTreeSet<BodyLocation>,
        ledger: &mut BudgetLedger,
        loadout: &LoadoutConfig,
        rng: &mut dyn RandomSource,
    ) -> Outcome {
        let estimate = match self.materializer.estimate_cost(desc) {
            Ok(cost) => cost,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", desc.item, e);
                return Outcome::Failed;
            }
        };

        if !ledger.try_reserve(estimate).is_accepted() {
            tracing::debug!(
                "Skipping {}: estimate {} exceeds remaining budget {}",
                desc.item,
                estimate,
                ledger.remaining()
            );
            return Outcome::OverBudget;
        }

        let ctx = MaterializeContext {
            loadout,
            owner: entity.id,
            inherited_style: entity.preferred_style.as_ref(),
        };
        let instance = match self.materializer.materialize(desc, &ctx, rng) {
            Ok(instance) => instance,
            Err(e) => {
                tracing::debug!("Failed to materialize {}: {}", desc.item, e);
                return Outcome::Failed;
            }
        };

        if let Err(e) = self.check_usable(&entity.kind, structure, &instance) {
            tracing::debug!("Discarding materialized item: {}", e);
            return Outcome::Unwearable;
        }

        let actual = instance.market_value;
        let displaced = self.attach(entity, instance);
        ledger.commit(actual);
        Outcome::Committed { displaced }
    }

    /// Commit-time check against the entity's current body
    fn check_usable(
        &self,
        kind: &EntityKindId,
        structure: &BTreeSet<BodyLocation>,
        instance: &ItemInstance,
    ) -> Result<()> {
        let def = self
            .catalog
            .item(&instance.def)
            .ok_or_else(|| LoadoutError::UnknownItem(instance.def.clone()))?;
        if self.catalog.is_compatible(kind, &instance.def)
            && def.covers.iter().all(|loc| structure.contains(loc))
        {
            Ok(())
        } else {
            Err(LoadoutError::IncompatibleItem {
                kind: kind.clone(),
                item: instance.def.clone(),
            })
        }
    }

    /// Put the item in its slot. Returns how many held items it displaced.
    fn attach(&self, entity: &mut Entity, instance: ItemInstance) -> usize {
        let category = instance.category;

        if category.is_weapon() {
            return match entity.primary.replace(instance) {
                Some(previous) => {
                    self.release(entity, previous);
                    1
                }
                None => 0,
            };
        }

        if !category.is_worn() {
            entity.inventory.push(instance);
            return 0;
        }

        let conflicting: Vec<ItemInstance> = match self.catalog.item(&instance.def) {
            Some(def) => {
                let catalog = self.catalog;
                let (conflicting, kept): (Vec<_>, Vec<_>) =
                    entity.worn.drain(..).partition(|worn| {
                        catalog
                            .item(&worn.def)
                            .is_some_and(|other| other.conflicts_with(def))
                    });
                entity.worn = kept;
                conflicting
            }
            None => Vec::new(),
        };

        let displaced = conflicting.len();
        for previous in conflicting {
            self.release(entity, previous);
        }
        entity.worn.push(instance);
        displaced
    }

    fn release(&self, entity: &mut Entity, item: ItemInstance) {
        let disposable = self.catalog.is_disposable(&item.def);
        let def = item.def.clone();
        match entity.release(item, disposable) {
            Release::Dropped => tracing::debug!("Dropped displaced {}", def),
            Release::Destroyed => tracing::debug!("Destroyed displaced {}", def),
        }
    }
}
