//! Integration tests for loadout generation through the public engine API

use loadout_engine::catalog::{
    ApparelLayer, BodyLocation, ConditionDef, DefinitionRegistry, EntityKindDef, ItemCategory,
    ItemDef, MaterialDef, MaterialFamily, QualityTier,
};
use loadout_engine::core::types::{CountRange, FloatRange};
use loadout_engine::core::{EngineConfig, RngSource, ScriptedRandom};
use loadout_engine::entity::{Entity, ItemInstance};
use loadout_engine::loadout::selection::resolve_pool;
use loadout_engine::loadout::{
    BudgetLedger, CategoryLoadout, ForcedCondition, GearPoolEntry, LoadoutConfig, LoadoutEngine,
    PoolTag, Reservation, SpecificRequirement,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn catalog() -> DefinitionRegistry {
    DefinitionRegistry::new()
        .with_material(MaterialDef::new("iron", MaterialFamily::Metallic, 1.0))
        .with_material(MaterialDef::new("silver", MaterialFamily::Metallic, 3.0))
        .with_material(MaterialDef::new("wool", MaterialFamily::Fabric, 1.0))
        .with_item(ItemDef::new("musket", ItemCategory::Weapon, 100.0).bindable())
        .with_item(ItemDef::new("cannon", ItemCategory::Weapon, 10_000.0))
        .with_item(
            ItemDef::new("sabre", ItemCategory::MeleeWeapon, 80.0)
                .made_from(&[MaterialFamily::Metallic])
                .with_quality()
                .bindable(),
        )
        .with_item(
            ItemDef::new("coat", ItemCategory::Apparel, 40.0)
                .made_from(&[MaterialFamily::Fabric])
                .with_quality()
                .worn_on(&[BodyLocation::Torso], &[ApparelLayer::Outer]),
        )
        .with_item(
            ItemDef::new("shirt", ItemCategory::Apparel, 10.0)
                .worn_on(&[BodyLocation::Torso], &[ApparelLayer::Skin]),
        )
        .with_item(
            ItemDef::new("hat", ItemCategory::Apparel, 15.0)
                .worn_on(&[BodyLocation::Head], &[ApparelLayer::Overhead]),
        )
        .with_item(ItemDef::new("bread", ItemCategory::Miscellaneous, 2.0).stackable(10))
        .with_item(ItemDef::new("cheese", ItemCategory::Miscellaneous, 3.0).stackable(10))
        .with_item(ItemDef::new("apple", ItemCategory::Miscellaneous, 1.0).stackable(10))
        .with_item(ItemDef::new("herb", ItemCategory::Miscellaneous, 1.0).stackable(10))
        .with_condition(ConditionDef::new("burn"))
        .with_condition(ConditionDef::new("gout").on(&[BodyLocation::FootLeft]))
        .with_kind(EntityKindDef::humanlike("colonist"))
        .with_kind(EntityKindDef::animal(
            "serpent",
            &[BodyLocation::Head, BodyLocation::Torso],
        ))
}

fn held_defs(items: &[ItemInstance]) -> Vec<&str> {
    items.iter().map(|i| i.def.as_str()).collect()
}

#[test]
fn test_weighted_pool_converges() {
    let entries = vec![
        GearPoolEntry::new("a", 1.0),
        GearPoolEntry::new("b", 1.0),
        GearPoolEntry::new("c", 2.0),
    ];
    let mut rng = RngSource(ChaCha8Rng::seed_from_u64(42));
    let trials = 10_000;
    let mut counts = [0u32; 3];

    for _ in 0..trials {
        match resolve_pool(&entries, |_| true, &mut rng).unwrap().item.as_str() {
            "a" => counts[0] += 1,
            "b" => counts[1] += 1,
            _ => counts[2] += 1,
        }
    }

    for (count, expected) in counts.iter().zip([0.25, 0.25, 0.5]) {
        let freq = *count as f32 / trials as f32;
        assert!(
            (freq - expected).abs() < 0.025,
            "Frequency {} should be near {}",
            freq,
            expected
        );
    }
}

#[test]
fn test_pool_exclusivity_through_engine() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let mut loadout = LoadoutConfig::new().with_category(
        ItemCategory::Miscellaneous,
        CategoryLoadout::advanced(vec![
            SpecificRequirement::in_pool("bread", PoolTag::Two, 1.0),
            SpecificRequirement::in_pool("cheese", PoolTag::Two, 2.0),
            SpecificRequirement::in_pool("apple", PoolTag::Two, 3.0),
            SpecificRequirement::in_pool("herb", PoolTag::Three, 1.0),
        ]),
    );
    loadout.ignore_budget = true;

    for seed in 0..50 {
        let mut rng = RngSource(ChaCha8Rng::seed_from_u64(seed));
        let mut entity = Entity::new("colonist");
        engine.apply_loadout(&mut entity, &loadout, &mut rng);

        let carried = held_defs(&entity.inventory);
        let from_pool_two = carried.iter().filter(|d| **d != "herb").count();
        assert_eq!(from_pool_two, 1, "seed {} carried {:?}", seed, carried);
        assert!(carried.contains(&"herb"));
    }
}

#[test]
fn test_budget_monotonicity() {
    let mut ledger = BudgetLedger::new(100.0, 80.0);
    assert_eq!(ledger.try_reserve(25.0), Reservation::Reject);
    assert_eq!(ledger.try_reserve(15.0), Reservation::Accept);
    ledger.commit(15.0);
    assert_eq!(ledger.spend(), 95.0);
    assert_eq!(ledger.try_reserve(10.0), Reservation::Reject);
}

#[test]
fn test_ignore_budget_accepts_expensive_item() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let mut loadout = LoadoutConfig::new().with_category(
        ItemCategory::Weapon,
        CategoryLoadout::advanced(vec![SpecificRequirement::always("cannon")]),
    );
    loadout.budget = Some(FloatRange::exactly(1.0));

    let mut entity = Entity::new("colonist");
    engine.apply_loadout(&mut entity, &loadout, &mut ScriptedRandom::new(vec![0.5]));
    assert!(entity.primary.is_none());

    loadout.ignore_budget = true;
    engine.apply_loadout(&mut entity, &loadout, &mut ScriptedRandom::new(vec![0.5]));
    assert_eq!(entity.primary.as_ref().unwrap().def.as_str(), "cannon");
}

#[test]
fn test_conditions_skip_missing_locations() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let loadout = LoadoutConfig::new().with_condition(
        ForcedCondition::explicit("burn")
            .times(5)
            .chance(1.0)
            .at(&[BodyLocation::ArmLeft, BodyLocation::ArmRight]),
    );

    let mut entity = Entity::new("serpent");
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(1));
    assert!(entity.body.conditions.is_empty());
}

#[test]
fn test_conditions_are_idempotent_per_location() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let loadout = LoadoutConfig::new()
        .with_condition(ForcedCondition::explicit("gout").times(3));

    let mut entity = Entity::new("colonist");
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(1));
    assert_eq!(entity.body.conditions.len(), 1);
    assert_eq!(
        entity.body.conditions[0].location,
        Some(BodyLocation::FootLeft)
    );

    // a second application adds nothing new
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(2));
    assert_eq!(entity.body.conditions.len(), 1);
}

#[test]
fn test_force_unequipped_strips_category() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let mut stripped = CategoryLoadout::stripped();
    stripped.requirements = vec![SpecificRequirement::always("hat")];
    stripped.pool = vec![GearPoolEntry::new("shirt", 1.0)];
    let mut loadout = LoadoutConfig::new().with_category(ItemCategory::Apparel, stripped);
    loadout.ignore_budget = true;

    let mut entity = Entity::new("colonist");
    entity
        .worn
        .push(ItemInstance::new("coat".into(), ItemCategory::Apparel, 40.0));
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(3));

    assert!(entity.items_in(ItemCategory::Apparel).is_empty());
}

#[test]
fn test_advanced_list_overrides_simple_pool() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let mut apparel = CategoryLoadout::pooled(vec![GearPoolEntry::new("shirt", 10.0)]);
    apparel.requirements = vec![SpecificRequirement::always("hat")];
    let mut loadout = LoadoutConfig::new().with_category(ItemCategory::Apparel, apparel);
    loadout.ignore_budget = true;

    for seed in 0..20 {
        let mut entity = Entity::new("colonist");
        engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(seed));
        assert_eq!(held_defs(&entity.worn), vec!["hat"]);
    }
}

#[test]
fn test_same_seed_same_loadout() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let loadout = LoadoutConfig::new()
        .with_category(
            ItemCategory::MeleeWeapon,
            CategoryLoadout::pooled(vec![GearPoolEntry::new("sabre", 1.0)]),
        )
        .with_category(
            ItemCategory::Apparel,
            CategoryLoadout::advanced(vec![
                SpecificRequirement::with_chance("coat", 0.5),
                SpecificRequirement::with_chance("hat", 0.5),
            ]),
        )
        .with_category(
            ItemCategory::Miscellaneous,
            CategoryLoadout::advanced(vec![
                SpecificRequirement::always("bread").count(CountRange::new(1, 10))
            ]),
        );

    let summarize = |entity: &Entity| -> Vec<(String, Option<String>, Option<QualityTier>, u32)> {
        entity
            .primary
            .iter()
            .chain(entity.worn.iter())
            .chain(entity.inventory.iter())
            .map(|i| {
                (
                    i.def.to_string(),
                    i.material.as_ref().map(|m| m.to_string()),
                    i.quality,
                    i.count,
                )
            })
            .collect()
    };

    let mut first = Entity::new("colonist");
    let mut second = Entity::new("colonist");
    engine.apply_loadout(&mut first, &loadout, &mut RngSource::seeded(77));
    engine.apply_loadout(&mut second, &loadout, &mut RngSource::seeded(77));

    assert_eq!(summarize(&first), summarize(&second));
}

#[test]
fn test_kind_budget_from_toml() {
    let catalog = catalog();
    let config = EngineConfig::from_toml_str(
        r#"
        [kind_budgets.colonist]
        weapons = { min = 50.0, max = 50.0 }
        apparel = { min = 500.0, max = 500.0 }
        "#,
    )
    .unwrap();
    let engine = LoadoutEngine::new(&catalog, &config);

    let loadout = LoadoutConfig::new()
        .with_category(
            ItemCategory::Weapon,
            CategoryLoadout::advanced(vec![SpecificRequirement::always("musket")]),
        )
        .with_category(
            ItemCategory::Apparel,
            CategoryLoadout::advanced(vec![SpecificRequirement::always("hat")]),
        );

    let mut entity = Entity::new("colonist");
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(5));

    assert!(entity.primary.is_none());
    assert_eq!(held_defs(&entity.worn), vec!["hat"]);
}

#[test]
fn test_forced_binding_and_explicit_material() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let mut loadout = LoadoutConfig::new().with_category(
        ItemCategory::MeleeWeapon,
        CategoryLoadout::advanced(vec![SpecificRequirement::always("sabre")
            .material("silver")
            .quality(QualityTier::Masterwork)
            .bound()]),
    );
    loadout.ignore_budget = true;

    let mut entity = Entity::new("colonist");
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(8));

    let sabre = entity.primary.as_ref().unwrap();
    assert_eq!(sabre.bound_to, Some(entity.id));
    assert_eq!(sabre.material.as_ref().unwrap().as_str(), "silver");
    assert_eq!(sabre.quality, Some(QualityTier::Masterwork));
    assert_eq!(sabre.market_value, 80.0 * 3.0 * 2.5);
}

#[test]
fn test_animal_kind_gets_no_gear() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = LoadoutEngine::new(&catalog, &config);

    let mut loadout = LoadoutConfig::new()
        .with_category(
            ItemCategory::Weapon,
            CategoryLoadout::advanced(vec![SpecificRequirement::always("musket")]),
        )
        .with_category(
            ItemCategory::Apparel,
            CategoryLoadout::pooled(vec![GearPoolEntry::new("hat", 1.0)]),
        );
    loadout.ignore_budget = true;

    let mut entity = Entity::new("serpent");
    engine.apply_loadout(&mut entity, &loadout, &mut RngSource::seeded(4));

    assert!(entity.primary.is_none());
    assert!(entity.worn.is_empty());
}
