//! Loadout Preview
//!
//! Generates a handful of entities from a sample catalog and loadout and
//! prints them as JSON. Useful for eyeballing budget and pool tuning.

use std::path::PathBuf;

use clap::Parser;
use loadout_engine::catalog::{
    ApparelLayer, BodyLocation, ConditionDef, DefinitionRegistry, EntityKindDef, ItemCategory,
    ItemDef, MaterialDef, MaterialFamily, QualityTier,
};
use loadout_engine::core::types::{Color, CountRange, FloatRange};
use loadout_engine::core::{EngineConfig, KindBudget, RngSource};
use loadout_engine::entity::Entity;
use loadout_engine::loadout::{
    CategoryLoadout, ForcedCondition, GearPoolEntry, LoadoutConfig, LoadoutEngine, PoolCategory,
    PoolTag, SpecificRequirement,
};

/// Loadout Preview - generate sample entities and print them as JSON
#[derive(Parser, Debug)]
#[command(name = "loadout_preview")]
#[command(about = "Generate sample loadouts and print the resulting entities")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of entities to generate
    #[arg(long, short = 'n', default_value_t = 3)]
    count: usize,

    /// Engine config TOML (defaults used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip budget checks
    #[arg(long)]
    ignore_budget: bool,

    /// Spawn entities in the world so displaced items are dropped
    #[arg(long)]
    in_world: bool,
}

fn sample_catalog() -> DefinitionRegistry {
    DefinitionRegistry::new()
        .with_material(MaterialDef::new("iron", MaterialFamily::Metallic, 1.0))
        .with_material(MaterialDef::new("steel", MaterialFamily::Metallic, 1.6))
        .with_material(MaterialDef::new("oak", MaterialFamily::Woody, 0.8))
        .with_material(MaterialDef::new("linen", MaterialFamily::Fabric, 1.0))
        .with_material(MaterialDef::new("wool", MaterialFamily::Fabric, 1.3))
        .with_material(MaterialDef::new("hide", MaterialFamily::Leathery, 1.1))
        .with_item(
            ItemDef::new("longbow", ItemCategory::Weapon, 120.0)
                .made_from(&[MaterialFamily::Woody])
                .with_quality()
                .bindable(),
        )
        .with_item(
            ItemDef::new("crossbow", ItemCategory::Weapon, 180.0)
                .made_from(&[MaterialFamily::Woody, MaterialFamily::Metallic])
                .with_quality()
                .bindable(),
        )
        .with_item(
            ItemDef::new("sword", ItemCategory::MeleeWeapon, 150.0)
                .made_from(&[MaterialFamily::Metallic])
                .with_quality()
                .bindable(),
        )
        .with_item(
            ItemDef::new("spear", ItemCategory::MeleeWeapon, 70.0)
                .made_from(&[MaterialFamily::Woody])
                .with_quality(),
        )
        .with_item(
            ItemDef::new("mail_shirt", ItemCategory::Armor, 220.0)
                .made_from(&[MaterialFamily::Metallic])
                .with_quality()
                .worn_on(
                    &[BodyLocation::Torso, BodyLocation::ArmLeft, BodyLocation::ArmRight],
                    &[ApparelLayer::Middle],
                ),
        )
        .with_item(
            ItemDef::new("helm", ItemCategory::Armor, 90.0)
                .made_from(&[MaterialFamily::Metallic])
                .with_quality()
                .worn_on(&[BodyLocation::Head], &[ApparelLayer::Overhead]),
        )
        .with_item(
            ItemDef::new("tunic", ItemCategory::Apparel, 30.0)
                .made_from(&[MaterialFamily::Fabric])
                .with_quality()
                .styleable(&["highland", "courtly"])
                .colorable()
                .worn_on(&[BodyLocation::Torso], &[ApparelLayer::Skin]),
        )
        .with_item(
            ItemDef::new("cloak", ItemCategory::Apparel, 45.0)
                .made_from(&[MaterialFamily::Fabric, MaterialFamily::Leathery])
                .with_quality()
                .styleable(&[])
                .colorable()
                .worn_on(&[BodyLocation::Torso], &[ApparelLayer::Outer]),
        )
        .with_item(
            ItemDef::new("boots", ItemCategory::Apparel, 25.0)
                .made_from(&[MaterialFamily::Leathery])
                .worn_on(
                    &[BodyLocation::FootLeft, BodyLocation::FootRight],
                    &[ApparelLayer::Outer],
                ),
        )
        .with_item(ItemDef::new("ration", ItemCategory::Miscellaneous, 4.0).stackable(10))
        .with_item(
            ItemDef::new("healing_draught", ItemCategory::Miscellaneous, 20.0)
                .stackable(5)
                .disposable(),
        )
        .with_condition(ConditionDef::new("old_scar"))
        .with_condition(
            ConditionDef::new("marsh_fever")
                .whole_body()
                .in_pools(&[PoolCategory::AnyIllness]),
        )
        .with_condition(
            ConditionDef::new("grey_cough")
                .whole_body()
                .max_severity(0.6)
                .in_pools(&[PoolCategory::AnyIllness]),
        )
        .with_kind(EntityKindDef::humanlike("soldier"))
}

fn sample_loadout(ignore_budget: bool) -> LoadoutConfig {
    let weapons = CategoryLoadout::pooled(vec![
        GearPoolEntry::new("longbow", 2.0),
        GearPoolEntry::new("crossbow", 1.0),
    ]);

    let melee = CategoryLoadout::advanced(vec![
        SpecificRequirement::in_pool("sword", PoolTag::One, 1.0).material("steel"),
        SpecificRequirement::in_pool("spear", PoolTag::One, 3.0),
    ]);

    let armor = CategoryLoadout::advanced(vec![
        SpecificRequirement::with_chance("helm", 0.6),
        SpecificRequirement::with_chance("mail_shirt", 0.4).quality(QualityTier::Good),
    ]);

    let apparel = CategoryLoadout::advanced(vec![
        SpecificRequirement::always("tunic"),
        SpecificRequirement::always("boots"),
        SpecificRequirement::in_pool("cloak", PoolTag::One, 1.0)
            .color(Color::new(0.35, 0.1, 0.1)),
    ])
    .only_configured();

    let misc = CategoryLoadout::advanced(vec![
        SpecificRequirement::always("ration").count(CountRange::new(2, 6)),
        SpecificRequirement::with_chance("healing_draught", 0.5).count(CountRange::new(1, 2)),
    ]);

    let mut loadout = LoadoutConfig::new()
        .with_category(ItemCategory::Weapon, weapons)
        .with_category(ItemCategory::MeleeWeapon, melee)
        .with_category(ItemCategory::Armor, armor)
        .with_category(ItemCategory::Apparel, apparel)
        .with_category(ItemCategory::Miscellaneous, misc)
        .with_condition(
            ForcedCondition::explicit("old_scar")
                .times_between(CountRange::new(0, 2))
                .chance(0.3),
        )
        .with_condition(
            ForcedCondition::pooled(PoolCategory::AnyIllness)
                .chance(0.2)
                .severity(FloatRange::new(0.1, 0.8)),
        );
    loadout.kind = Some("soldier".into());
    loadout.ignore_budget = ignore_budget;
    loadout.bind_chance = 0.25;
    loadout
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("loadout_engine=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match EngineConfig::load_from_toml(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    config.kind_budgets.entry("soldier".into()).or_insert(KindBudget {
        weapons: FloatRange::new(150.0, 400.0),
        apparel: FloatRange::new(120.0, 500.0),
    });

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = RngSource::seeded(seed);
    tracing::info!("Generating {} entities with seed {}", args.count, seed);

    let catalog = sample_catalog();
    let loadout = sample_loadout(args.ignore_budget);
    let engine = LoadoutEngine::new(&catalog, &config);

    let entities: Vec<Entity> = (0..args.count)
        .map(|_| {
            let mut entity = Entity::new("soldier").with_style("highland");
            if args.in_world {
                entity = entity.in_world();
            }
            engine.apply_loadout(&mut entity, &loadout, &mut rng);
            entity
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entities).unwrap());
}
