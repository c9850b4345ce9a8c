//! Instance materializer
//!
//! Turns a selected candidate into a concrete [`ItemInstance`]: material,
//! quality, style, color, stack size and ownership binding.

use crate::catalog::{DefinitionCatalog, ItemDef, QualityTier};
use crate::core::config::EngineConfig;
use crate::core::error::{LoadoutError, Result};
use crate::core::random::RandomSource;
use crate::core::types::{Color, CountRange, EntityId, ItemDefId, MaterialId, StyleId};
use crate::entity::ItemInstance;
use crate::loadout::config::{GearPoolEntry, LoadoutConfig, SpecificRequirement};
use crate::loadout::precedence::{binding_chain, color_chain, quality_chain, style_chain};

/// Everything a candidate declares about the item it wants
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    pub item: ItemDefId,
    pub material: Option<MaterialId>,
    pub style: Option<StyleId>,
    pub quality: Option<QualityTier>,
    pub color: Option<Color>,
    pub force_bind: bool,
    pub count: CountRange,
}

impl ItemDescriptor {
    /// Descriptor that declares nothing beyond the item
    pub fn bare(item: ItemDefId) -> Self {
        Self {
            item,
            material: None,
            style: None,
            quality: None,
            color: None,
            force_bind: false,
            count: CountRange::exactly(1),
        }
    }
}

impl From<&GearPoolEntry> for ItemDescriptor {
    fn from(entry: &GearPoolEntry) -> Self {
        Self::bare(entry.item.clone())
    }
}

impl From<&SpecificRequirement> for ItemDescriptor {
    fn from(req: &SpecificRequirement) -> Self {
        Self {
            item: req.item.clone(),
            material: req.material.clone(),
            style: req.style.clone(),
            quality: req.quality,
            color: req.color,
            force_bind: req.force_bind,
            count: req.count,
        }
    }
}

/// Who the item is being made for
#[derive(Debug, Clone, Copy)]
pub struct MaterializeContext<'a> {
    pub loadout: &'a LoadoutConfig,
    pub owner: EntityId,
    pub inherited_style: Option<&'a StyleId>,
}

/// Builds item instances from descriptors
pub struct Materializer<'a> {
    catalog: &'a dyn DefinitionCatalog,
    config: &'a EngineConfig,
}

impl<'a> Materializer<'a> {
    pub fn new(catalog: &'a dyn DefinitionCatalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    fn definition(&self, item: &ItemDefId) -> Result<&'a ItemDef> {
        self.catalog
            .item(item)
            .ok_or_else(|| LoadoutError::UnknownItem(item.clone()))
    }

    /// Cost estimate before anything is rolled: the declared material and
    /// quality, else no material and Normal quality, at the smallest
    /// declared stack size.
    pub fn estimate_cost(&self, desc: &ItemDescriptor) -> Result<f32> {
        let def = self.definition(&desc.item)?;
        let material = desc
            .material
            .as_ref()
            .filter(|m| self.catalog.is_material_compatible(&desc.item, m));
        let quality = self
            .catalog
            .supports_quality(&desc.item)
            .then(|| desc.quality.unwrap_or(QualityTier::Normal));

        let unit = self
            .catalog
            .cost(&desc.item, material, quality)
            .ok_or_else(|| LoadoutError::UnknownItem(desc.item.clone()))?;
        let count = desc.count.normalized().min.clamp(1, def.stack_limit.max(1));
        Ok(unit * count as f32)
    }

    /// Build the instance. Fails when the item is unknown or needs a
    /// material and none is compatible.
    pub fn materialize(
        &self,
        desc: &ItemDescriptor,
        ctx: &MaterializeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<ItemInstance> {
        let def = self.definition(&desc.item)?;
        let is_weapon = def.category.is_weapon();

        let material = self.resolve_material(def, desc.material.as_ref(), rng)?;

        let quality = if self.catalog.supports_quality(&desc.item) {
            quality_chain(
                desc.quality,
                ctx.loadout.weapon_quality,
                is_weapon,
                ctx.loadout.quality,
                self.config.default_quality,
            )
            .resolve()
            .map(|r| r.value)
        } else {
            None
        };

        let style = if self.catalog.supports_style(&desc.item) {
            style_chain(
                desc.style.clone().filter(|s| def.accepts_style(s)),
                ctx.inherited_style.filter(|s| def.accepts_style(s)).cloned(),
            )
            .resolve()
            .map(|r| r.value)
        } else {
            None
        };

        let color = if self.catalog.supports_color(&desc.item) {
            color_chain(desc.color, ctx.loadout.color)
                .resolve()
                .map(|r| r.value)
        } else {
            None
        };

        let count = rng
            .next_count(desc.count)
            .clamp(1, def.stack_limit.max(1));

        let unit = self
            .catalog
            .cost(&desc.item, material.as_ref(), quality)
            .ok_or_else(|| LoadoutError::UnknownItem(desc.item.clone()))?;

        let mut instance = ItemInstance::new(desc.item.clone(), def.category, unit * count as f32);
        instance.material = material;
        instance.quality = quality;
        instance.style = style;
        instance.color = color;
        instance.count = count;

        if self.catalog.supports_ownership_binding(&desc.item) {
            // f32::max drops NaN, so a broken ceiling reads as zero
            let ceiling = self.config.max_bind_chance.max(0.0);
            let bind_chance = ctx.loadout.bind_chance.max(0.0).min(ceiling);
            let bind = binding_chain(desc.force_bind, is_weapon, || rng.chance(bind_chance))
                .resolve()
                .is_some_and(|r| r.value);
            if bind {
                instance.bind_to(ctx.owner);
            }
        } else if desc.force_bind {
            tracing::trace!("{} cannot be bound, ignoring bind flag", desc.item);
        }

        Ok(instance)
    }

    fn resolve_material(
        &self,
        def: &ItemDef,
        explicit: Option<&MaterialId>,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<MaterialId>> {
        if let Some(material) = explicit {
            if self.catalog.is_material_compatible(&def.id, material) {
                return Ok(Some(material.clone()));
            }
            tracing::debug!(
                "Material {} not usable for {}, falling back",
                material,
                def.id
            );
        }

        if !self.catalog.requires_material(&def.id) {
            return Ok(None);
        }

        let candidates = self.catalog.compatible_materials(&def.id);
        if candidates.is_empty() {
            return Err(LoadoutError::NoCompatibleMaterial(def.id.clone()));
        }
        Ok(Some(candidates[rng.next_index(candidates.len())].clone()))
    }
}
