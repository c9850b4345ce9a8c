//! Ordered override chains
//!
//! Quality, style, color and ownership binding each come from a stack of
//! possible sources. A chain lists them top to bottom; the first layer that
//! holds a value wins.

use crate::catalog::QualityTier;
use crate::core::types::{Color, StyleId};

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideSource {
    /// Set on the requirement itself
    Item,
    /// Category-wide weapon override
    WeaponCategory,
    /// Category-wide override
    Category,
    /// Inherited from the entity
    Entity,
    /// Random roll
    Roll,
    /// Engine default
    Default,
}

/// A value together with the layer that supplied it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: OverrideSource,
}

/// First-non-empty-wins stack of optional layers
#[derive(Debug, Clone)]
pub struct PrecedenceChain<T> {
    layers: Vec<(OverrideSource, Option<T>)>,
}

impl<T> Default for PrecedenceChain<T> {
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<T> PrecedenceChain<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer below the existing ones
    pub fn then(mut self, source: OverrideSource, value: Option<T>) -> Self {
        self.layers.push((source, value));
        self
    }

    /// Append a layer computed only if no earlier layer holds a value
    pub fn then_with(self, source: OverrideSource, value: impl FnOnce() -> Option<T>) -> Self {
        if self.is_settled() {
            self
        } else {
            let computed = value();
            self.then(source, computed)
        }
    }

    /// Does some layer already hold a value?
    pub fn is_settled(&self) -> bool {
        self.layers.iter().any(|(_, v)| v.is_some())
    }

    pub fn resolve(self) -> Option<Resolved<T>> {
        self.layers
            .into_iter()
            .find_map(|(source, value)| value.map(|value| Resolved { value, source }))
    }
}

/// Item > weapon override (weapons only) > category override > default
pub fn quality_chain(
    item: Option<QualityTier>,
    weapon_override: Option<QualityTier>,
    is_weapon: bool,
    category_override: Option<QualityTier>,
    default: QualityTier,
) -> PrecedenceChain<QualityTier> {
    PrecedenceChain::new()
        .then(OverrideSource::Item, item)
        .then(
            OverrideSource::WeaponCategory,
            weapon_override.filter(|_| is_weapon),
        )
        .then(OverrideSource::Category, category_override)
        .then(OverrideSource::Default, Some(default))
}

/// Item > category override
pub fn color_chain(item: Option<Color>, category_override: Option<Color>) -> PrecedenceChain<Color> {
    PrecedenceChain::new()
        .then(OverrideSource::Item, item)
        .then(OverrideSource::Category, category_override)
}

/// Item > entity's preferred style
pub fn style_chain(item: Option<StyleId>, inherited: Option<StyleId>) -> PrecedenceChain<StyleId> {
    PrecedenceChain::new()
        .then(OverrideSource::Item, item)
        .then(OverrideSource::Entity, inherited)
}

/// Explicit bind flag > bind-chance roll (weapons only). The roll runs only
/// when the flag is unset, so a forced binding consumes no draw.
pub fn binding_chain(
    force_bind: bool,
    is_weapon: bool,
    roll: impl FnOnce() -> bool,
) -> PrecedenceChain<bool> {
    PrecedenceChain::new()
        .then(OverrideSource::Item, force_bind.then_some(true))
        .then_with(OverrideSource::Roll, || {
            if is_weapon {
                Some(roll())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_layer_wins() {
        let resolved = PrecedenceChain::new()
            .then(OverrideSource::Item, None)
            .then(OverrideSource::Category, Some(2))
            .then(OverrideSource::Default, Some(3))
            .resolve()
            .unwrap();
        assert_eq!(resolved.value, 2);
        assert_eq!(resolved.source, OverrideSource::Category);
    }

    #[test]
    fn test_empty_chain_resolves_to_none() {
        let chain: PrecedenceChain<u8> = PrecedenceChain::new().then(OverrideSource::Item, None);
        assert!(chain.resolve().is_none());
    }

    #[test]
    fn test_quality_item_beats_overrides() {
        let resolved = quality_chain(
            Some(QualityTier::Poor),
            Some(QualityTier::Legendary),
            true,
            Some(QualityTier::Good),
            QualityTier::Normal,
        )
        .resolve()
        .unwrap();
        assert_eq!(resolved.value, QualityTier::Poor);
        assert_eq!(resolved.source, OverrideSource::Item);
    }

    #[test]
    fn test_weapon_override_only_for_weapons() {
        let weapon = quality_chain(
            None,
            Some(QualityTier::Masterwork),
            true,
            Some(QualityTier::Good),
            QualityTier::Normal,
        )
        .resolve()
        .unwrap();
        assert_eq!(weapon.value, QualityTier::Masterwork);

        let apparel = quality_chain(
            None,
            Some(QualityTier::Masterwork),
            false,
            Some(QualityTier::Good),
            QualityTier::Normal,
        )
        .resolve()
        .unwrap();
        assert_eq!(apparel.value, QualityTier::Good);
        assert_eq!(apparel.source, OverrideSource::Category);
    }

    #[test]
    fn test_quality_falls_back_to_default() {
        let resolved = quality_chain(None, None, false, None, QualityTier::Normal)
            .resolve()
            .unwrap();
        assert_eq!(resolved.value, QualityTier::Normal);
        assert_eq!(resolved.source, OverrideSource::Default);
    }

    #[test]
    fn test_color_item_beats_category() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);
        assert_eq!(color_chain(Some(red), Some(blue)).resolve().unwrap().value, red);
        assert_eq!(color_chain(None, Some(blue)).resolve().unwrap().value, blue);
        assert!(color_chain(None, None).resolve().is_none());
    }

    #[test]
    fn test_style_inherits_from_entity() {
        let resolved = style_chain(None, Some(StyleId::from("tribal"))).resolve().unwrap();
        assert_eq!(resolved.value, StyleId::from("tribal"));
        assert_eq!(resolved.source, OverrideSource::Entity);
    }

    #[test]
    fn test_forced_binding_skips_roll() {
        let mut rolled = false;
        let resolved = binding_chain(true, true, || {
            rolled = true;
            false
        })
        .resolve()
        .unwrap();
        assert!(resolved.value);
        assert!(!rolled);
    }

    #[test]
    fn test_binding_roll_for_weapons_only() {
        assert!(binding_chain(false, true, || true).resolve().unwrap().value);
        assert!(binding_chain(false, false, || true).resolve().is_none());
    }
}
