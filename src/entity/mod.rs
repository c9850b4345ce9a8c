//! Entities receiving a loadout
//!
//! The engine writes straight onto an [`Entity`]: the primary weapon slot,
//! worn apparel, carried inventory and body conditions.

pub mod body;
pub mod conditions;
pub mod item;

pub use body::BodyState;
pub use conditions::AppliedCondition;
pub use item::ItemInstance;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCategory;
use crate::core::types::{EntityId, EntityKindId, StyleId};

/// What happened to an item the entity let go of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Left in the world next to the entity
    Dropped,
    /// Gone for good
    Destroyed,
}

/// A single entity instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKindId,
    pub body: BodyState,
    /// Active weapon, ranged or melee
    pub primary: Option<ItemInstance>,
    pub worn: Vec<ItemInstance>,
    pub inventory: Vec<ItemInstance>,
    /// Items dropped into the world at the entity's position
    pub dropped: Vec<ItemInstance>,
    /// Can released items be dropped, or are they destroyed?
    pub can_drop_items: bool,
    /// Style inherited by styleable items that name none
    pub preferred_style: Option<StyleId>,
}

impl Entity {
    pub fn new(kind: impl Into<EntityKindId>) -> Self {
        Self {
            id: EntityId::new(),
            kind: kind.into(),
            body: BodyState::new(),
            primary: None,
            worn: Vec::new(),
            inventory: Vec::new(),
            dropped: Vec::new(),
            can_drop_items: false,
            preferred_style: None,
        }
    }

    /// Entity placed in the world, so released items can be dropped
    pub fn in_world(mut self) -> Self {
        self.can_drop_items = true;
        self
    }

    pub fn with_style(mut self, style: impl Into<StyleId>) -> Self {
        self.preferred_style = Some(style.into());
        self
    }

    /// Items currently held in a category
    pub fn items_in(&self, category: ItemCategory) -> Vec<&ItemInstance> {
        let held: Box<dyn Iterator<Item = &ItemInstance>> = if category.is_weapon() {
            Box::new(self.primary.iter())
        } else if category.is_worn() {
            Box::new(self.worn.iter())
        } else {
            Box::new(self.inventory.iter())
        };
        held.filter(|i| i.category == category).collect()
    }

    /// Total market value held across `categories`
    pub fn value_in(&self, categories: &[ItemCategory]) -> f32 {
        categories
            .iter()
            .flat_map(|c| self.items_in(*c))
            .map(|i| i.market_value)
            .sum()
    }

    /// Remove every item in `category` matching `pred`
    pub fn take_items(
        &mut self,
        category: ItemCategory,
        mut pred: impl FnMut(&ItemInstance) -> bool,
    ) -> Vec<ItemInstance> {
        if category.is_weapon() {
            let take = self
                .primary
                .as_ref()
                .is_some_and(|i| i.category == category && pred(i));
            return if take {
                self.primary.take().into_iter().collect()
            } else {
                Vec::new()
            };
        }

        let container = if category.is_worn() {
            &mut self.worn
        } else {
            &mut self.inventory
        };
        let (taken, kept): (Vec<_>, Vec<_>) = container
            .drain(..)
            .partition(|i| i.category == category && pred(i));
        *container = kept;
        taken
    }

    /// Let go of an item: dropped if the entity can drop items and the
    /// item survives dropping, destroyed otherwise.
    pub fn release(&mut self, item: ItemInstance, disposable: bool) -> Release {
        if self.can_drop_items && !disposable {
            self.dropped.push(item);
            Release::Dropped
        } else {
            Release::Destroyed
        }
    }

    /// Total number of items held, worn or carried
    pub fn item_count(&self) -> usize {
        self.primary.iter().count() + self.worn.len() + self.inventory.len()
    }
}
