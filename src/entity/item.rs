//! Concrete item instances

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemCategory, QualityTier};
use crate::core::types::{Color, EntityId, ItemDefId, ItemInstanceId, MaterialId, StyleId};

/// A materialized item held, worn or carried by an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: ItemInstanceId,
    pub def: ItemDefId,
    pub category: ItemCategory,
    pub material: Option<MaterialId>,
    /// `None` for items without a quality dimension
    pub quality: Option<QualityTier>,
    pub style: Option<StyleId>,
    pub color: Option<Color>,
    /// Stack size
    pub count: u32,
    /// Market value of the whole stack
    pub market_value: f32,
    /// Owner this item is bound to ("biocoded")
    pub bound_to: Option<EntityId>,
}

impl ItemInstance {
    /// Bare instance with no material, quality, style, color or binding
    pub fn new(def: ItemDefId, category: ItemCategory, market_value: f32) -> Self {
        Self {
            id: ItemInstanceId::new(),
            def,
            category,
            material: None,
            quality: None,
            style: None,
            color: None,
            count: 1,
            market_value,
            bound_to: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound_to.is_some()
    }

    /// Remove the binding, returning the previous owner
    pub fn unbind(&mut self) -> Option<EntityId> {
        self.bound_to.take()
    }

    /// Bind to `owner`. An existing binding is removed first, even when it
    /// already names the same owner. Returns the previous owner.
    pub fn bind_to(&mut self, owner: EntityId) -> Option<EntityId> {
        let previous = self.unbind();
        self.bound_to = Some(owner);
        previous
    }
}
