//! Loadout Engine - budget-aware gear and condition generation for spawned entities

pub mod catalog;
pub mod core;
pub mod entity;
pub mod loadout;
