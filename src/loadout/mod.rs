//! Loadout generation
//!
//! Selection, budgeting, materialization and commit of generated gear, plus
//! forced condition injection. [`LoadoutEngine`] is the entry point.

pub mod budget;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod equip;
pub mod materialize;
pub mod precedence;
pub mod selection;

pub use budget::{BudgetLedger, Reservation};
pub use conditions::ConditionInjector;
pub use config::{
    CategoryLoadout, ConditionSource, ForcedCondition, GearPoolEntry, ItemCategory, LoadoutConfig,
    PoolCategory, PoolTag, SelectionMode, SpecificRequirement,
};
pub use engine::LoadoutEngine;
pub use equip::{EquipCoordinator, Pass, PassReport};
pub use materialize::{ItemDescriptor, MaterializeContext, Materializer};
pub use precedence::{OverrideSource, PrecedenceChain, Resolved};
