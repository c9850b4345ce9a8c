use thiserror::Error;

use crate::core::types::{ConditionId, EntityKindId, ItemDefId};

#[derive(Error, Debug)]
pub enum LoadoutError {
    #[error("Unknown item definition: {0}")]
    UnknownItem(ItemDefId),

    #[error("Unknown condition definition: {0}")]
    UnknownCondition(ConditionId),

    #[error("No compatible material for {0}")]
    NoCompatibleMaterial(ItemDefId),

    #[error("{kind} cannot use {item}")]
    IncompatibleItem { kind: EntityKindId, item: ItemDefId },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LoadoutError>;
