//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a materialized item instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemInstanceId(pub Uuid);

impl ItemInstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! def_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

def_id!(
    /// Catalog key of an item definition ("longsword", "duster")
    ItemDefId
);
def_id!(
    /// Catalog key of a material definition ("steel", "leather")
    MaterialId
);
def_id!(
    /// Catalog key of a finish/style
    StyleId
);
def_id!(
    /// Catalog key of a condition (illness, implant, addiction, ...)
    ConditionId
);
def_id!(
    /// Catalog key of an entity kind ("raider", "trader")
    EntityKindId
);

/// Inclusive floating-point range, e.g. a budget or a severity band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn exactly(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Swap reversed bounds so `min <= max`
    pub fn normalized(self) -> Self {
        if self.min > self.max {
            Self { min: self.max, max: self.min }
        } else {
            self
        }
    }

    /// Clamp both bounds to be at least `floor`
    pub fn clamped_min(self, floor: f32) -> Self {
        let r = self.normalized();
        Self {
            min: r.min.max(floor),
            max: r.max.max(floor),
        }
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        Self::exactly(0.0)
    }
}

/// Inclusive integer range, e.g. a stack size or an application count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn exactly(value: u32) -> Self {
        Self { min: value, max: value }
    }

    pub fn normalized(self) -> Self {
        if self.min > self.max {
            Self { min: self.max, max: self.min }
        } else {
            self
        }
    }
}

impl Default for CountRange {
    fn default() -> Self {
        Self::exactly(1)
    }
}

/// RGB color in 0.0..=1.0 channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_range_normalizes() {
        let r = FloatRange::new(10.0, 2.0).normalized();
        assert_eq!(r.min, 2.0);
        assert_eq!(r.max, 10.0);
    }

    #[test]
    fn test_negative_range_clamps_to_zero() {
        let r = FloatRange::new(-50.0, -10.0).clamped_min(0.0);
        assert_eq!(r, FloatRange::exactly(0.0));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ItemDefId::new("longsword").to_string(), "longsword");
        assert_eq!(MaterialId::from("steel").as_str(), "steel");
    }
}
