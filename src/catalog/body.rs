//! Body locations an entity kind can possess
//!
//! Apparel covers locations, conditions attach to them, and an entity that is
//! missing a location cannot wear anything that covers it.

use serde::{Deserialize, Serialize};

/// Body locations (11 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyLocation {
    Head,
    Neck,
    Torso,
    ArmLeft,
    ArmRight,
    HandLeft,
    HandRight,
    LegLeft,
    LegRight,
    FootLeft,
    FootRight,
}

impl BodyLocation {
    /// Returns all body locations
    pub fn all() -> [BodyLocation; 11] {
        [
            BodyLocation::Head,
            BodyLocation::Neck,
            BodyLocation::Torso,
            BodyLocation::ArmLeft,
            BodyLocation::ArmRight,
            BodyLocation::HandLeft,
            BodyLocation::HandRight,
            BodyLocation::LegLeft,
            BodyLocation::LegRight,
            BodyLocation::FootLeft,
            BodyLocation::FootRight,
        ]
    }

    /// Locations lost together with this one (an arm takes its hand with it)
    pub fn dependents(&self) -> &'static [BodyLocation] {
        match self {
            BodyLocation::ArmLeft => &[BodyLocation::HandLeft],
            BodyLocation::ArmRight => &[BodyLocation::HandRight],
            BodyLocation::LegLeft => &[BodyLocation::FootLeft],
            BodyLocation::LegRight => &[BodyLocation::FootRight],
            _ => &[],
        }
    }
}
