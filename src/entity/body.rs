//! Physical body of an entity: lost locations and active conditions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::BodyLocation;
use crate::core::types::ConditionId;
use crate::entity::conditions::AppliedCondition;

/// Per-entity deviations from its kind's body, plus its conditions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyState {
    /// Locations this individual has lost
    pub missing: BTreeSet<BodyLocation>,
    pub conditions: Vec<AppliedCondition>,
}

impl BodyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a location as lost, along with everything attached to it
    pub fn lose(&mut self, location: BodyLocation) {
        self.missing.insert(location);
        self.missing.extend(location.dependents().iter().copied());
    }

    /// The kind's body minus what this individual has lost
    pub fn structure(&self, kind_body: &BTreeSet<BodyLocation>) -> BTreeSet<BodyLocation> {
        kind_body.difference(&self.missing).copied().collect()
    }

    pub fn has_condition(&self, condition: &ConditionId, location: Option<BodyLocation>) -> bool {
        self.conditions.iter().any(|c| c.matches(condition, location))
    }

    /// Add a condition unless the identical condition/location pair exists.
    /// Returns whether it was added.
    pub fn add_condition(&mut self, applied: AppliedCondition) -> bool {
        if self.has_condition(&applied.condition, applied.location) {
            return false;
        }
        self.conditions.push(applied);
        true
    }
}
