//! Conditions applied to an entity
//!
//! A condition tracks what it is, where it sits (if anywhere) and how severe it is.

use serde::{Deserialize, Serialize};

use crate::catalog::BodyLocation;
use crate::core::types::ConditionId;

/// A condition on an entity, optionally at a body location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCondition {
    pub condition: ConditionId,
    /// `None` for whole-body conditions
    pub location: Option<BodyLocation>,
    /// 0.0 = none, 1.0 = maximal
    pub severity: f32,
}

impl AppliedCondition {
    pub fn new(condition: ConditionId, location: Option<BodyLocation>, severity: f32) -> Self {
        Self {
            condition,
            location,
            severity,
        }
    }

    /// Same condition at the same place?
    pub fn matches(&self, condition: &ConditionId, location: Option<BodyLocation>) -> bool {
        &self.condition == condition && self.location == location
    }
}
