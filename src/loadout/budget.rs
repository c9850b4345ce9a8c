//! Budget allocator
//!
//! One ceiling is sampled per equip pass. Candidates are checked against it
//! with an estimated cost before they are materialized; the actual cost is
//! committed only once the item lands on the entity.

use crate::core::random::RandomSource;
use crate::core::types::FloatRange;

/// Outcome of a reservation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    Accept,
    Reject,
}

impl Reservation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Reservation::Accept)
    }
}

/// Running spend against a fixed ceiling for a single pass
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLedger {
    /// `None` when the budget is ignored
    ceiling: Option<f32>,
    spend: f32,
}

impl BudgetLedger {
    /// Ledger with an explicit ceiling and starting spend
    pub fn new(ceiling: f32, spend: f32) -> Self {
        Self {
            ceiling: Some(ceiling.max(0.0)),
            spend: spend.max(0.0),
        }
    }

    /// Ledger that accepts everything
    pub fn unlimited(spend: f32) -> Self {
        Self {
            ceiling: None,
            spend: spend.max(0.0),
        }
    }

    /// Sample a ceiling from `range`. Ranges reaching below zero are clamped
    /// to zero rather than rejected.
    pub fn sample(
        range: FloatRange,
        ignore_budget: bool,
        spend: f32,
        rng: &mut dyn RandomSource,
    ) -> Self {
        if ignore_budget {
            return Self::unlimited(spend);
        }

        let normalized = range.normalized();
        if normalized.min < 0.0 {
            tracing::warn!(
                "Budget range {:?} reaches below zero, clamping to non-negative",
                range
            );
        }
        let ceiling = rng.next_in_range(normalized.clamped_min(0.0));
        Self::new(ceiling, spend)
    }

    pub fn ceiling(&self) -> Option<f32> {
        self.ceiling
    }

    pub fn spend(&self) -> f32 {
        self.spend
    }

    /// Room left before the ceiling; infinite when unlimited
    pub fn remaining(&self) -> f32 {
        match self.ceiling {
            Some(ceiling) => (ceiling - self.spend).max(0.0),
            None => f32::INFINITY,
        }
    }

    /// Would a candidate costing `estimate` fit? Does not change the spend.
    pub fn try_reserve(&self, estimate: f32) -> Reservation {
        match self.ceiling {
            None => Reservation::Accept,
            Some(ceiling) if self.spend + estimate.max(0.0) <= ceiling => Reservation::Accept,
            Some(_) => Reservation::Reject,
        }
    }

    /// Record the actual cost of a committed item
    pub fn commit(&mut self, actual: f32) {
        self.spend += actual.max(0.0);
    }
}
