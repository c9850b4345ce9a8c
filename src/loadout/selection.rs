//! Selection engine
//!
//! Weighted picks for simple pools and numbered requirement pools, plus
//! independent resolution of always-take and chance-gated requirements.

use crate::core::random::RandomSource;
use crate::loadout::config::{GearPoolEntry, PoolTag, SelectionMode, SpecificRequirement};

/// Pick one candidate with probability proportional to its weight.
///
/// Negative weights count as zero. When the total weight is not positive the
/// pick is uniform. If float drift lets the cumulative walk run off the end,
/// the last candidate is returned. Only an empty slice yields `None`.
pub fn pick_weighted<'a, T>(
    candidates: &[&'a T],
    weight_of: impl Fn(&T) -> f32,
    rng: &mut dyn RandomSource,
) -> Option<&'a T> {
    let last = *candidates.last()?;

    let total: f32 = candidates.iter().map(|c| weight_of(*c).max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return Some(candidates[rng.next_index(candidates.len())]);
    }

    let roll = rng.next_f32() * total;
    let mut cumulative = 0.0;
    for candidate in candidates {
        cumulative += weight_of(*candidate).max(0.0);
        if cumulative > roll {
            return Some(*candidate);
        }
    }

    Some(last)
}

/// Resolve a simple gear pool to at most one entry, considering only
/// entries that pass `eligible`.
pub fn resolve_pool<'a>(
    pool: &'a [GearPoolEntry],
    eligible: impl Fn(&GearPoolEntry) -> bool,
    rng: &mut dyn RandomSource,
) -> Option<&'a GearPoolEntry> {
    let candidates: Vec<&GearPoolEntry> = pool.iter().filter(|e| eligible(*e)).collect();
    pick_weighted(&candidates, |e| e.weight, rng)
}

/// Always-take entries, then chance-gated entries whose roll succeeds.
/// Each entry is evaluated once, in configuration order within its group.
pub fn resolve_independent<'a>(
    requirements: &'a [SpecificRequirement],
    rng: &mut dyn RandomSource,
) -> Vec<&'a SpecificRequirement> {
    let mut chosen: Vec<&SpecificRequirement> = requirements
        .iter()
        .filter(|r| r.mode == SelectionMode::AlwaysTake)
        .collect();

    for req in requirements
        .iter()
        .filter(|r| r.mode == SelectionMode::RandomChance)
    {
        if rng.chance(req.chance) {
            chosen.push(req);
        }
    }

    chosen
}

/// At most one winner from a numbered pool. Competition weight is
/// `weight * chance`.
pub fn resolve_numbered_pool<'a>(
    requirements: &'a [SpecificRequirement],
    pool: PoolTag,
    eligible: impl Fn(&SpecificRequirement) -> bool,
    rng: &mut dyn RandomSource,
) -> Option<&'a SpecificRequirement> {
    let candidates: Vec<&SpecificRequirement> = requirements
        .iter()
        .filter(|r| r.mode == SelectionMode::FromPool(pool) && eligible(*r))
        .collect();
    pick_weighted(&candidates, SpecificRequirement::pool_weight, rng)
}

/// Full advanced-list resolution: always-take, successful chance rolls, then
/// one winner each from pools 1 through 4. Empty pools are skipped.
pub fn resolve_requirements<'a>(
    requirements: &'a [SpecificRequirement],
    eligible: impl Fn(&SpecificRequirement) -> bool,
    rng: &mut dyn RandomSource,
) -> Vec<&'a SpecificRequirement> {
    let mut chosen = resolve_independent(requirements, rng);
    for pool in PoolTag::all() {
        if let Some(winner) = resolve_numbered_pool(requirements, pool, &eligible, rng) {
            chosen.push(winner);
        }
    }
    chosen
}
