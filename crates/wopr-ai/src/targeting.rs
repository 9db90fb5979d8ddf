//! Target scoring and selection, and missile-type choice per target.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use wopr_core::config::MissileTypeSpec;
use wopr_core::constants::*;
use wopr_core::enums::{Difficulty, TargetKind};
use wopr_core::target::{Target, TargetRegistry};
use wopr_core::types::{NationId, TargetId};

/// Strategy state that influences targeting.
#[derive(Debug, Clone, Copy)]
pub struct TargetingContext<'a> {
    pub difficulty: Difficulty,
    pub aggression_level: f64,
    pub base_accuracy: f64,
    /// Names of targets previously missed.
    pub targets_missed: &'a [String],
}

fn kind_bonus(kind: TargetKind) -> f64 {
    match kind {
        TargetKind::CommandCenter => SCORE_COMMAND_CENTER_BONUS,
        TargetKind::MissileSilo => SCORE_MISSILE_SILO_BONUS,
        TargetKind::MilitaryBase => SCORE_MILITARY_BASE_BONUS,
        TargetKind::City => 0.0,
    }
}

/// Priority of a target. Always draws one noise sample.
pub fn score_target<R: Rng + ?Sized>(target: &Target, ctx: &TargetingContext<'_>, rng: &mut R) -> f64 {
    let mut score = target.strategic_value as f64 * SCORE_STRATEGIC_WEIGHT;
    score += (1.0 - target.damage_level()) * SCORE_INTACT_WEIGHT;
    score += kind_bonus(target.kind);

    // Cautious strategies shy away from well-defended targets.
    if ctx.aggression_level < SCORE_CAUTIOUS_AGGRESSION {
        score -= target.defense_level * SCORE_DEFENSE_PENALTY;
    }
    if ctx.targets_missed.iter().any(|name| *name == target.name) {
        score -= SCORE_MISSED_PENALTY;
    }

    score + rng.gen_range(-SCORE_NOISE..=SCORE_NOISE)
}

/// Pick up to `count` intact targets of `enemy`, best first.
///
/// Below maximum difficulty, with probability `1 - base_accuracy` the top
/// pick is swapped for a uniformly random intact target.
pub fn select_targets<R: Rng + ?Sized>(
    targets: &TargetRegistry,
    enemy: &NationId,
    count: usize,
    ctx: &TargetingContext<'_>,
    rng: &mut R,
) -> Vec<TargetId> {
    let candidates: Vec<(TargetId, &Target)> = targets
        .by_nation(Some(enemy))
        .filter(|(_, t)| t.is_intact())
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, TargetId)> = candidates
        .iter()
        .map(|(id, target)| (score_target(target, ctx, rng), *id))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut selected: Vec<TargetId> = scored.into_iter().take(count).map(|(_, id)| id).collect();

    if !selected.is_empty()
        && !ctx.difficulty.is_maximum()
        && rng.gen::<f64>() > ctx.base_accuracy
    {
        if let Some((id, _)) = candidates.choose(rng) {
            tracing::debug!(from = selected[0].0, to = id.0, "targeting error");
            selected[0] = *id;
        }
    }

    selected
}

/// Choose a catalog entry for `target`.
///
/// Only types whose range covers `strategic_value × 10` qualify. Candidates
/// are ranked by cost-effectiveness; high-value targets get the best one,
/// everything else gets the median so the best stock is conserved.
pub fn select_missile_type(
    target: &Target,
    catalog: &BTreeMap<String, Arc<MissileTypeSpec>>,
) -> Option<String> {
    let required_range = target.strategic_value as f64 * RANGE_ESTIMATE_PER_VALUE;

    let mut suitable: Vec<(f64, &String)> = catalog
        .iter()
        .filter(|(_, spec)| spec.max_range >= required_range)
        .map(|(name, spec)| (spec.effectiveness(), name))
        .collect();
    if suitable.is_empty() {
        return None;
    }

    suitable.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.1.cmp(a.1))
    });

    let pick = if target.strategic_value > BEST_MISSILE_MIN_VALUE {
        0
    } else {
        suitable.len() / 2
    };
    suitable.get(pick).map(|(_, name)| (*name).clone())
}
