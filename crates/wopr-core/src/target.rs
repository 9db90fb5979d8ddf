//! Strategic targets, damage resolution, and the per-session target registry.
//!
//! Damage resolution is a three-stage filter: point defenses may remove part
//! of the salvo, each surviving warhead rolls against accuracy, and landed
//! warheads feed a saturating damage/casualty curve. All randomness comes
//! from the caller's generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{TargetPlacement, TargetTypeSpec};
use crate::constants::*;
use crate::enums::{ImpactOutcome, TargetKind, TargetStatus};
use crate::types::{NationId, Position, TargetId};

/// A fixed strategic asset. Damage and casualties only ever grow, and
/// `destroyed` is set exactly when damage reaches `DESTROYED_THRESHOLD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
    pub position: Position,
    pub population: u64,
    pub strategic_value: u32,
    pub defense_level: f64,
    damage_level: f64,
    casualties: u64,
    destroyed: bool,
    hit_count: u32,
}

/// Result of one attack against a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub outcome: ImpactOutcome,
    pub destroyed: bool,
    /// Warheads removed by point defenses.
    pub intercepted: u32,
    /// Warheads that landed.
    pub hits: u32,
    /// Casualties caused by this attack alone.
    pub casualties: u64,
    pub damage_level: f64,
    pub total_casualties: u64,
    pub message: String,
}

impl ImpactReport {
    pub fn is_hit(&self) -> bool {
        self.outcome == ImpactOutcome::Hit
    }
}

impl Target {
    pub fn new(
        name: impl Into<String>,
        kind: TargetKind,
        position: Position,
        population: u64,
        strategic_value: u32,
        defense_level: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            population,
            strategic_value,
            defense_level: defense_level.clamp(0.0, 1.0),
            damage_level: 0.0,
            casualties: 0,
            destroyed: false,
            hit_count: 0,
        }
    }

    /// Build a target from a map placement and its type's defaults.
    pub fn from_placement(placement: &TargetPlacement, spec: &TargetTypeSpec) -> Self {
        Self::new(
            placement.name.clone(),
            placement.kind,
            Position::new(placement.x, placement.y),
            spec.population,
            spec.strategic_value,
            spec.defense_level,
        )
    }

    pub fn damage_level(&self) -> f64 {
        self.damage_level
    }

    pub fn casualties(&self) -> u64 {
        self.casualties
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_intact(&self) -> bool {
        !self.destroyed
    }

    /// Total warheads that have landed on this target.
    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn status(&self) -> TargetStatus {
        if self.destroyed {
            TargetStatus::Destroyed
        } else if self.damage_level > STATUS_CRITICAL_THRESHOLD {
            TargetStatus::Critical
        } else if self.damage_level > STATUS_DAMAGED_THRESHOLD {
            TargetStatus::Damaged
        } else if self.damage_level > 0.0 {
            TargetStatus::Hit
        } else {
            TargetStatus::Intact
        }
    }

    /// Resolve an attack of `warheads` warheads at the given per-warhead accuracy.
    pub fn take_damage<R: Rng + ?Sized>(
        &mut self,
        warheads: u32,
        accuracy: f64,
        rng: &mut R,
    ) -> ImpactReport {
        if self.destroyed {
            return self.report(
                ImpactOutcome::AlreadyDestroyed,
                0,
                0,
                0,
                format!("{} is already destroyed", self.name),
            );
        }

        let mut remaining = warheads;
        let mut intercepted = 0;

        // Point defenses. A saturated defense stops the whole salvo.
        let defense = self.defense_level.clamp(0.0, 1.0);
        if remaining > 0 && rng.gen_bool(defense) {
            intercepted = if defense >= 1.0 {
                remaining
            } else {
                rng.gen_range(1..=remaining)
            };
            remaining -= intercepted;
            if remaining == 0 {
                return self.report(
                    ImpactOutcome::FullyIntercepted,
                    intercepted,
                    0,
                    0,
                    format!(
                        "Defense systems intercepted all warheads targeting {}",
                        self.name
                    ),
                );
            }
        }

        let accuracy = accuracy.clamp(0.0, 1.0);
        let hits = (0..remaining).filter(|_| rng.gen_bool(accuracy)).count() as u32;

        if hits == 0 {
            return self.report(
                ImpactOutcome::AllMissed,
                intercepted,
                0,
                0,
                format!("All warheads missed {}", self.name),
            );
        }

        let increment = (hits as f64 * DAMAGE_PER_HIT).min(1.0);
        self.damage_level = (self.damage_level + increment).min(1.0);
        self.hit_count += hits;

        let exposure = 1.0 - self.damage_level + increment;
        let raw = self.population as f64 * increment * CASUALTY_RATE * exposure;
        let headroom = self.population.saturating_sub(self.casualties);
        let new_casualties = (raw.max(0.0).floor() as u64).min(headroom);
        self.casualties += new_casualties;

        if self.damage_level >= DESTROYED_THRESHOLD {
            self.destroyed = true;
        }

        let message = if self.destroyed {
            format!(
                "{} has been DESTROYED! {} casualties",
                self.name, self.casualties
            )
        } else {
            format!(
                "{} hit by {} warhead(s). Damage: {}%",
                self.name,
                hits,
                (self.damage_level * 100.0) as u32
            )
        };

        self.report(
            ImpactOutcome::Hit,
            intercepted,
            hits,
            new_casualties,
            message,
        )
    }

    fn report(
        &self,
        outcome: ImpactOutcome,
        intercepted: u32,
        hits: u32,
        casualties: u64,
        message: String,
    ) -> ImpactReport {
        ImpactReport {
            outcome,
            destroyed: outcome == ImpactOutcome::Hit && self.destroyed,
            intercepted,
            hits,
            casualties,
            damage_level: self.damage_level,
            total_casualties: self.casualties,
            message,
        }
    }
}

/// Aggregate figures over a set of targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetStats {
    pub total_targets: usize,
    pub destroyed: usize,
    pub intact: usize,
    pub total_casualties: u64,
    pub total_population: u64,
    pub destruction_rate: f64,
}

/// All targets of one session, grouped by nation. Iteration order is
/// registration order, which is also the tie-break for nearest queries.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    owners: Vec<NationId>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, nation: NationId, target: Target) -> TargetId {
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(target);
        self.owners.push(nation);
        id
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.targets.get_mut(id.0 as usize)
    }

    /// Nation that owns a target.
    pub fn owner(&self, id: TargetId) -> Option<&NationId> {
        self.owners.get(id.0 as usize)
    }

    /// Every target with its id, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &Target)> {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, t)| (TargetId(i as u32), t))
    }

    /// Targets of one nation (or all, when `nation` is `None`).
    pub fn by_nation<'a>(
        &'a self,
        nation: Option<&'a NationId>,
    ) -> impl Iterator<Item = (TargetId, &'a Target)> + 'a {
        self.iter()
            .filter(move |(id, _)| nation.map_or(true, |n| self.owners[id.0 as usize] == *n))
    }

    pub fn find_by_name(&self, name: &str) -> Option<(TargetId, &Target)> {
        self.iter().find(|(_, t)| t.name == name)
    }

    pub fn intact(&self, nation: Option<&NationId>) -> Vec<TargetId> {
        self.by_nation(nation)
            .filter(|(_, t)| t.is_intact())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn destroyed(&self, nation: Option<&NationId>) -> Vec<TargetId> {
        self.by_nation(nation)
            .filter(|(_, t)| t.is_destroyed())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn intact_count(&self, nation: Option<&NationId>) -> usize {
        self.by_nation(nation).filter(|(_, t)| t.is_intact()).count()
    }

    /// Intact targets whose strategic value is at least `min_value`
    /// (`HIGH_VALUE_MIN_STRATEGIC_VALUE` when omitted).
    pub fn high_value(&self, nation: Option<&NationId>, min_value: Option<u32>) -> Vec<TargetId> {
        let min_value = min_value.unwrap_or(HIGH_VALUE_MIN_STRATEGIC_VALUE);
        self.by_nation(nation)
            .filter(|(_, t)| t.is_intact() && t.strategic_value >= min_value)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn total_casualties(&self, nation: Option<&NationId>) -> u64 {
        self.by_nation(nation).map(|(_, t)| t.casualties()).sum()
    }

    pub fn total_population(&self, nation: Option<&NationId>) -> u64 {
        self.by_nation(nation).map(|(_, t)| t.population).sum()
    }

    /// Percentage (0-100) of targets destroyed. Zero for an empty set.
    pub fn destruction_percentage(&self, nation: Option<&NationId>) -> f64 {
        let (total, destroyed) = self
            .by_nation(nation)
            .fold((0usize, 0usize), |(total, destroyed), (_, t)| {
                (total + 1, destroyed + usize::from(t.is_destroyed()))
            });
        if total == 0 {
            0.0
        } else {
            destroyed as f64 / total as f64 * 100.0
        }
    }

    /// Nearest target to a point. The first target at the minimal distance wins.
    pub fn nearest(
        &self,
        point: &Position,
        nation: Option<&NationId>,
        intact_only: bool,
    ) -> Option<TargetId> {
        let mut best: Option<(TargetId, f64)> = None;
        for (id, target) in self.by_nation(nation) {
            if intact_only && target.is_destroyed() {
                continue;
            }
            let distance = target.position.distance_to(point);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn statistics(&self, nation: Option<&NationId>) -> TargetStats {
        TargetStats {
            total_targets: self.by_nation(nation).count(),
            destroyed: self.destroyed(nation).len(),
            intact: self.intact_count(nation),
            total_casualties: self.total_casualties(nation),
            total_population: self.total_population(nation),
            destruction_rate: self.destruction_percentage(nation),
        }
    }
}
