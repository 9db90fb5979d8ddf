//! Strategic assessment of the board from one side's point of view.

use serde::{Deserialize, Serialize};

use wopr_core::missile::MissileRegistry;
use wopr_core::target::TargetRegistry;
use wopr_core::types::NationId;

/// Snapshot of the board as seen by the adversary at the start of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    /// Incoming missiles per own intact target.
    pub threat_level: f64,
    /// Relative intact-target lead over the opponent. 1.0 when the opponent
    /// has nothing left.
    pub advantage: f64,
    /// Opponent launches per elapsed turn.
    pub player_aggression: f64,
    pub own_targets_remaining: usize,
    pub enemy_targets_remaining: usize,
    pub incoming_missiles: usize,
}

impl Situation {
    /// Mean intact-target count of the two sides.
    pub fn intact_average(&self) -> f64 {
        (self.own_targets_remaining + self.enemy_targets_remaining) as f64 / 2.0
    }
}

/// Read the registries from `own`'s perspective.
pub fn analyze_situation(
    targets: &TargetRegistry,
    missiles: &MissileRegistry,
    own: &NationId,
    enemy: &NationId,
    enemy_missiles_launched: u32,
    turns_elapsed: u32,
) -> Situation {
    let own_intact = targets.intact_count(Some(own));
    let enemy_intact = targets.intact_count(Some(enemy));
    let incoming = missiles.incoming(own).len();

    let threat_level = incoming as f64 / own_intact.max(1) as f64;
    let advantage = if enemy_intact > 0 {
        (own_intact as f64 - enemy_intact as f64) / enemy_intact as f64
    } else {
        1.0
    };
    let player_aggression = enemy_missiles_launched as f64 / turns_elapsed.max(1) as f64;

    Situation {
        threat_level,
        advantage,
        player_aggression,
        own_targets_remaining: own_intact,
        enemy_targets_remaining: enemy_intact,
        incoming_missiles: incoming,
    }
}
