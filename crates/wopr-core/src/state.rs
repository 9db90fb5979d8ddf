//! Read-only views handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::missile::MissileStats;
use crate::target::TargetStats;
use crate::types::{MissileId, NationId, SimTime, TargetId};

/// Arsenal and score of one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideView {
    pub name: String,
    pub nation: NationId,
    pub missiles_remaining: u32,
    pub defenses_remaining: u32,
    pub missiles_launched: u32,
    pub targets_destroyed: u32,
    pub score: u32,
}

/// The adversary's visible strategic state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiView {
    pub missiles_remaining: u32,
    pub defenses_remaining: u32,
    pub targets_hit: usize,
    pub targets_missed: usize,
    pub aggression_level: f64,
    pub base_accuracy: f64,
    pub turn_count: u32,
}

/// Aggregate counters for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub time: SimTime,
    pub state: GameState,
    pub result: Option<GameResult>,
    pub total_casualties: u64,
    pub total_missiles_launched: usize,
    pub player: SideView,
    /// Launch and kill record of the adversary's side.
    pub opponent: Option<SideView>,
    pub ai: Option<AiView>,
    pub targets: TargetStats,
    pub missiles: MissileStats,
}

/// What the adversary did on its turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTurnReport {
    pub action: AiAction,
    pub message: String,
    /// Targets picked for attack, in selection order.
    pub targets_attacked: Vec<TargetId>,
    /// Planned salvo size.
    pub launch_count: u32,
    /// Missiles actually put in the air.
    pub launched: Vec<MissileId>,
    /// Incoming missiles knocked down by a defend action.
    pub intercepted: Vec<MissileId>,
}

impl AiTurnReport {
    pub fn idle(action: AiAction, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
            targets_attacked: Vec::new(),
            launch_count: 0,
            launched: Vec::new(),
            intercepted: Vec::new(),
        }
    }
}
