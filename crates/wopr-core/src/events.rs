//! Events emitted by a session for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{MissileId, NationId, TargetId};

/// Something the presentation layer may want to show or sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MissileLaunched {
        missile: MissileId,
        owner: NationId,
        missile_type: String,
        target: TargetId,
    },
    MissileIntercepted {
        missile: MissileId,
        owner: NationId,
    },
    /// A detonated missile was resolved against the nearest target.
    ImpactResolved {
        missile: MissileId,
        target: TargetId,
        outcome: ImpactOutcome,
        casualties: u64,
    },
    TargetDestroyed {
        target: TargetId,
        name: String,
        by: NationId,
    },
    AiTurn {
        action: AiAction,
        message: String,
        launch_count: u32,
    },
    GameOver {
        result: GameResult,
    },
}

impl GameEvent {
    /// Severity for alert queues.
    pub fn level(&self) -> AlertLevel {
        match self {
            GameEvent::TargetDestroyed { .. } | GameEvent::GameOver { .. } => AlertLevel::Critical,
            GameEvent::MissileLaunched { .. } | GameEvent::ImpactResolved { .. } => {
                AlertLevel::Warning
            }
            GameEvent::MissileIntercepted { .. } | GameEvent::AiTurn { .. } => AlertLevel::Info,
        }
    }
}
