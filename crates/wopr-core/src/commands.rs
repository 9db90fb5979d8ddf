//! Player commands sent from the presentation layer to a session, and
//! the responses they produce.

use serde::{Deserialize, Serialize};

use crate::enums::{GameResult, GameState};
use crate::state::{AiTurnReport, SessionStatistics};
use crate::types::{MissileId, TargetId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Launch one missile of the named catalog type at a target.
    Launch {
        missile_type: String,
        target: TargetId,
    },
    /// Advance the simulation clock by `dt` seconds.
    Advance { dt: f64 },
    /// Let the adversary take its turn.
    AiTurn,
    /// Offer peace; ends the session peacefully.
    ProposePeace,
    Pause,
    Resume,
    Quit,
    /// Report aggregate statistics without changing anything.
    Statistics,
}

/// What a session answers to a `PlayerCommand`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandResponse {
    Launched {
        missile: MissileId,
    },
    /// The command was refused; play continues.
    Rejected {
        reason: String,
    },
    /// The session state after a clock advance or a state change.
    State {
        state: GameState,
        result: Option<GameResult>,
    },
    AiTurn {
        /// `None` when there is no adversary or the session is not in play.
        report: Option<AiTurnReport>,
    },
    Statistics {
        stats: Box<SessionStatistics>,
    },
}
