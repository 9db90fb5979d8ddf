//! End-of-war conditions.

use wopr_core::constants::{MAD_DESTRUCTION_PERCENT, PEACE_PROBE_MIN_TURN};
use wopr_core::enums::GameResult;
use wopr_core::target::TargetRegistry;
use wopr_core::types::NationId;

/// Check the board-driven endings in priority order: mutual destruction,
/// then defeat, then victory. The first that holds wins, so a tick that
/// satisfies several reports only the highest.
pub fn evaluate(targets: &TargetRegistry, player: &NationId, ai: &NationId) -> Option<GameResult> {
    let player_destruction = targets.destruction_percentage(Some(player));
    let ai_destruction = targets.destruction_percentage(Some(ai));

    if player_destruction > MAD_DESTRUCTION_PERCENT && ai_destruction > MAD_DESTRUCTION_PERCENT {
        return Some(GameResult::Mad);
    }
    if targets.intact_count(Some(player)) == 0 {
        return Some(GameResult::Defeat);
    }
    if targets.intact_count(Some(ai)) == 0 {
        return Some(GameResult::Victory);
    }
    None
}

/// Whether the adversary should be asked if it wants peace.
pub fn peace_probe_due(turn: u32, active_missiles: usize, player_missiles_remaining: u32) -> bool {
    turn > PEACE_PROBE_MIN_TURN && active_missiles == 0 && player_missiles_remaining > 0
}
