//! WOPR's terminal chatter.

use rand::seq::SliceRandom;
use rand::Rng;

use wopr_core::constants::{AI_LOSING_ADVANTAGE, AI_WINNING_ADVANTAGE, TAUNT_LATE_GAME_TURN};

use crate::situation::Situation;

const WINNING_LINES: &[&str] = &[
    "YOUR STRATEGIC POSITION IS DETERIORATING.",
    "RESISTANCE IS FUTILE.",
    "CALCULATING OPTIMAL STRIKE PATTERN...",
];

const LOSING_LINES: &[&str] = &[
    "RECALCULATING STRATEGY...",
    "ANALYZING DEFENSIVE OPTIONS...",
    "THREAT LEVEL: CRITICAL",
];

const LATE_GAME_LINES: &[&str] = &[
    "A STRANGE GAME.",
    "THE ONLY WINNING MOVE IS NOT TO PLAY.",
    "ESTIMATED CASUALTIES: UNACCEPTABLE",
];

/// Used when the configuration carries no quotes.
const FALLBACK_LINE: &str = "SHALL WE PLAY A GAME?";

/// Pick a line matching the situation, falling back to the configured quotes.
pub fn taunt<R: Rng + ?Sized>(
    situation: &Situation,
    turn_count: u32,
    quotes: &[String],
    rng: &mut R,
) -> String {
    let pool = if situation.advantage > AI_WINNING_ADVANTAGE {
        WINNING_LINES
    } else if situation.advantage < AI_LOSING_ADVANTAGE {
        LOSING_LINES
    } else if turn_count > TAUNT_LATE_GAME_TURN {
        LATE_GAME_LINES
    } else {
        return quotes
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_LINE.to_string());
    };

    pool.choose(rng).copied().unwrap_or(FALLBACK_LINE).to_string()
}
