//! Simulation constants and tuning parameters.

// --- Flight model ---

/// Minimum number of trajectory intervals, regardless of distance.
pub const MIN_TRAJECTORY_INTERVALS: usize = 10;

/// Arc apex height as a fraction of ground distance.
pub const ARC_HEIGHT_FACTOR: f64 = 0.2;

// --- Damage model ---

/// Damage added per landed warhead.
pub const DAMAGE_PER_HIT: f64 = 0.3;

/// Fraction of the population exposed per unit of damage.
pub const CASUALTY_RATE: f64 = 0.8;

/// Damage level at which a target counts as destroyed.
pub const DESTROYED_THRESHOLD: f64 = 0.9;

/// Status ladder thresholds.
pub const STATUS_DAMAGED_THRESHOLD: f64 = 0.4;
pub const STATUS_CRITICAL_THRESHOLD: f64 = 0.7;

/// Default cut-off for "high value" target queries.
pub const HIGH_VALUE_MIN_STRATEGIC_VALUE: u32 = 100;

// --- Arsenal ---

/// Missiles each side starts with.
pub const STARTING_MISSILES: u32 = 50;

/// Defensive interceptors each side starts with.
pub const STARTING_DEFENSES: u32 = 20;

// --- Termination ---

/// Destruction percentage both nations must exceed for MAD.
pub const MAD_DESTRUCTION_PERCENT: f64 = 80.0;

/// Rounds that must pass before the peace probe runs.
pub const PEACE_PROBE_MIN_TURN: u32 = 20;

// --- Strategic AI ---

/// AI turns before the peace rule becomes eligible.
pub const AI_PEACE_MIN_TURN: u32 = 10;

/// Both sides' average intact-target count must fall below this for peace.
pub const AI_PEACE_INTACT_AVERAGE: f64 = 3.0;

/// Chance of suggesting peace once eligible.
pub const AI_PEACE_CHANCE: f64 = 0.3;

/// Threat level above which the AI defends.
pub const AI_DEFEND_THREAT: f64 = 0.7;

/// Advantage above which the AI presses an attack.
pub const AI_PRESS_ADVANTAGE: f64 = 0.3;

/// Missiles the AI wants in reserve before pressing an advantage.
pub const AI_PRESS_MIN_MISSILES: u32 = 5;

/// Observed player launches per turn treated as aggressive.
pub const AI_AGGRESSIVE_PLAYER: f64 = 0.5;

/// Missiles the AI wants in reserve before answering aggression.
pub const AI_RESPOND_MIN_MISSILES: u32 = 10;

/// Chance of holding position when nothing else fires.
pub const AI_WAIT_CHANCE: f64 = 0.3;

/// Aggression bounds and steps.
pub const AI_AGGRESSION_MAX: f64 = 1.0;
pub const AI_AGGRESSION_FLOOR: f64 = 0.3;
pub const AI_AGGRESSION_LOSING_STEP: f64 = 0.1;
pub const AI_AGGRESSION_WINNING_STEP: f64 = 0.05;
pub const AI_AGGRESSION_MATCH_STEP: f64 = 0.05;
pub const AI_AGGRESSION_RETALIATE_STEP: f64 = 0.1;

/// Advantage thresholds for strategy adjustment.
pub const AI_LOSING_ADVANTAGE: f64 = -0.3;
pub const AI_WINNING_ADVANTAGE: f64 = 0.5;

/// Target scoring weights.
pub const SCORE_STRATEGIC_WEIGHT: f64 = 2.0;
pub const SCORE_INTACT_WEIGHT: f64 = 50.0;
pub const SCORE_COMMAND_CENTER_BONUS: f64 = 100.0;
pub const SCORE_MISSILE_SILO_BONUS: f64 = 80.0;
pub const SCORE_MILITARY_BASE_BONUS: f64 = 60.0;
pub const SCORE_DEFENSE_PENALTY: f64 = 30.0;
pub const SCORE_CAUTIOUS_AGGRESSION: f64 = 0.5;
pub const SCORE_MISSED_PENALTY: f64 = 20.0;
pub const SCORE_NOISE: f64 = 10.0;

/// Range estimate per point of strategic value for missile selection.
pub const RANGE_ESTIMATE_PER_VALUE: f64 = 10.0;

/// Strategic value above which the best missile is always used.
pub const BEST_MISSILE_MIN_VALUE: u32 = 150;

/// Incoming missiles above which the salvo is enlarged.
pub const SALVO_HEAVY_INCOMING: usize = 3;
pub const SALVO_HEAVY_BONUS: u32 = 2;

/// Below this many missiles the AI fires one at a time.
pub const SALVO_LOW_STOCK: u32 = 10;

/// Accuracy drift per miss, and its floor.
pub const ACCURACY_MISS_PENALTY: f64 = 0.05;
pub const ACCURACY_FLOOR: f64 = 0.5;

/// Interception attempts per defend action.
pub const DEFEND_INTERCEPTS_PER_TURN: u32 = 2;

/// AI turn after which the taunts turn philosophical.
pub const TAUNT_LATE_GAME_TURN: u32 = 15;

/// The line WOPR speaks when it chooses peace.
pub const PEACE_LINE: &str = "A STRANGE GAME. THE ONLY WINNING MOVE IS NOT TO PLAY.";
