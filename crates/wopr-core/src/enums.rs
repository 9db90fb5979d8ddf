//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Category of a strategic target. Names match the configuration tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    City,
    MilitaryBase,
    MissileSilo,
    CommandCenter,
}

/// Coarse damage ladder for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStatus {
    Intact,
    /// Some damage, up to 40%.
    Hit,
    /// Above 40%.
    Damaged,
    /// Above 70%.
    Critical,
    Destroyed,
}

/// Missile lifecycle. Exactly one state holds at a time; `Detonated` and
/// `Intercepted` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissilePhase {
    #[default]
    NotLaunched,
    InFlight,
    Detonated,
    Intercepted,
}

impl MissilePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, MissilePhase::Detonated | MissilePhase::Intercepted)
    }
}

/// AI difficulty. `Wopr` is the maximum and disables targeting noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Wopr,
}

impl Difficulty {
    pub fn is_maximum(self) -> bool {
        self == Difficulty::Wopr
    }
}

/// Session flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Human against WOPR.
    #[default]
    Campaign,
    /// Autopilot against WOPR.
    Simulation,
    /// No adversary.
    Tutorial,
}

/// Top-level session state. `Menu` and `Intro` belong to the presentation
/// layer; a session is created in `Playing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Menu,
    Intro,
    Playing,
    Paused,
    GameOver,
    Peace,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Peace)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameResult {
    /// Mutual assured destruction.
    Mad,
    Defeat,
    Victory,
    Peace,
}

impl GameResult {
    /// Outcome headline for the presentation layer.
    pub fn headline(self) -> &'static str {
        match self {
            GameResult::Mad => "MUTUAL ASSURED DESTRUCTION",
            GameResult::Defeat => "DEFEAT: ALL STRATEGIC ASSETS DESTROYED",
            GameResult::Victory => "VICTORY ACHIEVED. BUT AT WHAT COST?",
            GameResult::Peace => "PEACEFUL RESOLUTION",
        }
    }
}

/// Adversary's per-turn verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiAction {
    Attack,
    Defend,
    Wait,
    Peace,
}

/// Outcome of one damage-resolution pass against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactOutcome {
    /// Target was already destroyed; nothing changed.
    AlreadyDestroyed,
    /// Point defenses stopped every warhead.
    FullyIntercepted,
    /// Every surviving warhead missed.
    AllMissed,
    /// At least one warhead landed.
    Hit,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
