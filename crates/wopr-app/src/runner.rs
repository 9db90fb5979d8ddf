//! Simulation mode: seeded autopilot-versus-WOPR games.
//!
//! Each game runs in rounds. The autopilot acts, the clock runs until the
//! sky is clear (or a step budget is spent), WOPR answers, and the clock
//! runs again. Results are plain serde records for the caller to print.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use wopr_core::config::{GameConfig, SessionConfig};
use wopr_core::enums::{Difficulty, GameMode, GameResult, GameState};
use wopr_core::error::ConfigError;
use wopr_core::state::SessionStatistics;
use wopr_sim::GameSession;

use crate::autopilot::Autopilot;

/// Knobs for a batch of simulated wars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub games: u32,
    /// Seed of the first game; game `i` uses `seed + i`.
    pub seed: u64,
    /// WOPR's difficulty.
    pub difficulty: Difficulty,
    /// Difficulty profile the autopilot plays with.
    pub autopilot: Difficulty,
    /// Rounds before a game is abandoned as undecided.
    pub max_turns: u32,
    /// Clock step in simulated seconds.
    pub dt: f64,
    /// Clock steps allowed after each side's move.
    pub steps_per_phase: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 0,
            difficulty: Difficulty::Normal,
            autopilot: Difficulty::Normal,
            max_turns: 100,
            dt: 1.0,
            steps_per_phase: 30,
        }
    }
}

/// Outcome of one simulated war.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    /// `None` when the turn limit ran out first.
    pub result: Option<GameResult>,
    pub headline: String,
    pub turns: u32,
    pub statistics: SessionStatistics,
}

/// Outcome counts over a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: u32,
    pub outcomes: BTreeMap<String, u32>,
    pub undecided: u32,
    pub average_turns: f64,
    pub average_casualties: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub config: SimulationConfig,
    pub summary: BatchSummary,
    pub games: Vec<GameRecord>,
}

/// Play one war to the end or to the turn limit.
pub fn run_game(
    tables: &GameConfig,
    sim: &SimulationConfig,
    seed: u64,
) -> Result<GameRecord, ConfigError> {
    let profile = tables.difficulty(sim.autopilot)?;
    let mut session = GameSession::new(
        tables.clone(),
        SessionConfig {
            seed,
            difficulty: sim.difficulty,
            mode: GameMode::Simulation,
            player_name: "AUTOPILOT".into(),
            ..Default::default()
        },
    )?;
    let mut autopilot = Autopilot::new(&session, sim.autopilot, profile);

    while session.state() == GameState::Playing && session.time().turn < sim.max_turns {
        let action = autopilot.play_turn(&mut session);
        tracing::debug!(seed, turn = session.time().turn, ?action, "autopilot turn");
        run_clock(&mut session, &mut autopilot, sim);

        session.take_ai_turn();
        run_clock(&mut session, &mut autopilot, sim);
    }

    let record = GameRecord {
        seed,
        result: session.result(),
        headline: session.result_message().to_string(),
        turns: session.time().turn,
        statistics: session.statistics(),
    };
    tracing::info!(seed, result = ?record.result, turns = record.turns, "game finished");
    Ok(record)
}

/// Advance until no missile is airborne, the war ends, or the step budget
/// runs out.
fn run_clock(session: &mut GameSession, autopilot: &mut Autopilot, sim: &SimulationConfig) {
    for _ in 0..sim.steps_per_phase {
        if session.state() != GameState::Playing {
            break;
        }
        session.advance(sim.dt);
        let events = session.drain_events();
        autopilot.observe(session, &events);
        if session.missiles().active().is_empty() {
            break;
        }
    }
}

/// Play `sim.games` wars on consecutive seeds.
pub fn run_batch(tables: &GameConfig, sim: &SimulationConfig) -> Result<BatchReport, ConfigError> {
    let games = (0..sim.games)
        .map(|i| run_game(tables, sim, sim.seed.wrapping_add(u64::from(i))))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BatchReport {
        config: sim.clone(),
        summary: summarize(&games),
        games,
    })
}

pub fn summarize(games: &[GameRecord]) -> BatchSummary {
    let mut summary = BatchSummary {
        games: games.len() as u32,
        ..Default::default()
    };
    if games.is_empty() {
        return summary;
    }

    for game in games {
        match game.result {
            Some(result) => *summary.outcomes.entry(format!("{result:?}")).or_default() += 1,
            None => summary.undecided += 1,
        }
    }
    let n = games.len() as f64;
    summary.average_turns = games.iter().map(|g| g.turns as f64).sum::<f64>() / n;
    summary.average_casualties = games
        .iter()
        .map(|g| g.statistics.total_casualties as f64)
        .sum::<f64>()
        / n;
    summary
}
