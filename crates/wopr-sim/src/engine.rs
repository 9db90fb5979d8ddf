//! The turn orchestrator.
//!
//! `GameSession` owns both registries, both sides, the adversary's strategy
//! and the random streams. It is driven from outside: the caller launches
//! missiles, advances the clock, and asks the adversary to take its turn.
//! Completely headless, so whole wars replay deterministically from a seed.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wopr_ai::{Board, WoprStrategy};
use wopr_core::commands::{CommandResponse, PlayerCommand};
use wopr_core::config::{GameConfig, MissileTypeSpec, SessionConfig};
use wopr_core::enums::*;
use wopr_core::error::{ConfigError, LaunchError};
use wopr_core::events::GameEvent;
use wopr_core::missile::MissileRegistry;
use wopr_core::state::{AiTurnReport, SessionStatistics};
use wopr_core::target::TargetRegistry;
use wopr_core::types::{MissileId, SimTime, TargetId};

use crate::setup;
use crate::side::Side;
use crate::systems;
use crate::systems::impacts::ResolvedImpact;

/// Name the adversary launches under.
pub const AI_NAME: &str = "WOPR";

/// RNG stream reserved for the peace probe.
const PROBE_STREAM: u64 = 1;

/// One war, from first launch to a terminal state.
pub struct GameSession {
    config: SessionConfig,
    quotes: Vec<String>,
    catalog: BTreeMap<String, Arc<MissileTypeSpec>>,
    targets: TargetRegistry,
    missiles: MissileRegistry,
    player: Side,
    /// Absent in tutorial mode.
    opponent: Option<Side>,
    ai: Option<WoprStrategy>,
    time: SimTime,
    state: GameState,
    result: Option<GameResult>,
    total_casualties: u64,
    total_missiles_launched: usize,
    rng: ChaCha8Rng,
    probe_rng: ChaCha8Rng,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Set up a session in `Playing`. Inconsistent tables are fatal here.
    pub fn new(config: GameConfig, session: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        setup::require_nations(&config, &[&session.player_nation, &session.ai_nation])?;

        let targets = setup::build_targets(&config)?;
        let catalog = setup::build_catalog(&config);

        let player = Side::new(
            session.player_name.clone(),
            session.player_nation.clone(),
            session.starting_missiles,
            session.starting_defenses,
        );

        let (opponent, ai) = if session.mode == GameMode::Tutorial {
            (None, None)
        } else {
            let profile = config.difficulty(session.difficulty)?;
            let side = Side::new(
                AI_NAME,
                session.ai_nation.clone(),
                session.starting_missiles,
                session.starting_defenses,
            );
            let strategy = WoprStrategy::new(
                session.difficulty,
                profile,
                session.ai_nation.clone(),
                session.player_nation.clone(),
                session.starting_missiles,
                session.starting_defenses,
            );
            (Some(side), Some(strategy))
        };

        let rng = ChaCha8Rng::seed_from_u64(session.seed);
        let mut probe_rng = ChaCha8Rng::seed_from_u64(session.seed);
        probe_rng.set_stream(PROBE_STREAM);

        tracing::info!(
            seed = session.seed,
            mode = ?session.mode,
            difficulty = ?session.difficulty,
            targets = targets.len(),
            "session started"
        );

        Ok(Self {
            quotes: config.quotes,
            catalog,
            targets,
            missiles: MissileRegistry::new(),
            player,
            opponent,
            ai,
            time: SimTime::default(),
            state: GameState::Playing,
            result: None,
            total_casualties: 0,
            total_missiles_launched: 0,
            rng,
            probe_rng,
            events: Vec::new(),
            config: session,
        })
    }

    // --- Read access ---

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Outcome headline, or a plain notice while no result exists.
    pub fn result_message(&self) -> &'static str {
        self.result.map_or("GAME OVER", GameResult::headline)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn missiles(&self) -> &MissileRegistry {
        &self.missiles
    }

    pub fn catalog(&self) -> &BTreeMap<String, Arc<MissileTypeSpec>> {
        &self.catalog
    }

    pub fn player(&self) -> &Side {
        &self.player
    }

    pub fn opponent(&self) -> Option<&Side> {
        self.opponent.as_ref()
    }

    pub fn ai(&self) -> Option<&WoprStrategy> {
        self.ai.as_ref()
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn statistics(&self) -> SessionStatistics {
        SessionStatistics {
            time: self.time,
            state: self.state,
            result: self.result,
            total_casualties: self.total_casualties,
            total_missiles_launched: self.total_missiles_launched,
            player: self.player.view(),
            opponent: self.opponent.as_ref().map(Side::view),
            ai: self.ai.as_ref().map(WoprStrategy::view),
            targets: self.targets.statistics(None),
            missiles: self.missiles.statistics(),
        }
    }

    // --- Player operations ---

    /// Launch one missile of `missile_type` from the player's launch site.
    pub fn launch(&mut self, missile_type: &str, target: TargetId) -> Result<MissileId, LaunchError> {
        let launched = self.try_launch(missile_type, target);
        match &launched {
            Ok(id) => tracing::info!(missile = id.0, missile_type, target_id = target.0, "player launch"),
            Err(err) => tracing::warn!(%err, missile_type, target_id = target.0, "launch rejected"),
        }
        launched
    }

    fn try_launch(&mut self, missile_type: &str, target: TargetId) -> Result<MissileId, LaunchError> {
        if self.state != GameState::Playing {
            return Err(LaunchError::NotPlaying);
        }
        if self.player.missiles_remaining == 0 {
            return Err(LaunchError::NoMissilesRemaining);
        }
        let spec = self
            .catalog
            .get(missile_type)
            .cloned()
            .ok_or_else(|| LaunchError::UnknownMissileType(missile_type.to_string()))?;
        let aim = self
            .targets
            .get(target)
            .map(|t| t.position)
            .ok_or(LaunchError::UnknownTarget(target))?;
        let origin = setup::launch_origin(&self.targets, &self.player.nation)
            .ok_or(LaunchError::NoLaunchSite)?;

        let id = self
            .missiles
            .create(missile_type, spec, origin, aim, self.player.nation.clone())?;
        self.missiles.launch(id);
        self.player.record_launch();
        self.total_missiles_launched = self.missiles.len();

        self.events.push(GameEvent::MissileLaunched {
            missile: id,
            owner: self.player.nation.clone(),
            missile_type: missile_type.to_string(),
            target,
        });
        Ok(id)
    }

    /// Advance the clock: move missiles, resolve impacts, update totals, and
    /// check for the end of the war. Does nothing unless playing.
    pub fn advance(&mut self, dt: f64) {
        if self.state != GameState::Playing {
            return;
        }
        self.time.elapsed_secs += dt;

        let outcome = self.missiles.advance_all(dt);
        for id in &outcome.intercepted {
            if let Some(missile) = self.missiles.get(*id) {
                self.events.push(GameEvent::MissileIntercepted {
                    missile: *id,
                    owner: missile.owner.clone(),
                });
            }
        }

        let impacts = systems::impacts::run(
            &outcome.detonated,
            &self.missiles,
            &mut self.targets,
            &mut self.rng,
            &mut self.events,
        );
        for impact in &impacts {
            self.credit(impact);
        }

        self.total_casualties = self.targets.total_casualties(None);
        self.total_missiles_launched = self.missiles.len();

        self.check_game_over();
    }

    /// Credit the attacking side and let the adversary learn from its own
    /// impacts.
    fn credit(&mut self, impact: &ResolvedImpact) {
        if impact.report.destroyed {
            if impact.owner == self.player.nation {
                self.player
                    .record_destruction(impact.target, impact.strategic_value);
            } else if let Some(opponent) = self.opponent.as_mut().filter(|o| o.nation == impact.owner) {
                opponent.record_destruction(impact.target, impact.strategic_value);
            }
        }

        if let Some(ai) = self.ai.as_mut().filter(|ai| ai.nation == impact.owner) {
            ai.learn_from_result(
                &impact.target_name,
                impact.report.is_hit(),
                impact.report.destroyed,
            );
        }
    }

    fn check_game_over(&mut self) {
        if let Some(result) =
            systems::termination::evaluate(&self.targets, &self.player.nation, &self.config.ai_nation)
        {
            self.finish(GameState::GameOver, result);
            return;
        }

        if !systems::termination::peace_probe_due(
            self.time.turn,
            self.missiles.active().len(),
            self.player.missiles_remaining,
        ) {
            return;
        }
        let Some(ai) = self.ai.as_ref() else {
            return;
        };
        let board = Board {
            targets: &self.targets,
            missiles: &self.missiles,
            catalog: &self.catalog,
            enemy_missiles_launched: self.player.missiles_launched,
            quotes: &self.quotes,
        };
        if ai.probe_peace(&board, &mut self.probe_rng) {
            self.finish(GameState::Peace, GameResult::Peace);
        }
    }

    fn finish(&mut self, state: GameState, result: GameResult) {
        self.state = state;
        self.result = Some(result);
        tracing::info!(?result, turn = self.time.turn, casualties = self.total_casualties, "war over");
        self.events.push(GameEvent::GameOver { result });
    }

    /// Let the adversary act. `None` without an adversary or outside play.
    pub fn take_ai_turn(&mut self) -> Option<AiTurnReport> {
        if self.state != GameState::Playing {
            return None;
        }
        let ai = self.ai.as_mut()?;
        self.time.turn += 1;

        let board = Board {
            targets: &self.targets,
            missiles: &self.missiles,
            catalog: &self.catalog,
            enemy_missiles_launched: self.player.missiles_launched,
            quotes: &self.quotes,
        };
        let plan = ai.plan_turn(&board, &mut self.rng);

        let mut report = AiTurnReport::idle(plan.decision.action, plan.message);
        report.targets_attacked = plan.targets;
        report.launch_count = plan.launch_count;

        match plan.decision.action {
            AiAction::Attack => {
                if let Some(origin) = setup::launch_origin(&self.targets, &ai.nation) {
                    for strike in &plan.strikes {
                        if ai.missiles_remaining == 0 {
                            break;
                        }
                        let (Some(spec), Some(aim)) = (
                            self.catalog.get(&strike.missile_type).cloned(),
                            self.targets.get(strike.target).map(|t| t.position),
                        ) else {
                            continue;
                        };
                        let id = match self.missiles.create(
                            &strike.missile_type,
                            spec,
                            origin,
                            aim,
                            ai.nation.clone(),
                        ) {
                            Ok(id) => id,
                            Err(err) => {
                                tracing::debug!(%err, target_id = strike.target.0, "strike dropped");
                                continue;
                            }
                        };
                        self.missiles.launch(id);
                        ai.record_launch();
                        if let Some(opponent) = self.opponent.as_mut() {
                            opponent.record_launch();
                        }
                        self.events.push(GameEvent::MissileLaunched {
                            missile: id,
                            owner: ai.nation.clone(),
                            missile_type: strike.missile_type.clone(),
                            target: strike.target,
                        });
                        report.launched.push(id);
                    }
                }
            }
            AiAction::Defend => {
                report.intercepted = ai.defend(&mut self.missiles, &mut self.rng);
                for id in &report.intercepted {
                    self.events.push(GameEvent::MissileIntercepted {
                        missile: *id,
                        owner: self.player.nation.clone(),
                    });
                }
                if let Some(opponent) = self.opponent.as_mut() {
                    opponent.defenses_remaining = ai.defenses_remaining;
                }
            }
            AiAction::Wait | AiAction::Peace => {}
        }

        self.total_missiles_launched = self.missiles.len();
        tracing::info!(
            turn = self.time.turn,
            action = ?report.action,
            launched = report.launched.len(),
            intercepted = report.intercepted.len(),
            message = %report.message,
            "ai turn"
        );
        self.events.push(GameEvent::AiTurn {
            action: report.action,
            message: report.message.clone(),
            launch_count: report.launch_count,
        });
        Some(report)
    }

    /// Offer peace. Ends a live session peacefully.
    pub fn propose_peace(&mut self) {
        if matches!(self.state, GameState::Playing | GameState::Paused) {
            self.finish(GameState::Peace, GameResult::Peace);
        }
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
        }
    }

    /// Leave the war. Nothing is rolled back; the session stops responding
    /// to play commands.
    pub fn quit(&mut self) {
        if !self.state.is_terminal() {
            tracing::info!(turn = self.time.turn, "session quit");
            self.state = GameState::Menu;
        }
    }

    /// Dispatch a player command.
    pub fn handle_command(&mut self, command: PlayerCommand) -> CommandResponse {
        match command {
            PlayerCommand::Launch {
                missile_type,
                target,
            } => match self.launch(&missile_type, target) {
                Ok(missile) => CommandResponse::Launched { missile },
                Err(err) => CommandResponse::Rejected {
                    reason: err.to_string(),
                },
            },
            PlayerCommand::Advance { dt } => {
                if !dt.is_finite() || dt < 0.0 {
                    return CommandResponse::Rejected {
                        reason: format!("Invalid time step {dt}"),
                    };
                }
                self.advance(dt);
                self.state_response()
            }
            PlayerCommand::AiTurn => CommandResponse::AiTurn {
                report: self.take_ai_turn(),
            },
            PlayerCommand::ProposePeace => {
                self.propose_peace();
                self.state_response()
            }
            PlayerCommand::Pause => {
                self.pause();
                self.state_response()
            }
            PlayerCommand::Resume => {
                self.resume();
                self.state_response()
            }
            PlayerCommand::Quit => {
                self.quit();
                self.state_response()
            }
            PlayerCommand::Statistics => CommandResponse::Statistics {
                stats: Box::new(self.statistics()),
            },
        }
    }

    fn state_response(&self) -> CommandResponse {
        CommandResponse::State {
            state: self.state,
            result: self.result,
        }
    }
}
