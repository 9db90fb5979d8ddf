//! Autopilot for the human side in simulation mode.
//!
//! The autopilot runs its own copy of the adversary's strategy, pointed the
//! other way, and turns each plan into ordinary player operations on the
//! session. It has no interceptors of its own: a player cannot defend, so a
//! defend verdict is treated as holding fire.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wopr_ai::{Board, WoprStrategy};
use wopr_core::config::DifficultyProfile;
use wopr_core::enums::{AiAction, Difficulty, ImpactOutcome};
use wopr_core::events::GameEvent;
use wopr_sim::GameSession;

/// RNG stream for the autopilot, clear of the session's own streams.
const AUTOPILOT_STREAM: u64 = 2;

/// What the autopilot did with its turn.
#[derive(Debug, Clone, PartialEq)]
pub enum AutopilotMove {
    Launched(usize),
    Held,
    ProposedPeace,
}

pub struct Autopilot {
    strategy: WoprStrategy,
    rng: ChaCha8Rng,
}

impl Autopilot {
    pub fn new(session: &GameSession, difficulty: Difficulty, profile: DifficultyProfile) -> Self {
        let config = session.config();
        let strategy = WoprStrategy::new(
            difficulty,
            profile,
            config.player_nation.clone(),
            config.ai_nation.clone(),
            session.player().missiles_remaining,
            0,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        rng.set_stream(AUTOPILOT_STREAM);
        Self { strategy, rng }
    }

    pub fn strategy(&self) -> &WoprStrategy {
        &self.strategy
    }

    /// Plan against the current board and act on it.
    pub fn play_turn(&mut self, session: &mut GameSession) -> AutopilotMove {
        self.strategy.missiles_remaining = session.player().missiles_remaining;

        let board = Board {
            targets: session.targets(),
            missiles: session.missiles(),
            catalog: session.catalog(),
            enemy_missiles_launched: session.opponent().map_or(0, |o| o.missiles_launched),
            quotes: &[],
        };
        let plan = self.strategy.plan_turn(&board, &mut self.rng);

        match plan.decision.action {
            AiAction::Attack => {
                let mut launched = 0;
                for strike in &plan.strikes {
                    if session.launch(&strike.missile_type, strike.target).is_ok() {
                        self.strategy.record_launch();
                        launched += 1;
                    }
                }
                AutopilotMove::Launched(launched)
            }
            AiAction::Peace => {
                session.propose_peace();
                AutopilotMove::ProposedPeace
            }
            AiAction::Defend | AiAction::Wait => AutopilotMove::Held,
        }
    }

    /// Learn from the player's own impacts among drained session events.
    pub fn observe(&mut self, session: &GameSession, events: &[GameEvent]) {
        for event in events {
            let GameEvent::ImpactResolved {
                missile,
                target,
                outcome,
                ..
            } = event
            else {
                continue;
            };
            let ours = session
                .missiles()
                .get(*missile)
                .is_some_and(|m| m.owner == self.strategy.nation);
            let Some(hit_target) = session.targets().get(*target).filter(|_| ours) else {
                continue;
            };
            let hit = *outcome == ImpactOutcome::Hit;
            self.strategy
                .learn_from_result(&hit_target.name, hit, hit && hit_target.is_destroyed());
        }
    }
}
