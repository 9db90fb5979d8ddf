//! The adversary's mutable strategy state and its per-turn pipeline.
//!
//! `WoprStrategy` is owned by the session and borrowed mutably for each
//! turn. A turn runs: analyze the board, adjust aggression, run the rule
//! list, then (when attacking) size the salvo and pick targets and missile
//! types. Launching is left to the caller, which owns the launch sites.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use wopr_core::config::{DifficultyProfile, MissileTypeSpec};
use wopr_core::constants::*;
use wopr_core::enums::{AiAction, Difficulty};
use wopr_core::missile::MissileRegistry;
use wopr_core::state::AiView;
use wopr_core::target::TargetRegistry;
use wopr_core::types::{MissileId, NationId, TargetId};

use crate::rules::{decide_action, Decision, RuleContext, RuleEffect};
use crate::situation::{analyze_situation, Situation};
use crate::targeting::{select_missile_type, select_targets, TargetingContext};
use crate::taunts::taunt;

/// One planned launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub target: TargetId,
    pub missile_type: String,
}

/// Everything the adversary decided this turn.
#[derive(Debug, Clone)]
pub struct TurnPlan {
    pub situation: Situation,
    pub decision: Decision,
    pub message: String,
    /// Selected targets, best first.
    pub targets: Vec<TargetId>,
    pub launch_count: u32,
    /// Targets for which a suitable missile type exists.
    pub strikes: Vec<Strike>,
}

/// What the board looks like to the adversary when it is asked to act.
pub struct Board<'a> {
    pub targets: &'a TargetRegistry,
    pub missiles: &'a MissileRegistry,
    pub catalog: &'a BTreeMap<String, Arc<MissileTypeSpec>>,
    /// Missiles the opponent has launched so far.
    pub enemy_missiles_launched: u32,
    pub quotes: &'a [String],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WoprStrategy {
    pub difficulty: Difficulty,
    pub nation: NationId,
    pub enemy: NationId,
    pub missiles_remaining: u32,
    pub defenses_remaining: u32,
    /// In `[AI_AGGRESSION_FLOOR, 1]` once adjusted; starts at the profile value.
    pub aggression_level: f64,
    /// Drifts down on misses, never below `ACCURACY_FLOOR`.
    pub base_accuracy: f64,
    /// Presentation pacing hint.
    pub reaction_time: f64,
    pub targets_hit: Vec<String>,
    pub targets_missed: Vec<String>,
    pub turn_count: u32,
    pub learning_enabled: bool,
}

impl WoprStrategy {
    pub fn new(
        difficulty: Difficulty,
        profile: DifficultyProfile,
        nation: NationId,
        enemy: NationId,
        missiles: u32,
        defenses: u32,
    ) -> Self {
        Self {
            difficulty,
            nation,
            enemy,
            missiles_remaining: missiles,
            defenses_remaining: defenses,
            aggression_level: profile.aggression,
            base_accuracy: profile.accuracy,
            reaction_time: profile.reaction_time,
            targets_hit: Vec::new(),
            targets_missed: Vec::new(),
            turn_count: 0,
            learning_enabled: true,
        }
    }

    pub fn analyze(&self, board: &Board<'_>) -> Situation {
        analyze_situation(
            board.targets,
            board.missiles,
            &self.nation,
            &self.enemy,
            board.enemy_missiles_launched,
            self.turn_count,
        )
    }

    /// Drift aggression with the state of the war.
    pub fn adjust_strategy(&mut self, situation: &Situation) {
        if situation.advantage < AI_LOSING_ADVANTAGE {
            self.aggression_level =
                (self.aggression_level + AI_AGGRESSION_LOSING_STEP).min(AI_AGGRESSION_MAX);
        } else if situation.advantage > AI_WINNING_ADVANTAGE {
            self.aggression_level =
                (self.aggression_level - AI_AGGRESSION_WINNING_STEP).max(AI_AGGRESSION_FLOOR);
        }

        if situation.player_aggression > self.aggression_level {
            self.aggression_level =
                (self.aggression_level + AI_AGGRESSION_MATCH_STEP).min(AI_AGGRESSION_MAX);
        }
    }

    pub fn rule_context<'a>(&self, situation: &'a Situation) -> RuleContext<'a> {
        RuleContext {
            situation,
            turn_count: self.turn_count,
            missiles_remaining: self.missiles_remaining,
            defenses_remaining: self.defenses_remaining,
        }
    }

    /// Run the rule list without applying any rule effect.
    pub fn decide<R: Rng>(&self, situation: &Situation, rng: &mut R) -> Decision {
        decide_action(&self.rule_context(situation), rng)
    }

    pub fn apply_effect(&mut self, effect: RuleEffect) {
        match effect {
            RuleEffect::RaiseAggression(step) => {
                self.aggression_level = (self.aggression_level + step).min(AI_AGGRESSION_MAX);
            }
        }
    }

    /// Salvo size: more with aggression and under heavy fire, one at a time
    /// when stock runs low, never more than what is left.
    pub fn calculate_launch_count(&self, situation: &Situation) -> u32 {
        if self.missiles_remaining == 0 {
            return 0;
        }

        let mut count = (self.aggression_level * 3.0).floor() as u32 + 1;
        if situation.incoming_missiles > SALVO_HEAVY_INCOMING {
            count += SALVO_HEAVY_BONUS;
        }
        if self.missiles_remaining < SALVO_LOW_STOCK {
            count = count.min(1);
        }
        count.min(self.missiles_remaining)
    }

    pub fn targeting(&self) -> TargetingContext<'_> {
        TargetingContext {
            difficulty: self.difficulty,
            aggression_level: self.aggression_level,
            base_accuracy: self.base_accuracy,
            targets_missed: &self.targets_missed,
        }
    }

    /// Record the outcome of one of our impacts. Misses permanently lower
    /// the accuracy estimate.
    pub fn learn_from_result(&mut self, target: &str, hit: bool, destroyed: bool) {
        if !self.learning_enabled {
            return;
        }

        if hit {
            self.targets_hit.push(target.to_string());
        } else {
            self.targets_missed.push(target.to_string());
            self.base_accuracy = (self.base_accuracy - ACCURACY_MISS_PENALTY).max(ACCURACY_FLOOR);
        }
        tracing::debug!(name = target, hit, destroyed, base_accuracy = self.base_accuracy, "learned");
    }

    /// Take a full turn: bump the turn counter, adjust, decide, and plan.
    pub fn plan_turn<R: Rng>(&mut self, board: &Board<'_>, rng: &mut R) -> TurnPlan {
        self.turn_count += 1;

        let situation = self.analyze(board);
        self.adjust_strategy(&situation);

        let decision = self.decide(&situation, rng);
        if let Some(effect) = decision.effect {
            self.apply_effect(effect);
        }

        let mut message = taunt(&situation, self.turn_count, board.quotes, rng);
        let mut targets = Vec::new();
        let mut launch_count = 0;
        let mut strikes = Vec::new();

        match decision.action {
            AiAction::Attack => {
                launch_count = self.calculate_launch_count(&situation);
                targets = select_targets(
                    board.targets,
                    &self.enemy,
                    launch_count as usize,
                    &self.targeting(),
                    rng,
                );
                strikes = targets
                    .iter()
                    .filter_map(|id| {
                        let target = board.targets.get(*id)?;
                        let missile_type = select_missile_type(target, board.catalog)?;
                        Some(Strike {
                            target: *id,
                            missile_type,
                        })
                    })
                    .collect();
            }
            AiAction::Peace => message = PEACE_LINE.to_string(),
            AiAction::Defend | AiAction::Wait => {}
        }

        tracing::debug!(
            turn = self.turn_count,
            rule = decision.rule,
            aggression = self.aggression_level,
            launch_count,
            "turn planned"
        );

        TurnPlan {
            situation,
            decision,
            message,
            targets,
            launch_count,
            strikes,
        }
    }

    /// Would the adversary sue for peace right now? Reads state only; rule
    /// effects are discarded and the turn counter is left alone.
    pub fn probe_peace<R: Rng>(&self, board: &Board<'_>, rng: &mut R) -> bool {
        let situation = self.analyze(board);
        self.decide(&situation, rng).action == AiAction::Peace
    }

    /// Try to knock down incoming missiles, one defense per attempt.
    pub fn defend<R: Rng + ?Sized>(
        &mut self,
        missiles: &mut MissileRegistry,
        rng: &mut R,
    ) -> Vec<MissileId> {
        let mut intercepted = Vec::new();
        let incoming = missiles.incoming(&self.nation);

        for id in incoming.into_iter().take(DEFEND_INTERCEPTS_PER_TURN as usize) {
            if self.defenses_remaining == 0 {
                break;
            }
            self.defenses_remaining -= 1;
            if rng.gen_bool(self.base_accuracy.clamp(0.0, 1.0)) && missiles.intercept(id) {
                intercepted.push(id);
            }
        }
        intercepted
    }

    /// Account for one missile put in the air.
    pub fn record_launch(&mut self) {
        self.missiles_remaining = self.missiles_remaining.saturating_sub(1);
    }

    pub fn view(&self) -> AiView {
        AiView {
            missiles_remaining: self.missiles_remaining,
            defenses_remaining: self.defenses_remaining,
            targets_hit: self.targets_hit.len(),
            targets_missed: self.targets_missed.len(),
            aggression_level: self.aggression_level,
            base_accuracy: self.base_accuracy,
            turn_count: self.turn_count,
        }
    }
}
