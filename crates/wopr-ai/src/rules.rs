//! The adversary's policy as an ordered rule list.
//!
//! Rules are evaluated top to bottom and the first one whose predicate holds
//! decides the turn. Predicates may roll dice, but only when every
//! deterministic condition before the roll already holds, so a rule that is
//! not eligible never consumes randomness.

use rand::{Rng, RngCore};

use wopr_core::constants::*;
use wopr_core::enums::AiAction;

use crate::situation::Situation;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub situation: &'a Situation,
    /// Adversary turns taken so far.
    pub turn_count: u32,
    pub missiles_remaining: u32,
    pub defenses_remaining: u32,
}

/// Side effect a rule asks for when it fires during a real turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleEffect {
    RaiseAggression(f64),
}

/// One entry of the policy.
pub struct Rule {
    pub name: &'static str,
    pub action: AiAction,
    pub effect: Option<RuleEffect>,
    when: fn(&RuleContext<'_>, &mut dyn RngCore) -> bool,
}

impl Rule {
    pub fn matches(&self, ctx: &RuleContext<'_>, rng: &mut dyn RngCore) -> bool {
        (self.when)(ctx, rng)
    }
}

/// Result of running the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: AiAction,
    /// Name of the rule that fired.
    pub rule: &'static str,
    pub effect: Option<RuleEffect>,
}

fn seek_peace(ctx: &RuleContext<'_>, rng: &mut dyn RngCore) -> bool {
    ctx.turn_count > AI_PEACE_MIN_TURN
        && ctx.situation.intact_average() < AI_PEACE_INTACT_AVERAGE
        && rng.gen::<f64>() < AI_PEACE_CHANCE
}

fn defend(ctx: &RuleContext<'_>, _: &mut dyn RngCore) -> bool {
    ctx.situation.threat_level > AI_DEFEND_THREAT && ctx.defenses_remaining > 0
}

fn press_advantage(ctx: &RuleContext<'_>, _: &mut dyn RngCore) -> bool {
    ctx.situation.advantage > AI_PRESS_ADVANTAGE && ctx.missiles_remaining > AI_PRESS_MIN_MISSILES
}

fn retaliate(ctx: &RuleContext<'_>, _: &mut dyn RngCore) -> bool {
    ctx.situation.incoming_missiles > 0 && ctx.missiles_remaining > 0
}

fn respond_to_aggression(ctx: &RuleContext<'_>, _: &mut dyn RngCore) -> bool {
    ctx.situation.player_aggression > AI_AGGRESSIVE_PLAYER
        && ctx.missiles_remaining > AI_RESPOND_MIN_MISSILES
}

fn observe(_: &RuleContext<'_>, rng: &mut dyn RngCore) -> bool {
    rng.gen::<f64>() < AI_WAIT_CHANCE
}

fn strike(ctx: &RuleContext<'_>, _: &mut dyn RngCore) -> bool {
    ctx.missiles_remaining > 0
}

fn hold(_: &RuleContext<'_>, _: &mut dyn RngCore) -> bool {
    true
}

/// The policy, highest priority first. The last rule always matches.
pub static RULES: &[Rule] = &[
    Rule {
        name: "seek_peace",
        action: AiAction::Peace,
        effect: None,
        when: seek_peace,
    },
    Rule {
        name: "defend",
        action: AiAction::Defend,
        effect: None,
        when: defend,
    },
    Rule {
        name: "press_advantage",
        action: AiAction::Attack,
        effect: None,
        when: press_advantage,
    },
    Rule {
        name: "retaliate",
        action: AiAction::Attack,
        effect: Some(RuleEffect::RaiseAggression(AI_AGGRESSION_RETALIATE_STEP)),
        when: retaliate,
    },
    Rule {
        name: "respond_to_aggression",
        action: AiAction::Attack,
        effect: None,
        when: respond_to_aggression,
    },
    Rule {
        name: "observe",
        action: AiAction::Wait,
        effect: None,
        when: observe,
    },
    Rule {
        name: "strike",
        action: AiAction::Attack,
        effect: None,
        when: strike,
    },
    Rule {
        name: "hold",
        action: AiAction::Wait,
        effect: None,
        when: hold,
    },
];

/// Run the policy. Pure apart from the dice: effects are reported, not applied.
pub fn decide_action(ctx: &RuleContext<'_>, rng: &mut dyn RngCore) -> Decision {
    for rule in RULES {
        if rule.matches(ctx, rng) {
            tracing::debug!(rule = rule.name, action = ?rule.action, "rule fired");
            return Decision {
                action: rule.action,
                rule: rule.name,
                effect: rule.effect,
            };
        }
    }
    Decision {
        action: AiAction::Wait,
        rule: "hold",
        effect: None,
    }
}
