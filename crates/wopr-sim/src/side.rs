//! Per-side arsenal and kill record.
//!
//! Stored on the `GameSession`, one per participating side.

use serde::{Deserialize, Serialize};

use wopr_core::state::SideView;
use wopr_core::types::{NationId, TargetId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Side {
    pub name: String,
    pub nation: NationId,
    pub missiles_remaining: u32,
    pub defenses_remaining: u32,
    pub missiles_launched: u32,
    /// Targets this side destroyed, in order of destruction.
    pub targets_destroyed: Vec<TargetId>,
    /// Sum of the strategic value of destroyed targets.
    pub score: u32,
}

impl Side {
    pub fn new(name: impl Into<String>, nation: NationId, missiles: u32, defenses: u32) -> Self {
        Self {
            name: name.into(),
            nation,
            missiles_remaining: missiles,
            defenses_remaining: defenses,
            missiles_launched: 0,
            targets_destroyed: Vec::new(),
            score: 0,
        }
    }

    pub fn record_launch(&mut self) {
        self.missiles_launched += 1;
        self.missiles_remaining = self.missiles_remaining.saturating_sub(1);
    }

    pub fn record_destruction(&mut self, target: TargetId, strategic_value: u32) {
        self.targets_destroyed.push(target);
        self.score += strategic_value;
    }

    pub fn view(&self) -> SideView {
        SideView {
            name: self.name.clone(),
            nation: self.nation.clone(),
            missiles_remaining: self.missiles_remaining,
            defenses_remaining: self.defenses_remaining,
            missiles_launched: self.missiles_launched,
            targets_destroyed: self.targets_destroyed.len() as u32,
            score: self.score,
        }
    }
}
