//! WOPR, the strategic adversary.
//!
//! Situation analysis, the ordered decision rules, target and missile-type
//! selection, salvo sizing, learning from results, and taunts. Operates on
//! the core registries as plain data and never launches anything itself.

pub mod rules;
pub mod situation;
pub mod strategy;
pub mod targeting;
pub mod taunts;

pub use wopr_core as core;

pub use strategy::{Board, Strike, TurnPlan, WoprStrategy};
