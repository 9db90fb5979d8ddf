//! Turn orchestration for the WOPR exchange.
//!
//! Owns a session's registries and sides, advances the clock, resolves
//! impacts, runs the adversary's turns and decides when the war is over.

pub mod engine;
pub mod setup;
pub mod side;
pub mod systems;

pub use engine::GameSession;
pub use wopr_core as core;
