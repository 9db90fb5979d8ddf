//! Headless driver for the WOPR simulation.
//!
//! Wires the simulation crates to the outside world: seeded autopilot
//! games for simulation mode, and a JSON-lines command protocol for
//! external front ends. Logs go to stderr; stdout carries JSON only.

pub mod autopilot;
pub mod config;
pub mod error;
pub mod protocol;
pub mod runner;

pub use wopr_core as core;
