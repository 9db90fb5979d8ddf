//! Core types and definitions for the WOPR strategic exchange simulation.
//!
//! This crate defines the vocabulary shared across all other crates
//! (configuration tables, commands, events, statistics views, constants)
//! and the leaf data model: targets with their damage resolution and
//! missiles with their flight model. It performs no I/O.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod missile;
pub mod state;
pub mod target;
pub mod types;

#[cfg(test)]
mod tests;
