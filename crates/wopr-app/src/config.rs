//! Command-line settings: table loading and enum parsing.

use std::path::Path;

use serde::de::DeserializeOwned;

use wopr_core::config::GameConfig;
use wopr_core::enums::{Difficulty, GameMode};

use crate::error::AppError;

/// Load the configuration tables from a JSON file, or fall back to the
/// built-in Cold War tables.
pub fn load_tables(path: Option<&Path>) -> Result<GameConfig, AppError> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)?;
    let tables = GameConfig::from_json_str(&json)?;
    tracing::info!(path = %path.display(), missile_types = tables.missile_types.len(), "tables loaded");
    Ok(tables)
}

fn parse_name<T: DeserializeOwned>(name: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(name.trim().to_ascii_lowercase())).ok()
}

pub fn parse_difficulty(name: &str) -> Result<Difficulty, AppError> {
    parse_name(name).ok_or_else(|| AppError::UnknownDifficulty(name.to_string()))
}

pub fn parse_mode(name: &str) -> Result<GameMode, AppError> {
    parse_name(name).ok_or_else(|| AppError::UnknownMode(name.to_string()))
}
