//! Errors surfaced by the driver binary.

use thiserror::Error;

use wopr_core::error::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown difficulty '{0}' (expected easy, normal, hard or wopr)")]
    UnknownDifficulty(String),

    #[error("Unknown game mode '{0}' (expected campaign, simulation or tutorial)")]
    UnknownMode(String),
}
