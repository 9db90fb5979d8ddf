//! Error types for configuration and launch validation.
//!
//! Configuration errors are fatal at session start. Launch errors are
//! ordinary validation failures: the caller reports them and play continues.

use thiserror::Error;

use crate::enums::{Difficulty, TargetKind};
use crate::types::TargetId;

/// The external configuration tables are inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Target '{target}' references undefined target type {kind:?}")]
    UnknownTargetType { target: String, kind: TargetKind },

    #[error("Missile catalog is empty")]
    EmptyMissileCatalog,

    #[error("Missile type '{0}' has non-positive or non-finite speed")]
    InvalidSpeed(String),

    #[error("Missile type '{name}' has invalid range {max_range}")]
    InvalidRange { name: String, max_range: f64 },

    #[error("Missile type '{name}' has accuracy {accuracy} outside [0, 1]")]
    InvalidAccuracy { name: String, accuracy: f64 },

    #[error("Target type {kind:?} has defense level {defense_level} outside [0, 1]")]
    InvalidDefenseLevel { kind: TargetKind, defense_level: f64 },

    #[error("No difficulty profile for {0:?}")]
    MissingDifficulty(Difficulty),

    #[error("Nation '{0}' has no target placements")]
    MissingNation(String),
}

/// A launch request was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaunchError {
    #[error("Session is not in play")]
    NotPlaying,

    #[error("No missiles remaining")]
    NoMissilesRemaining,

    #[error("Unknown missile type '{0}'")]
    UnknownMissileType(String),

    #[error("Unknown target {0:?}")]
    UnknownTarget(TargetId),

    #[error("No launch site available")]
    NoLaunchSite,

    #[error("Target out of range: distance {distance:.1}, max range {max_range:.1}")]
    OutOfRange { distance: f64, max_range: f64 },
}

/// Missile construction failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissileError {
    #[error("Range exceeded: distance {distance:.1}, max range {max_range:.1}")]
    RangeExceeded { distance: f64, max_range: f64 },
}

impl From<MissileError> for LaunchError {
    fn from(err: MissileError) -> Self {
        match err {
            MissileError::RangeExceeded {
                distance,
                max_range,
            } => LaunchError::OutOfRange {
                distance,
                max_range,
            },
        }
    }
}
