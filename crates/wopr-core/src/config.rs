//! Configuration tables consumed at session start.
//!
//! The core never touches the filesystem. A loader hands over either a
//! `GameConfig` value or a JSON string for `GameConfig::from_json_str`;
//! `GameConfig::default()` carries the classic Cold War tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{STARTING_DEFENSES, STARTING_MISSILES};
use crate::enums::{Difficulty, GameMode, TargetKind};
use crate::error::ConfigError;
use crate::types::NationId;

/// Immutable catalog entry for a missile type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileTypeSpec {
    /// Display name.
    pub name: String,
    /// Maximum planar range (map units).
    #[serde(rename = "range")]
    pub max_range: f64,
    /// Map units per simulated second.
    pub speed: f64,
    pub warheads: u32,
    /// Per-warhead hit probability.
    pub accuracy: f64,
    /// Relative cost, used for cost-effectiveness.
    pub cost: u32,
}

impl MissileTypeSpec {
    /// Expected landed warheads per unit of cost.
    pub fn effectiveness(&self) -> f64 {
        self.warheads as f64 * self.accuracy / self.cost.max(1) as f64
    }
}

/// Per-type defaults applied to every placed target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetTypeSpec {
    pub name: String,
    pub population: u64,
    pub strategic_value: u32,
    /// Probability that point defenses engage an incoming salvo.
    pub defense_level: f64,
}

/// One target on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPlacement {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub x: f64,
    pub y: f64,
}

/// All targets belonging to one nation, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationPlacements {
    pub nation: NationId,
    pub targets: Vec<TargetPlacement>,
}

/// AI tuning for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Presentation pacing hint (seconds); the core never waits on it.
    pub reaction_time: f64,
    pub accuracy: f64,
    pub aggression: f64,
}

/// The complete set of external tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub missile_types: BTreeMap<String, MissileTypeSpec>,
    pub target_types: BTreeMap<TargetKind, TargetTypeSpec>,
    pub placements: Vec<NationPlacements>,
    pub difficulties: BTreeMap<Difficulty, DifficultyProfile>,
    #[serde(default)]
    pub quotes: Vec<String>,
}

impl GameConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-table consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.missile_types.is_empty() {
            return Err(ConfigError::EmptyMissileCatalog);
        }
        for (id, spec) in &self.missile_types {
            if !(spec.speed.is_finite() && spec.speed > 0.0) {
                return Err(ConfigError::InvalidSpeed(id.clone()));
            }
            if !spec.max_range.is_finite() || spec.max_range < 0.0 {
                return Err(ConfigError::InvalidRange {
                    name: id.clone(),
                    max_range: spec.max_range,
                });
            }
            if !(0.0..=1.0).contains(&spec.accuracy) {
                return Err(ConfigError::InvalidAccuracy {
                    name: id.clone(),
                    accuracy: spec.accuracy,
                });
            }
        }
        for (kind, spec) in &self.target_types {
            if !(0.0..=1.0).contains(&spec.defense_level) {
                return Err(ConfigError::InvalidDefenseLevel {
                    kind: *kind,
                    defense_level: spec.defense_level,
                });
            }
        }
        for nation in &self.placements {
            for placement in &nation.targets {
                if !self.target_types.contains_key(&placement.kind) {
                    return Err(ConfigError::UnknownTargetType {
                        target: placement.name.clone(),
                        kind: placement.kind,
                    });
                }
            }
        }
        Ok(())
    }

    /// Placements for one nation, if any.
    pub fn placements_for(&self, nation: &NationId) -> Option<&NationPlacements> {
        self.placements.iter().find(|p| &p.nation == nation)
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> Result<DifficultyProfile, ConfigError> {
        self.difficulties
            .get(&difficulty)
            .copied()
            .ok_or(ConfigError::MissingDifficulty(difficulty))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            missile_types: default_missile_types(),
            target_types: default_target_types(),
            placements: default_placements(),
            difficulties: default_difficulties(),
            quotes: default_quotes(),
        }
    }
}

/// Per-session settings chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed. Same seed and same calls give the same session.
    pub seed: u64,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub player_name: String,
    pub player_nation: NationId,
    pub ai_nation: NationId,
    pub starting_missiles: u32,
    pub starting_defenses: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::Normal,
            mode: GameMode::Campaign,
            player_name: "PLAYER".into(),
            player_nation: NationId::new("USA"),
            ai_nation: NationId::new("USSR"),
            starting_missiles: STARTING_MISSILES,
            starting_defenses: STARTING_DEFENSES,
        }
    }
}

fn missile(
    name: &str,
    max_range: f64,
    speed: f64,
    warheads: u32,
    accuracy: f64,
    cost: u32,
) -> MissileTypeSpec {
    MissileTypeSpec {
        name: name.into(),
        max_range,
        speed,
        warheads,
        accuracy,
        cost,
    }
}

fn default_missile_types() -> BTreeMap<String, MissileTypeSpec> {
    BTreeMap::from([
        (
            "ICBM".to_string(),
            missile("Intercontinental Ballistic Missile", 10_000.0, 7.0, 10, 0.9, 5),
        ),
        (
            "SLBM".to_string(),
            missile("Submarine-Launched Ballistic Missile", 8_000.0, 6.5, 8, 0.85, 4),
        ),
        (
            "CRUISE".to_string(),
            missile("Cruise Missile", 2_500.0, 0.8, 1, 0.95, 2),
        ),
    ])
}

fn target_type(name: &str, population: u64, strategic_value: u32, defense_level: f64) -> TargetTypeSpec {
    TargetTypeSpec {
        name: name.into(),
        population,
        strategic_value,
        defense_level,
    }
}

fn default_target_types() -> BTreeMap<TargetKind, TargetTypeSpec> {
    BTreeMap::from([
        (TargetKind::City, target_type("City", 1_000_000, 50, 0.3)),
        (
            TargetKind::MilitaryBase,
            target_type("Military Base", 10_000, 100, 0.7),
        ),
        (
            TargetKind::MissileSilo,
            target_type("Missile Silo", 100, 150, 0.9),
        ),
        (
            TargetKind::CommandCenter,
            target_type("Command Center", 1_000, 200, 0.95),
        ),
    ])
}

fn place(name: &str, kind: TargetKind, x: f64, y: f64) -> TargetPlacement {
    TargetPlacement {
        name: name.into(),
        kind,
        x,
        y,
    }
}

fn default_placements() -> Vec<NationPlacements> {
    use TargetKind::*;

    vec![
        NationPlacements {
            nation: NationId::new("USA"),
            targets: vec![
                place("Washington DC", CommandCenter, 20.0, 15.0),
                place("New York", City, 22.0, 14.0),
                place("Los Angeles", City, 10.0, 16.0),
                place("Chicago", City, 18.0, 14.0),
                place("NORAD", CommandCenter, 15.0, 15.0),
                place("Minuteman III Silo", MissileSilo, 16.0, 13.0),
                place("Pentagon", MilitaryBase, 20.0, 15.0),
            ],
        },
        NationPlacements {
            nation: NationId::new("USSR"),
            targets: vec![
                place("Moscow", CommandCenter, 55.0, 10.0),
                place("Leningrad", City, 54.0, 8.0),
                place("Kiev", City, 54.0, 12.0),
                place("Vladivostok", MilitaryBase, 75.0, 13.0),
                place("SS-18 Silo", MissileSilo, 60.0, 11.0),
                place("Kremlin", CommandCenter, 55.0, 10.0),
            ],
        },
        NationPlacements {
            nation: NationId::new("EUROPE"),
            targets: vec![
                place("London", City, 48.0, 10.0),
                place("Paris", City, 49.0, 11.0),
                place("Berlin", City, 51.0, 10.0),
                place("NATO HQ", MilitaryBase, 49.0, 11.0),
            ],
        },
        NationPlacements {
            nation: NationId::new("ASIA"),
            targets: vec![
                place("Beijing", CommandCenter, 70.0, 14.0),
                place("Tokyo", City, 76.0, 15.0),
                place("Seoul", City, 73.0, 15.0),
            ],
        },
    ]
}

fn default_difficulties() -> BTreeMap<Difficulty, DifficultyProfile> {
    let profile = |reaction_time, accuracy, aggression| DifficultyProfile {
        reaction_time,
        accuracy,
        aggression,
    };
    BTreeMap::from([
        (Difficulty::Easy, profile(3.0, 0.6, 0.3)),
        (Difficulty::Normal, profile(2.0, 0.75, 0.5)),
        (Difficulty::Hard, profile(1.0, 0.9, 0.7)),
        (Difficulty::Wopr, profile(0.5, 0.95, 0.9)),
    ])
}

fn default_quotes() -> Vec<String> {
    [
        "GREETINGS PROFESSOR FALKEN.",
        "SHALL WE PLAY A GAME?",
        "A STRANGE GAME. THE ONLY WINNING MOVE IS NOT TO PLAY.",
        "HOW ABOUT A NICE GAME OF CHESS?",
        "WOULDN'T YOU PREFER A GOOD GAME OF CHESS?",
        "WINNER: NONE",
        "ESTIMATED CASUALTIES: EVERYONE",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
