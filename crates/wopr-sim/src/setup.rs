//! Session setup from the configuration tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use wopr_core::config::{GameConfig, MissileTypeSpec};
use wopr_core::error::ConfigError;
use wopr_core::target::{Target, TargetRegistry};
use wopr_core::types::{NationId, Position};

/// Place every configured target, nation by nation, in table order.
pub fn build_targets(config: &GameConfig) -> Result<TargetRegistry, ConfigError> {
    let mut targets = TargetRegistry::new();
    for nation in &config.placements {
        for placement in &nation.targets {
            let spec = config.target_types.get(&placement.kind).ok_or_else(|| {
                ConfigError::UnknownTargetType {
                    target: placement.name.clone(),
                    kind: placement.kind,
                }
            })?;
            targets.add(nation.nation.clone(), Target::from_placement(placement, spec));
        }
    }
    Ok(targets)
}

/// Share the missile catalog between the session and every missile it builds.
pub fn build_catalog(config: &GameConfig) -> BTreeMap<String, Arc<MissileTypeSpec>> {
    config
        .missile_types
        .iter()
        .map(|(name, spec)| (name.clone(), Arc::new(spec.clone())))
        .collect()
}

/// A nation launches from its first listed target.
pub fn launch_origin(targets: &TargetRegistry, nation: &NationId) -> Option<Position> {
    targets
        .by_nation(Some(nation))
        .next()
        .map(|(_, target)| target.position)
}

/// Fail unless every listed nation has at least one placed target.
pub fn require_nations(config: &GameConfig, nations: &[&NationId]) -> Result<(), ConfigError> {
    for nation in nations {
        let placed = config
            .placements_for(nation)
            .is_some_and(|p| !p.targets.is_empty());
        if !placed {
            return Err(ConfigError::MissingNation(nation.to_string()));
        }
    }
    Ok(())
}
