//! Impact resolution: apply each detonated missile to the nearest target.

use rand::Rng;

use wopr_core::events::GameEvent;
use wopr_core::missile::MissileRegistry;
use wopr_core::target::{ImpactReport, TargetRegistry};
use wopr_core::types::{MissileId, NationId, TargetId};

/// One detonation applied to a target.
#[derive(Debug, Clone)]
pub struct ResolvedImpact {
    pub missile: MissileId,
    pub owner: NationId,
    pub target: TargetId,
    pub target_name: String,
    pub strategic_value: u32,
    pub report: ImpactReport,
}

/// Resolve detonations in missile creation order. The nearest target to the
/// aim point takes the hit, destroyed or not; a destroyed one absorbs it
/// without effect and produces no impact.
pub fn run<R: Rng + ?Sized>(
    detonated: &[MissileId],
    missiles: &MissileRegistry,
    targets: &mut TargetRegistry,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Vec<ResolvedImpact> {
    let mut ordered = detonated.to_vec();
    ordered.sort_unstable();

    let mut resolved = Vec::with_capacity(ordered.len());
    for id in ordered {
        let Some(missile) = missiles.get(id) else {
            continue;
        };
        let Some(target_id) = targets.nearest(&missile.target, None, false) else {
            continue;
        };
        let Some(target) = targets.get_mut(target_id) else {
            continue;
        };
        if target.is_destroyed() {
            tracing::debug!(missile = id.0, name = %target.name, "impact on rubble");
            continue;
        }

        let report = target.take_damage(missile.spec.warheads, missile.spec.accuracy, rng);
        tracing::debug!(
            missile = id.0,
            name = %target.name,
            outcome = ?report.outcome,
            casualties = report.casualties,
            "impact resolved"
        );

        events.push(GameEvent::ImpactResolved {
            missile: id,
            target: target_id,
            outcome: report.outcome,
            casualties: report.casualties,
        });
        if report.destroyed {
            tracing::info!(name = %target.name, by = %missile.owner, "target destroyed");
            events.push(GameEvent::TargetDestroyed {
                target: target_id,
                name: target.name.clone(),
                by: missile.owner.clone(),
            });
        }

        resolved.push(ResolvedImpact {
            missile: id,
            owner: missile.owner.clone(),
            target: target_id,
            target_name: target.name.clone(),
            strategic_value: target.strategic_value,
            report,
        });
    }
    resolved
}
