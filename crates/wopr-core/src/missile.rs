//! Missiles in flight and the per-session missile registry.
//!
//! A missile's path is precomputed at construction: a straight ground track
//! with a parabolic arc on top. Advancing a missile only moves an index
//! along that path, so flight is cheap and fully deterministic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::MissileTypeSpec;
use crate::constants::{ARC_HEIGHT_FACTOR, MIN_TRAJECTORY_INTERVALS};
use crate::enums::MissilePhase;
use crate::error::MissileError;
use crate::types::{MissileId, NationId, Position};

/// A single missile tied to one type, one origin, and one aim point.
#[derive(Debug, Clone)]
pub struct Missile {
    pub owner: NationId,
    /// Catalog key of the missile type.
    pub type_id: String,
    pub spec: Arc<MissileTypeSpec>,
    pub origin: Position,
    pub target: Position,
    trajectory: Vec<Position>,
    position: Position,
    flight_time: f64,
    total_flight_time: f64,
    phase: MissilePhase,
}

impl Missile {
    /// Build a missile, rejecting aim points beyond the type's range.
    pub fn new(
        type_id: impl Into<String>,
        spec: Arc<MissileTypeSpec>,
        origin: Position,
        target: Position,
        owner: NationId,
    ) -> Result<Self, MissileError> {
        let distance = origin.distance_to(&target);
        if distance > spec.max_range {
            return Err(MissileError::RangeExceeded {
                distance,
                max_range: spec.max_range,
            });
        }

        let total_flight_time = distance / spec.speed;
        Ok(Self {
            owner,
            type_id: type_id.into(),
            trajectory: ballistic_arc(&origin, &target),
            position: origin,
            flight_time: 0.0,
            total_flight_time,
            phase: MissilePhase::NotLaunched,
            origin,
            target,
            spec,
        })
    }

    pub fn phase(&self) -> MissilePhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == MissilePhase::InFlight
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn trajectory(&self) -> &[Position] {
        &self.trajectory
    }

    pub fn flight_time(&self) -> f64 {
        self.flight_time
    }

    /// Fixed at construction.
    pub fn total_flight_time(&self) -> f64 {
        self.total_flight_time
    }

    /// Fraction of the flight completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_flight_time <= 0.0 {
            1.0
        } else {
            (self.flight_time / self.total_flight_time).min(1.0)
        }
    }

    /// NotLaunched -> InFlight. Returns false if already launched.
    pub fn launch(&mut self) -> bool {
        if self.phase != MissilePhase::NotLaunched {
            return false;
        }
        self.phase = MissilePhase::InFlight;
        self.flight_time = 0.0;
        true
    }

    /// Advance flight by `dt` seconds. Returns true while still in flight.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.phase != MissilePhase::InFlight {
            return false;
        }

        self.flight_time += dt;
        if self.flight_time >= self.total_flight_time {
            self.detonate();
            return false;
        }

        let last = self.trajectory.len().saturating_sub(1);
        let index = ((self.progress() * self.trajectory.len() as f64) as usize).min(last);
        if let Some(waypoint) = self.trajectory.get(index) {
            self.position = *waypoint;
        }
        true
    }

    /// InFlight -> Detonated, snapping to the aim point.
    pub fn detonate(&mut self) -> bool {
        if self.phase != MissilePhase::InFlight {
            return false;
        }
        self.phase = MissilePhase::Detonated;
        self.position = self.target;
        true
    }

    /// InFlight -> Intercepted. No damage is ever applied for it.
    pub fn intercept(&mut self) -> bool {
        if self.phase != MissilePhase::InFlight {
            return false;
        }
        self.phase = MissilePhase::Intercepted;
        true
    }
}

/// Waypoints from `origin` to `target`: x interpolates linearly while y
/// bows by `4·h·t·(1−t)` with apex height `h = 0.2 × distance`.
/// Uses `max(10, round(distance))` intervals, so the path holds one more
/// waypoint than intervals and starts and ends exactly on the endpoints.
pub fn ballistic_arc(origin: &Position, target: &Position) -> Vec<Position> {
    let distance = origin.distance_to(target);
    let intervals = (distance.round() as usize).max(MIN_TRAJECTORY_INTERVALS);
    let height = distance * ARC_HEIGHT_FACTOR;

    (0..=intervals)
        .map(|i| {
            let t = i as f64 / intervals as f64;
            let ground = origin.lerp(target, t);
            Position::new(ground.x, ground.y - 4.0 * height * t * (1.0 - t))
        })
        .collect()
}

/// Missiles that left flight during one `advance_all` call, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub detonated: Vec<MissileId>,
    pub intercepted: Vec<MissileId>,
}

/// Aggregate missile counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileStats {
    pub total_launched: usize,
    pub in_flight: usize,
    pub detonated: usize,
    pub intercepted: usize,
}

/// Every missile created in a session, bucketed by lifecycle.
#[derive(Debug, Clone, Default)]
pub struct MissileRegistry {
    missiles: Vec<Missile>,
    active: Vec<MissileId>,
    detonated: Vec<MissileId>,
    intercepted: Vec<MissileId>,
}

impl MissileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and register a missile. Nothing is registered on failure.
    pub fn create(
        &mut self,
        type_id: &str,
        spec: Arc<MissileTypeSpec>,
        origin: Position,
        target: Position,
        owner: NationId,
    ) -> Result<MissileId, MissileError> {
        let missile = Missile::new(type_id, spec, origin, target, owner)?;
        let id = MissileId(self.missiles.len() as u32);
        self.missiles.push(missile);
        Ok(id)
    }

    /// Launch a registered missile. A second launch is a no-op.
    pub fn launch(&mut self, id: MissileId) -> bool {
        let Some(missile) = self.missiles.get_mut(id.0 as usize) else {
            return false;
        };
        if !missile.launch() {
            return false;
        }
        self.active.push(id);
        true
    }

    /// Advance every active missile by `dt`. This is the only per-tick
    /// mutation point: the active set is partitioned and replaced.
    pub fn advance_all(&mut self, dt: f64) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();
        let mut still_active = Vec::with_capacity(self.active.len());

        for id in std::mem::take(&mut self.active) {
            let missile = &mut self.missiles[id.0 as usize];
            missile.advance(dt);
            if !missile.phase().is_terminal() {
                still_active.push(id);
                continue;
            }
            match missile.phase() {
                MissilePhase::Detonated => {
                    tracing::debug!(missile = id.0, owner = %missile.owner, "missile detonated");
                    self.detonated.push(id);
                    outcome.detonated.push(id);
                }
                MissilePhase::Intercepted => {
                    self.intercepted.push(id);
                    outcome.intercepted.push(id);
                }
                MissilePhase::NotLaunched | MissilePhase::InFlight => {}
            }
        }

        self.active = still_active;
        outcome
    }

    /// Intercept an active missile. Returns false if it is not in flight.
    pub fn intercept(&mut self, id: MissileId) -> bool {
        let Some(position) = self.active.iter().position(|a| *a == id) else {
            return false;
        };
        if !self.missiles[id.0 as usize].intercept() {
            return false;
        }
        self.active.remove(position);
        self.intercepted.push(id);
        true
    }

    pub fn get(&self, id: MissileId) -> Option<&Missile> {
        self.missiles.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.missiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missiles.is_empty()
    }

    /// Active missile ids in creation order.
    pub fn active(&self) -> &[MissileId] {
        &self.active
    }

    pub fn detonated(&self) -> &[MissileId] {
        &self.detonated
    }

    pub fn intercepted(&self) -> &[MissileId] {
        &self.intercepted
    }

    pub fn by_owner(&self, owner: &NationId) -> Vec<MissileId> {
        self.missiles
            .iter()
            .enumerate()
            .filter(|(_, m)| &m.owner == owner)
            .map(|(i, _)| MissileId(i as u32))
            .collect()
    }

    /// Active missiles not owned by `owner`.
    pub fn incoming(&self, owner: &NationId) -> Vec<MissileId> {
        self.active
            .iter()
            .copied()
            .filter(|id| &self.missiles[id.0 as usize].owner != owner)
            .collect()
    }

    /// Active missiles whose current position lies within `radius` of `point`.
    pub fn near(&self, point: &Position, radius: f64) -> Vec<MissileId> {
        self.active
            .iter()
            .copied()
            .filter(|id| self.missiles[id.0 as usize].position().distance_to(point) <= radius)
            .collect()
    }

    pub fn statistics(&self) -> MissileStats {
        MissileStats {
            total_launched: self.missiles.len(),
            in_flight: self.active.len(),
            detonated: self.detonated.len(),
            intercepted: self.intercepted.len(),
        }
    }
}
