// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sparse partial-entity updates, the sole output of every handler.
use crate::celestial::Celestial;
use crate::entity::{Entity, ZoomState};
use crate::ident::{CelestialId, EntityId};
use crate::math::{Fp, FpVec2};
use crate::world::WorldState;

/// Applies every update in order to `state`: a spawn (an update carrying
/// `spawned_entity`) inserts that entity whole; every other update mutates
/// the existing entity in place via [`EntityChanges::apply_to`]. An update
/// naming an id absent from `state` and carrying no `spawned_entity` is
/// silently skipped — it can only arise from a handler bug, not from any
/// reachable player input, so this is not treated as a reportable error.
pub fn apply_updates(state: &mut WorldState, updates: &[EntityUpdate]) {
    for update in updates {
        if let Some(entity) = &update.changes.spawned_entity {
            state.entities.insert(update.id.clone(), entity.clone());
        } else if let Some(entity) = state.entities.get_mut(&update.id) {
            update.changes.apply_to(entity);
        }
    }
}

/// A `{id, changes}` pair. A `changes` with no corresponding existing entity
/// id in the target world denotes a spawn (see [`EntityUpdate::spawn`]);
/// callers applying updates must insert rather than merge in that case.
#[derive(Clone, PartialEq, Debug)]
pub struct EntityUpdate {
    /// The entity this update applies to.
    pub id: EntityId,
    /// The sparse field changes to apply.
    pub changes: EntityChanges,
}

impl EntityUpdate {
    /// Builds an update with no changes set; callers populate the fields
    /// they touch via [`EntityChanges`]'s setters.
    #[must_use]
    pub fn new(id: EntityId, changes: EntityChanges) -> Self {
        EntityUpdate { id, changes }
    }

    /// Builds a spawn update: a full entity presented as an update whose id
    /// is not yet present in the target world.
    #[must_use]
    pub fn spawn(entity: Entity) -> Self {
        EntityUpdate {
            id: entity.id.clone(),
            changes: EntityChanges::spawn_from(entity),
        }
    }
}

/// A sparse partial entity: every field is `Option`, `None` meaning
/// "unchanged". [`EntityChanges::spawn_from`] sets every field, which is how
/// [`EntityUpdate::spawn`] represents a brand-new entity as the same shape
/// used for ordinary partial updates.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EntityChanges {
    /// New zoom state, if changed.
    pub zoom_state: Option<ZoomState>,
    /// New position, if changed.
    pub position: Option<FpVec2>,
    /// New velocity, if changed.
    pub velocity: Option<FpVec2>,
    /// New heading, if changed.
    pub heading: Option<Fp>,
    /// New thrust, if changed.
    pub thrust: Option<Fp>,
    /// New orbit target, if changed. `Some(None)` clears it.
    pub orbit_target_id: Option<Option<CelestialId>>,
    /// New mass, if changed.
    pub mass: Option<Fp>,
    /// New volume, if changed.
    pub volume: Option<Fp>,
    /// New airlock state, if changed.
    pub airlock_sealed: Option<bool>,
    /// New fuel, if changed.
    pub fuel: Option<Fp>,
    /// New volatiles, if changed.
    pub volatiles: Option<Fp>,
    /// New parent id, if changed. `Some(None)` clears it.
    pub parent_id: Option<Option<EntityId>>,
    /// New weld parent id, if changed. `Some(None)` clears it.
    pub weld_parent_id: Option<Option<EntityId>>,
    /// New relative offset, if changed.
    pub relative_offset: Option<FpVec2>,
    /// A brand-new entity to insert whole, used only by spawns.
    pub spawned_entity: Option<Entity>,
}

impl EntityChanges {
    fn spawn_from(entity: Entity) -> Self {
        EntityChanges {
            spawned_entity: Some(entity),
            ..EntityChanges::default()
        }
    }

    /// Applies these changes onto `target`, field by field. Spawns are
    /// applied by the caller inserting `spawned_entity` directly; this
    /// method is for mutating an existing entity in place.
    pub fn apply_to(&self, target: &mut Entity) {
        if let Some(v) = self.zoom_state {
            target.zoom_state = v;
        }
        if let Some(v) = self.position {
            target.position = v;
        }
        if let Some(v) = self.velocity {
            target.velocity = v;
        }
        if let Some(v) = self.heading {
            target.heading = v;
        }
        if let Some(v) = self.thrust {
            target.thrust = v;
        }
        if let Some(ref v) = self.orbit_target_id {
            target.orbit_target_id = v.clone();
        }
        if let Some(v) = self.mass {
            target.mass = v;
        }
        if let Some(v) = self.volume {
            target.volume = v;
        }
        if let Some(v) = self.airlock_sealed {
            target.airlock_sealed = v;
        }
        if let Some(v) = self.fuel {
            target.fuel = v;
        }
        if let Some(v) = self.volatiles {
            target.volatiles = v;
        }
        if let Some(ref v) = self.parent_id {
            target.parent_id = v.clone();
        }
        if let Some(ref v) = self.weld_parent_id {
            target.weld_parent_id = v.clone();
        }
        if let Some(v) = self.relative_offset {
            target.relative_offset = v;
        }
    }
}

/// A spawned celestial body, exposed for completeness even though no
/// handler in this crate currently produces one (celestials are genesis
/// collaborator output, per spec §6).
#[derive(Clone, PartialEq, Debug)]
pub struct CelestialUpdate {
    /// The celestial this update applies to.
    pub id: CelestialId,
    /// The replacement value.
    pub replacement: Celestial,
}
