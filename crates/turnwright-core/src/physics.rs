// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Translation and parent/weld binding passes (spec §4.E). Three discrete
//! phases, composed by [`apply_maneuver`]; the wave driver calls
//! [`bind_only`] between waves and [`apply_maneuver`] once at the end of the
//! tick, per `pipeline`.
use crate::world::WorldState;

/// Phase 1: every root entity (neither contained nor welded) advances by its
/// velocity. Contained and welded entities are deliberately left untouched
/// here; they move in [`bind_only`] instead, relative to their parent.
pub fn translate_roots(state: &mut WorldState) {
    let ids: Vec<_> = state.entities.keys().cloned().collect();
    for id in ids {
        if let Some(entity) = state.entities.get(&id) {
            if entity.is_root() {
                let new_position = entity.position + entity.velocity;
                if let Some(entity) = state.entities.get_mut(&id) {
                    entity.position = new_position;
                }
            }
        }
    }
}

/// Phase 2 + 3: re-snaps every contained entity to its container's current
/// position, then every welded entity to its weld parent's position plus its
/// recorded offset. An orphaned parent/weld reference (the named id no
/// longer exists) leaves that entity's position untouched.
pub fn bind_only(state: &mut WorldState) {
    let contained: Vec<_> = state
        .entities
        .iter()
        .filter_map(|(id, e)| e.parent_id.clone().map(|p| (id.clone(), p)))
        .collect();
    for (id, parent_id) in contained {
        let Some(parent_position) = state.entities.get(&parent_id).map(|p| p.position) else {
            continue;
        };
        if let Some(entity) = state.entities.get_mut(&id) {
            entity.position = parent_position;
        }
    }

    let welded: Vec<_> = state
        .entities
        .iter()
        .filter_map(|(id, e)| {
            e.weld_parent_id
                .clone()
                .map(|p| (id.clone(), p, e.relative_offset))
        })
        .collect();
    for (id, parent_id, offset) in welded {
        let Some(parent_position) = state.entities.get(&parent_id).map(|p| p.position) else {
            continue;
        };
        if let Some(entity) = state.entities.get_mut(&id) {
            entity.position = parent_position + offset;
        }
    }
}

/// Translate, then bind: the composition the tick driver runs exactly once,
/// after its final wave.
pub fn apply_maneuver(state: &mut WorldState) {
    translate_roots(state);
    bind_only(state);
}
