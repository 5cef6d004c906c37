// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! SPACE → ORBIT capture transition (spec §4.F). ORBIT → SURFACE and
//! ORBIT → SPACE are not part of this crate's contract; see the Open
//! Question decision in `SPEC_FULL.md`.
use crate::celestial::Celestial;
use crate::entity::ZoomState;
use crate::math::FpVec2;
use crate::world::WorldState;

/// Scans every `SPACE` entity against planets in deterministic
/// (celestial-list) order; the first planet whose capture radius reaches
/// the entity wins. Entities already in `Orbit` or `Surface` are untouched.
pub fn apply_capture(state: &mut WorldState) {
    let planets: Vec<(crate::ident::CelestialId, FpVec2, crate::math::Fp)> = state
        .celestials_in_scan_order()
        .filter_map(|c| match (c.position(), c.orbit_capture_radius_squared()) {
            (Some(position), Some(radius_sq)) => Some((c.id().clone(), position, radius_sq)),
            _ => None,
        })
        .collect();

    let candidates: Vec<_> = state
        .entities
        .iter()
        .filter(|(_, e)| e.zoom_state == ZoomState::Space)
        .map(|(id, e)| (id.clone(), e.position))
        .collect();

    for (id, position) in candidates {
        let captured = planets
            .iter()
            .find(|(_, planet_position, radius_sq)| {
                position.squared_distance(*planet_position) <= *radius_sq
            })
            .map(|(planet_id, ..)| planet_id.clone());
        let Some(planet_id) = captured else {
            continue;
        };
        if let Some(entity) = state.entities.get_mut(&id) {
            entity.zoom_state = ZoomState::Orbit;
            entity.orbit_target_id = Some(planet_id);
            entity.velocity = FpVec2::ZERO;
        }
    }
}
