// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Post-tick invariant checks (spec §3, I1-I8). Every check takes the
//! pre-tick and post-tick states and returns a [`TurnError`] naming the
//! specific invariant that failed; nothing here panics.
use std::collections::HashSet;

use crate::action::Action;
use crate::constants::TurnConfig;
use crate::error::TurnError;
use crate::ident::EntityId;
use crate::world::WorldState;

/// The maximum fraction of root mass permitted to vanish in a single tick,
/// against I1's "loss per tick <= a configured bound (refining waste)".
/// Generous on purpose: REFINE's waste fraction is `1 - refine_efficiency`
/// per action, and a tick may contain many REFINE actions.
const MAX_ROOT_MASS_LOSS_FRACTION: f64 = 0.5;

/// Runs every invariant check in order, short-circuiting on the first
/// failure. `applied` is the full, flattened list of actions that produced
/// `post`, used to populate the invariant-violation black box.
pub fn check_all(
    pre: &WorldState,
    post: &WorldState,
    applied: &[Action],
    _config: &TurnConfig,
) -> Result<(), TurnError> {
    check_tick_monotonicity(pre, post, applied)?;
    check_non_negative_stores(post, applied)?;
    check_mass_conservation(pre, post, applied)?;
    check_parent_binding(post, applied)?;
    check_weld_binding(post, applied)?;
    check_volume(post, applied)?;
    check_acyclicity(post, applied)?;
    check_non_teleportation(pre, post, applied)?;
    Ok(())
}

/// I7: the tick counter advances by exactly one.
fn check_tick_monotonicity(
    pre: &WorldState,
    post: &WorldState,
    applied: &[Action],
) -> Result<(), TurnError> {
    if post.tick != pre.tick + 1 {
        return Err(TurnError::invariant_violation(
            "I7: tick counter must advance by exactly one",
            pre,
            applied,
        ));
    }
    Ok(())
}

/// I2: no negative mass, fuel, or volatiles.
fn check_non_negative_stores(post: &WorldState, applied: &[Action]) -> Result<(), TurnError> {
    for entity in post.entities.values() {
        if entity.mass.is_negative() || entity.fuel.is_negative() || entity.volatiles.is_negative()
        {
            return Err(TurnError::invariant_violation(
                "I2: mass, fuel, and volatiles must be non-negative",
                post,
                applied,
            ));
        }
    }
    Ok(())
}

/// I1: total root mass decreases monotonically, bounded loss per tick.
fn check_mass_conservation(
    pre: &WorldState,
    post: &WorldState,
    applied: &[Action],
) -> Result<(), TurnError> {
    let pre_mass = pre.total_root_mass();
    let post_mass = post.total_root_mass();
    if post_mass > pre_mass {
        return Err(TurnError::invariant_violation(
            "I1: total root mass must not increase",
            pre,
            applied,
        ));
    }
    if pre_mass.raw() > 0 {
        let loss = (pre_mass - post_mass).to_f64();
        let bound = pre_mass.to_f64() * MAX_ROOT_MASS_LOSS_FRACTION;
        if loss > bound {
            return Err(TurnError::invariant_violation(
                "I1: mass loss exceeded the configured bound",
                pre,
                applied,
            ));
        }
    }
    Ok(())
}

/// I3: contained entities sit exactly at their parent's position.
fn check_parent_binding(post: &WorldState, applied: &[Action]) -> Result<(), TurnError> {
    for entity in post.entities.values() {
        if let Some(parent_id) = &entity.parent_id {
            if let Some(parent) = post.entities.get(parent_id) {
                if entity.position != parent.position {
                    return Err(TurnError::invariant_violation(
                        "I3: contained entity position must equal its parent's position",
                        post,
                        applied,
                    ));
                }
            }
        }
    }
    Ok(())
}

/// I4: welded entities sit at their weld parent's position plus offset.
fn check_weld_binding(post: &WorldState, applied: &[Action]) -> Result<(), TurnError> {
    for entity in post.entities.values() {
        if let Some(weld_parent_id) = &entity.weld_parent_id {
            if let Some(parent) = post.entities.get(weld_parent_id) {
                let expected = parent.position + entity.relative_offset;
                if entity.position != expected {
                    return Err(TurnError::invariant_violation(
                        "I4: welded entity position must equal parent position plus offset",
                        post,
                        applied,
                    ));
                }
            }
        }
    }
    Ok(())
}

/// I5: sum of child volumes does not exceed a container's declared volume
/// capacity.
fn check_volume(post: &WorldState, applied: &[Action]) -> Result<(), TurnError> {
    for container in post.entities.values() {
        let Some(capacity) = container.container_volume else {
            continue;
        };
        let used = post
            .entities
            .values()
            .filter(|e| e.parent_id.as_ref() == Some(&container.id))
            .fold(crate::math::Fp::ZERO, |acc, e| acc + e.volume);
        if used > capacity {
            return Err(TurnError::invariant_violation(
                "I5: container volume exceeded",
                post,
                applied,
            ));
        }
    }
    Ok(())
}

/// I6: neither the parent relation nor the weld relation contains a cycle.
fn check_acyclicity(post: &WorldState, applied: &[Action]) -> Result<(), TurnError> {
    if has_cycle(post, |e| e.parent_id.as_ref()) {
        return Err(TurnError::invariant_violation(
            "I6: parent relation must be acyclic",
            post,
            applied,
        ));
    }
    if has_cycle(post, |e| e.weld_parent_id.as_ref()) {
        return Err(TurnError::invariant_violation(
            "I6: weld relation must be acyclic",
            post,
            applied,
        ));
    }
    Ok(())
}

fn has_cycle(
    state: &WorldState,
    next: impl Fn(&crate::entity::Entity) -> Option<&EntityId>,
) -> bool {
    'outer: for start in state.entities.keys() {
        let mut visited: HashSet<EntityId> = HashSet::new();
        let mut current = start.clone();
        loop {
            if !visited.insert(current.clone()) {
                return true;
            }
            let Some(entity) = state.entities.get(&current) else {
                continue 'outer;
            };
            let Some(parent) = next(entity) else {
                continue 'outer;
            };
            current = parent.clone();
        }
    }
    false
}

/// I8: a root entity's position delta does not exceed
/// `1.5 * |velocity| + epsilon_floor`.
fn check_non_teleportation(
    pre: &WorldState,
    post: &WorldState,
    applied: &[Action],
) -> Result<(), TurnError> {
    let epsilon_floor = crate::math::Fp::from_f64(0.5);
    for (id, post_entity) in &post.entities {
        if !post_entity.is_root() {
            continue;
        }
        let Some(pre_entity) = pre.entities.get(id) else {
            continue;
        };
        if !pre_entity.is_root() {
            continue;
        }
        let delta = post_entity.position.squared_distance(pre_entity.position);
        // Bound against the velocity translate_roots actually moved by (the
        // post-tick value, which already reflects any THRUST this tick), not
        // the pre-tick velocity — a from-rest thrust legitimately displaces
        // the entity by its newly acquired velocity in the same tick.
        let speed = post_entity.velocity.length();
        let bound = speed.scale(crate::math::Fp::from_f64(1.5)) + epsilon_floor;
        if delta.sqrt() > bound {
            return Err(TurnError::invariant_violation(
                "I8: root entity moved further than velocity permits",
                pre,
                applied,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityKind};
    use crate::math::{Fp, FpVec2};

    fn world_with(entities: Vec<Entity>, tick: u64) -> WorldState {
        let mut w = WorldState::new("seed");
        w.tick = tick;
        for e in entities {
            w.entities.insert(e.id.clone(), e);
        }
        w
    }

    #[test]
    fn tick_must_advance_by_exactly_one() {
        let pre = world_with(vec![], 5);
        let post = world_with(vec![], 7);
        let err = check_tick_monotonicity(&pre, &post, &[]);
        assert!(err.is_err());
    }

    #[test]
    fn negative_fuel_is_rejected() {
        let post = world_with(
            vec![Entity::builder("ship-1", EntityKind::Ship)
                .fuel(Fp::from_int(-1))
                .build()],
            1,
        );
        assert!(check_non_negative_stores(&post, &[]).is_err());
    }

    #[test]
    fn parent_binding_must_match_parent_position() {
        let parent = Entity::builder("ship-1", EntityKind::Ship)
            .position(FpVec2::new(Fp::from_int(5), Fp::from_int(5)))
            .build();
        let misbound_child = Entity::builder("cargo-1", EntityKind::MineralStore)
            .parent_id(Some(EntityId::new("ship-1")))
            .position(FpVec2::ZERO)
            .build();
        let post = world_with(vec![parent, misbound_child], 1);
        assert!(check_parent_binding(&post, &[]).is_err());
    }

    #[test]
    fn self_referential_parent_is_a_cycle() {
        let entity = Entity::builder("a", EntityKind::Ship)
            .parent_id(Some(EntityId::new("a")))
            .build();
        let post = world_with(vec![entity], 1);
        assert!(check_acyclicity(&post, &[]).is_err());
    }

    #[test]
    fn mutual_parent_cycle_is_detected() {
        let a = Entity::builder("a", EntityKind::Ship)
            .parent_id(Some(EntityId::new("b")))
            .build();
        let b = Entity::builder("b", EntityKind::Ship)
            .parent_id(Some(EntityId::new("a")))
            .build();
        let post = world_with(vec![a, b], 1);
        assert!(check_acyclicity(&post, &[]).is_err());
    }
}
