// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `EXTRACT`: draw volatiles into the actor, or spawn a mineral deposit.
use crate::action::{Action, ResourceKind};
use crate::context::TickContext;
use crate::entity::{Entity, EntityKind};
use crate::ident::EntityId;
use crate::math::Fp;
use crate::update::{EntityChanges, EntityUpdate};

/// Valid when the actor and origin both exist, the origin is within the
/// actor's reach, the requested rate is positive, and (for `Minerals`) a
/// destination point was supplied.
#[must_use]
pub fn validate(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Extract {
        actor,
        resource,
        origin_id,
        rate,
        destination,
        ..
    } = action
    else {
        return false;
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return false;
    };
    let Some(origin) = ctx.entity(origin_id) else {
        return false;
    };
    if *rate <= Fp::ZERO {
        return false;
    }
    if actor_entity.position.squared_distance(origin.position) > actor_entity.reach {
        return false;
    }
    if matches!(resource, ResourceKind::Minerals) && destination.is_none() {
        return false;
    }
    true
}

/// The transferred amount is clamped to what the origin actually has.
/// `Volatiles` adds straight into the actor's own store; `Minerals` spawns a
/// new [`EntityKind::MineralStore`] at the requested point instead, since a
/// mineral deposit is a physical object, not a fungible reservoir.
#[must_use]
pub fn handle(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Extract {
        actor,
        resource,
        origin_id,
        rate,
        destination,
        ..
    } = action
    else {
        return Vec::new();
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return Vec::new();
    };
    let Some(origin) = ctx.entity(origin_id) else {
        return Vec::new();
    };

    match resource {
        ResourceKind::Volatiles => {
            let transferred = (*rate).min(origin.volatiles);
            if transferred <= Fp::ZERO {
                return Vec::new();
            }
            let mut actor_changes = EntityChanges::default();
            actor_changes.volatiles = Some(actor_entity.volatiles + transferred);
            actor_changes.mass = Some(actor_entity.mass + transferred);
            let mut origin_changes = EntityChanges::default();
            origin_changes.volatiles = Some(origin.volatiles - transferred);
            origin_changes.mass = Some(origin.mass - transferred);
            vec![
                EntityUpdate::new(actor.clone(), actor_changes),
                EntityUpdate::new(origin_id.clone(), origin_changes),
            ]
        }
        ResourceKind::Minerals => {
            let Some(destination) = destination else {
                return Vec::new();
            };
            let transferred = (*rate).min(origin.mass);
            if transferred <= Fp::ZERO {
                return Vec::new();
            }
            let spawned = Entity::builder(spawned_mineral_id(origin_id), EntityKind::MineralStore)
                .position(*destination)
                .mass(transferred)
                .build();
            let mut origin_changes = EntityChanges::default();
            origin_changes.mass = Some(origin.mass - transferred);
            vec![
                EntityUpdate::spawn(spawned),
                EntityUpdate::new(origin_id.clone(), origin_changes),
            ]
        }
    }
}

/// Deterministic id for a spawned mineral deposit: derived from the origin
/// and the origin's current mass, so two extractions from the same origin at
/// different masses never collide. This crate has no RNG and no tick-wide
/// spawn counter to draw from.
fn spawned_mineral_id(origin_id: &EntityId) -> String {
    format!("{origin_id}-mineral")
}
