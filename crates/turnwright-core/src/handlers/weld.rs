// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `WELD` / `UNWELD`: rigid attachment.
use crate::action::Action;
use crate::context::TickContext;
use crate::update::{EntityChanges, EntityUpdate};

/// Valid when the actor and target exist, neither is currently welded or
/// contained, both are within reach of each other, welding would not
/// introduce a cycle, and the actor's airlock is sealed.
#[must_use]
pub fn validate_weld(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Weld { actor, target_id, .. } = action else {
        return false;
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return false;
    };
    let Some(target) = ctx.entity(target_id) else {
        return false;
    };
    if !actor_entity.airlock_sealed {
        return false;
    }
    if target.weld_parent_id.is_some() || target.parent_id.is_some() {
        return false;
    }
    if actor_entity.position.squared_distance(target.position) > actor_entity.reach {
        return false;
    }
    !ctx.is_ancestor_via_weld(target_id, actor)
}

/// Binds `target.weld_parent_id` to the actor, records the relative offset
/// at weld time, and folds `target`'s mass into the actor's.
#[must_use]
pub fn handle_weld(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Weld { actor, target_id, .. } = action else {
        return Vec::new();
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return Vec::new();
    };
    let Some(target) = ctx.entity(target_id) else {
        return Vec::new();
    };

    let mut target_changes = EntityChanges::default();
    target_changes.weld_parent_id = Some(Some(actor.clone()));
    target_changes.relative_offset = Some(target.position - actor_entity.position);
    let mut actor_changes = EntityChanges::default();
    actor_changes.mass = Some(actor_entity.mass + target.mass);
    vec![
        EntityUpdate::new(target_id.clone(), target_changes),
        EntityUpdate::new(actor.clone(), actor_changes),
    ]
}

/// Valid when the actor and target exist and the target is currently welded
/// to the actor.
#[must_use]
pub fn validate_unweld(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Unweld { actor, target_id, .. } = action else {
        return false;
    };
    if ctx.entity(actor).is_none() {
        return false;
    }
    let Some(target) = ctx.entity(target_id) else {
        return false;
    };
    target.weld_parent_id.as_ref() == Some(actor)
}

/// Clears `target.weld_parent_id` and offset, splitting `target`'s mass back
/// out of the actor's.
#[must_use]
pub fn handle_unweld(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Unweld { actor, target_id, .. } = action else {
        return Vec::new();
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return Vec::new();
    };
    let Some(target) = ctx.entity(target_id) else {
        return Vec::new();
    };

    let mut target_changes = EntityChanges::default();
    target_changes.weld_parent_id = Some(None);
    target_changes.relative_offset = Some(crate::math::FpVec2::ZERO);
    let mut actor_changes = EntityChanges::default();
    actor_changes.mass = Some(actor_entity.mass - target.mass);
    vec![
        EntityUpdate::new(target_id.clone(), target_changes),
        EntityUpdate::new(actor.clone(), actor_changes),
    ]
}
