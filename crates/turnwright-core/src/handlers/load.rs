// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `LOAD` / `UNLOAD`: containment.
use crate::action::Action;
use crate::context::TickContext;
use crate::math::Fp;
use crate::update::{EntityChanges, EntityUpdate};

/// Valid when the actor, content, and container all exist; both content and
/// container are within the actor's reach; the container actually accepts
/// contents (`is_container`); content is not already contained or welded;
/// loading it would not introduce a containment cycle; and the container has
/// enough free volume.
#[must_use]
pub fn validate_load(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Load {
        actor,
        content_id,
        container_id,
        ..
    } = action
    else {
        return false;
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return false;
    };
    let Some(content) = ctx.entity(content_id) else {
        return false;
    };
    let Some(container) = ctx.entity(container_id) else {
        return false;
    };
    if !container.is_container {
        return false;
    }
    if content.parent_id.is_some() || content.weld_parent_id.is_some() {
        return false;
    }
    if actor_entity.position.squared_distance(content.position) > actor_entity.reach
        || actor_entity.position.squared_distance(container.position) > actor_entity.reach
    {
        return false;
    }
    if ctx.is_ancestor_via_parent(content_id, container_id) {
        return false;
    }
    let Some(capacity) = container.container_volume else {
        return false;
    };
    used_volume(ctx, container_id) + content.volume <= capacity
}

/// Folds `content`'s volume and mass into `container` and binds
/// `content.parent_id` to it.
#[must_use]
pub fn handle_load(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Load {
        content_id,
        container_id,
        ..
    } = action
    else {
        return Vec::new();
    };
    let Some(content) = ctx.entity(content_id) else {
        return Vec::new();
    };
    let Some(container) = ctx.entity(container_id) else {
        return Vec::new();
    };

    let mut content_changes = EntityChanges::default();
    content_changes.parent_id = Some(Some(container_id.clone()));
    let mut container_changes = EntityChanges::default();
    container_changes.mass = Some(container.mass + content.mass);
    vec![
        EntityUpdate::new(content_id.clone(), content_changes),
        EntityUpdate::new(container_id.clone(), container_changes),
    ]
}

/// Valid when the actor and content exist, content is currently contained,
/// and the content is within the actor's reach.
#[must_use]
pub fn validate_unload(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Unload {
        actor, content_id, ..
    } = action
    else {
        return false;
    };
    let Some(actor_entity) = ctx.entity(actor) else {
        return false;
    };
    let Some(content) = ctx.entity(content_id) else {
        return false;
    };
    content.parent_id.is_some()
        && actor_entity.position.squared_distance(content.position) <= actor_entity.reach
}

/// Clears `content.parent_id`, moves it to `new_position`, and removes its
/// mass and volume from the former container.
#[must_use]
pub fn handle_unload(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Unload {
        content_id,
        new_position,
        ..
    } = action
    else {
        return Vec::new();
    };
    let Some(content) = ctx.entity(content_id) else {
        return Vec::new();
    };
    let Some(container_id) = content.parent_id.clone() else {
        return Vec::new();
    };
    let Some(container) = ctx.entity(&container_id) else {
        return Vec::new();
    };

    let mut content_changes = EntityChanges::default();
    content_changes.parent_id = Some(None);
    content_changes.position = Some(*new_position);
    let mut container_changes = EntityChanges::default();
    container_changes.mass = Some(container.mass - content.mass);
    vec![
        EntityUpdate::new(content_id.clone(), content_changes),
        EntityUpdate::new(container_id, container_changes),
    ]
}

/// Total volume of every entity currently parented to `container_id`.
fn used_volume(ctx: &TickContext<'_>, container_id: &crate::ident::EntityId) -> Fp {
    ctx.entities()
        .filter(|(_, e)| e.parent_id.as_ref() == Some(container_id))
        .fold(Fp::ZERO, |acc, (_, e)| acc + e.volume)
}
