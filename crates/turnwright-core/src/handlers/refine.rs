// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `REFINE`: convert volatiles into fuel, at a loss.
use crate::action::Action;
use crate::context::TickContext;
use crate::math::Fp;
use crate::update::{EntityChanges, EntityUpdate};

/// Valid when the actor exists, holds at least the requested amount of
/// volatiles, and the requested amount is positive and within
/// `refine_max_batch`.
#[must_use]
pub fn validate(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Refine {
        actor,
        volatiles_amount,
        ..
    } = action
    else {
        return false;
    };
    let Some(entity) = ctx.entity(actor) else {
        return false;
    };
    *volatiles_amount > Fp::ZERO
        && *volatiles_amount <= entity.volatiles
        && *volatiles_amount <= ctx.config().refine_max_batch
}

/// `a` volatiles become `a * refine_efficiency` fuel; the remainder
/// `a * (1 - refine_efficiency)` is waste, removed from total mass rather
/// than converted to anything.
#[must_use]
pub fn handle(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Refine {
        actor,
        volatiles_amount,
        ..
    } = action
    else {
        return Vec::new();
    };
    let Some(entity) = ctx.entity(actor) else {
        return Vec::new();
    };
    let config = ctx.config();
    let fuel_gained = *volatiles_amount * config.refine_efficiency;
    let waste = *volatiles_amount - fuel_gained;

    let mut changes = EntityChanges::default();
    changes.volatiles = Some(entity.volatiles - *volatiles_amount);
    changes.fuel = Some(entity.fuel + fuel_gained);
    changes.mass = Some(entity.mass - waste);
    vec![EntityUpdate::new(actor.clone(), changes)]
}
