// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `THRUST`: burn fuel for a velocity change along a heading.
use crate::action::Action;
use crate::context::TickContext;
use crate::math::{unit_vector_deg, Fp};
use crate::update::{EntityChanges, EntityUpdate};

/// Valid when the actor exists, has strictly positive fuel above the
/// configured minimum threshold, and the requested magnitude is positive.
/// The effective magnitude clamp happens in [`handle`], not here — a request
/// for more thrust than available fuel allows is still a valid action, just
/// one that burns less than asked.
#[must_use]
pub fn validate(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::Thrust { actor, magnitude, .. } = action else {
        return false;
    };
    let Some(entity) = ctx.entity(actor) else {
        return false;
    };
    *magnitude > Fp::ZERO && entity.fuel > ctx.config().minimum_fuel_threshold
}

/// Effective magnitude is the minimum of the requested magnitude, what the
/// actor's fuel can pay for at `fuel_burn_rate`, and `max_thrust_per_tick`.
#[must_use]
pub fn handle(action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::Thrust {
        actor,
        magnitude,
        heading,
        ..
    } = action
    else {
        return Vec::new();
    };
    let Some(entity) = ctx.entity(actor) else {
        return Vec::new();
    };
    let config = ctx.config();
    let fuel_affordable = entity.fuel / config.fuel_burn_rate;
    let effective = (*magnitude)
        .min(fuel_affordable)
        .min(config.max_thrust_per_tick);
    if effective <= Fp::ZERO {
        return Vec::new();
    }
    let delta_v = unit_vector_deg(*heading).scale(effective);
    let mut changes = EntityChanges::default();
    changes.velocity = Some(entity.velocity + delta_v);
    changes.fuel = Some(entity.fuel - effective * config.fuel_burn_rate);
    changes.mass = Some(entity.mass - effective * config.mass_propulsion_loss);
    vec![EntityUpdate::new(actor.clone(), changes)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TurnConfig;
    use crate::entity::{Entity, EntityKind};
    use crate::ident::EntityId;
    use crate::world::WorldState;

    #[test]
    fn thrust_along_plus_x_burns_fuel_and_mass() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship)
                .fuel(Fp::from_int(100))
                .mass(Fp::from_int(1000))
                .heading(Fp::ZERO)
                .build(),
        );
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let action = Action::Thrust {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
            magnitude: Fp::from_int(10),
            heading: Fp::ZERO,
        };
        assert!(validate(&action, &ctx));
        let updates = handle(&action, &ctx);
        assert_eq!(updates.len(), 1);
        let changes = &updates[0].changes;
        assert_eq!(
            changes.velocity,
            Some(crate::math::FpVec2::new(Fp::from_int(10), Fp::ZERO))
        );
        assert_eq!(changes.fuel, Some(Fp::from_int(90)));
        assert_eq!(changes.mass, Some(Fp::from_int(990)));
    }

    #[test]
    fn thrust_magnitude_clamped_by_available_fuel() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship)
                .fuel(Fp::from_int(5))
                .mass(Fp::from_int(1000))
                .build(),
        );
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let action = Action::Thrust {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
            magnitude: Fp::from_int(10),
            heading: Fp::ZERO,
        };
        let updates = handle(&action, &ctx);
        assert_eq!(updates[0].changes.fuel, Some(Fp::ZERO));
    }

    #[test]
    fn zero_fuel_fails_validation() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship).build(),
        );
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let action = Action::Thrust {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
            magnitude: Fp::from_int(10),
            heading: Fp::ZERO,
        };
        assert!(!validate(&action, &ctx));
    }
}
