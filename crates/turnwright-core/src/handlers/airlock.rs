// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `SEAL_AIRLOCK` / `UNSEAL_AIRLOCK`: toggle the boolean.
use crate::action::Action;
use crate::context::TickContext;
use crate::update::{EntityChanges, EntityUpdate};

/// Valid when the actor exists and is not already sealed.
#[must_use]
pub fn validate_seal(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::SealAirlock { actor, .. } = action else {
        return false;
    };
    ctx.entity(actor).is_some_and(|e| !e.airlock_sealed)
}

/// Sets `airlock_sealed` to `true`.
#[must_use]
pub fn handle_seal(action: &Action, _ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::SealAirlock { actor, .. } = action else {
        return Vec::new();
    };
    let mut changes = EntityChanges::default();
    changes.airlock_sealed = Some(true);
    vec![EntityUpdate::new(actor.clone(), changes)]
}

/// Valid when the actor exists and is currently sealed.
#[must_use]
pub fn validate_unseal(action: &Action, ctx: &TickContext<'_>) -> bool {
    let Action::UnsealAirlock { actor, .. } = action else {
        return false;
    };
    ctx.entity(actor).is_some_and(|e| e.airlock_sealed)
}

/// Sets `airlock_sealed` to `false`.
#[must_use]
pub fn handle_unseal(action: &Action, _ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
    let Action::UnsealAirlock { actor, .. } = action else {
        return Vec::new();
    };
    let mut changes = EntityChanges::default();
    changes.airlock_sealed = Some(false);
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
    fn seal_then_unseal_round_trips() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship).build(),
        );
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let seal = Action::SealAirlock {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
        };
        assert!(validate_seal(&seal, &ctx));
        assert_eq!(
            handle_seal(&seal, &ctx)[0].changes.airlock_sealed,
            Some(true)
        );

        if let Some(ship) = state.entities.get(&EntityId::new("ship-1")) {
            assert!(!ship.airlock_sealed);
        }
    }

    #[test]
    fn sealing_an_already_sealed_airlock_fails_validation() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship)
                .airlock_sealed(true)
                .build(),
        );
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let seal = Action::SealAirlock {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
        };
        assert!(!validate_seal(&seal, &ctx));
    }
}
