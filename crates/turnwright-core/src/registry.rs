// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Action-kind to `{validate, handler}` table.
//!
//! A name/kind to `{validate, execute}` mapping is exactly
//! `warp-core::rule::{PatternGraph, MatchFn, ExecuteFn, RewriteRule}`'s
//! shape; the difference is that this registry is keyed by a closed
//! [`ActionKind`] enum rather than a pattern-matched graph rule, so dispatch
//! is a single match expression rather than a runtime pattern search.
use crate::action::{Action, ActionKind};
use crate::context::TickContext;
use crate::handlers;
use crate::update::EntityUpdate;

/// Validates `action`'s preconditions against `ctx`. Pure and read-only:
/// never mutates anything reachable through `ctx`.
pub type ValidateFn = fn(&Action, &TickContext<'_>) -> bool;

/// Produces the entity updates `action` causes, given `ctx`. Pure: reads
/// `ctx`, never mutates it, and returns new data rather than editing
/// anything in place. An empty return signals "no effect".
pub type HandlerFn = fn(&Action, &TickContext<'_>) -> Vec<EntityUpdate>;

/// One registry entry: the validate/handler pair for a single [`ActionKind`].
#[derive(Clone, Copy)]
struct RegistryEntry {
    validate: ValidateFn,
    handler: HandlerFn,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry").finish_non_exhaustive()
    }
}

/// Immutable table mapping every [`ActionKind`] to its `{validate, handler}`
/// pair. Built once via [`ActionRegistry::standard`] and never mutated
/// afterward; dispatch is a single match on the action's discriminant.
#[derive(Debug, Clone, Copy)]
pub struct ActionRegistry;

impl ActionRegistry {
    /// Builds the registry containing every canonical handler described in
    /// this crate's `handlers` module. There is currently only one registry
    /// configuration; a build-time-constant table per spec §4.C and §9
    /// ("the table is build-time constant").
    #[must_use]
    pub fn standard() -> Self {
        ActionRegistry
    }

    fn entry_for(kind: ActionKind) -> RegistryEntry {
        match kind {
            ActionKind::Thrust => RegistryEntry {
                validate: handlers::thrust::validate,
                handler: handlers::thrust::handle,
            },
            ActionKind::Extract => RegistryEntry {
                validate: handlers::extract::validate,
                handler: handlers::extract::handle,
            },
            ActionKind::Refine => RegistryEntry {
                validate: handlers::refine::validate,
                handler: handlers::refine::handle,
            },
            ActionKind::Load => RegistryEntry {
                validate: handlers::load::validate_load,
                handler: handlers::load::handle_load,
            },
            ActionKind::Unload => RegistryEntry {
                validate: handlers::load::validate_unload,
                handler: handlers::load::handle_unload,
            },
            ActionKind::Weld => RegistryEntry {
                validate: handlers::weld::validate_weld,
                handler: handlers::weld::handle_weld,
            },
            ActionKind::Unweld => RegistryEntry {
                validate: handlers::weld::validate_unweld,
                handler: handlers::weld::handle_unweld,
            },
            ActionKind::SealAirlock => RegistryEntry {
                validate: handlers::airlock::validate_seal,
                handler: handlers::airlock::handle_seal,
            },
            ActionKind::UnsealAirlock => RegistryEntry {
                validate: handlers::airlock::validate_unseal,
                handler: handlers::airlock::handle_unseal,
            },
        }
    }

    /// Validates `action` against `ctx` by dispatching to its kind's
    /// registered validator. Every [`ActionKind`] has an entry, so this
    /// never encounters `UNKNOWN_ACTION` — that void reason is for actions
    /// arriving from outside this crate's closed enum, at the boundary
    /// layer that decodes wire input into [`Action`].
    #[must_use]
    pub fn validate(&self, action: &Action, ctx: &TickContext<'_>) -> bool {
        (Self::entry_for(action.kind()).validate)(action, ctx)
    }

    /// Produces the updates `action` causes, given `ctx`. Callers must only
    /// call this after [`ActionRegistry::validate`] returns `true`; handlers
    /// do not re-check their own preconditions.
    #[must_use]
    pub fn handle(&self, action: &Action, ctx: &TickContext<'_>) -> Vec<EntityUpdate> {
        (Self::entry_for(action.kind()).handler)(action, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TurnConfig;
    use crate::entity::{Entity, EntityKind};
    use crate::ident::EntityId;
    use crate::math::Fp;
    use crate::world::WorldState;

    #[test]
    fn every_action_kind_dispatches_to_a_distinct_entry() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship)
                .fuel(Fp::from_int(100))
                .mass(Fp::from_int(1000))
                .build(),
        );
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let registry = ActionRegistry::standard();
        let action = Action::SealAirlock {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
        };
        assert!(registry.validate(&action, &ctx));
        let updates = registry.handle(&action, &ctx);
        assert_eq!(updates.len(), 1);
    }
}
