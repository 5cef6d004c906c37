// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy surfaced at tick and per-action boundaries.
use crate::action::Action;
use crate::ident::EntityId;
use crate::world::WorldState;

/// Why a single action did not produce an update. Reported in the tick's
/// metrics, never retried, never fatal — the tick itself still succeeds
/// (spec §7's propagation policy).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VoidReason {
    /// The action's pre-conditions failed against the state it was
    /// validated against.
    ValidationRejected,
    /// The action's whole cluster was voided by a mutual-exclusion pair.
    Stalemate,
    /// The action was valid in isolation but became invalid after an
    /// earlier action in the chosen permutation mutated the state.
    DependencyFailed,
    /// The registry has no `{validate, handler}` entry for this action's
    /// kind.
    UnknownAction,
    /// The actor id named by the action does not exist in the world.
    MissingActor,
}

/// Errors surfaced by the core. Only [`TurnError::InvariantViolation`] halts
/// a tick; every other variant is carried as per-action diagnostic data,
/// never returned from [`crate::pipeline::resolve_tick`] itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TurnError {
    /// A post-tick invariant failed. Fatal: the tick does not commit. Carries
    /// the "black box" needed to debug it — the failing invariant's name,
    /// the pre-resolution tick number, and the actions that were applied.
    #[error("invariant violation at tick {pre_tick}: {invariant} (actions: {applied_actions:?})")]
    InvariantViolation {
        /// Which invariant failed (e.g. `"I1: mass conservation"`).
        invariant: &'static str,
        /// The tick counter of the state before this tick's resolution.
        pre_tick: u64,
        /// The actors of every action that was applied before the check
        /// failed, in application order.
        applied_actions: Vec<EntityId>,
    },
}

impl TurnError {
    /// Builds an [`TurnError::InvariantViolation`] from the pre-tick state
    /// and the actions that had already been applied when the failing
    /// check ran.
    #[must_use]
    pub fn invariant_violation(
        invariant: &'static str,
        pre_state: &WorldState,
        applied: &[Action],
    ) -> Self {
        TurnError::InvariantViolation {
            invariant,
            pre_tick: pre_state.tick,
            applied_actions: applied.iter().map(|a| a.actor().clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violation_carries_pre_tick_and_actors() {
        let state = WorldState::new("seed");
        let action = Action::SealAirlock {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
        };
        let err = TurnError::invariant_violation("I2: non-negative mass", &state, &[action]);
        match err {
            TurnError::InvariantViolation {
                pre_tick,
                applied_actions,
                ..
            } => {
                assert_eq!(pre_tick, 0);
                assert_eq!(applied_actions, vec![EntityId::new("ship-1")]);
            }
        }
    }
}
