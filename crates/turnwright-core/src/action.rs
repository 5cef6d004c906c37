// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The action set: one tagged variant per player-submittable command.
use crate::ident::{EntityId, PlayerId};
use crate::math::{Fp, FpVec2};

/// Which resource an `EXTRACT` action draws.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ResourceKind {
    /// Drawn directly into the actor's own `volatiles` store.
    Volatiles,
    /// Spawns a new `MINERAL_STORE` entity at a target point.
    Minerals,
}

/// A player-submitted command. Every variant carries the actor id, the
/// optional owning player id, and the wave (`order_index`) it was submitted
/// for; everything past that is variant-specific.
#[derive(Clone, PartialEq, Debug)]
pub enum Action {
    /// Toggle the airlock closed. Always ordered first in the heuristic
    /// fallback because it only ever relaxes other actions' preconditions.
    UnsealAirlock {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
    },
    /// Clear a rigid attachment, splitting mass back to both sides.
    Unweld {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// The entity to unweld from the actor.
        target_id: EntityId,
    },
    /// Remove a content entity from its container, repositioning it.
    Unload {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// The contained entity to release.
        content_id: EntityId,
        /// Where the released entity reappears.
        new_position: FpVec2,
    },
    /// Toggle the airlock sealed, a precondition for `Weld`.
    SealAirlock {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
    },
    /// Rigidly attach a target to the actor, folding its mass in.
    Weld {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// The entity to weld onto the actor.
        target_id: EntityId,
    },
    /// Contain a content entity inside a container entity.
    Load {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// The entity to place inside the container.
        content_id: EntityId,
        /// The entity to contain it.
        container_id: EntityId,
    },
    /// Draw a resource from a source entity.
    Extract {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// Which resource is drawn.
        resource: ResourceKind,
        /// The entity the resource is drawn from.
        origin_id: EntityId,
        /// The requested extraction rate; the handler clamps it to what the
        /// source actually has.
        rate: Fp,
        /// Required, and only meaningful, when `resource` is `Minerals`:
        /// where the spawned `MINERAL_STORE` appears.
        destination: Option<FpVec2>,
    },
    /// Convert volatiles into fuel, at a loss.
    Refine {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// How much of the actor's volatiles to process.
        volatiles_amount: Fp,
    },
    /// Burn fuel for a velocity change along a heading.
    Thrust {
        /// The entity performing the action.
        actor: EntityId,
        /// The player who submitted this action, if any.
        player_id: Option<PlayerId>,
        /// The wave this action belongs to.
        order_index: u32,
        /// Requested thrust magnitude; the handler clamps it to what fuel
        /// and the configured per-tick ceiling allow.
        magnitude: Fp,
        /// Direction of the burn, in FP degrees.
        heading: Fp,
    },
}

/// The kind of an [`Action`], used for registry dispatch and for the
/// deterministic tie-break order in the cluster resolver's stable heuristic
/// fallback (spec §4.D edge cases). Declared in exactly the priority order
/// the fallback uses, so the derived [`Ord`] *is* that priority:
/// `UNSEAL < UNWELD < UNLOAD < SEAL < WELD < LOAD < EXTRACT < REFINE < THRUST`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ActionKind {
    /// See [`Action::UnsealAirlock`].
    UnsealAirlock,
    /// See [`Action::Unweld`].
    Unweld,
    /// See [`Action::Unload`].
    Unload,
    /// See [`Action::SealAirlock`].
    SealAirlock,
    /// See [`Action::Weld`].
    Weld,
    /// See [`Action::Load`].
    Load,
    /// See [`Action::Extract`].
    Extract,
    /// See [`Action::Refine`].
    Refine,
    /// See [`Action::Thrust`].
    Thrust,
}

impl Action {
    /// The entity performing this action.
    #[must_use]
    pub fn actor(&self) -> &EntityId {
        match self {
            Action::UnsealAirlock { actor, .. }
            | Action::Unweld { actor, .. }
            | Action::Unload { actor, .. }
            | Action::SealAirlock { actor, .. }
            | Action::Weld { actor, .. }
            | Action::Load { actor, .. }
            | Action::Extract { actor, .. }
            | Action::Refine { actor, .. }
            | Action::Thrust { actor, .. } => actor,
        }
    }

    /// The wave this action belongs to.
    #[must_use]
    pub fn order_index(&self) -> u32 {
        match self {
            Action::UnsealAirlock { order_index, .. }
            | Action::Unweld { order_index, .. }
            | Action::Unload { order_index, .. }
            | Action::SealAirlock { order_index, .. }
            | Action::Weld { order_index, .. }
            | Action::Load { order_index, .. }
            | Action::Extract { order_index, .. }
            | Action::Refine { order_index, .. }
            | Action::Thrust { order_index, .. } => *order_index,
        }
    }

    /// This action's discriminant, used for dispatch and tie-breaking.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::UnsealAirlock { .. } => ActionKind::UnsealAirlock,
            Action::Unweld { .. } => ActionKind::Unweld,
            Action::Unload { .. } => ActionKind::Unload,
            Action::SealAirlock { .. } => ActionKind::SealAirlock,
            Action::Weld { .. } => ActionKind::Weld,
            Action::Load { .. } => ActionKind::Load,
            Action::Extract { .. } => ActionKind::Extract,
            Action::Refine { .. } => ActionKind::Refine,
            Action::Thrust { .. } => ActionKind::Thrust,
        }
    }

    /// The `targets` list extracted from this variant's fields, per §4.C's
    /// fixed extraction rules (`target_ids`, `content_ids ∪ container_ids`,
    /// `origin_ids`, ...). Does not include the actor; see
    /// [`crate::entanglement::referenced_ids`] for the actor-inclusive
    /// reference set used by entanglement detection.
    #[must_use]
    pub fn targets(&self) -> Vec<EntityId> {
        match self {
            Action::UnsealAirlock { .. }
            | Action::SealAirlock { .. }
            | Action::Refine { .. }
            | Action::Thrust { .. } => Vec::new(),
            Action::Unweld { target_id, .. } | Action::Weld { target_id, .. } => {
                vec![target_id.clone()]
            }
            Action::Unload { content_id, .. } => vec![content_id.clone()],
            Action::Load {
                content_id,
                container_id,
                ..
            } => vec![content_id.clone(), container_id.clone()],
            Action::Extract { origin_id, .. } => vec![origin_id.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_ordering_matches_fallback_priority() {
        assert!(ActionKind::UnsealAirlock < ActionKind::Unweld);
        assert!(ActionKind::Unweld < ActionKind::Unload);
        assert!(ActionKind::Unload < ActionKind::SealAirlock);
        assert!(ActionKind::SealAirlock < ActionKind::Weld);
        assert!(ActionKind::Weld < ActionKind::Load);
        assert!(ActionKind::Load < ActionKind::Extract);
        assert!(ActionKind::Extract < ActionKind::Refine);
        assert!(ActionKind::Refine < ActionKind::Thrust);
    }

    #[test]
    fn load_targets_both_content_and_container() {
        let action = Action::Load {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
            content_id: EntityId::new("mineral-1"),
            container_id: EntityId::new("ship-1"),
        };
        assert_eq!(
            action.targets(),
            vec![EntityId::new("mineral-1"), EntityId::new("ship-1")]
        );
    }

    #[test]
    fn thrust_has_no_targets() {
        let action = Action::Thrust {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
            magnitude: Fp::from_int(10),
            heading: Fp::ZERO,
        };
        assert!(action.targets().is_empty());
    }
}
