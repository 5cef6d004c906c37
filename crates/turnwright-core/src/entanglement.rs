// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entanglement detection: which actions within a wave must be resolved
//! together, and why (spec §4.D, rules R1-R3).
use std::collections::BTreeSet;

use crate::action::Action;
use crate::context::TickContext;
use crate::ident::EntityId;

/// The actor plus every id in [`Action::targets`], as a sorted set. This is
/// the reference set rules R1 and R2 compare; sorted storage makes the
/// comparison a linear merge rather than a quadratic scan, the same idiom
/// `warp-core::footprint`'s `BTreeSet`-backed node/edge/port sets use for
/// the same purpose.
#[must_use]
pub fn referenced_ids(action: &Action) -> BTreeSet<EntityId> {
    let mut set = BTreeSet::new();
    set.insert(action.actor().clone());
    for id in action.targets() {
        set.insert(id);
    }
    set
}

/// How two actions relate, independent of whether resolving them together
/// turns out to be a stalemate (that determination is
/// [`crate::cluster`]'s, since it requires executing both orderings against
/// the world, not just comparing reference sets).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PairClassification {
    /// The two actions share no entity id and are not chained by
    /// containment or weld ancestry.
    None,
    /// R1: the two actions' reference sets intersect.
    SharedTarget,
    /// R2: one action's actor appears in the other's target set.
    ActorTargetDuality,
    /// R3: a referenced id of one is an ancestor of (or shares a common
    /// ancestor with) a referenced id of the other, via the combined
    /// parent/weld chain.
    ContainmentChain,
}

/// Classifies the relationship between `a` and `b` using rules R1-R3, in
/// that priority order (a shared target is reported even if a containment
/// chain also exists, since R1 is checked first and is the more specific,
/// cheaper-to-explain relationship).
#[must_use]
pub fn classify(a: &Action, b: &Action, ctx: &TickContext<'_>) -> PairClassification {
    let refs_a = referenced_ids(a);
    let refs_b = referenced_ids(b);

    if refs_a.intersection(&refs_b).next().is_some() {
        return PairClassification::SharedTarget;
    }
    if refs_b.contains(a.actor()) || refs_a.contains(b.actor()) {
        return PairClassification::ActorTargetDuality;
    }
    if share_ancestor_chain(&refs_a, &refs_b, ctx) {
        return PairClassification::ContainmentChain;
    }
    PairClassification::None
}

/// `true` if `a` and `b` are entangled by any of R1-R3.
#[must_use]
pub fn entangled(a: &Action, b: &Action, ctx: &TickContext<'_>) -> bool {
    classify(a, b, ctx) != PairClassification::None
}

/// R3: is there `i_a` in `refs_a`, `i_b` in `refs_b`, `i_a != i_b`, such that
/// one is an ancestor of the other (via parent or weld chain) or they share
/// a common ancestor?
fn share_ancestor_chain(
    refs_a: &BTreeSet<EntityId>,
    refs_b: &BTreeSet<EntityId>,
    ctx: &TickContext<'_>,
) -> bool {
    for i_a in refs_a {
        for i_b in refs_b {
            if i_a == i_b {
                continue;
            }
            if is_ancestor_of(i_a, i_b, ctx) || is_ancestor_of(i_b, i_a, ctx) {
                return true;
            }
            if common_ancestor(i_a, i_b, ctx).is_some() {
                return true;
            }
        }
    }
    false
}

fn is_ancestor_of(candidate: &EntityId, descendant: &EntityId, ctx: &TickContext<'_>) -> bool {
    ctx.is_ancestor_via_parent(candidate, descendant)
        || ctx.is_ancestor_via_weld(candidate, descendant)
}

/// Returns the first ancestor shared by both `a` and `b`'s combined
/// parent/weld chains, if any.
fn common_ancestor(a: &EntityId, b: &EntityId, ctx: &TickContext<'_>) -> Option<EntityId> {
    let ancestors_a = ancestor_chain(a, ctx);
    let mut current = b.clone();
    let bound = ctx.entities().count() + 1;
    for _ in 0..=bound {
        if ancestors_a.contains(&current) {
            return Some(current);
        }
        match next_ancestor(&current, ctx) {
            Some(next) => current = next,
            None => return None,
        }
    }
    None
}

fn ancestor_chain(start: &EntityId, ctx: &TickContext<'_>) -> BTreeSet<EntityId> {
    let mut chain = BTreeSet::new();
    let mut current = start.clone();
    let bound = ctx.entities().count() + 1;
    for _ in 0..=bound {
        chain.insert(current.clone());
        match next_ancestor(&current, ctx) {
            Some(next) => current = next,
            None => break,
        }
    }
    chain
}

fn next_ancestor(id: &EntityId, ctx: &TickContext<'_>) -> Option<EntityId> {
    let entity = ctx.entity(id)?;
    entity
        .parent_id
        .clone()
        .or_else(|| entity.weld_parent_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TurnConfig;
    use crate::entity::{Entity, EntityKind};
    use crate::world::WorldState;

    fn ctx_with(entities: Vec<Entity>) -> WorldState {
        let mut state = WorldState::new("seed");
        for e in entities {
            state.entities.insert(e.id.clone(), e);
        }
        state
    }

    #[test]
    fn shared_target_detected_via_r1() {
        let state = ctx_with(vec![]);
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let a = Action::Weld {
            actor: EntityId::new("a"),
            player_id: None,
            order_index: 0,
            target_id: EntityId::new("m"),
        };
        let b = Action::Unweld {
            actor: EntityId::new("b"),
            player_id: None,
            order_index: 0,
            target_id: EntityId::new("m"),
        };
        assert_eq!(classify(&a, &b, &ctx), PairClassification::SharedTarget);
    }

    #[test]
    fn actor_target_duality_detected_via_r2() {
        let state = ctx_with(vec![]);
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let a = Action::Thrust {
            actor: EntityId::new("a"),
            player_id: None,
            order_index: 0,
            magnitude: crate::math::Fp::from_int(10),
            heading: crate::math::Fp::ZERO,
        };
        let b = Action::Weld {
            actor: EntityId::new("b"),
            player_id: None,
            order_index: 0,
            target_id: EntityId::new("a"),
        };
        assert_eq!(
            classify(&a, &b, &ctx),
            PairClassification::ActorTargetDuality
        );
    }

    #[test]
    fn containment_chain_detected_via_r3() {
        let state = ctx_with(vec![
            Entity::builder("ship", EntityKind::Ship).build(),
            Entity::builder("cargo-1", EntityKind::MineralStore)
                .parent_id(Some(EntityId::new("ship")))
                .build(),
            Entity::builder("cargo-2", EntityKind::MineralStore)
                .parent_id(Some(EntityId::new("ship")))
                .build(),
        ]);
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let a = Action::Unload {
            actor: EntityId::new("captain"),
            player_id: None,
            order_index: 0,
            content_id: EntityId::new("cargo-1"),
            new_position: crate::math::FpVec2::ZERO,
        };
        let b = Action::Unload {
            actor: EntityId::new("captain2"),
            player_id: None,
            order_index: 0,
            content_id: EntityId::new("cargo-2"),
            new_position: crate::math::FpVec2::ZERO,
        };
        assert_eq!(classify(&a, &b, &ctx), PairClassification::ContainmentChain);
    }

    #[test]
    fn unrelated_actions_are_not_entangled() {
        let state = ctx_with(vec![]);
        let config = TurnConfig::default();
        let ctx = TickContext::new(&state, 0, &config);
        let a = Action::SealAirlock {
            actor: EntityId::new("a"),
            player_id: None,
            order_index: 0,
        };
        let b = Action::SealAirlock {
            actor: EntityId::new("b"),
            player_id: None,
            order_index: 0,
        };
        assert!(!entangled(&a, &b, &ctx));
    }
}
