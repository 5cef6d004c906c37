// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entanglement clustering and per-cluster conflict resolution: the
//! stalemate-first check, the bounded permutation search, and the commit
//! pass that derives canonical updates.
use std::collections::BTreeMap;

use crate::action::Action;
use crate::constants::TurnConfig;
use crate::context::TickContext;
use crate::entanglement;
use crate::error::VoidReason;
use crate::registry::ActionRegistry;
use crate::update::{apply_updates, EntityUpdate};
use crate::world::WorldState;

/// An action voided out of a wave, with the reason it did not execute.
#[derive(Clone, PartialEq, Debug)]
pub struct VoidedAction {
    /// The action that did not execute.
    pub action: Action,
    /// Why.
    pub reason: VoidReason,
}

/// The result of resolving a single cluster: the updates its executed
/// actions produced, the actions in the order they executed, the actions
/// that were voided and why, how many permutations the Success Maximizer
/// tried, whether the cluster fell to stalemate, and whether the
/// permutation bound forced a heuristic fallback order.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ClusterOutcome {
    /// Updates produced by every executed action, in execution order.
    pub updates: Vec<EntityUpdate>,
    /// Actions that executed, in the order they executed.
    pub executed: Vec<Action>,
    /// Actions that did not execute, and why.
    pub voided: Vec<VoidedAction>,
    /// How many permutations the Success Maximizer scored. Zero for an
    /// empty or singleton cluster, a stalemate, or a fallback-order cluster.
    pub permutations_tested: usize,
    /// Whether Step 2's mutual-exclusion check voided the whole cluster.
    pub stalemate: bool,
    /// Whether the cluster exceeded the permutation bound and fell back to
    /// the stable heuristic order instead of a searched permutation.
    pub used_fallback: bool,
}

/// Aggregate counters for a single wave's resolution, folded across every
/// cluster in that wave.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WaveMetrics {
    /// Number of disjoint clusters in the wave.
    pub cluster_count: usize,
    /// Total permutations scored across every cluster.
    pub permutations_tested: usize,
    /// Number of clusters voided by stalemate.
    pub stalemate_count: usize,
    /// Total actions that executed successfully across every cluster.
    pub success_count: usize,
}

/// How a drafted action relates to a list of already-queued ones, for
/// pre-flight UI warnings.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContestationRisk {
    /// A mutual-exclusion pair exists between the draft and a queued action.
    High,
    /// Reference sets overlap (entangled) without mutual exclusion.
    Medium,
    /// No overlap at all.
    None,
}

/// Orders actions by [`crate::action::ActionKind`]'s declared priority, then
/// by actor id. This is both the stable fallback order used when a cluster
/// exceeds the permutation bound, and the canonical order clusters are
/// normalized to before permutation generation, so the search itself is a
/// pure function of cluster membership rather than of input list order.
fn canonical_order(a: &Action, b: &Action) -> std::cmp::Ordering {
    a.kind().cmp(&b.kind()).then_with(|| a.actor().cmp(b.actor()))
}

fn find_root(parent: &mut [usize], i: usize) -> usize {
    if parent[i] != i {
        let root = find_root(parent, parent[i]);
        parent[i] = root;
    }
    parent[i]
}

/// Groups `actions` into disjoint entangled clusters via union-find with
/// path compression (spec §4.D Step 1). Each returned group is itself in
/// [`canonical_order`]; groups are returned ordered by their lowest member
/// index after union, which is deterministic given a deterministic input
/// order.
#[must_use]
pub fn cluster_actions(
    actions: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
) -> Vec<Vec<Action>> {
    let n = actions.len();
    if n == 0 {
        return Vec::new();
    }
    let mut parent: Vec<usize> = (0..n).collect();
    let ctx = TickContext::new(state, wave, config);
    for i in 0..n {
        for j in (i + 1)..n {
            if entanglement::entangled(&actions[i], &actions[j], &ctx) {
                let ri = find_root(&mut parent, i);
                let rj = find_root(&mut parent, j);
                if ri != rj {
                    let (lo, hi) = if ri < rj { (ri, rj) } else { (rj, ri) };
                    parent[hi] = lo;
                }
            }
        }
    }
    let mut groups: BTreeMap<usize, Vec<Action>> = BTreeMap::new();
    for i in 0..n {
        let root = find_root(&mut parent, i);
        groups.entry(root).or_default().push(actions[i].clone());
    }
    for group in groups.values_mut() {
        group.sort_by(canonical_order);
    }
    groups.into_values().collect()
}

/// Do `a` and `b` contest the same *unique* resource — the same content
/// being loaded, the same target being welded, or a weld/unweld of the same
/// joint? This is the gate that keeps Step 2 from flagging pairs that are
/// merely order-sensitive rather than genuinely exclusive.
fn contests_unique_resource(a: &Action, b: &Action) -> bool {
    match (a, b) {
        (Action::Load { content_id: c1, .. }, Action::Load { content_id: c2, .. }) => c1 == c2,
        (Action::Weld { target_id: t1, .. }, Action::Weld { target_id: t2, .. }) => t1 == t2,
        (Action::Weld { target_id: t1, .. }, Action::Unweld { target_id: t2, .. })
        | (Action::Unweld { target_id: t1, .. }, Action::Weld { target_id: t2, .. }) => t1 == t2,
        _ => false,
    }
}

/// Simulates `first` then `second` against a virtual copy of `state`,
/// returning `true` only if both validate (in that order — `second`'s
/// validation runs against the state `first`'s execution produced).
fn sequence_both_valid(
    first: &Action,
    second: &Action,
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> bool {
    let mut virtual_state = state.clone();
    let ctx = TickContext::new(&virtual_state, wave, config);
    if !registry.validate(first, &ctx) {
        return false;
    }
    let updates = registry.handle(first, &ctx);
    apply_updates(&mut virtual_state, &updates);
    let ctx_after = TickContext::new(&virtual_state, wave, config);
    registry.validate(second, &ctx_after)
}

/// `true` if `a`, valid in isolation, executing first makes `b` (also valid
/// in isolation) invalid. The secondary escape hatch in Step 2 fires when
/// this holds in both directions.
fn strictly_blocks(
    a: &Action,
    b: &Action,
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> bool {
    let ctx0 = TickContext::new(state, wave, config);
    if !registry.validate(a, &ctx0) || !registry.validate(b, &ctx0) {
        return false;
    }
    let mut virtual_state = state.clone();
    let ctx = TickContext::new(&virtual_state, wave, config);
    let updates = registry.handle(a, &ctx);
    apply_updates(&mut virtual_state, &updates);
    let ctx_after = TickContext::new(&virtual_state, wave, config);
    !registry.validate(b, &ctx_after)
}

/// Step 2's per-pair test: are `a` and `b` mutually exclusive?
fn pair_mutually_exclusive(
    a: &Action,
    b: &Action,
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> bool {
    let ctx0 = TickContext::new(state, wave, config);
    if !registry.validate(a, &ctx0) || !registry.validate(b, &ctx0) {
        return false;
    }
    let either_order_succeeds = sequence_both_valid(a, b, state, wave, config, registry)
        || sequence_both_valid(b, a, state, wave, config, registry);
    if either_order_succeeds {
        return false;
    }
    if contests_unique_resource(a, b) {
        return true;
    }
    strictly_blocks(a, b, state, wave, config, registry)
        && strictly_blocks(b, a, state, wave, config, registry)
}

fn has_mutual_exclusion(
    cluster: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> bool {
    for i in 0..cluster.len() {
        for j in (i + 1)..cluster.len() {
            if pair_mutually_exclusive(&cluster[i], &cluster[j], state, wave, config, registry) {
                return true;
            }
        }
    }
    false
}

/// `true` if `n!` does not exceed `bound`, computed without ever
/// materializing the factorial past the point it would overflow or exceed
/// the bound.
fn factorial_fits(n: usize, bound: usize) -> bool {
    let mut product: usize = 1;
    for k in 2..=n {
        product = match product.checked_mul(k) {
            Some(v) => v,
            None => return false,
        };
        if product > bound {
            return false;
        }
    }
    true
}

/// Generates every permutation of `items`, via insert-at-each-position
/// recursion. Deterministic for a given input order: the same `items` in
/// the same order always yields permutations in the same sequence.
fn generate_permutations(items: Vec<Action>) -> Vec<Vec<Action>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.clone();
        let picked = rest.remove(i);
        for mut tail in generate_permutations(rest) {
            tail.insert(0, picked.clone());
            result.push(tail);
        }
    }
    result
}

/// Simulates `order` end to end against a fresh virtual copy of `state`,
/// returning the count of actions whose validation passed.
fn score_permutation(
    order: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> usize {
    let mut virtual_state = state.clone();
    let mut valid_count = 0;
    for action in order {
        let ctx = TickContext::new(&virtual_state, wave, config);
        if registry.validate(action, &ctx) {
            valid_count += 1;
            let updates = registry.handle(action, &ctx);
            apply_updates(&mut virtual_state, &updates);
        }
    }
    valid_count
}

/// Step 3: the Success Maximizer. Returns the best-scoring order found (or
/// the canonical fallback order if the cluster exceeds `permutation_bound`)
/// plus how many permutations were actually scored.
fn best_permutation(
    cluster: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> (Vec<Action>, usize) {
    if !factorial_fits(cluster.len(), config.permutation_bound) {
        let mut fallback = cluster.to_vec();
        fallback.sort_by(canonical_order);
        return (fallback, 0);
    }
    let permutations = generate_permutations(cluster.to_vec());
    let target = cluster.len();
    let mut best = cluster.to_vec();
    let mut best_score = 0;
    let mut tested = 0;
    for perm in permutations {
        tested += 1;
        let score = score_permutation(&perm, state, wave, config, registry);
        if score > best_score {
            best_score = score;
            best = perm.clone();
        }
        if score == target {
            best = perm;
            break;
        }
    }
    (best, tested)
}

/// Step 4: re-executes `order` against a fresh copy of `state` to derive the
/// canonical updates, the final executed list, and any actions that still
/// fail (`DEPENDENCY_FAILED`, since they were only invalidated by an earlier
/// action's effect within this same cluster).
fn commit(
    order: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> (Vec<EntityUpdate>, Vec<Action>, Vec<VoidedAction>) {
    let mut virtual_state = state.clone();
    let mut updates = Vec::new();
    let mut executed = Vec::new();
    let mut voided = Vec::new();
    for action in order {
        let ctx = TickContext::new(&virtual_state, wave, config);
        if registry.validate(action, &ctx) {
            let action_updates = registry.handle(action, &ctx);
            apply_updates(&mut virtual_state, &action_updates);
            updates.extend(action_updates);
            executed.push(action.clone());
        } else {
            voided.push(VoidedAction {
                action: action.clone(),
                reason: VoidReason::DependencyFailed,
            });
        }
    }
    (updates, executed, voided)
}

/// Resolves a single cluster end to end (spec §4.D Steps 1-4, clustering
/// itself having already happened in [`cluster_actions`]). `cluster` need
/// not arrive pre-sorted; this function normalizes to [`canonical_order`]
/// before doing anything order-sensitive.
#[must_use]
pub fn resolve_cluster(
    cluster: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> ClusterOutcome {
    if cluster.is_empty() {
        return ClusterOutcome::default();
    }
    let mut canonical = cluster.to_vec();
    canonical.sort_by(canonical_order);

    if canonical.len() == 1 {
        let action = &canonical[0];
        let ctx = TickContext::new(state, wave, config);
        return if registry.validate(action, &ctx) {
            let updates = registry.handle(action, &ctx);
            ClusterOutcome {
                updates,
                executed: vec![action.clone()],
                ..ClusterOutcome::default()
            }
        } else {
            ClusterOutcome {
                voided: vec![VoidedAction {
                    action: action.clone(),
                    reason: VoidReason::ValidationRejected,
                }],
                ..ClusterOutcome::default()
            }
        };
    }

    if has_mutual_exclusion(&canonical, state, wave, config, registry) {
        crate::telemetry::stalemate(wave, &canonical);
        return ClusterOutcome {
            voided: canonical
                .into_iter()
                .map(|action| VoidedAction {
                    action,
                    reason: VoidReason::Stalemate,
                })
                .collect(),
            stalemate: true,
            ..ClusterOutcome::default()
        };
    }

    let used_fallback = !factorial_fits(canonical.len(), config.permutation_bound);
    let (best_order, permutations_tested) = best_permutation(&canonical, state, wave, config, registry);
    let (updates, executed, voided) = commit(&best_order, state, wave, config, registry);
    ClusterOutcome {
        updates,
        executed,
        voided,
        permutations_tested,
        stalemate: false,
        used_fallback,
    }
}

/// Resolves every cluster in a wave independently against the same
/// pre-wave `state` (clusters are entity-disjoint by construction, so
/// merging their updates afterward cannot depend on resolution order).
#[must_use]
pub fn resolve_wave(
    actions: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> (Vec<EntityUpdate>, Vec<VoidedAction>, WaveMetrics) {
    let clusters = cluster_actions(actions, state, wave, config);
    let mut updates = Vec::new();
    let mut voided = Vec::new();
    let mut permutations_tested = 0;
    let mut stalemate_count = 0;
    let mut success_count = 0;
    for cluster in &clusters {
        let outcome = resolve_cluster(cluster, state, wave, config, registry);
        permutations_tested += outcome.permutations_tested;
        if outcome.stalemate {
            stalemate_count += 1;
        }
        success_count += outcome.executed.len();
        updates.extend(outcome.updates);
        voided.extend(outcome.voided);
    }
    let metrics = WaveMetrics {
        cluster_count: clusters.len(),
        permutations_tested,
        stalemate_count,
        success_count,
    };
    (updates, voided, metrics)
}

/// Pre-flight check: how risky would queuing `draft` alongside `queued` be?
#[must_use]
pub fn contestation_risk(
    draft: &Action,
    queued: &[Action],
    state: &WorldState,
    wave: u32,
    config: &TurnConfig,
    registry: &ActionRegistry,
) -> ContestationRisk {
    let ctx = TickContext::new(state, wave, config);
    let mut any_overlap = false;
    for other in queued {
        if pair_mutually_exclusive(draft, other, state, wave, config, registry) {
            return ContestationRisk::High;
        }
        if entanglement::entangled(draft, other, &ctx) {
            any_overlap = true;
        }
    }
    if any_overlap {
        ContestationRisk::Medium
    } else {
        ContestationRisk::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityKind};
    use crate::ident::EntityId;
    use crate::math::{Fp, FpVec2};

    fn two_ships_in_reach_of_mineral() -> WorldState {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-a"),
            Entity::builder("ship-a", EntityKind::Ship)
                .reach(Fp::from_int(1_000_000))
                .is_container(true)
                .container_volume(Some(Fp::from_int(100)))
                .build(),
        );
        state.entities.insert(
            EntityId::new("ship-b"),
            Entity::builder("ship-b", EntityKind::Ship)
                .reach(Fp::from_int(1_000_000))
                .is_container(true)
                .container_volume(Some(Fp::from_int(100)))
                .build(),
        );
        state.entities.insert(
            EntityId::new("mineral-1"),
            Entity::builder("mineral-1", EntityKind::MineralStore)
                .volume(Fp::from_int(10))
                .build(),
        );
        state
    }

    #[test]
    fn empty_cluster_resolves_to_empty_outcome() {
        let state = WorldState::new("seed");
        let config = TurnConfig::default();
        let registry = ActionRegistry::standard();
        let outcome = resolve_cluster(&[], &state, 0, &config, &registry);
        assert_eq!(outcome, ClusterOutcome::default());
    }

    #[test]
    fn two_loads_of_the_same_content_is_a_stalemate() {
        let state = two_ships_in_reach_of_mineral();
        let config = TurnConfig::default();
        let registry = ActionRegistry::standard();
        let load_a = Action::Load {
            actor: EntityId::new("ship-a"),
            player_id: None,
            order_index: 0,
            content_id: EntityId::new("mineral-1"),
            container_id: EntityId::new("ship-a"),
        };
        let load_b = Action::Load {
            actor: EntityId::new("ship-b"),
            player_id: None,
            order_index: 0,
            content_id: EntityId::new("mineral-1"),
            container_id: EntityId::new("ship-b"),
        };
        let outcome = resolve_cluster(&[load_a, load_b], &state, 0, &config, &registry);
        assert!(outcome.stalemate);
        assert_eq!(outcome.voided.len(), 2);
        assert!(outcome.updates.is_empty());
    }

    #[test]
    fn singleton_cluster_executes_when_valid() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship).build(),
        );
        let config = TurnConfig::default();
        let registry = ActionRegistry::standard();
        let action = Action::SealAirlock {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
        };
        let outcome = resolve_cluster(&[action], &state, 0, &config, &registry);
        assert_eq!(outcome.executed.len(), 1);
        assert!(outcome.voided.is_empty());
    }

    #[test]
    fn disjoint_actions_cluster_separately() {
        let mut state = WorldState::new("seed");
        state.entities.insert(
            EntityId::new("ship-1"),
            Entity::builder("ship-1", EntityKind::Ship).build(),
        );
        state.entities.insert(
            EntityId::new("ship-2"),
            Entity::builder("ship-2", EntityKind::Ship)
                .position(FpVec2::new(Fp::from_int(500), Fp::ZERO))
                .build(),
        );
        let config = TurnConfig::default();
        let a = Action::SealAirlock {
            actor: EntityId::new("ship-1"),
            player_id: None,
            order_index: 0,
        };
        let b = Action::SealAirlock {
            actor: EntityId::new("ship-2"),
            player_id: None,
            order_index: 0,
        };
        let clusters = cluster_actions(&[a, b], &state, 0, &config);
        assert_eq!(clusters.len(), 2);
    }
}
