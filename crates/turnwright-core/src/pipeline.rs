// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The tick driver (spec §4.G): group by wave, resolve each wave, bind
//! between waves, translate-then-bind once at the end, transition zoom
//! state, advance the tick, and check invariants.
use std::collections::BTreeMap;

use crate::action::Action;
use crate::cluster::{self, VoidedAction, WaveMetrics};
use crate::constants::TurnConfig;
use crate::error::TurnError;
use crate::invariants;
use crate::physics;
use crate::registry::ActionRegistry;
use crate::update::apply_updates;
use crate::world::WorldState;
use crate::zoom;

/// Aggregate metrics for a whole tick, folded across every wave.
#[derive(Clone, Debug, Default)]
pub struct TickMetrics {
    /// Per-wave metrics, in ascending `order_index` order.
    pub waves: Vec<WaveMetrics>,
    /// Every action voided in this tick, across every wave, tagged with its
    /// `order_index` and the reason it did not execute.
    pub voided: Vec<(u32, VoidedAction)>,
}

impl TickMetrics {
    /// Total successful actions across every wave.
    #[must_use]
    pub fn total_success_count(&self) -> usize {
        self.waves.iter().map(|w| w.success_count).sum()
    }

    /// Total stalemated clusters across every wave.
    #[must_use]
    pub fn total_stalemate_count(&self) -> usize {
        self.waves.iter().map(|w| w.stalemate_count).sum()
    }
}

/// Groups `actions` by `order_index` ascending. Actions within a group
/// retain their relative input order; `resolve_wave`'s internal clustering
/// normalizes order within a cluster, so the group's own order only matters
/// for the union-find scan's iteration, which does not affect its result.
fn group_into_waves(actions: &[Action]) -> BTreeMap<u32, Vec<Action>> {
    let mut waves: BTreeMap<u32, Vec<Action>> = BTreeMap::new();
    for action in actions {
        waves.entry(action.order_index()).or_default().push(action.clone());
    }
    waves
}

/// Resolves one tick: given `state` and the flat action list `actions`
/// (already tagged with each action's wave via `order_index`), produces the
/// next state and a metrics record, or halts with [`TurnError`] if the
/// resulting state fails a post-tick invariant.
///
/// # Errors
/// Returns [`TurnError::InvariantViolation`] if the post-tick state fails any
/// check in [`invariants::check_all`]. The tick does not commit in that case;
/// the returned error carries the pre-tick state and the actions applied
/// before the failure, for diagnosis.
pub fn resolve_tick(
    state: &WorldState,
    actions: &[Action],
    config: &TurnConfig,
) -> Result<(WorldState, TickMetrics), TurnError> {
    let registry = ActionRegistry::standard();
    let waves = group_into_waves(actions);

    let mut working = state.clone();
    let mut metrics = TickMetrics::default();
    let mut applied = Vec::new();

    for (&wave, wave_actions) in &waves {
        let (updates, voided, wave_metrics) =
            cluster::resolve_wave(wave_actions, &working, wave, config, &registry);
        apply_updates(&mut working, &updates);
        physics::bind_only(&mut working);
        applied.extend(
            wave_actions
                .iter()
                .filter(|a| !voided.iter().any(|v| v.action == **a))
                .cloned(),
        );
        crate::telemetry::wave_resolved(wave, &wave_metrics);
        for v in &voided {
            crate::telemetry::action_voided(wave, v);
        }
        metrics.waves.push(wave_metrics);
        metrics
            .voided
            .extend(voided.into_iter().map(|v| (wave, v)));
    }

    physics::apply_maneuver(&mut working);
    zoom::apply_capture(&mut working);
    working.tick += 1;

    invariants::check_all(state, &working, &applied, config)?;

    Ok((working, metrics))
}
