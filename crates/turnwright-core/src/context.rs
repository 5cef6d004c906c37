// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only view over world state, handed to every `validate` and
//! `handler` call.
//!
//! `TickContext` deliberately does not implement `Deref`, `AsRef`, or
//! `into_inner` onto its underlying [`WorldState`]. Handlers and validators
//! must go through the named accessors below; this is the same contract
//! `warp-core::graph_view::GraphView` enforces, and for the same reason —
//! it keeps "read" and "mutate" on visibly different types, so a handler
//! cannot smuggle a shared reference into something it later tries to
//! mutate through.
use crate::celestial::Celestial;
use crate::constants::TurnConfig;
use crate::entity::Entity;
use crate::ident::{CelestialId, EntityId};
use crate::world::WorldState;

/// A read-only view over a [`WorldState`] plus the wave currently being
/// resolved and the active [`TurnConfig`]. Constructed fresh per wave by
/// [`crate::pipeline::resolve_tick`]; never mutable, never stored past the
/// call that received it.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    state: &'a WorldState,
    wave: u32,
    config: &'a TurnConfig,
}

impl<'a> TickContext<'a> {
    /// Builds a context over `state` for the given wave and configuration.
    #[must_use]
    pub fn new(state: &'a WorldState, wave: u32, config: &'a TurnConfig) -> Self {
        TickContext {
            state,
            wave,
            config,
        }
    }

    /// The tick counter of the state this context was built over.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    /// The wave currently being resolved.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &'a TurnConfig {
        self.config
    }

    /// Looks up an entity by id.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&'a Entity> {
        self.state.entities.get(id)
    }

    /// Looks up a celestial by id.
    #[must_use]
    pub fn celestial(&self, id: &CelestialId) -> Option<&'a Celestial> {
        self.state.celestials.get(id)
    }

    /// Iterates every entity in the world in deterministic (ascending id)
    /// order.
    pub fn entities(&self) -> impl Iterator<Item = (&'a EntityId, &'a Entity)> {
        self.state.entities.iter()
    }

    /// Iterates every celestial in the world in deterministic (ascending id)
    /// order, the same order [`crate::zoom`]'s capture scan relies on.
    pub fn celestials(&self) -> impl Iterator<Item = (&'a CelestialId, &'a Celestial)> {
        self.state.celestials.iter()
    }

    /// Walks the `parent_id` chain from `start`, returning `true` if `needle`
    /// appears anywhere in it. Used by `LOAD`/`WELD` validation to reject a
    /// proposed attachment that would introduce a cycle (spec §9).
    #[must_use]
    pub fn is_ancestor_via_parent(&self, needle: &EntityId, start: &EntityId) -> bool {
        self.walk_chain(start, needle, |e| e.parent_id.as_ref())
    }

    /// Same as [`TickContext::is_ancestor_via_parent`] but walks the
    /// `weld_parent_id` chain.
    #[must_use]
    pub fn is_ancestor_via_weld(&self, needle: &EntityId, start: &EntityId) -> bool {
        self.walk_chain(start, needle, |e| e.weld_parent_id.as_ref())
    }

    fn walk_chain(
        &self,
        start: &EntityId,
        needle: &EntityId,
        next: impl Fn(&Entity) -> Option<&EntityId>,
    ) -> bool {
        let mut current = start.clone();
        let mut steps = 0usize;
        // Bounded by the entity count: a well-formed (acyclic) chain visits
        // each entity at most once, and a cyclic one would otherwise loop
        // forever here.
        let bound = self.state.entities.len() + 1;
        loop {
            if &current == needle {
                return true;
            }
            let Some(entity) = self.state.entities.get(&current) else {
                return false;
            };
            let Some(parent) = next(entity) else {
                return false;
            };
            current = parent.clone();
            steps += 1;
            if steps > bound {
                return false;
            }
        }
    }
}
