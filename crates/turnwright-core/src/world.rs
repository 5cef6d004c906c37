// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! World state: the tick counter, seed, star systems, celestials, entities.
use std::collections::BTreeMap;

use blake3::Hasher;

use crate::celestial::Celestial;
use crate::entity::Entity;
use crate::ident::{CelestialId, EntityId, SystemId};

/// A star system descriptor: just enough to group celestials by system for
/// the genesis collaborator and for wormhole endpoint resolution.
#[derive(Clone, PartialEq, Debug)]
pub struct StarSystem {
    /// Stable identifier.
    pub id: SystemId,
    /// Display name.
    pub name: String,
}

/// The shared, authoritative world. Entities and celestials are stored in
/// `BTreeMap`s keyed by id so every iteration over them — cluster
/// resolution, invariant checks, zoom-state scans — visits entries in a
/// single, deterministic order across platforms and runs, the same reason
/// the teacher's graph store is `BTreeMap`-backed.
#[derive(Clone, PartialEq, Debug)]
pub struct WorldState {
    /// Monotonically increasing tick counter.
    pub tick: u64,
    /// The genesis seed this state was derived from. Opaque to the core;
    /// carried through for the persistence collaborator's replay contract.
    pub seed: String,
    /// Star systems, keyed by id.
    pub systems: BTreeMap<SystemId, StarSystem>,
    /// Celestial bodies, keyed by id.
    pub celestials: BTreeMap<CelestialId, Celestial>,
    /// Entities, keyed by id.
    pub entities: BTreeMap<EntityId, Entity>,
}

impl WorldState {
    /// Builds an empty world at tick zero with the given seed.
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        WorldState {
            tick: 0,
            seed: seed.into(),
            systems: BTreeMap::new(),
            celestials: BTreeMap::new(),
            entities: BTreeMap::new(),
        }
    }

    /// Returns the celestial-list order used by the zoom-state scan: the
    /// `BTreeMap`'s key order, i.e. ascending `CelestialId`. Spec §4.F
    /// requires a deterministic scan order for "first planet captures wins";
    /// ascending id order is a specific, stable choice of that order.
    #[must_use]
    pub fn celestials_in_scan_order(&self) -> impl Iterator<Item = &Celestial> {
        self.celestials.values()
    }

    /// Returns the root mass of the world: the sum of `mass` over entities
    /// that are neither contained nor welded. Contained/welded mass is
    /// already folded into its root, so summing only roots avoids
    /// double-counting (spec §3, invariant I1).
    #[must_use]
    pub fn total_root_mass(&self) -> crate::math::Fp {
        self.entities
            .values()
            .filter(|e| e.is_root())
            .fold(crate::math::Fp::ZERO, |acc, e| acc + e.mass)
    }
}

/// Computes a content digest of `state`, stable across platforms and runs
/// for bit-identical `(seed, state, action list)` inputs (spec §8, P5). Used
/// by the determinism test and by the persistence/projection collaborators
/// to cheaply compare two states for equality without a full structural
/// comparison.
#[must_use]
pub fn state_digest(state: &WorldState) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(b"world:");
    hasher.update(&state.tick.to_le_bytes());
    hasher.update(state.seed.as_bytes());
    for (id, entity) in &state.entities {
        hasher.update(b"entity:");
        hasher.update(id.as_str().as_bytes());
        hasher.update(&format!("{entity:?}").into_bytes());
    }
    for (id, celestial) in &state.celestials {
        hasher.update(b"celestial:");
        hasher.update(id.as_str().as_bytes());
        hasher.update(&format!("{celestial:?}").into_bytes());
    }
    hasher.finalize().into()
}
