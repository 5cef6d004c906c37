// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic turn-resolution core for a multi-player space simulation.
//!
//! Given a [`world::WorldState`] and a flat list of player-submitted
//! [`action::Action`]s tagged with a wave (`order_index`), [`pipeline::resolve_tick`]
//! groups the actions into waves, runs the [`cluster`] resolver against each
//! wave in turn, re-binds contained and welded children between waves, and
//! applies [`physics`] translation once at the end of the tick. Every
//! operation is a pure function of its inputs: no I/O, no RNG, no floating
//! point in the state itself. The same `(seed, state, action list)` always
//! produces the same `(state, metrics)`.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// Fixed-point scalar, 2D vector, and deterministic trig.
pub mod math;

/// Action ingestion: tagged action variants and their ordering for tie-breaks.
pub mod action;
/// Entanglement clustering, stalemate detection, and the permutation search.
pub mod cluster;
/// Named configuration constants consumed by handlers and invariant checks.
pub mod constants;
/// Read-only view over world state handed to validators and handlers.
pub mod context;
/// Polymorphic celestial bodies (stars, planets, moons, asteroids, wormholes).
pub mod celestial;
/// Entity record: the mobile, interactable object.
pub mod entity;
/// Reference-set extraction, entanglement predicate, and pairwise classification.
pub mod entanglement;
/// Error taxonomy surfaced at tick and per-action boundaries.
pub mod error;
/// Per-action validate/handler pure functions.
pub mod handlers;
/// Post-tick invariant checks (mass, binding, acyclicity, non-teleportation).
pub mod invariants;
/// Translation and parent/weld binding passes.
pub mod physics;
/// Tick driver: wave grouping, per-wave resolution, binding, and metrics.
pub mod pipeline;
/// Action-kind to {validate, handler} table.
pub mod registry;
/// Feature-gated manual telemetry for wave/cluster/stalemate events.
pub mod telemetry;
/// Sparse partial-entity updates produced by handlers.
pub mod update;
/// World state: tick counter, seed, systems, celestials, entities.
pub mod world;
/// SPACE → ORBIT capture transition.
pub mod zoom;

mod ident;

pub use action::{Action, ActionKind, ResourceKind};
pub use celestial::Celestial;
pub use cluster::{
    cluster_actions, resolve_cluster, resolve_wave, ClusterOutcome, ContestationRisk, VoidedAction,
    WaveMetrics,
};
pub use constants::TurnConfig;
pub use context::TickContext;
pub use entanglement::PairClassification;
pub use entity::{Entity, EntityKind, ZoomState};
pub use error::{TurnError, VoidReason};
pub use ident::{CelestialId, EntityId, PlayerId, SystemId};
pub use pipeline::{resolve_tick, TickMetrics};
pub use registry::ActionRegistry;
pub use update::{EntityChanges, EntityUpdate};
pub use world::{state_digest, StarSystem, WorldState};
