// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The mobile, interactable object: ships, resource wells, mineral stores.
use crate::ident::{CelestialId, EntityId, PlayerId};
use crate::math::{Fp, FpVec2};

/// What kind of thing an entity is. A closed set: new entity kinds are a
/// breaking change to every handler's match arms, which is the point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// A player-controlled, maneuverable vessel.
    Ship,
    /// A stationary volatiles source.
    ResourceWell,
    /// A spawned mineral deposit, produced by `EXTRACT MINERALS`.
    MineralStore,
}

/// Which frame of reference an entity currently occupies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoomState {
    /// Free flight between celestial bodies.
    Space,
    /// Captured into orbit around a planet (`orbit_target_id` is set).
    Orbit,
    /// Landed. No operation in this crate produces this state (see O2 in
    /// `SPEC_FULL.md`); it exists so the enum is the same closed set the
    /// rest of the system uses.
    Surface,
}

/// The mobile/interactable object. Construction is via [`Entity::builder`];
/// there is no public constructor that bypasses it, so every field starts
/// from an explicit, named default.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Stable identifier, unique within a [`crate::world::WorldState`].
    pub id: EntityId,
    /// What kind of entity this is.
    pub kind: EntityKind,
    /// The player who owns this entity, if any (resource wells have none).
    pub owner: Option<PlayerId>,

    /// Which frame of reference the entity occupies.
    pub zoom_state: ZoomState,
    /// World position.
    pub position: FpVec2,
    /// World velocity, added to position by root translation.
    pub velocity: FpVec2,
    /// Heading in FP degrees (0 = +X, 90 = +Y).
    pub heading: Fp,
    /// Current thrust setting (not itself consumed by any invariant; it is
    /// advisory telemetry of the last commanded magnitude).
    pub thrust: Fp,
    /// Squared-distance reach: the maximum squared distance at which this
    /// entity may act on a target.
    pub reach: Fp,
    /// The celestial this entity is in orbit around, set on capture.
    pub orbit_target_id: Option<CelestialId>,

    /// Total mass, including contained and welded children's mass already
    /// folded in.
    pub mass: Fp,
    /// Occupied/occupiable volume.
    pub volume: Fp,
    /// Whether the airlock is sealed (a precondition for `WELD`).
    pub airlock_sealed: bool,

    /// Fuel mass, a component of `mass`.
    pub fuel: Fp,
    /// Volatiles mass, a component of `mass`.
    pub volatiles: Fp,

    /// The entity this one is contained in, if any.
    pub parent_id: Option<EntityId>,
    /// The entity this one is rigidly welded to, if any.
    pub weld_parent_id: Option<EntityId>,
    /// Fixed offset from `weld_parent_id`'s position, set at weld time.
    pub relative_offset: FpVec2,
    /// Whether this entity can contain other entities via `LOAD`.
    pub is_container: bool,
    /// Total volume capacity if `is_container`, `None` otherwise.
    pub container_volume: Option<Fp>,

    /// Optic/sensor level; carried but not consumed by any operation in
    /// this crate (external collaborators such as the "god view" console
    /// read it).
    pub optics: Fp,
}

impl Entity {
    /// A root entity has neither a containing parent nor a weld parent; it
    /// is the only kind translated by velocity.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.weld_parent_id.is_none()
    }

    /// Starts a builder pre-populated with zeroed/closed defaults.
    #[must_use]
    pub fn builder(id: impl Into<EntityId>, kind: EntityKind) -> EntityBuilder {
        EntityBuilder {
            entity: Entity {
                id: id.into(),
                kind,
                owner: None,
                zoom_state: ZoomState::Space,
                position: FpVec2::ZERO,
                velocity: FpVec2::ZERO,
                heading: Fp::ZERO,
                thrust: Fp::ZERO,
                reach: Fp::ZERO,
                orbit_target_id: None,
                mass: Fp::ZERO,
                volume: Fp::ZERO,
                airlock_sealed: false,
                fuel: Fp::ZERO,
                volatiles: Fp::ZERO,
                parent_id: None,
                weld_parent_id: None,
                relative_offset: FpVec2::ZERO,
                is_container: false,
                container_volume: None,
                optics: Fp::ZERO,
            },
        }
    }
}

/// Record-style builder for [`Entity`]. Every setter consumes and returns
/// `self`.
#[derive(Clone, Debug)]
pub struct EntityBuilder {
    entity: Entity,
}

macro_rules! setter {
    ($field:ident, $ty:ty) => {
        /// Sets the named field.
        #[must_use]
        pub fn $field(mut self, value: $ty) -> Self {
            self.entity.$field = value;
            self
        }
    };
}

impl EntityBuilder {
    setter!(owner, Option<PlayerId>);
    setter!(zoom_state, ZoomState);
    setter!(position, FpVec2);
    setter!(velocity, FpVec2);
    setter!(heading, Fp);
    setter!(thrust, Fp);
    setter!(reach, Fp);
    setter!(orbit_target_id, Option<CelestialId>);
    setter!(mass, Fp);
    setter!(volume, Fp);
    setter!(airlock_sealed, bool);
    setter!(fuel, Fp);
    setter!(volatiles, Fp);
    setter!(parent_id, Option<EntityId>);
    setter!(weld_parent_id, Option<EntityId>);
    setter!(relative_offset, FpVec2);
    setter!(is_container, bool);
    setter!(container_volume, Option<Fp>);
    setter!(optics, Fp);

    /// Consumes the builder, yielding the finished entity.
    #[must_use]
    pub fn build(self) -> Entity {
        self.entity
    }
}
