// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Polymorphic celestial bodies: stars, planets, moons, asteroids, wormholes.
use crate::ident::{CelestialId, SystemId};
use crate::math::{Fp, FpVec2};

/// A celestial body. Each variant carries the fields specific to its kind;
/// the common fields (id, name, mass, radius, capture radius, layer) are
/// duplicated per variant rather than hoisted into a shared struct, mirroring
/// the closed-alternative style used for [`crate::action::Action`] and kept
/// consistent across the crate's sum types.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Celestial {
    /// A system's central star.
    Sol {
        /// Stable identifier.
        id: CelestialId,
        /// Display name.
        name: String,
        /// Position within its system.
        position: FpVec2,
        /// Mass.
        mass: Fp,
        /// Physical radius.
        radius: Fp,
        /// Squared-distance radius at which a `Ship` in `Space` captures
        /// into orbit.
        capture_radius: Fp,
        /// Rendering/simulation layer.
        z: i32,
    },
    /// A planet orbiting a [`Celestial::Sol`].
    Planet {
        /// Stable identifier.
        id: CelestialId,
        /// Display name.
        name: String,
        /// Position within its system.
        position: FpVec2,
        /// Mass.
        mass: Fp,
        /// Physical radius.
        radius: Fp,
        /// Squared-distance radius at which a `Ship` in `Space` captures
        /// into orbit around this planet.
        capture_radius: Fp,
        /// Rendering/simulation layer.
        z: i32,
        /// The star this planet orbits.
        parent_sol_id: CelestialId,
    },
    /// A moon orbiting a [`Celestial::Planet`].
    Moon {
        /// Stable identifier.
        id: CelestialId,
        /// Display name.
        name: String,
        /// Position within its system.
        position: FpVec2,
        /// Mass.
        mass: Fp,
        /// Physical radius.
        radius: Fp,
        /// Squared-distance capture radius.
        capture_radius: Fp,
        /// Rendering/simulation layer.
        z: i32,
        /// The planet this moon orbits.
        parent_planet_id: CelestialId,
        /// Orbital angle in FP degrees.
        orbit_angle: Fp,
        /// Angular speed in FP degrees per tick.
        orbit_speed: Fp,
        /// Orbital radius.
        orbit_radius: Fp,
    },
    /// A free-flying body on a linear trajectory.
    Asteroid {
        /// Stable identifier.
        id: CelestialId,
        /// Display name.
        name: String,
        /// Position within its system.
        position: FpVec2,
        /// Mass.
        mass: Fp,
        /// Physical radius.
        radius: Fp,
        /// Squared-distance capture radius (typically zero; asteroids are
        /// not orbit-capture targets in the base rule set, but the field is
        /// carried for uniformity).
        capture_radius: Fp,
        /// Rendering/simulation layer.
        z: i32,
        /// Constant linear velocity.
        velocity: FpVec2,
    },
    /// A connection between two points, possibly spanning systems.
    Wormhole {
        /// Stable identifier.
        id: CelestialId,
        /// Display name.
        name: String,
        /// Rendering/simulation layer.
        z: i32,
        /// The two (or more) endpoints this wormhole connects.
        endpoints: Vec<FpVec2>,
        /// The systems each endpoint lies within, index-aligned with
        /// `endpoints`.
        system_ids: Vec<SystemId>,
    },
}

impl Celestial {
    /// Returns this body's stable identifier.
    #[must_use]
    pub fn id(&self) -> &CelestialId {
        match self {
            Celestial::Sol { id, .. }
            | Celestial::Planet { id, .. }
            | Celestial::Moon { id, .. }
            | Celestial::Asteroid { id, .. }
            | Celestial::Wormhole { id, .. } => id,
        }
    }

    /// Returns this body's current position. Wormholes have no single
    /// position; callers needing a point should consult `endpoints`
    /// directly.
    #[must_use]
    pub fn position(&self) -> Option<FpVec2> {
        match self {
            Celestial::Sol { position, .. }
            | Celestial::Planet { position, .. }
            | Celestial::Moon { position, .. }
            | Celestial::Asteroid { position, .. } => Some(*position),
            Celestial::Wormhole { .. } => None,
        }
    }

    /// Returns the squared-distance capture radius, if this body can
    /// capture a ship into orbit. Only planets capture per spec §4.F; other
    /// variants return `None` even though some carry a `capture_radius`
    /// field for uniformity.
    #[must_use]
    pub fn orbit_capture_radius_squared(&self) -> Option<Fp> {
        match self {
            Celestial::Planet { capture_radius, .. } => Some(*capture_radius * *capture_radius),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_planet(id: &str, capture_radius: Fp) -> Celestial {
        Celestial::Planet {
            id: CelestialId::new(id),
            name: id.to_owned(),
            position: FpVec2::ZERO,
            mass: Fp::from_int(1000),
            radius: Fp::from_int(10),
            capture_radius,
            z: 0,
            parent_sol_id: CelestialId::new("sol"),
        }
    }

    #[test]
    fn only_planets_expose_a_capture_radius() {
        let planet = sample_planet("earth", Fp::from_int(50));
        assert_eq!(
            planet.orbit_capture_radius_squared(),
            Some(Fp::from_int(2500))
        );

        let sol = Celestial::Sol {
            id: CelestialId::new("sol"),
            name: "Sol".to_owned(),
            position: FpVec2::ZERO,
            mass: Fp::from_int(1_000_000),
            radius: Fp::from_int(100),
            capture_radius: Fp::from_int(50),
            z: 0,
        };
        assert_eq!(sol.orbit_capture_radius_squared(), None);
    }
}
