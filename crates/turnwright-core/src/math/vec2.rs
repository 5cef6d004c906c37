// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A fixed-point 2D vector.
use std::ops::{Add, Mul, Sub};

use super::Fp;

/// Two fixed-point scalars: every spatial quantity (position, velocity,
/// relative offset) is one of these.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FpVec2 {
    /// Horizontal component.
    pub x: Fp,
    /// Vertical component.
    pub y: Fp,
}

impl FpVec2 {
    /// The zero vector.
    pub const ZERO: FpVec2 = FpVec2 {
        x: Fp::ZERO,
        y: Fp::ZERO,
    };

    /// Builds a vector from its components.
    #[must_use]
    pub const fn new(x: Fp, y: Fp) -> Self {
        FpVec2 { x, y }
    }

    /// Squared length, avoiding a square root. Used throughout for reach and
    /// capture-radius comparisons, which only ever need a squared compare.
    #[must_use]
    pub fn length_squared(self) -> Fp {
        self.x * self.x + self.y * self.y
    }

    /// Length via `Fp::sqrt`'s float bridge. Only used where an actual
    /// magnitude (not just a comparison) is needed, e.g. non-teleportation.
    #[must_use]
    pub fn length(self) -> Fp {
        self.length_squared().sqrt()
    }

    /// Squared distance between two points; the idiom used for every reach
    /// and capture-radius check so no square root is ever taken on the hot
    /// path.
    #[must_use]
    pub fn squared_distance(self, other: FpVec2) -> Fp {
        (self - other).length_squared()
    }

    /// Scales both components by a scalar.
    #[must_use]
    pub fn scale(self, factor: Fp) -> Self {
        FpVec2::new(self.x * factor, self.y * factor)
    }
}

impl Add for FpVec2 {
    type Output = FpVec2;
    fn add(self, rhs: FpVec2) -> FpVec2 {
        FpVec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for FpVec2 {
    type Output = FpVec2;
    fn sub(self, rhs: FpVec2) -> FpVec2 {
        FpVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Fp> for FpVec2 {
    type Output = FpVec2;
    fn mul(self, rhs: Fp) -> FpVec2 {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_matches_manual_computation() {
        let a = FpVec2::new(Fp::from_int(0), Fp::from_int(0));
        let b = FpVec2::new(Fp::from_int(3), Fp::from_int(4));
        assert_eq!(a.squared_distance(b), Fp::from_int(25));
    }

    #[test]
    fn length_of_3_4_5_triangle_is_5() {
        let v = FpVec2::new(Fp::from_int(3), Fp::from_int(4));
        assert_eq!(v.length(), Fp::from_int(5));
    }

    #[test]
    fn scale_distributes_over_components() {
        let v = FpVec2::new(Fp::from_int(2), Fp::from_int(-3));
        let scaled = v.scale(Fp::from_int(10));
        assert_eq!(scaled, FpVec2::new(Fp::from_int(20), Fp::from_int(-30)));
    }
}
