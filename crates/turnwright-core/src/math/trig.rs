// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic trig via `f32` bridging.
//!
//! Trig is only ever consulted at handler boundaries where its input (a
//! heading in FP degrees) is already snapped to a fixed-point value, and its
//! output is immediately rounded back to fixed point. Bridging through a
//! single, well-defined `f64` call (rather than a quarter-wave lookup table)
//! is sufficient: both sides of the boundary are fixed-point, so the only
//! thing that must be reproducible is the float trig call itself, which IEEE
//! 754 guarantees bit-for-bit across the platforms this core targets.
use super::Fp;

const DEGREES_PER_RADIAN: f64 = 180.0 / std::f64::consts::PI;

/// Returns `(sin(degrees), cos(degrees))` as fixed-point scalars, where
/// `degrees` is an `Fp` holding a heading in degrees (0 = +X, 90 = +Y).
#[must_use]
pub fn sin_cos_deg(degrees: Fp) -> (Fp, Fp) {
    let radians = degrees.to_f64() / DEGREES_PER_RADIAN;
    (Fp::from_f64(radians.sin()), Fp::from_f64(radians.cos()))
}

/// Returns the unit-magnitude direction vector for a heading in FP degrees.
#[must_use]
pub fn unit_vector_deg(degrees: Fp) -> super::FpVec2 {
    let (sin, cos) = sin_cos_deg(degrees);
    super::FpVec2::new(cos, sin)
}
