// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic fixed-point math: scalar, 2D vector, trig.
mod fp;
mod trig;
mod vec2;

pub use fp::Fp;
pub use trig::{sin_cos_deg, unit_vector_deg};
pub use vec2::FpVec2;
