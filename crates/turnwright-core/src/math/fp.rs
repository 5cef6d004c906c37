// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-point scalar: a 64-bit signed integer scaled by [`Fp::SCALE`].
//!
//! Every operation is a pure function of its integer inputs; nothing reads
//! global state and nothing allocates. Rounding is always half-away-from-zero
//! (never ties-to-even), and multiply/divide use a 128-bit intermediate so
//! the result is identical on every platform for inputs within
//! `[-2^53, 2^53]`. Division by zero saturates rather than panicking.
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A fixed-point scalar: raw value is the real value multiplied by
/// [`Fp::SCALE`] and rounded half-away-from-zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fp(i64);

impl Fp {
    /// Universal scaling factor. Fixed at 1000 for every quantity in the
    /// core: positions, velocities, masses, reach, fuel.
    pub const SCALE: i64 = 1000;

    /// Additive identity.
    pub const ZERO: Fp = Fp(0);
    /// Multiplicative identity.
    pub const ONE: Fp = Fp(Self::SCALE);

    /// Builds an `Fp` directly from its raw scaled representation.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Fp(raw)
    }

    /// Returns the raw scaled representation.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Converts a real value into fixed point: `round(value * SCALE)`,
    /// rounding half away from zero.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        let scaled = value * Self::SCALE as f64;
        Fp(round_half_away_from_zero_f64(scaled))
    }

    /// Converts back to a real value: `raw / SCALE`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Builds an `Fp` from an integer (no fractional part).
    #[must_use]
    pub const fn from_int(value: i64) -> Self {
        Fp(value.saturating_mul(Self::SCALE))
    }

    /// Returns the nearest integer, rounding half away from zero.
    #[must_use]
    pub fn round_to_int(self) -> i64 {
        let (q, r) = (self.0 / Self::SCALE, self.0 % Self::SCALE);
        if r.abs() * 2 >= Self::SCALE {
            q + r.signum()
        } else {
            q
        }
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Fp(self.0.saturating_abs())
    }

    /// Returns `true` if the value is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Clamps `self` to `[lo, hi]`.
    #[must_use]
    pub fn clamp(self, lo: Fp, hi: Fp) -> Self {
        debug_assert!(lo <= hi, "clamp bounds must be ordered");
        if self < lo {
            lo
        } else if self > hi {
            hi
        } else {
            self
        }
    }

    /// Returns the larger of two values.
    #[must_use]
    pub fn max(self, other: Fp) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    /// Returns the smaller of two values.
    #[must_use]
    pub fn min(self, other: Fp) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Square root via `f64` bridging, rounded back to fixed point.
    ///
    /// Negative inputs return zero rather than faulting; callers in this
    /// crate never take the square root of a signed quantity that could be
    /// negative (masses, squared distances, and reach are all non-negative
    /// by construction).
    #[must_use]
    pub fn sqrt(self) -> Self {
        if self.0 <= 0 {
            return Fp::ZERO;
        }
        Fp::from_f64(self.to_f64().sqrt())
    }
}

fn round_half_away_from_zero_f64(value: f64) -> i64 {
    if value >= 0.0 {
        (value + 0.5).floor() as i64
    } else {
        (value - 0.5).ceil() as i64
    }
}

impl Add for Fp {
    type Output = Fp;
    fn add(self, rhs: Fp) -> Fp {
        Fp(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fp {
    type Output = Fp;
    fn sub(self, rhs: Fp) -> Fp {
        Fp(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Fp {
    type Output = Fp;
    fn neg(self) -> Fp {
        Fp(self.0.saturating_neg())
    }
}

impl Mul for Fp {
    type Output = Fp;

    /// Multiply: widen to `i128`, multiply, then divide back down by `SCALE`
    /// with half-away-from-zero rounding, finally saturating back to `i64`.
    fn mul(self, rhs: Fp) -> Fp {
        let product = i128::from(self.0) * i128::from(rhs.0);
        let scale = i128::from(Self::SCALE);
        let (q, r) = (product / scale, product % scale);
        let rounded = if r.unsigned_abs() * 2 >= scale.unsigned_abs() {
            q + r.signum()
        } else {
            q
        };
        Fp(saturate_i128_to_i64(rounded))
    }
}

impl Div for Fp {
    type Output = Fp;

    /// Divide: widen the dividend by `SCALE` first (so the quotient retains
    /// fixed-point precision), then divide, rounding half-away-from-zero. A
    /// zero divisor saturates to `MAX`/`MIN` with the sign of the dividend
    /// rather than panicking.
    fn div(self, rhs: Fp) -> Fp {
        if rhs.0 == 0 {
            return match self.0.cmp(&0) {
                Ordering::Less => Fp(i64::MIN),
                Ordering::Equal => Fp::ZERO,
                Ordering::Greater => Fp(i64::MAX),
            };
        }
        let numerator = i128::from(self.0) * i128::from(Self::SCALE);
        let denominator = i128::from(rhs.0);
        let (q, r) = (numerator / denominator, numerator % denominator);
        let rounded = if r.unsigned_abs() * 2 >= denominator.unsigned_abs() {
            q + (numerator.signum() * denominator.signum())
        } else {
            q
        };
        Fp(saturate_i128_to_i64(rounded))
    }
}

fn saturate_i128_to_i64(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_rounds_half_away_from_zero() {
        assert_eq!(Fp::from_f64(0.0005).raw(), 1);
        assert_eq!(Fp::from_f64(-0.0005).raw(), -1);
        assert_eq!(Fp::from_f64(1.0004).raw(), 1000);
    }

    #[test]
    fn mul_matches_scaled_real_multiplication() {
        let a = Fp::from_f64(2.5);
        let b = Fp::from_f64(4.0);
        assert_eq!((a * b).raw(), 10000);
    }

    #[test]
    fn div_by_zero_saturates_instead_of_panicking() {
        let a = Fp::from_int(5);
        assert_eq!(a / Fp::ZERO, Fp(i64::MAX));
        assert_eq!((-a) / Fp::ZERO, Fp(i64::MIN));
        assert_eq!(Fp::ZERO / Fp::ZERO, Fp::ZERO);
    }

    #[test]
    fn clamp_bounds_a_value() {
        let v = Fp::from_int(10);
        assert_eq!(v.clamp(Fp::from_int(0), Fp::from_int(5)), Fp::from_int(5));
        assert_eq!(v.clamp(Fp::from_int(20), Fp::from_int(30)), Fp::from_int(20));
    }

    #[test]
    fn round_to_int_rounds_half_away_from_zero() {
        assert_eq!(Fp::from_f64(2.5).round_to_int(), 3);
        assert_eq!(Fp::from_f64(-2.5).round_to_int(), -3);
    }
}
