// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Start-time configuration: the named FP constants consumed by handlers and
//! invariant checks.
use crate::math::Fp;

/// Configuration carried into every tick resolution. Immutable after
/// construction; the registry and resolver never mutate it.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnConfig {
    /// Fuel consumed per unit of effective thrust magnitude.
    pub fuel_burn_rate: Fp,
    /// Mass lost per unit of effective thrust magnitude (propulsion loss).
    pub mass_propulsion_loss: Fp,
    /// Below this fuel level, `THRUST` can still draw down to zero but never
    /// negative; validation uses it to reject thrust with no fuel at all.
    pub minimum_fuel_threshold: Fp,
    /// Hard ceiling on effective thrust magnitude in a single tick.
    pub max_thrust_per_tick: Fp,
    /// Fraction of extracted volatiles converted to fuel by `REFINE`.
    pub refine_efficiency: Fp,
    /// Largest volatiles amount a single `REFINE` action may process.
    pub refine_max_batch: Fp,
    /// Conversion constant recorded for capture events but not consumed by
    /// any operation in this crate (see the Open Question decision in
    /// `SPEC_FULL.md`).
    pub orbital_conversion_constant: Fp,
    /// Ceiling on permutations enumerated by the cluster resolver's success
    /// maximizer before it falls back to the stable heuristic order.
    pub permutation_bound: usize,
}

impl TurnConfig {
    /// Canonical permutation ceiling: `7! = 5040`.
    pub const DEFAULT_PERMUTATION_BOUND: usize = 5040;

    /// Starts a builder pre-populated with [`TurnConfig::default`]'s values.
    #[must_use]
    pub fn builder() -> TurnConfigBuilder {
        TurnConfigBuilder {
            config: TurnConfig::default(),
        }
    }
}

impl Default for TurnConfig {
    /// The example constants used throughout `spec.md`'s worked scenarios
    /// (S1-S4): burn rate 1.0, propulsion loss 1.0, refine efficiency 0.8.
    fn default() -> Self {
        TurnConfig {
            fuel_burn_rate: Fp::from_f64(1.0),
            mass_propulsion_loss: Fp::from_f64(1.0),
            minimum_fuel_threshold: Fp::ZERO,
            max_thrust_per_tick: Fp::from_f64(1_000_000.0),
            refine_efficiency: Fp::from_f64(0.8),
            refine_max_batch: Fp::from_f64(1_000_000.0),
            orbital_conversion_constant: Fp::ONE,
            permutation_bound: Self::DEFAULT_PERMUTATION_BOUND,
        }
    }
}

/// Record-style builder for [`TurnConfig`]. Every setter consumes and
/// returns `self` so callers chain only the fields that differ from the
/// default.
#[derive(Clone, Debug)]
pub struct TurnConfigBuilder {
    config: TurnConfig,
}

impl TurnConfigBuilder {
    /// Sets `fuel_burn_rate`.
    #[must_use]
    pub fn fuel_burn_rate(mut self, value: Fp) -> Self {
        self.config.fuel_burn_rate = value;
        self
    }

    /// Sets `mass_propulsion_loss`.
    #[must_use]
    pub fn mass_propulsion_loss(mut self, value: Fp) -> Self {
        self.config.mass_propulsion_loss = value;
        self
    }

    /// Sets `minimum_fuel_threshold`.
    #[must_use]
    pub fn minimum_fuel_threshold(mut self, value: Fp) -> Self {
        self.config.minimum_fuel_threshold = value;
        self
    }

    /// Sets `max_thrust_per_tick`.
    #[must_use]
    pub fn max_thrust_per_tick(mut self, value: Fp) -> Self {
        self.config.max_thrust_per_tick = value;
        self
    }

    /// Sets `refine_efficiency`.
    #[must_use]
    pub fn refine_efficiency(mut self, value: Fp) -> Self {
        self.config.refine_efficiency = value;
        self
    }

    /// Sets `refine_max_batch`.
    #[must_use]
    pub fn refine_max_batch(mut self, value: Fp) -> Self {
        self.config.refine_max_batch = value;
        self
    }

    /// Sets `orbital_conversion_constant`.
    #[must_use]
    pub fn orbital_conversion_constant(mut self, value: Fp) -> Self {
        self.config.orbital_conversion_constant = value;
        self
    }

    /// Sets `permutation_bound`.
    #[must_use]
    pub fn permutation_bound(mut self, value: usize) -> Self {
        self.config.permutation_bound = value;
        self
    }

    /// Consumes the builder, yielding the finished configuration.
    #[must_use]
    pub fn build(self) -> TurnConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_worked_scenario_constants() {
        let cfg = TurnConfig::default();
        assert_eq!(cfg.fuel_burn_rate, Fp::from_f64(1.0));
        assert_eq!(cfg.refine_efficiency, Fp::from_f64(0.8));
        assert_eq!(cfg.permutation_bound, 5040);
    }

    #[test]
    fn builder_overrides_only_named_fields() {
        let cfg = TurnConfig::builder()
            .refine_efficiency(Fp::from_f64(0.5))
            .build();
        assert_eq!(cfg.refine_efficiency, Fp::from_f64(0.5));
        assert_eq!(cfg.fuel_burn_rate, Fp::from_f64(1.0));
    }
}
