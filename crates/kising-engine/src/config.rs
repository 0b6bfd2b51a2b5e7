//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the builder-input for constructing an [`Engine`].
//! [`validate()`](EngineConfig::validate) checks it once at construction;
//! nothing in the config can be changed afterwards except through the
//! engine's own lifecycle operations.
//!
//! [`Engine`]: crate::Engine

use std::error::Error;
use std::fmt;

use kising_core::rng::DEFAULT_SEED;
use kising_core::{ParamError, Params};

use crate::dynamics::{glauber::GlauberKmc, metropolis::Metropolis, SpinDynamics};

// ── Dynamics ───────────────────────────────────────────────────────

/// Which kernel advances the lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dynamics {
    /// Random-site single-spin-flip Metropolis with a fixed attempt budget
    /// per frame.
    #[default]
    Metropolis,
    /// Rejection-free n-fold-way kinetic Monte Carlo with Glauber rates.
    Glauber,
}

impl Dynamics {
    /// Short name used in step reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Metropolis => Metropolis::NAME,
            Self::Glauber => GlauberKmc::NAME,
        }
    }

    pub(crate) fn build(self, rounding: RoundingPolicy) -> Box<dyn SpinDynamics> {
        match self {
            Self::Metropolis => Box::new(Metropolis::new(rounding)),
            Self::Glauber => Box::new(GlauberKmc::new()),
        }
    }
}

impl fmt::Display for Dynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── RoundingPolicy ─────────────────────────────────────────────────

/// How a Metropolis frame turns `freq * dt * cells` into a whole number
/// of attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingPolicy {
    /// Round each frame independently. Rounding error compounds across
    /// frames when `freq * dt * cells` is not an integer.
    PerCall,
    /// Carry the fractional residual into the next frame, so the clock
    /// stays within half an attempt of `k * dt` after `k` frames.
    #[default]
    Accumulated,
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing an engine.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Initial RNG seed. Default: 0.
    pub seed: u64,
    /// Kernel used by `next_frame`. Default: [`Dynamics::Metropolis`].
    pub dynamics: Dynamics,
    /// Attempt rounding for the Metropolis kernel. Ignored by Glauber.
    pub rounding: RoundingPolicy,
    /// Parameters installed on every `init_system`. Default:
    /// `betaJ = 0`, `betaMuB = 0`, `freq = 1`.
    pub initial_params: Params,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            dynamics: Dynamics::default(),
            rounding: RoundingPolicy::default(),
            initial_params: Params::default(),
        }
    }
}

impl EngineConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParams`] if any initial parameter is NaN or
    /// infinite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_params.validate().map_err(ConfigError::InvalidParams)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// An initial parameter is not finite.
    InvalidParams(ParamError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(e) => write!(f, "initial params: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
        }
    }
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        Self::InvalidParams(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.seed, 0);
        assert_eq!(cfg.dynamics, Dynamics::Metropolis);
        assert_eq!(cfg.rounding, RoundingPolicy::Accumulated);
        assert_eq!(cfg.initial_params, Params::default());
    }

    #[test]
    fn non_finite_initial_params_fail() {
        let mut cfg = EngineConfig::default();
        cfg.initial_params.freq = f64::INFINITY;
        match cfg.validate() {
            Err(ConfigError::InvalidParams(ParamError::NonFinite { name: "freq", .. })) => {}
            other => panic!("expected InvalidParams(freq), got {other:?}"),
        }
    }

    #[test]
    fn error_chains_to_param_error() {
        let err = ConfigError::from(ParamError::NonFinite {
            name: "betaJ",
            value: f64::NAN,
        });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("initial params:"));
    }

    #[test]
    fn dynamics_names() {
        assert_eq!(Dynamics::Metropolis.to_string(), "metropolis");
        assert_eq!(Dynamics::Glauber.to_string(), "glauber");
        assert_eq!(Dynamics::Glauber.build(RoundingPolicy::PerCall).name(), "glauber");
    }
}
