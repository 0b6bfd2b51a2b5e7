//! C-compatible option, report and enum types.
//!
//! Enum-valued fields in `repr(C)` structs are carried as plain `i32` and
//! converted with `TryFrom`, so an out-of-range value from C is an error
//! rather than an invalid Rust enum.

use kising_core::rng::DEFAULT_SEED;
use kising_core::Params;
use kising_engine::{Dynamics, EngineConfig, Phase, RoundingPolicy, StepReport};

use crate::status::KisingStatus;

/// Kernel selector.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KisingDynamics {
    /// Random-site Metropolis.
    Metropolis = 0,
    /// Rejection-free Glauber n-fold way.
    Glauber = 1,
}

impl TryFrom<i32> for KisingDynamics {
    type Error = KisingStatus;

    fn try_from(v: i32) -> Result<Self, KisingStatus> {
        match v {
            0 => Ok(Self::Metropolis),
            1 => Ok(Self::Glauber),
            _ => Err(KisingStatus::InvalidArgument),
        }
    }
}

impl From<KisingDynamics> for Dynamics {
    fn from(d: KisingDynamics) -> Self {
        match d {
            KisingDynamics::Metropolis => Dynamics::Metropolis,
            KisingDynamics::Glauber => Dynamics::Glauber,
        }
    }
}

impl From<Dynamics> for KisingDynamics {
    fn from(d: Dynamics) -> Self {
        match d {
            Dynamics::Metropolis => KisingDynamics::Metropolis,
            Dynamics::Glauber => KisingDynamics::Glauber,
        }
    }
}

/// Attempt rounding policy for the Metropolis kernel.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KisingRounding {
    /// Carry the fractional residual across frames.
    Accumulated = 0,
    /// Round each frame independently.
    PerCall = 1,
}

impl TryFrom<i32> for KisingRounding {
    type Error = KisingStatus;

    fn try_from(v: i32) -> Result<Self, KisingStatus> {
        match v {
            0 => Ok(Self::Accumulated),
            1 => Ok(Self::PerCall),
            _ => Err(KisingStatus::InvalidArgument),
        }
    }
}

impl From<KisingRounding> for RoundingPolicy {
    fn from(r: KisingRounding) -> Self {
        match r {
            KisingRounding::Accumulated => RoundingPolicy::Accumulated,
            KisingRounding::PerCall => RoundingPolicy::PerCall,
        }
    }
}

/// Lifecycle phase, as reported by `kising_phase_get`.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KisingPhase {
    /// No lattice yet.
    Uninitialized = 0,
    /// Lattice allocated, no frame run.
    Initialized = 1,
    /// At least one frame has run.
    Stepping = 2,
    /// Lattice released.
    Freed = 3,
}

impl From<Phase> for KisingPhase {
    fn from(p: Phase) -> Self {
        match p {
            Phase::Uninitialized => KisingPhase::Uninitialized,
            Phase::Initialized => KisingPhase::Initialized,
            Phase::Stepping => KisingPhase::Stepping,
            Phase::Freed => KisingPhase::Freed,
        }
    }
}

/// Engine construction options.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KisingEngineOptions {
    /// Initial RNG seed.
    pub seed: u64,
    /// A `KisingDynamics` value.
    pub dynamics: i32,
    /// A `KisingRounding` value.
    pub rounding: i32,
    /// Initial coupling, installed on every `init_system`.
    pub beta_j: f64,
    /// Initial field, installed on every `init_system`.
    pub beta_mu_b: f64,
    /// Initial per-site attempt rate.
    pub freq: f64,
}

impl Default for KisingEngineOptions {
    fn default() -> Self {
        let p = Params::default();
        Self {
            seed: DEFAULT_SEED,
            dynamics: KisingDynamics::Metropolis as i32,
            rounding: KisingRounding::Accumulated as i32,
            beta_j: p.beta_j,
            beta_mu_b: p.beta_mu_b,
            freq: p.freq,
        }
    }
}

impl TryFrom<&KisingEngineOptions> for EngineConfig {
    type Error = KisingStatus;

    fn try_from(o: &KisingEngineOptions) -> Result<Self, KisingStatus> {
        Ok(EngineConfig {
            seed: o.seed,
            dynamics: KisingDynamics::try_from(o.dynamics)?.into(),
            rounding: KisingRounding::try_from(o.rounding)?.into(),
            initial_params: Params {
                beta_j: o.beta_j,
                beta_mu_b: o.beta_mu_b,
                freq: o.freq,
            },
        })
    }
}

/// C view of the most recent step report.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KisingStepReport {
    /// Flip attempts (events for Glauber).
    pub attempted: u64,
    /// Flips applied.
    pub accepted: u64,
    /// Clock on entry.
    pub t_start: f64,
    /// Clock returned.
    pub t_end: f64,
    /// Wall-clock microseconds spent in the kernel.
    pub elapsed_us: u64,
    /// The `KisingDynamics` value of the kernel that ran.
    pub dynamics: i32,
}

impl KisingStepReport {
    pub(crate) fn from_rust(r: &StepReport, dynamics: Dynamics) -> Self {
        Self {
            attempted: r.attempted,
            accepted: r.accepted,
            t_start: r.t_start,
            t_end: r.t_end,
            elapsed_us: r.elapsed_us,
            dynamics: KisingDynamics::from(dynamics) as i32,
        }
    }
}
