//! Benchmark profiles for the kising kinetic Ising engine.
//!
//! Provides pre-built engines for benchmarking and examples:
//!
//! - [`reference_profile`]: 256x256 lattice near the critical coupling
//! - [`stress_profile`]: 1024x1024 lattice (~1M sites) for stress testing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use kising_engine::{Dynamics, Engine, EngineConfig, EngineError, RoundingPolicy};

/// Error type for profile construction.
pub type ProfileError = Box<dyn Error + Send + Sync>;

/// Onsager's critical coupling `ln(1 + sqrt(2)) / 2`.
pub const CRITICAL_BETA_J: f64 = 0.440_686_793_509_772;

/// Frame length used by every profile.
pub const FRAME_DT: f64 = 0.1;

/// A seeded, randomized engine of the given shape at `beta_j`.
///
/// # Errors
///
/// Propagates config and engine errors.
pub fn profile(
    dynamics: Dynamics,
    seed: u64,
    dim0: usize,
    dim1: usize,
    beta_j: f64,
) -> Result<Engine, ProfileError> {
    let config = EngineConfig {
        seed,
        dynamics,
        rounding: RoundingPolicy::Accumulated,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(config)?;
    engine.init_system(dim0, dim1)?;
    engine.set_param(beta_j, 0.0, 1.0)?;
    engine.set_random_spins()?;
    Ok(engine)
}

/// 256x256 lattice at the critical coupling.
pub fn reference_profile(dynamics: Dynamics, seed: u64) -> Result<Engine, ProfileError> {
    profile(dynamics, seed, 256, 256, CRITICAL_BETA_J)
}

/// 1024x1024 lattice at the critical coupling.
pub fn stress_profile(dynamics: Dynamics, seed: u64) -> Result<Engine, ProfileError> {
    profile(dynamics, seed, 1024, 1024, CRITICAL_BETA_J)
}

/// Run `frames` frames of [`FRAME_DT`] starting at `t` and return the
/// clock reached.
pub fn run_frames(engine: &mut Engine, t: f64, frames: usize) -> Result<f64, EngineError> {
    let mut t = t;
    for _ in 0..frames {
        t = engine.next_frame(t, FRAME_DT)?;
    }
    Ok(t)
}
