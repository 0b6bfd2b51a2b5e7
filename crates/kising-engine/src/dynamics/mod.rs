//! Spin-flip kernels.
//!
//! A kernel advances the lattice from `t` toward `t + dt` and reports the
//! model time it reached. Kernels may cache derived state (acceptance
//! tables, event classes); the engine calls [`SpinDynamics::rebuild`]
//! whenever the lattice or parameters change behind the kernel's back.

pub mod clock;
pub mod glauber;
pub mod metropolis;

use std::fmt;

use kising_core::{Params, RandomSource};
use kising_lattice::Lattice;

/// Mutable state a kernel works on for one frame.
pub struct StepContext<'a> {
    /// The lattice to evolve.
    pub lattice: &'a mut Lattice,
    /// The engine's random source.
    pub rng: &'a mut RandomSource,
    /// Current dynamics parameters.
    pub params: &'a Params,
}

/// Outcome of one [`SpinDynamics::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Advance {
    /// Flip attempts made (events, for rejection-free kernels).
    pub attempted: u64,
    /// Flips actually applied.
    pub accepted: u64,
    /// Model time reached.
    pub t_end: f64,
}

impl Advance {
    /// No work done; the clock stays at `t`.
    pub fn idle(t: f64) -> Self {
        Self {
            attempted: 0,
            accepted: 0,
            t_end: t,
        }
    }
}

/// A single-spin-flip dynamics kernel.
///
/// Kernels are `Send` so an engine can move between threads.
pub trait SpinDynamics: Send + fmt::Debug {
    /// Short name used in step reports and logs.
    fn name(&self) -> &'static str;

    /// Recompute all cached state from the lattice and parameters.
    fn rebuild(&mut self, lattice: &Lattice, params: &Params);

    /// The spin at `idx` changed outside of `advance`.
    ///
    /// The default falls back to a full rebuild.
    fn site_changed(&mut self, lattice: &Lattice, params: &Params, idx: usize) {
        let _ = idx;
        self.rebuild(lattice, params);
    }

    /// Forget any state carried between frames (clock residuals).
    fn reset(&mut self) {}

    /// Advance the lattice from `t` toward `t + dt`.
    ///
    /// `t` and `dt` are finite. A non-positive `dt` must leave the lattice
    /// and RNG untouched and return `t`.
    fn advance(&mut self, ctx: StepContext<'_>, t: f64, dt: f64) -> Advance;
}
