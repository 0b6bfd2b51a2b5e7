//! The lifecycle-managed engine.
//!
//! [`Engine`] is the primary user-facing API. It owns one lattice, one
//! random source, the dynamics parameters and a kernel, and moves through
//! the phases
//!
//! ```text
//! Uninitialized --init_system--> Initialized --next_frame--> Stepping
//!                                     |                         |
//!                                     +------free_system--------+--> Freed
//!                                                                     |
//!                             Initialized <--init_system--------------+
//! ```
//!
//! # Ownership model
//!
//! `Engine` is [`Send`] but every mutating method takes `&mut self`, so
//! concurrent use of one engine must be serialized by the caller. Engines
//! share nothing with each other.

use std::fmt;
use std::time::Instant;

use kising_core::params::check_finite;
use kising_core::{Params, RandomSource, Spin};
use kising_lattice::{Lattice, SpinBuffer};
use tracing::{debug, trace};

use crate::config::{ConfigError, Dynamics, EngineConfig};
use crate::dynamics::{SpinDynamics, StepContext};
use crate::error::{EngineError, InitError};
use crate::report::{StepReport, StepTotals};

// Compile-time assertion: Engine is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Engine>();
    }
};

// ── Phase ───────────────────────────────────────────────────────

/// Lifecycle phase of an [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No lattice yet. Only seeding and `init_system` are allowed.
    Uninitialized,
    /// Lattice allocated, no frame run since `init_system`.
    Initialized,
    /// At least one frame has run.
    Stepping,
    /// Lattice released. Only a fresh `init_system` is allowed.
    Freed,
}

impl Phase {
    /// Whether the engine currently holds a lattice.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Initialized | Self::Stepping)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Stepping => "stepping",
            Self::Freed => "freed",
        })
    }
}

enum Slot {
    Empty,
    Live { lattice: Lattice, stepped: bool },
    Freed,
}

impl Slot {
    fn phase(&self) -> Phase {
        match self {
            Self::Empty => Phase::Uninitialized,
            Self::Live { stepped: false, .. } => Phase::Initialized,
            Self::Live { stepped: true, .. } => Phase::Stepping,
            Self::Freed => Phase::Freed,
        }
    }

    fn lattice(&self, operation: &'static str) -> Result<&Lattice, EngineError> {
        match self {
            Self::Live { lattice, .. } => Ok(lattice),
            _ => Err(EngineError::state(operation, self.phase())),
        }
    }

    fn lattice_mut(&mut self, operation: &'static str) -> Result<(&mut Lattice, &mut bool), EngineError> {
        let phase = self.phase();
        match self {
            Self::Live { lattice, stepped } => Ok((lattice, stepped)),
            _ => Err(EngineError::state(operation, phase)),
        }
    }
}

// ── Engine ──────────────────────────────────────────────────────

/// A kinetic Ising simulation on a periodic 2D lattice.
///
/// # Example
///
/// ```
/// use kising_engine::Engine;
///
/// let mut engine = Engine::new();
/// engine.set_rand_seed(1234)?;
/// engine.init_system(64, 64)?;
/// engine.set_param(0.44, 0.0, 1.0)?;
/// engine.set_random_spins()?;
///
/// let mut t = 0.0;
/// for _ in 0..10 {
///     t = engine.next_frame(t, 0.1)?;
/// }
/// // Metropolis frames land within half an attempt of the requested end.
/// assert!((t - 1.0).abs() <= 0.5 / 4096.0);
/// # Ok::<(), kising_engine::EngineError>(())
/// ```
pub struct Engine {
    config: EngineConfig,
    rng: RandomSource,
    params: Params,
    kernel: Box<dyn SpinDynamics>,
    slot: Slot,
    last_step: Option<StepReport>,
    totals: StepTotals,
}

impl Engine {
    /// An uninitialized engine with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// An uninitialized engine with the given configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the configuration fails validation.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        Self {
            rng: RandomSource::new(config.seed),
            params: config.initial_params,
            kernel: config.dynamics.build(config.rounding),
            slot: Slot::Empty,
            last_step: None,
            totals: StepTotals::default(),
            config,
        }
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Reseed the random source.
    ///
    /// Allowed before and after `init_system`; the draw sequence restarts
    /// from `seed`.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] once the system has been freed.
    pub fn set_rand_seed(&mut self, seed: u64) -> Result<(), EngineError> {
        if self.slot.phase() == Phase::Freed {
            return Err(EngineError::state("set_rand_seed", Phase::Freed));
        }
        self.rng.seed(seed);
        debug!(seed, "rng reseeded");
        Ok(())
    }

    /// Allocate a `dim0 x dim1` all-down lattice and install the configured
    /// initial parameters.
    ///
    /// Valid in `Uninitialized` and `Freed`. Step totals and the last step
    /// report are cleared. The random source is left as it is.
    ///
    /// # Errors
    ///
    /// [`InitError::AlreadyInitialized`] if a lattice is live,
    /// [`InitError::NonPositiveDimension`] for a zero dimension,
    /// [`InitError::Lattice`] if the shape cannot be allocated.
    pub fn init_system(&mut self, dim0: usize, dim1: usize) -> Result<(), EngineError> {
        if self.slot.phase().is_live() {
            return Err(InitError::AlreadyInitialized.into());
        }
        for (name, value) in [("dim0", dim0), ("dim1", dim1)] {
            if value == 0 {
                return Err(InitError::NonPositiveDimension { name, value: 0 }.into());
            }
        }
        let lattice = Lattice::new(dim0, dim1).map_err(InitError::Lattice)?;

        self.params = self.config.initial_params;
        self.kernel.reset();
        self.kernel.rebuild(&lattice, &self.params);
        self.last_step = None;
        self.totals = StepTotals::default();
        self.slot = Slot::Live {
            lattice,
            stepped: false,
        };
        debug!(dim0, dim1, kernel = self.kernel.name(), "system initialized");
        Ok(())
    }

    /// Release the lattice. The engine can be initialized again afterwards.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] if no lattice is live.
    pub fn free_system(&mut self) -> Result<(), EngineError> {
        self.slot.lattice("free_system")?;
        self.slot = Slot::Freed;
        self.last_step = None;
        debug!("system freed");
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.slot.phase()
    }

    // ── parameters ──────────────────────────────────────────────

    /// Replace all three dynamics parameters at once.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::Parameter`] for a non-finite value. The previous
    /// parameters are kept on error.
    pub fn set_params(&mut self, params: Params) -> Result<(), EngineError> {
        let (lattice, _) = self.slot.lattice_mut("set_param")?;
        params.validate()?;
        self.params = params;
        self.kernel.rebuild(lattice, &self.params);
        debug!(
            beta_j = params.beta_j,
            beta_mu_b = params.beta_mu_b,
            freq = params.freq,
            "params updated"
        );
        Ok(())
    }

    /// Shorthand for [`set_params`](Self::set_params).
    pub fn set_param(&mut self, beta_j: f64, beta_mu_b: f64, freq: f64) -> Result<(), EngineError> {
        self.set_params(Params {
            beta_j,
            beta_mu_b,
            freq,
        })
    }

    /// The parameters in force.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice.
    pub fn params(&self) -> Result<Params, EngineError> {
        self.slot.lattice("params")?;
        Ok(self.params)
    }

    // ── spins ───────────────────────────────────────────────────

    /// Overwrite the lattice from a buffer of the same shape.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::ShapeMismatch`] if the shapes differ. The lattice is
    /// untouched on error.
    pub fn set_spins(&mut self, buf: &SpinBuffer) -> Result<(), EngineError> {
        let (lattice, _) = self.slot.lattice_mut("set_spin")?;
        lattice.import(buf)?;
        self.kernel.rebuild(lattice, &self.params);
        Ok(())
    }

    /// Overwrite the lattice from raw row-major 0/1 cells declared as
    /// `dim0 x dim1`.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::ShapeMismatch`] if the declared shape differs from
    /// the lattice, [`EngineError::Lattice`] if `cells` has the wrong
    /// length or holds a value other than 0 or 1.
    pub fn set_spin_cells<T>(&mut self, dim0: usize, dim1: usize, cells: &[T]) -> Result<(), EngineError>
    where
        T: Copy + Into<i64>,
    {
        let lattice = self.slot.lattice("set_spin")?;
        check_shape(lattice, (dim0, dim1))?;
        let buf = SpinBuffer::from_cells(dim0, dim1, cells)?;
        self.set_spins(&buf)
    }

    /// Assign every site an independent fair spin from the engine's RNG.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice.
    pub fn set_random_spins(&mut self) -> Result<(), EngineError> {
        let (lattice, _) = self.slot.lattice_mut("set_random_spin")?;
        lattice.randomize(&mut self.rng);
        self.kernel.rebuild(lattice, &self.params);
        Ok(())
    }

    /// A copy of the lattice in 0/1 encoding.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice.
    pub fn spins(&self) -> Result<SpinBuffer, EngineError> {
        Ok(self.slot.lattice("get_spin")?.export())
    }

    /// Copy the lattice into `out`.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::ShapeMismatch`] if `out` has another shape.
    pub fn copy_spins_into(&self, out: &mut SpinBuffer) -> Result<(), EngineError> {
        self.slot.lattice("get_spin")?.export_into(out)?;
        Ok(())
    }

    /// Write the lattice as row-major `i32` 0/1 cells into `out`, which
    /// the caller declares as `dim0 x dim1`.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::ShapeMismatch`] if the declared shape differs,
    /// [`EngineError::Lattice`] if `out` has the wrong length. Nothing is
    /// written on error.
    pub fn write_spins_i32(&self, dim0: usize, dim1: usize, out: &mut [i32]) -> Result<(), EngineError> {
        let lattice = self.slot.lattice("get_spin")?;
        check_shape(lattice, (dim0, dim1))?;
        lattice.export().write_i32(out)?;
        Ok(())
    }

    /// Spin at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::Lattice`] outside the lattice.
    pub fn spin(&self, row: usize, col: usize) -> Result<Spin, EngineError> {
        Ok(self.slot.lattice("get_spin")?.get(row, col)?)
    }

    /// Set one site.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::Lattice`] outside the lattice.
    pub fn set_spin(&mut self, row: usize, col: usize, spin: Spin) -> Result<(), EngineError> {
        let (lattice, _) = self.slot.lattice_mut("set_spin")?;
        lattice.set(row, col, spin)?;
        let idx = row * lattice.dim1() + col;
        self.kernel.site_changed(lattice, &self.params, idx);
        Ok(())
    }

    // ── stepping ────────────────────────────────────────────────

    /// Advance from model time `t` by one frame of length `time_per_frame`
    /// and return the model time reached.
    ///
    /// A non-positive frame length or `freq <= 0` returns `t` without
    /// touching the lattice.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice,
    /// [`EngineError::Parameter`] if `t` or `time_per_frame` is not finite.
    pub fn next_frame(&mut self, t: f64, time_per_frame: f64) -> Result<f64, EngineError> {
        let (lattice, stepped) = self.slot.lattice_mut("next_frame")?;
        check_finite("t", t)?;
        check_finite("time_per_frame", time_per_frame)?;

        let start = Instant::now();
        let adv = self.kernel.advance(
            StepContext {
                lattice,
                rng: &mut self.rng,
                params: &self.params,
            },
            t,
            time_per_frame,
        );
        let elapsed_us = start.elapsed().as_micros().min(u128::from(u64::MAX)) as u64;
        *stepped = true;

        let report = StepReport {
            kernel: self.kernel.name(),
            attempted: adv.attempted,
            accepted: adv.accepted,
            t_start: t,
            t_end: adv.t_end,
            elapsed_us,
        };
        trace!(
            attempted = report.attempted,
            accepted = report.accepted,
            t_start = t,
            t_end = report.t_end,
            "frame advanced"
        );
        self.totals.record(&report);
        self.last_step = Some(report);
        Ok(adv.t_end)
    }

    // ── observables ─────────────────────────────────────────────

    /// Mean spin in `[-1, 1]`.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice.
    pub fn magnetization(&self) -> Result<f64, EngineError> {
        Ok(self.slot.lattice("magnetization")?.magnetization())
    }

    /// Reduced energy of the lattice under the current parameters.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice.
    pub fn energy(&self) -> Result<f64, EngineError> {
        let lattice = self.slot.lattice("energy")?;
        Ok(lattice.energy(self.params.beta_j, self.params.beta_mu_b))
    }

    /// Borrow the live lattice.
    ///
    /// # Errors
    ///
    /// [`EngineError::State`] without a live lattice.
    pub fn lattice(&self) -> Result<&Lattice, EngineError> {
        self.slot.lattice("lattice")
    }

    /// `(dim0, dim1)` of the live lattice.
    pub fn dims(&self) -> Option<(usize, usize)> {
        self.slot.lattice("dims").ok().map(Lattice::shape)
    }

    /// Report for the most recent frame since `init_system`.
    pub fn last_step(&self) -> Option<&StepReport> {
        self.last_step.as_ref()
    }

    /// Counters accumulated since `init_system`.
    pub fn totals(&self) -> StepTotals {
        self.totals
    }

    /// The seed the random source was last seeded with.
    pub fn seed(&self) -> u64 {
        self.rng.current_seed()
    }

    /// The configured kernel.
    pub fn dynamics(&self) -> Dynamics {
        self.config.dynamics
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn check_shape(lattice: &Lattice, got: (usize, usize)) -> Result<(), EngineError> {
    if lattice.shape() != got {
        return Err(EngineError::ShapeMismatch {
            expected: lattice.shape(),
            got,
        });
    }
    Ok(())
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("phase", &self.phase())
            .field("dims", &self.dims())
            .field("kernel", &self.kernel.name())
            .field("seed", &self.seed())
            .field("params", &self.params)
            .field("totals", &self.totals)
            .finish()
    }
}
