//! Kising: a kinetic Ising model engine on a periodic 2D lattice.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the kising sub-crates. For most users, adding `kising` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kising::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.set_rand_seed(7).unwrap();
//! engine.init_system(32, 32).unwrap();
//! engine.set_param(0.44, 0.0, 1.0).unwrap();
//! engine.set_random_spins().unwrap();
//!
//! let mut t = 0.0;
//! for _ in 0..10 {
//!     t = engine.next_frame(t, 0.125).unwrap();
//! }
//! // 1024 sites at freq 1.0: each frame is exactly 128 attempts.
//! assert_eq!(t, 1.25);
//!
//! let m = engine.magnetization().unwrap();
//! assert!((-1.0..=1.0).contains(&m));
//! engine.free_system().unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kising-core` | Spins, parameters, the seeded random source |
//! | [`lattice`] | `kising-lattice` | Torus geometry, the lattice, spin buffers |
//! | [`engine`] | `kising-engine` | Lifecycle engine, kernels, step reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Spins, dynamics parameters and randomness (`kising-core`).
pub use kising_core as types;

/// Toroidal lattice storage and the 0/1 buffer encoding (`kising-lattice`).
///
/// [`lattice::Lattice`] is the in-memory spin grid; [`lattice::SpinBuffer`]
/// is the shape-checked exchange format.
pub use kising_lattice as lattice;

/// The lifecycle-managed engine and its kernels (`kising-engine`).
///
/// Kernels implement [`engine::SpinDynamics`]; the built-in ones are
/// selected with [`engine::Dynamics`].
pub use kising_engine as engine;

/// Common imports for typical kising usage.
///
/// ```rust
/// use kising::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use kising_core::{ParamError, Params, RandomSource, Spin};

    // Lattice
    pub use kising_lattice::{Lattice, LatticeError, SpinBuffer};

    // Engine
    pub use kising_engine::{
        Dynamics, Engine, EngineConfig, EngineError, InitError, Phase, RoundingPolicy,
        SpinDynamics, StepReport, StepTotals,
    };
}
