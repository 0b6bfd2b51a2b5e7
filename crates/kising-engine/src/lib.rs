//! Kinetic Ising engine.
//!
//! Provides the lifecycle-managed [`Engine`] that owns a toroidal spin
//! lattice, a seeded random source and the dynamics parameters, and
//! advances the lattice one frame at a time with a pluggable
//! [`SpinDynamics`] kernel (Metropolis or rejection-free Glauber).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dynamics;
pub mod engine;
pub mod error;
pub mod report;

pub use config::{ConfigError, Dynamics, EngineConfig, RoundingPolicy};
pub use dynamics::SpinDynamics;
pub use engine::{Engine, Phase};
pub use error::{EngineError, InitError};
pub use report::{StepReport, StepTotals};
