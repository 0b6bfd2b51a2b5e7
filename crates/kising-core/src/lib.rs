//! Core types for the kising kinetic Ising engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the two-state [`Spin`], the dynamics [`Params`] group, the seeded
//! [`RandomSource`] every engine owns, and the parameter error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod params;
pub mod rng;
pub mod spin;

pub use error::ParamError;
pub use params::Params;
pub use rng::RandomSource;
pub use spin::Spin;
