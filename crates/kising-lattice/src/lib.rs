//! Toroidal 2D spin lattice for kising simulations.
//!
//! This crate defines the [`Lattice`], a fixed `dim0 x dim1` grid of
//! [`Spin`](kising_core::Spin)s with periodic 4-neighbour adjacency,
//! together with the owned, shape-checked [`SpinBuffer`] through which
//! spin configurations cross the engine boundary.
//!
//! # Topology
//!
//! Neighbours wrap around both axes (a torus). Every site has exactly
//! four neighbours, listed north, south, west, east; on a 1-wide axis a
//! site is its own neighbour along that axis.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod lattice;
pub mod torus;

pub use buffer::SpinBuffer;
pub use error::LatticeError;
pub use lattice::Lattice;
pub use torus::Site;
