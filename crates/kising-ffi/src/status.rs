//! C-compatible status codes.
//!
//! [`KisingStatus`] is a `repr(i32)` enum covering every error an FFI
//! call can report. Conversions from the engine's Rust error types are
//! provided.

use kising_engine::{ConfigError, EngineError};
use kising_lattice::LatticeError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KisingStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// `init_system` with a non-positive dimension, or while initialized.
    InitializationError = -2,
    /// Operation not valid in the current lifecycle phase.
    StateError = -3,
    /// Buffer shape differs from the lattice shape.
    ShapeMismatch = -4,
    /// A parameter or time argument is NaN or infinite.
    ParameterError = -5,
    /// A pointer is null or an enum value is out of range.
    InvalidArgument = -6,
    /// Site coordinate outside the lattice.
    OutOfBounds = -7,
    /// A spin buffer entry is neither 0 nor 1.
    InvalidEncoding = -8,
    /// Engine options failed validation.
    ConfigError = -9,
    /// Requested data does not exist yet (no frame since init).
    NotAvailable = -10,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&EngineError> for KisingStatus {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::Initialization(_) => KisingStatus::InitializationError,
            EngineError::State { .. } => KisingStatus::StateError,
            EngineError::ShapeMismatch { .. } => KisingStatus::ShapeMismatch,
            EngineError::Parameter(_) => KisingStatus::ParameterError,
            EngineError::Lattice(le) => KisingStatus::from(le),
        }
    }
}

impl From<&LatticeError> for KisingStatus {
    fn from(e: &LatticeError) -> Self {
        match e {
            LatticeError::EmptyLattice
            | LatticeError::DimensionTooLarge { .. }
            | LatticeError::CellCountOverflow { .. } => KisingStatus::InitializationError,
            LatticeError::ShapeMismatch { .. } | LatticeError::LengthMismatch { .. } => {
                KisingStatus::ShapeMismatch
            }
            LatticeError::SiteOutOfBounds { .. } => KisingStatus::OutOfBounds,
            LatticeError::InvalidEncoding { .. } => KisingStatus::InvalidEncoding,
        }
    }
}

impl From<&ConfigError> for KisingStatus {
    fn from(_e: &ConfigError) -> Self {
        KisingStatus::ConfigError
    }
}
