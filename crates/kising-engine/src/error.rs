//! Engine error types.

use std::error::Error;
use std::fmt;

use kising_core::ParamError;
use kising_lattice::LatticeError;

use crate::engine::Phase;

/// Why `init_system` was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// The engine already holds a lattice; `free_system` first.
    AlreadyInitialized,
    /// A dimension was zero or negative.
    NonPositiveDimension {
        /// Which dimension (`"dim0"` or `"dim1"`).
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// The lattice could not be allocated with the given shape.
    Lattice(LatticeError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => {
                write!(f, "system already initialized; free it before re-initializing")
            }
            Self::NonPositiveDimension { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            Self::Lattice(e) => write!(f, "lattice: {e}"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors returned by [`Engine`](crate::Engine) operations.
///
/// Errors never leave the engine half-updated: the lattice, parameters
/// and RNG are untouched when an operation fails.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// `init_system` failed.
    Initialization(InitError),
    /// The operation is not valid in the current lifecycle phase.
    State {
        /// The refused operation.
        operation: &'static str,
        /// The phase the engine was in.
        phase: Phase,
    },
    /// A spin buffer's shape differs from the lattice.
    ShapeMismatch {
        /// Lattice shape, `(dim0, dim1)`.
        expected: (usize, usize),
        /// Buffer shape.
        got: (usize, usize),
    },
    /// A parameter or time argument was NaN or infinite.
    Parameter(ParamError),
    /// Site access or buffer decoding failed.
    Lattice(LatticeError),
}

impl EngineError {
    pub(crate) fn state(operation: &'static str, phase: Phase) -> Self {
        Self::State { operation, phase }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization(e) => write!(f, "initialization failed: {e}"),
            Self::State { operation, phase } => {
                write!(f, "{operation} is not valid while the engine is {phase}")
            }
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "buffer shape {}x{} does not match lattice shape {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
            Self::Parameter(e) => write!(f, "invalid parameter: {e}"),
            Self::Lattice(e) => write!(f, "lattice: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Initialization(e) => Some(e),
            Self::Parameter(e) => Some(e),
            Self::Lattice(e) => Some(e),
            Self::State { .. } | Self::ShapeMismatch { .. } => None,
        }
    }
}

impl From<InitError> for EngineError {
    fn from(e: InitError) -> Self {
        Self::Initialization(e)
    }
}

impl From<ParamError> for EngineError {
    fn from(e: ParamError) -> Self {
        Self::Parameter(e)
    }
}

impl From<LatticeError> for EngineError {
    fn from(e: LatticeError) -> Self {
        match e {
            LatticeError::ShapeMismatch { expected, got } => Self::ShapeMismatch { expected, got },
            LatticeError::EmptyLattice
            | LatticeError::DimensionTooLarge { .. }
            | LatticeError::CellCountOverflow { .. } => Self::Initialization(InitError::Lattice(e)),
            other => Self::Lattice(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_is_lifted_out_of_lattice_errors() {
        let e = EngineError::from(LatticeError::ShapeMismatch {
            expected: (4, 4),
            got: (2, 8),
        });
        assert_eq!(
            e,
            EngineError::ShapeMismatch {
                expected: (4, 4),
                got: (2, 8)
            }
        );
    }

    #[test]
    fn construction_failures_become_initialization_errors() {
        let e = EngineError::from(LatticeError::CellCountOverflow {
            dim0: 1 << 20,
            dim1: 1 << 20,
        });
        assert!(matches!(
            e,
            EngineError::Initialization(InitError::Lattice(LatticeError::CellCountOverflow { .. }))
        ));
        assert!(e.source().is_some());
    }

    #[test]
    fn access_failures_stay_lattice_errors() {
        let e = EngineError::from(LatticeError::InvalidEncoding { index: 3, value: 2 });
        assert!(matches!(e, EngineError::Lattice(LatticeError::InvalidEncoding { index: 3, .. })));
    }

    #[test]
    fn state_error_names_operation_and_phase() {
        let e = EngineError::state("next_frame", Phase::Freed);
        assert_eq!(e.to_string(), "next_frame is not valid while the engine is freed");
        assert!(e.source().is_none());
    }
}
