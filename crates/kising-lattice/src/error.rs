//! Error types for lattice construction, access, and bulk transfer.

use std::fmt;

/// Errors arising from lattice construction, site access, or buffer import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// Attempted to construct a lattice with zero cells.
    EmptyLattice,
    /// A dimension exceeds the supported maximum.
    DimensionTooLarge {
        /// Which dimension (`"dim0"` or `"dim1"`).
        name: &'static str,
        /// The offending value.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// `dim0 * dim1` does not fit the cell index type.
    CellCountOverflow {
        /// First dimension.
        dim0: usize,
        /// Second dimension.
        dim1: usize,
    },
    /// A buffer's shape differs from the lattice shape.
    ShapeMismatch {
        /// Shape of the lattice, `(dim0, dim1)`.
        expected: (usize, usize),
        /// Shape that was supplied.
        got: (usize, usize),
    },
    /// A flat buffer's length differs from `dim0 * dim1`.
    LengthMismatch {
        /// Required number of cells.
        expected: usize,
        /// Supplied number of cells.
        got: usize,
    },
    /// A site coordinate is outside the lattice.
    SiteOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Shape of the lattice, `(dim0, dim1)`.
        dims: (usize, usize),
    },
    /// A buffer entry is neither 0 nor 1.
    InvalidEncoding {
        /// Row-major index of the first bad entry.
        index: usize,
        /// The bad value.
        value: i64,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLattice => write!(f, "lattice must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::CellCountOverflow { dim0, dim1 } => {
                write!(f, "cell count {dim0} x {dim1} exceeds u32::MAX")
            }
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "buffer shape {}x{} does not match lattice shape {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
            Self::LengthMismatch { expected, got } => {
                write!(f, "buffer holds {got} cells, expected {expected}")
            }
            Self::SiteOutOfBounds { row, col, dims } => write!(
                f,
                "site ({row}, {col}) out of bounds: [0, {}) x [0, {})",
                dims.0, dims.1
            ),
            Self::InvalidEncoding { index, value } => {
                write!(f, "spin value {value} at index {index} is not 0 or 1")
            }
        }
    }
}

impl std::error::Error for LatticeError {}
