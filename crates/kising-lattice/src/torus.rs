//! Periodic index arithmetic shared by all stencil code.

use crate::error::LatticeError;

/// A lattice site as `(row, col)`.
pub type Site = (usize, usize);

/// Stencil offsets in neighbour order: north, south, west, east.
pub const VON_NEUMANN: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Wrap a possibly out-of-range axis value onto `[0, len)`.
///
/// `len` must be non-zero.
#[inline]
pub fn wrap_axis(val: isize, len: usize) -> usize {
    let n = len as isize;
    (((val % n) + n) % n) as usize
}

/// Check that `(row, col)` lies inside a `dim0 x dim1` lattice.
pub(crate) fn check_site(row: usize, col: usize, dim0: usize, dim1: usize) -> Result<(), LatticeError> {
    if row >= dim0 || col >= dim1 {
        return Err(LatticeError::SiteOutOfBounds {
            row,
            col,
            dims: (dim0, dim1),
        });
    }
    Ok(())
}

/// `dim0 * dim1`, bounded by [`Lattice::MAX_CELLS`](crate::Lattice::MAX_CELLS).
pub(crate) fn checked_cells(dim0: usize, dim1: usize) -> Result<usize, LatticeError> {
    dim0.checked_mul(dim1)
        .filter(|&n| n <= crate::Lattice::MAX_CELLS)
        .ok_or(LatticeError::CellCountOverflow { dim0, dim1 })
}

/// Row-major index of an in-bounds site.
#[inline]
pub fn index_of(row: usize, col: usize, dim1: usize) -> usize {
    row * dim1 + col
}

/// Inverse of [`index_of`].
#[inline]
pub fn site_of(idx: usize, dim1: usize) -> Site {
    (idx / dim1, idx % dim1)
}

/// The four periodic neighbours of an in-bounds site, in N/S/W/E order.
///
/// # Examples
///
/// ```
/// use kising_lattice::torus::neighbours;
///
/// // Corner of a 5x5 torus wraps on both axes.
/// assert_eq!(neighbours((0, 0), 5, 5), [(4, 0), (1, 0), (0, 4), (0, 1)]);
/// ```
#[inline]
pub fn neighbours(site: Site, dim0: usize, dim1: usize) -> [Site; 4] {
    let (r, c) = (site.0 as isize, site.1 as isize);
    VON_NEUMANN.map(|(dr, dc)| (wrap_axis(r + dr, dim0), wrap_axis(c + dc, dim1)))
}

/// Row-major indices of the four periodic neighbours of `idx`.
#[inline]
pub fn neighbour_indices(idx: usize, dim0: usize, dim1: usize) -> [usize; 4] {
    neighbours(site_of(idx, dim1), dim0, dim1).map(|(r, c)| index_of(r, c, dim1))
}
