//! Owned, shape-checked spin configuration buffers.
//!
//! A [`SpinBuffer`] is the only way spin data enters or leaves a
//! [`Lattice`](crate::Lattice). It carries its own `(dim0, dim1)` shape
//! and stores cells row-major in the 0/1 boundary encoding, so an import
//! can validate the shape before touching the lattice.

use kising_core::Spin;

use crate::error::LatticeError;
use crate::torus::{checked_cells, index_of, Site};

/// A `dim0 x dim1` grid of spins in 0/1 encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpinBuffer {
    dim0: usize,
    dim1: usize,
    bits: Vec<u8>,
}

impl SpinBuffer {
    /// An all-down (all zero) buffer.
    ///
    /// # Errors
    ///
    /// [`LatticeError::CellCountOverflow`] above
    /// [`Lattice::MAX_CELLS`](crate::Lattice::MAX_CELLS) cells.
    pub fn new(dim0: usize, dim1: usize) -> Result<Self, LatticeError> {
        Self::filled(dim0, dim1, Spin::Down)
    }

    /// A buffer with every cell set to `spin`.
    ///
    /// # Errors
    ///
    /// [`LatticeError::CellCountOverflow`] above
    /// [`Lattice::MAX_CELLS`](crate::Lattice::MAX_CELLS) cells.
    pub fn filled(dim0: usize, dim1: usize, spin: Spin) -> Result<Self, LatticeError> {
        let cells = checked_cells(dim0, dim1)?;
        Ok(Self {
            dim0,
            dim1,
            bits: vec![spin.to_bit(); cells],
        })
    }

    /// Build a buffer from row-major 0/1 cells of any integer type.
    ///
    /// # Errors
    ///
    /// [`LatticeError::CellCountOverflow`] if the shape is too large,
    /// [`LatticeError::LengthMismatch`] if `cells.len() != dim0 * dim1`,
    /// [`LatticeError::InvalidEncoding`] at the first entry that is not
    /// 0 or 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use kising_lattice::SpinBuffer;
    ///
    /// let buf = SpinBuffer::from_cells(2, 2, &[1i32, 0, 0, 1]).unwrap();
    /// assert_eq!(buf.up_count(), 2);
    /// assert!(SpinBuffer::from_cells(2, 2, &[1i32, 0, 2, 1]).is_err());
    /// ```
    pub fn from_cells<T>(dim0: usize, dim1: usize, cells: &[T]) -> Result<Self, LatticeError>
    where
        T: Copy + Into<i64>,
    {
        let expected = checked_cells(dim0, dim1)?;
        if cells.len() != expected {
            return Err(LatticeError::LengthMismatch {
                expected,
                got: cells.len(),
            });
        }
        let mut bits = Vec::with_capacity(expected);
        for (index, &cell) in cells.iter().enumerate() {
            let value: i64 = cell.into();
            let spin = Spin::from_bit(value).ok_or(LatticeError::InvalidEncoding { index, value })?;
            bits.push(spin.to_bit());
        }
        Ok(Self { dim0, dim1, bits })
    }

    /// Build a buffer from signed spins in row-major order.
    ///
    /// # Errors
    ///
    /// [`LatticeError::CellCountOverflow`] if the shape is too large,
    /// [`LatticeError::LengthMismatch`] if `spins.len() != dim0 * dim1`.
    pub fn from_spins(dim0: usize, dim1: usize, spins: &[Spin]) -> Result<Self, LatticeError> {
        let expected = checked_cells(dim0, dim1)?;
        if spins.len() != expected {
            return Err(LatticeError::LengthMismatch {
                expected,
                got: spins.len(),
            });
        }
        Ok(Self {
            dim0,
            dim1,
            bits: spins.iter().map(|s| s.to_bit()).collect(),
        })
    }

    /// `(dim0, dim1)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.dim0, self.dim1)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the buffer holds no cells.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Row-major 0/1 cells.
    pub fn as_bits(&self) -> &[u8] {
        &self.bits
    }

    /// Spin at `(row, col)`, or `None` outside the buffer.
    pub fn get(&self, row: usize, col: usize) -> Option<Spin> {
        if row >= self.dim0 || col >= self.dim1 {
            return None;
        }
        let bit = self.bits[index_of(row, col, self.dim1)];
        Some(Spin::from(bit == 1))
    }

    /// Set the spin at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`LatticeError::SiteOutOfBounds`] outside the buffer.
    pub fn set(&mut self, row: usize, col: usize, spin: Spin) -> Result<(), LatticeError> {
        if row >= self.dim0 || col >= self.dim1 {
            return Err(LatticeError::SiteOutOfBounds {
                row,
                col,
                dims: (self.dim0, self.dim1),
            });
        }
        self.bits[index_of(row, col, self.dim1)] = spin.to_bit();
        Ok(())
    }

    /// Overwrite the cell at row-major index `idx`. Panics if
    /// `idx >= len()`.
    #[inline]
    pub fn set_at(&mut self, idx: usize, spin: Spin) {
        self.bits[idx] = spin.to_bit();
    }

    /// Iterate `(site, spin)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Site, Spin)> + '_ {
        let dim1 = self.dim1;
        self.bits
            .iter()
            .enumerate()
            .map(move |(i, &b)| ((i / dim1, i % dim1), Spin::from(b == 1)))
    }

    /// Number of up spins.
    pub fn up_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// Copy the cells into a caller-provided `i32` slice (the C ABI layout).
    ///
    /// # Errors
    ///
    /// [`LatticeError::LengthMismatch`] if `out.len() != self.len()`.
    /// Nothing is written on error.
    pub fn write_i32(&self, out: &mut [i32]) -> Result<(), LatticeError> {
        if out.len() != self.bits.len() {
            return Err(LatticeError::LengthMismatch {
                expected: self.bits.len(),
                got: out.len(),
            });
        }
        for (dst, &b) in out.iter_mut().zip(&self.bits) {
            *dst = i32::from(b);
        }
        Ok(())
    }

    pub(crate) fn from_raw(dim0: usize, dim1: usize, bits: Vec<u8>) -> Self {
        debug_assert_eq!(bits.len(), dim0 * dim1);
        Self { dim0, dim1, bits }
    }

    pub(crate) fn bits_mut(&mut self) -> &mut [u8] {
        &mut self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_all_down() {
        let buf = SpinBuffer::new(3, 4).unwrap();
        assert_eq!(buf.shape(), (3, 4));
        assert_eq!(buf.len(), 12);
        assert_eq!(buf.up_count(), 0);
        assert!(buf.as_bits().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_cells_accepts_u8_and_i32() {
        let a = SpinBuffer::from_cells(1, 3, &[0u8, 1, 1]).unwrap();
        let b = SpinBuffer::from_cells(1, 3, &[0i32, 1, 1]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert_eq!(
            SpinBuffer::from_cells(2, 2, &[0i32, 1, 1]),
            Err(LatticeError::LengthMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn from_cells_reports_first_bad_entry() {
        assert_eq!(
            SpinBuffer::from_cells(1, 4, &[0i32, -1, 5, 1]),
            Err(LatticeError::InvalidEncoding {
                index: 1,
                value: -1
            })
        );
    }

    #[test]
    fn get_set_and_bounds() {
        let mut buf = SpinBuffer::new(2, 3).unwrap();
        buf.set(1, 2, Spin::Up).unwrap();
        assert_eq!(buf.get(1, 2), Some(Spin::Up));
        assert_eq!(buf.get(0, 0), Some(Spin::Down));
        assert_eq!(buf.get(2, 0), None);
        assert!(matches!(
            buf.set(0, 3, Spin::Up),
            Err(LatticeError::SiteOutOfBounds { .. })
        ));
        assert_eq!(buf.as_bits()[5], 1);
        buf.set_at(1, Spin::Up);
        assert_eq!(buf.get(0, 1), Some(Spin::Up));
    }

    #[test]
    fn write_i32_checks_length_before_writing() {
        let buf = SpinBuffer::filled(2, 2, Spin::Up).unwrap();
        let mut short = [7i32; 3];
        assert!(buf.write_i32(&mut short).is_err());
        assert_eq!(short, [7; 3]);

        let mut out = [0i32; 4];
        buf.write_i32(&mut out).unwrap();
        assert_eq!(out, [1; 4]);
    }

    #[test]
    fn iter_yields_row_major_sites() {
        let buf = SpinBuffer::from_cells(2, 2, &[1u8, 0, 0, 0]).unwrap();
        let sites: Vec<_> = buf.iter().collect();
        assert_eq!(sites[0], ((0, 0), Spin::Up));
        assert_eq!(sites[3], ((1, 1), Spin::Down));
    }

    #[test]
    fn oversized_shapes_are_rejected_before_allocating() {
        let huge = (1usize << 20, 1usize << 20);
        let overflow = Err(LatticeError::CellCountOverflow {
            dim0: huge.0,
            dim1: huge.1,
        });
        assert_eq!(SpinBuffer::new(huge.0, huge.1), overflow);
        assert_eq!(SpinBuffer::filled(huge.0, huge.1, Spin::Up), overflow);
        assert_eq!(SpinBuffer::from_cells(huge.0, huge.1, &[0u8; 4]), overflow);
        assert_eq!(SpinBuffer::from_spins(huge.0, huge.1, &[Spin::Up]), overflow);
        assert!(matches!(
            SpinBuffer::new(usize::MAX, 2),
            Err(LatticeError::CellCountOverflow { .. })
        ));
    }

    #[test]
    fn empty_shapes_are_allowed() {
        let buf = SpinBuffer::new(0, 5).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn from_spins_encodes() {
        let buf = SpinBuffer::from_spins(1, 2, &[Spin::Up, Spin::Down]).unwrap();
        assert_eq!(buf.as_bits(), &[1, 0]);
    }
}
