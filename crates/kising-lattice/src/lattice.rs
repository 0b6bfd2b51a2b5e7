//! The toroidal spin lattice.

use kising_core::{RandomSource, Spin};

use crate::buffer::SpinBuffer;
use crate::error::LatticeError;
use crate::torus::{self, check_site, index_of, Site};

/// A fixed `dim0 x dim1` grid of spins with periodic 4-neighbour adjacency.
///
/// Cells are stored row-major. Dimensions are fixed at construction.
/// Every cell always holds a valid [`Spin`]; a fresh lattice is all
/// [`Spin::Down`] (the zero of the 0/1 encoding).
///
/// Site accessors come in two flavours: `(row, col)` methods are
/// bounds-checked and return [`LatticeError::SiteOutOfBounds`]; the
/// `*_at(idx)` methods take a row-major index and are meant for the
/// stepper's inner loop, where the index comes from a bounded draw.
///
/// # Examples
///
/// ```
/// use kising_core::Spin;
/// use kising_lattice::Lattice;
///
/// let mut lat = Lattice::new(4, 4).unwrap();
/// assert_eq!(lat.neighbour_sum(0, 0).unwrap(), -4);
/// lat.set(3, 0, Spin::Up).unwrap(); // north of (0, 0), across the seam
/// assert_eq!(lat.neighbour_sum(0, 0).unwrap(), -2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    dim0: usize,
    dim1: usize,
    spins: Vec<Spin>,
}

impl Lattice {
    /// Maximum size of either dimension.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Maximum number of cells.
    pub const MAX_CELLS: usize = u32::MAX as usize;

    /// Create an all-down lattice.
    ///
    /// # Errors
    ///
    /// [`LatticeError::EmptyLattice`] if either dimension is 0,
    /// [`LatticeError::DimensionTooLarge`] above [`Self::MAX_DIM`],
    /// [`LatticeError::CellCountOverflow`] above [`Self::MAX_CELLS`] cells.
    pub fn new(dim0: usize, dim1: usize) -> Result<Self, LatticeError> {
        if dim0 == 0 || dim1 == 0 {
            return Err(LatticeError::EmptyLattice);
        }
        for (name, value) in [("dim0", dim0), ("dim1", dim1)] {
            if value > Self::MAX_DIM {
                return Err(LatticeError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        let cells = torus::checked_cells(dim0, dim1)?;
        Ok(Self {
            dim0,
            dim1,
            spins: vec![Spin::Down; cells],
        })
    }

    /// Number of rows.
    pub fn dim0(&self) -> usize {
        self.dim0
    }

    /// Number of columns.
    pub fn dim1(&self) -> usize {
        self.dim1
    }

    /// `(dim0, dim1)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.dim0, self.dim1)
    }

    /// Number of sites.
    pub fn cell_count(&self) -> usize {
        self.spins.len()
    }

    /// Always `false`: construction rejects empty lattices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read-only view of all spins, row-major.
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    // ── checked site access ─────────────────────────────────────

    /// Spin at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Spin, LatticeError> {
        check_site(row, col, self.dim0, self.dim1)?;
        Ok(self.spins[index_of(row, col, self.dim1)])
    }

    /// Overwrite the spin at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, spin: Spin) -> Result<(), LatticeError> {
        check_site(row, col, self.dim0, self.dim1)?;
        self.spins[index_of(row, col, self.dim1)] = spin;
        Ok(())
    }

    /// Sum of the four periodic neighbours of `(row, col)`, in `[-4, 4]`.
    ///
    /// On an axis of length 1 both neighbours along that axis are the site
    /// itself, so it contributes its own spin twice.
    pub fn neighbour_sum(&self, row: usize, col: usize) -> Result<i8, LatticeError> {
        check_site(row, col, self.dim0, self.dim1)?;
        Ok(self.neighbour_sum_at(index_of(row, col, self.dim1)))
    }

    /// The four periodic neighbours of `(row, col)` in N/S/W/E order.
    pub fn neighbours(&self, row: usize, col: usize) -> Result<[Site; 4], LatticeError> {
        check_site(row, col, self.dim0, self.dim1)?;
        Ok(torus::neighbours((row, col), self.dim0, self.dim1))
    }

    // ── indexed access for the stepper ──────────────────────────

    /// Spin at row-major index `idx`. Panics if `idx >= cell_count()`.
    #[inline]
    pub fn spin_at(&self, idx: usize) -> Spin {
        self.spins[idx]
    }

    /// Negate the spin at `idx` and return the new value.
    #[inline]
    pub fn flip_at(&mut self, idx: usize) -> Spin {
        let s = -self.spins[idx];
        self.spins[idx] = s;
        s
    }

    /// Overwrite the spin at `idx`.
    #[inline]
    pub fn set_at(&mut self, idx: usize, spin: Spin) {
        self.spins[idx] = spin;
    }

    /// Neighbour sum of the site at `idx`.
    #[inline]
    pub fn neighbour_sum_at(&self, idx: usize) -> i8 {
        torus::neighbour_indices(idx, self.dim0, self.dim1)
            .iter()
            .map(|&n| self.spins[n].value())
            .sum()
    }

    /// Number of up neighbours of the site at `idx`, in `0..=4`.
    #[inline]
    pub fn up_neighbours_at(&self, idx: usize) -> u8 {
        torus::neighbour_indices(idx, self.dim0, self.dim1)
            .iter()
            .map(|&n| self.spins[n].to_bit())
            .sum()
    }

    /// Row-major indices of the four neighbours of `idx`.
    #[inline]
    pub fn neighbour_indices_at(&self, idx: usize) -> [usize; 4] {
        torus::neighbour_indices(idx, self.dim0, self.dim1)
    }

    // ── bulk operations ─────────────────────────────────────────

    /// Set every site to `spin`.
    pub fn fill(&mut self, spin: Spin) {
        self.spins.fill(spin);
    }

    /// Assign every site an independent fair spin, drawing one sample per
    /// site in row-major order.
    pub fn randomize(&mut self, rng: &mut RandomSource) {
        for s in &mut self.spins {
            *s = rng.spin();
        }
    }

    /// Copy the lattice out in 0/1 encoding.
    pub fn export(&self) -> SpinBuffer {
        let bits = self.spins.iter().map(|s| s.to_bit()).collect();
        SpinBuffer::from_raw(self.dim0, self.dim1, bits)
    }

    /// Copy the lattice into an existing buffer of the same shape.
    ///
    /// # Errors
    ///
    /// [`LatticeError::ShapeMismatch`] if the shapes differ; the buffer is
    /// left untouched.
    pub fn export_into(&self, out: &mut SpinBuffer) -> Result<(), LatticeError> {
        self.check_shape(out.shape())?;
        for (dst, s) in out.bits_mut().iter_mut().zip(&self.spins) {
            *dst = s.to_bit();
        }
        Ok(())
    }

    /// Overwrite the lattice from a buffer of the same shape.
    ///
    /// # Errors
    ///
    /// [`LatticeError::ShapeMismatch`] if the shapes differ; the lattice
    /// is left untouched.
    pub fn import(&mut self, buf: &SpinBuffer) -> Result<(), LatticeError> {
        self.check_shape(buf.shape())?;
        for (dst, &b) in self.spins.iter_mut().zip(buf.as_bits()) {
            *dst = Spin::from(b == 1);
        }
        Ok(())
    }

    fn check_shape(&self, got: (usize, usize)) -> Result<(), LatticeError> {
        if got != self.shape() {
            return Err(LatticeError::ShapeMismatch {
                expected: self.shape(),
                got,
            });
        }
        Ok(())
    }

    // ── observables ─────────────────────────────────────────────

    /// Number of up spins.
    pub fn up_count(&self) -> usize {
        self.spins.iter().filter(|s| s.is_up()).count()
    }

    /// Mean spin, in `[-1, 1]`.
    pub fn magnetization(&self) -> f64 {
        2.0 * self.up_count() as f64 / self.cell_count() as f64 - 1.0
    }

    /// Reduced energy `-betaJ Σ s_i s_j - betaMuB Σ s_i`, each bond
    /// counted once (south and east bonds of every site).
    ///
    /// A self-bond on an axis of length 1 is the constant `s·s = 1`, so
    /// flipping a site changes this energy by
    /// `Params::flip_energy - 2·betaJ·k`, where `k` is the number of
    /// neighbour slots of the site that point back at itself (2 per unit
    /// axis). With both dimensions above 1 the two agree exactly.
    pub fn energy(&self, beta_j: f64, beta_mu_b: f64) -> f64 {
        let mut bonds: i64 = 0;
        let mut field: i64 = 0;
        for idx in 0..self.spins.len() {
            let s = i64::from(self.spins[idx].value());
            let [_, south, _, east] = self.neighbour_indices_at(idx);
            bonds += s * i64::from(self.spins[south].value());
            bonds += s * i64::from(self.spins[east].value());
            field += s;
        }
        -beta_j * bonds as f64 - beta_mu_b * field as f64
    }
}
