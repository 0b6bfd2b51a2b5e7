//! Reference spin configurations.
//!
//! Every fixture panics if `dim0 * dim1` exceeds
//! [`Lattice::MAX_CELLS`](kising_lattice::Lattice::MAX_CELLS).

use kising_core::{RandomSource, Spin};
use kising_lattice::torus::site_of;
use kising_lattice::SpinBuffer;

/// Every cell up.
pub fn all_up(dim0: usize, dim1: usize) -> SpinBuffer {
    from_fn(dim0, dim1, |_, _| true)
}

/// Every cell down.
pub fn all_down(dim0: usize, dim1: usize) -> SpinBuffer {
    from_fn(dim0, dim1, |_, _| false)
}

/// Up where `row + col` is even.
pub fn checkerboard(dim0: usize, dim1: usize) -> SpinBuffer {
    from_fn(dim0, dim1, |r, c| (r + c) % 2 == 0)
}

/// Horizontal bands of `width` rows, starting with an up band.
///
/// # Panics
///
/// Panics if `width` is zero.
pub fn stripes(dim0: usize, dim1: usize, width: usize) -> SpinBuffer {
    assert!(width > 0, "stripe width must be positive");
    from_fn(dim0, dim1, |r, _| (r / width) % 2 == 0)
}

/// Independent fair spins drawn from a fresh source seeded with `seed`.
pub fn random_buffer(seed: u64, dim0: usize, dim1: usize) -> SpinBuffer {
    let mut rng = RandomSource::new(seed);
    from_fn(dim0, dim1, |_, _| rng.spin().is_up())
}

/// Row-major fill, visiting sites in the same order as `Lattice::randomize`.
fn from_fn(dim0: usize, dim1: usize, mut up: impl FnMut(usize, usize) -> bool) -> SpinBuffer {
    let Ok(mut buf) = SpinBuffer::new(dim0, dim1) else {
        panic!("fixture shape {dim0}x{dim1} exceeds the lattice cell limit");
    };
    for idx in 0..buf.len() {
        let (r, c) = site_of(idx, dim1);
        if up(r, c) {
            buf.set_at(idx, Spin::Up);
        }
    }
    buf
}
