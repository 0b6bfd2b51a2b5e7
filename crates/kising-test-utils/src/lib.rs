//! Test utilities for kising development.
//!
//! Provides reference spin configurations ([`fixtures`]) and a few
//! assertions over the 0/1 boundary encoding.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{all_down, all_up, checkerboard, random_buffer, stripes};

use kising_lattice::SpinBuffer;

/// Panic unless every cell is 0 or 1.
pub fn assert_valid_encoding(cells: &[i32]) {
    if let Some((i, v)) = cells.iter().enumerate().find(|&(_, &v)| v != 0 && v != 1) {
        panic!("cell {i} holds {v}, expected 0 or 1");
    }
}

/// Fraction of up cells in a buffer.
pub fn up_fraction(buf: &SpinBuffer) -> f64 {
    if buf.is_empty() {
        return 0.0;
    }
    buf.up_count() as f64 / buf.len() as f64
}

/// Number of cells where two equally shaped buffers differ.
///
/// # Panics
///
/// Panics if the shapes differ.
pub fn hamming(a: &SpinBuffer, b: &SpinBuffer) -> usize {
    assert_eq!(a.shape(), b.shape(), "buffer shapes differ");
    a.as_bits().iter().zip(b.as_bits()).filter(|(x, y)| x != y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_encoding_passes() {
        assert_valid_encoding(&[0, 1, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "cell 2 holds -1")]
    fn invalid_encoding_panics() {
        assert_valid_encoding(&[0, 1, -1]);
    }

    #[test]
    fn hamming_counts_differences() {
        assert_eq!(hamming(&all_up(2, 2), &all_down(2, 2)), 4);
        assert_eq!(hamming(&checkerboard(2, 2), &checkerboard(2, 2)), 0);
    }

    #[test]
    fn up_fraction_of_fixtures() {
        assert_eq!(up_fraction(&all_up(3, 3)), 1.0);
        assert_eq!(up_fraction(&checkerboard(4, 4)), 0.5);
    }
}
