//! The two-state spin variable and its boundary encoding.

use std::fmt;
use std::ops::Neg;

/// A single lattice spin with logical value −1 or +1.
///
/// Inside the engine spins are always handled as `±1`. Across the
/// boundary (spin buffers, the C ABI) they use the 0/1 encoding:
/// `0` for [`Spin::Down`] and `1` for [`Spin::Up`].
///
/// # Examples
///
/// ```
/// use kising_core::Spin;
///
/// assert_eq!(Spin::Up.value(), 1);
/// assert_eq!(-Spin::Up, Spin::Down);
/// assert_eq!(Spin::from_bit(0), Some(Spin::Down));
/// assert_eq!(Spin::from_bit(7), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Spin {
    /// Spin −1, encoded as `0`.
    #[default]
    Down = -1,
    /// Spin +1, encoded as `1`.
    Up = 1,
}

impl Spin {
    /// Signed value: −1 or +1.
    #[inline]
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// Boundary encoding: 0 for down, 1 for up.
    #[inline]
    pub const fn to_bit(self) -> u8 {
        match self {
            Self::Down => 0,
            Self::Up => 1,
        }
    }

    /// Decode the 0/1 boundary encoding. Any other value is `None`.
    #[inline]
    pub const fn from_bit(bit: i64) -> Option<Self> {
        match bit {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            _ => None,
        }
    }

    /// The opposite spin.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Whether this is [`Spin::Up`].
    #[inline]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

impl Neg for Spin {
    type Output = Spin;

    fn neg(self) -> Spin {
        self.flipped()
    }
}

impl From<bool> for Spin {
    /// `true` is up.
    fn from(up: bool) -> Self {
        if up {
            Self::Up
        } else {
            Self::Down
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "-"),
            Self::Up => write!(f, "+"),
        }
    }
}
