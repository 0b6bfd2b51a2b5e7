//! Error types for the parameter store.

use std::error::Error;
use std::fmt;

/// Errors from replacing the dynamics parameters.
///
/// The store only checks finiteness. `freq <= 0` is accepted here and
/// simply stalls the clock in the stepper.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    /// A parameter was NaN or infinite.
    NonFinite {
        /// Which parameter (`"betaJ"`, `"betaMuB"`, `"freq"`, `"t"`, `"time_per_frame"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
        }
    }
}

impl Error for ParamError {}
