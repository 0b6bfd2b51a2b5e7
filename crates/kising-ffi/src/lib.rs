//! C ABI for the kising kinetic Ising engine.
//!
//! Every engine lives behind a slot+generation `u64` handle. Functions
//! return an `i32` [`KisingStatus`] (0 = OK, negative = error) and write
//! results through out-pointers. Panics never cross the boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a caught panic into `KisingStatus::Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(code) => code,
            Err(_) => $crate::status::KisingStatus::Panicked as i32,
        }
    };
}

/// Lock a mutex inside `ffi_guard!`, returning `InternalError` if poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::KisingStatus::InternalError as i32,
        }
    };
}

pub mod engine;
mod handle;
pub mod status;
pub mod types;

pub use engine::*;
pub use status::KisingStatus;
pub use types::{KisingDynamics, KisingEngineOptions, KisingPhase, KisingRounding, KisingStepReport};
