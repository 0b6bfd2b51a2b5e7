//! Engine lifecycle FFI: create, seed, init, parameters, spins, step, free.
//!
//! Uses per-engine `Arc<Mutex<Engine>>` so the global `ENGINES` table lock
//! is only held for handle lookup. Distinct engines can be driven from
//! different threads concurrently.

use std::sync::{Arc, Mutex};

use kising_engine::{Engine, EngineConfig};

use crate::handle::{HandleTable, NULL_HANDLE};
use crate::status::KisingStatus;
use crate::types::{KisingEngineOptions, KisingPhase, KisingStepReport};

type EngineArc = Arc<Mutex<Engine>>;

static ENGINES: Mutex<HandleTable<EngineArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for an engine handle, briefly locking the global table.
///
/// Returns `None` if the handle is invalid or the mutex is poisoned.
fn get_engine(handle: u64) -> Option<EngineArc> {
    if handle == NULL_HANDLE {
        return None;
    }
    ENGINES.lock().ok()?.get(handle).cloned()
}

fn status_of<T>(result: Result<T, kising_engine::EngineError>) -> i32 {
    match result {
        Ok(_) => KisingStatus::Ok as i32,
        Err(e) => KisingStatus::from(&e) as i32,
    }
}

/// Check a C-declared buffer shape against the engine before any raw
/// slice is formed. Returns the shape and cell count on success.
fn checked_shape(engine: &Engine, dim0: i32, dim1: i32) -> Result<(usize, usize, usize), KisingStatus> {
    let Some(shape) = engine.dims() else {
        return Err(KisingStatus::StateError);
    };
    match (usize::try_from(dim0), usize::try_from(dim1)) {
        (Ok(d0), Ok(d1)) if (d0, d1) == shape => Ok((d0, d1, d0 * d1)),
        _ => Err(KisingStatus::ShapeMismatch),
    }
}

/// Create an engine with default options and write its handle to `out`.
///
/// Handles are never 0, so a zeroed handle variable is always invalid.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_engine_create(out: *mut u64) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let handle = ffi_lock!(ENGINES).insert(Arc::new(Mutex::new(Engine::new())));
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = handle };
        KisingStatus::Ok as i32
    })
}

/// Create an engine from `options` and write its handle to `out`.
///
/// Returns `KISING_STATUS_INVALID_ARGUMENT` for null pointers or an
/// out-of-range enum field, `KISING_STATUS_CONFIG_ERROR` for non-finite
/// initial parameters.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_engine_create_with(options: *const KisingEngineOptions, out: *mut u64) -> i32 {
    ffi_guard!({
        if options.is_null() || out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        // SAFETY: options is non-null and points to a valid struct.
        let options = unsafe { &*options };
        let config = match EngineConfig::try_from(options) {
            Ok(c) => c,
            Err(status) => return status as i32,
        };
        let engine = match Engine::with_config(config) {
            Ok(e) => e,
            Err(e) => return KisingStatus::from(&e) as i32,
        };
        let handle = ffi_lock!(ENGINES).insert(Arc::new(Mutex::new(engine)));
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = handle };
        KisingStatus::Ok as i32
    })
}

/// Write the default engine options to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_engine_options_default(out: *mut KisingEngineOptions) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = KisingEngineOptions::default() };
        KisingStatus::Ok as i32
    })
}

/// Destroy an engine handle, releasing everything it owns.
///
/// Destroying an already destroyed handle returns
/// `KISING_STATUS_INVALID_HANDLE`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_engine_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ENGINES).remove(handle) {
            Some(_) => KisingStatus::Ok as i32,
            None => KisingStatus::InvalidHandle as i32,
        }
    })
}

/// Reseed the engine's random source.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_set_rand_seed(handle: u64, seed: u64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        status_of(engine.set_rand_seed(seed))
    })
}

/// Allocate a `dim0 x dim1` all-down lattice.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_init_system(handle: u64, dim0: i32, dim1: i32) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        match (usize::try_from(dim0), usize::try_from(dim1)) {
            (Ok(d0), Ok(d1)) => status_of(engine.init_system(d0, d1)),
            _ => KisingStatus::InitializationError as i32,
        }
    })
}

/// Replace the dynamics parameters.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_set_param(handle: u64, beta_j: f64, beta_mu_b: f64, freq: f64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        status_of(engine.set_param(beta_j, beta_mu_b, freq))
    })
}

/// Overwrite the lattice from `dim0 * dim1` row-major 0/1 cells.
///
/// The declared shape must equal the lattice shape; no cell is read
/// otherwise.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_set_spin(handle: u64, buf: *const i32, dim0: i32, dim1: i32) -> i32 {
    ffi_guard!({
        if buf.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        let (d0, d1, len) = match checked_shape(&engine, dim0, dim1) {
            Ok(s) => s,
            Err(status) => return status as i32,
        };
        // SAFETY: buf is non-null and holds dim0 * dim1 cells per caller contract.
        let cells = unsafe { std::slice::from_raw_parts(buf, len) };
        status_of(engine.set_spin_cells(d0, d1, cells))
    })
}

/// Assign every site an independent fair spin.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_set_random_spin(handle: u64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        status_of(engine.set_random_spins())
    })
}

/// Write the lattice as `dim0 * dim1` row-major 0/1 cells into `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_get_spin(handle: u64, out: *mut i32, dim0: i32, dim1: i32) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let engine = ffi_lock!(arc);
        let (d0, d1, len) = match checked_shape(&engine, dim0, dim1) {
            Ok(s) => s,
            Err(status) => return status as i32,
        };
        // SAFETY: out is non-null and holds dim0 * dim1 cells per caller contract.
        let cells = unsafe { std::slice::from_raw_parts_mut(out, len) };
        status_of(engine.write_spins_i32(d0, d1, cells))
    })
}

/// Advance one frame from `t` by `dt` and write the reached time to `t_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_next_frame(handle: u64, t: f64, dt: f64, t_out: *mut f64) -> i32 {
    ffi_guard!({
        if t_out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        match engine.next_frame(t, dt) {
            Ok(reached) => {
                // SAFETY: t_out is non-null and valid per caller contract.
                unsafe { *t_out = reached };
                KisingStatus::Ok as i32
            }
            Err(e) => KisingStatus::from(&e) as i32,
        }
    })
}

/// Release the lattice. The handle stays valid and can be re-initialized.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_free_system(handle: u64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        status_of(engine.free_system())
    })
}

/// Write the mean spin in `[-1, 1]` to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_magnetization_get(handle: u64, out: *mut f64) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let engine = ffi_lock!(arc);
        match engine.magnetization() {
            Ok(m) => {
                // SAFETY: out is non-null and valid per caller contract.
                unsafe { *out = m };
                KisingStatus::Ok as i32
            }
            Err(e) => KisingStatus::from(&e) as i32,
        }
    })
}

/// Write the report of the most recent frame to `out`.
///
/// Returns `KISING_STATUS_NOT_AVAILABLE` if no frame has run since the
/// last `kising_init_system`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_last_step_get(handle: u64, out: *mut KisingStepReport) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let engine = ffi_lock!(arc);
        let Some(report) = engine.last_step() else {
            return KisingStatus::NotAvailable as i32;
        };
        let c_report = KisingStepReport::from_rust(report, engine.dynamics());
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = c_report };
        KisingStatus::Ok as i32
    })
}

/// Write the lifecycle phase (a `KisingPhase` value) to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn kising_phase_get(handle: u64, out: *mut i32) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return KisingStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return KisingStatus::InvalidHandle as i32;
        };
        let engine = ffi_lock!(arc);
        let phase = KisingPhase::from(engine.phase()) as i32;
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = phase };
        KisingStatus::Ok as i32
    })
}
