//! Integration test: lifecycle phase rules.
//!
//! Every operation other than seeding and `init_system` must fail with a
//! state error before initialization and after `free_system`; double
//! initialization must fail with an initialization error; a fresh
//! `init_system` after `free_system` must bring the engine back.

use kising_core::Spin;
use kising_engine::{Engine, EngineError, InitError, Phase};
use kising_lattice::SpinBuffer;

fn assert_state_error<T: std::fmt::Debug>(result: Result<T, EngineError>, phase: Phase) {
    match result {
        Err(EngineError::State { phase: p, .. }) => assert_eq!(p, phase),
        other => panic!("expected state error in {phase}, got {other:?}"),
    }
}

/// Run every lattice-dependent operation and check each one is refused.
fn assert_everything_refused(e: &mut Engine, phase: Phase) {
    assert_state_error(e.next_frame(0.0, 1.0), phase);
    assert_state_error(e.set_param(0.0, 0.0, 1.0), phase);
    assert_state_error(e.params(), phase);
    assert_state_error(e.set_spins(&SpinBuffer::new(2, 2).unwrap()), phase);
    assert_state_error(e.set_spin_cells(2, 2, &[0i32; 4]), phase);
    assert_state_error(e.set_random_spins(), phase);
    assert_state_error(e.spins(), phase);
    assert_state_error(e.copy_spins_into(&mut SpinBuffer::new(2, 2).unwrap()), phase);
    assert_state_error(e.write_spins_i32(2, 2, &mut [0; 4]), phase);
    assert_state_error(e.spin(0, 0), phase);
    assert_state_error(e.set_spin(0, 0, Spin::Up), phase);
    assert_state_error(e.magnetization(), phase);
    assert_state_error(e.energy(), phase);
    assert_state_error(e.lattice(), phase);
    assert_state_error(e.free_system(), phase);
    assert_eq!(e.dims(), None);
}

#[test]
fn operations_before_init_are_state_errors() {
    let mut e = Engine::new();
    assert_everything_refused(&mut e, Phase::Uninitialized);
    assert_eq!(e.phase(), Phase::Uninitialized);
}

#[test]
fn next_frame_before_init_is_a_state_error_even_with_bad_arguments() {
    let mut e = Engine::new();
    assert_state_error(e.next_frame(f64::NAN, f64::NAN), Phase::Uninitialized);
    assert_state_error(e.set_param(f64::NAN, 0.0, 1.0), Phase::Uninitialized);
}

#[test]
fn operations_after_free_are_state_errors() {
    let mut e = Engine::new();
    e.init_system(2, 2).unwrap();
    e.next_frame(0.0, 1.0).unwrap();
    e.free_system().unwrap();
    assert_eq!(e.phase(), Phase::Freed);
    assert_everything_refused(&mut e, Phase::Freed);
    assert!(e.last_step().is_none());
}

#[test]
fn double_init_is_an_initialization_error() {
    let mut e = Engine::new();
    e.init_system(4, 4).unwrap();
    assert_eq!(
        e.init_system(4, 4),
        Err(EngineError::Initialization(InitError::AlreadyInitialized))
    );
    e.next_frame(0.0, 1.0).unwrap();
    assert_eq!(
        e.init_system(8, 8),
        Err(EngineError::Initialization(InitError::AlreadyInitialized))
    );
    assert_eq!(e.dims(), Some((4, 4)));
    assert_eq!(e.phase(), Phase::Stepping);
}

#[test]
fn seeding_is_allowed_until_freed() {
    let mut e = Engine::new();
    e.set_rand_seed(1).unwrap();
    e.init_system(2, 2).unwrap();
    e.set_rand_seed(2).unwrap();
    e.next_frame(0.0, 1.0).unwrap();
    e.set_rand_seed(3).unwrap();
    assert_eq!(e.seed(), 3);
    e.free_system().unwrap();
    assert_state_error(e.set_rand_seed(4), Phase::Freed);
    assert_eq!(e.seed(), 3);
}

#[test]
fn fresh_init_after_free_is_usable() {
    let mut e = Engine::new();
    e.init_system(2, 2).unwrap();
    e.set_random_spins().unwrap();
    e.free_system().unwrap();

    e.init_system(5, 3).unwrap();
    assert_eq!(e.phase(), Phase::Initialized);
    assert_eq!(e.spins().unwrap(), SpinBuffer::new(5, 3).unwrap());
    assert_eq!(e.next_frame(0.0, 1.0).unwrap(), 1.0);
    assert_eq!(e.phase(), Phase::Stepping);
}

#[test]
fn state_errors_name_the_refused_operation() {
    let mut e = Engine::new();
    let err = e.next_frame(0.0, 1.0).unwrap_err();
    assert_eq!(
        err,
        EngineError::State {
            operation: "next_frame",
            phase: Phase::Uninitialized
        }
    );
    assert!(err.to_string().contains("next_frame"));
}
