//! kising quickstart: quench a random lattice below the critical coupling.
//!
//! Demonstrates:
//!   1. Building an engine from an `EngineConfig`
//!   2. Seeding, initializing and setting parameters
//!   3. Stepping frames and feeding the returned clock back in
//!   4. Reading spins, magnetization and step reports
//!   5. Freeing and re-initializing
//!
//! Run with:
//!   cargo run --example quickstart

use kising_engine::{Dynamics, Engine, EngineConfig, EngineError, RoundingPolicy};

// ─── Run parameters ─────────────────────────────────────────────

const SEED: u64 = 20220518202200;
const DIM0: usize = 64;
const DIM1: usize = 64;
const BETA_J: f64 = 0.5;
const BETA_MU_B: f64 = 0.0;
const FREQ: f64 = 1.0;
const TIME_PER_FRAME: f64 = 0.5;
const FRAMES: usize = 20;

fn run(dynamics: Dynamics) -> Result<(), EngineError> {
    let config = EngineConfig {
        dynamics,
        rounding: RoundingPolicy::Accumulated,
        ..EngineConfig::default()
    };
    let mut engine = match Engine::with_config(config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("bad config: {e}");
            return Ok(());
        }
    };

    engine.set_rand_seed(SEED)?;
    engine.init_system(DIM0, DIM1)?;
    engine.set_param(BETA_J, BETA_MU_B, FREQ)?;
    engine.set_random_spins()?;

    println!("--- {dynamics} ---");
    let mut t = 0.0;
    for frame in 0..FRAMES {
        t = engine.next_frame(t, TIME_PER_FRAME)?;
        let m = engine.magnetization()?;
        let report = engine.last_step().map(|r| (r.accepted, r.attempted)).unwrap_or((0, 0));
        println!(
            "frame {frame:3}  t = {t:8.3}  m = {m:+.4}  E = {:10.2}  flips {}/{}",
            engine.energy()?,
            report.0,
            report.1
        );
    }

    let spins = engine.spins()?;
    println!("final up cells: {} of {}", spins.up_count(), spins.len());
    println!("totals: {:?}", engine.totals());

    engine.free_system()?;
    engine.init_system(8, 8)?;
    println!("re-initialized: {:?}", engine);
    engine.free_system()?;
    Ok(())
}

fn main() {
    for dynamics in [Dynamics::Metropolis, Dynamics::Glauber] {
        if let Err(e) = run(dynamics) {
            eprintln!("{dynamics} run failed: {e}");
            std::process::exit(1);
        }
    }
}
