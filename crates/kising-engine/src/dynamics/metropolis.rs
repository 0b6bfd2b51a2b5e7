//! Random-site Metropolis kernel.
//!
//! Each frame performs a fixed number of attempts drawn from an
//! [`AttemptBudget`]. An attempt picks a uniform site, computes the flip
//! energy `dE = 2 s (betaJ n + betaMuB)`, and flips unconditionally when
//! `dE <= 0`, otherwise with probability `exp(-dE)`. No uniform is drawn
//! for downhill moves, so the RNG stream depends on the configuration.

use kising_core::{Params, Spin};
use kising_lattice::Lattice;

use super::clock::AttemptBudget;
use super::{Advance, SpinDynamics, StepContext};
use crate::config::RoundingPolicy;

/// Number of (spin, neighbour sum) combinations: 2 spins x 5 even sums.
const CASES: usize = 10;

/// Table slot for a spin and its neighbour sum in `{-4, -2, 0, 2, 4}`.
#[inline]
fn case(s: Spin, neighbour_sum: i8) -> usize {
    usize::from(s.to_bit()) * 5 + ((neighbour_sum + 4) / 2) as usize
}

/// Metropolis single-spin-flip dynamics with a precomputed acceptance table.
#[derive(Clone, Debug)]
pub struct Metropolis {
    budget: AttemptBudget,
    /// `exp(-dE)` per case, or `None` when the move is downhill.
    acceptance: [Option<f64>; CASES],
}

impl Metropolis {
    /// Kernel name.
    pub const NAME: &'static str = "metropolis";

    /// A kernel using `rounding` for its attempt budget.
    ///
    /// The acceptance table starts as all-downhill (free spins) until the
    /// first [`rebuild`](SpinDynamics::rebuild).
    pub fn new(rounding: RoundingPolicy) -> Self {
        Self {
            budget: AttemptBudget::new(rounding),
            acceptance: [None; CASES],
        }
    }

    /// The attempt budget, including its carried residual.
    pub fn budget(&self) -> &AttemptBudget {
        &self.budget
    }

    fn fill_table(&mut self, params: &Params) {
        for s in [Spin::Down, Spin::Up] {
            for n in [-4i8, -2, 0, 2, 4] {
                let de = params.flip_energy(s.value(), n);
                self.acceptance[case(s, n)] = if de <= 0.0 { None } else { Some((-de).exp()) };
            }
        }
    }
}

impl SpinDynamics for Metropolis {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rebuild(&mut self, _lattice: &Lattice, params: &Params) {
        self.fill_table(params);
    }

    fn site_changed(&mut self, _lattice: &Lattice, _params: &Params, _idx: usize) {}

    fn reset(&mut self) {
        self.budget.reset();
    }

    fn advance(&mut self, ctx: StepContext<'_>, t: f64, dt: f64) -> Advance {
        let StepContext {
            lattice,
            rng,
            params,
        } = ctx;
        let rate = params.lattice_rate(lattice.cell_count());
        let (attempts, t_end) = self.budget.plan(rate, t, dt);
        let (dim0, dim1) = lattice.shape();

        let mut accepted = 0u64;
        for _ in 0..attempts {
            let (row, col) = rng.site(dim0, dim1);
            let idx = row * dim1 + col;
            let s = lattice.spin_at(idx);
            let n = lattice.neighbour_sum_at(idx);
            let accept = match self.acceptance[case(s, n)] {
                None => true,
                Some(p) => rng.uniform() < p,
            };
            if accept {
                lattice.flip_at(idx);
                accepted += 1;
            }
        }

        Advance {
            attempted: attempts,
            accepted,
            t_end,
        }
    }
}
