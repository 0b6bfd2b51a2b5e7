//! Rejection-free Glauber kinetics (n-fold way).
//!
//! Every site belongs to one of ten event classes keyed by its own spin
//! and its number of up neighbours. All members of a class share the
//! same Glauber flip rate `freq / (1 + exp(dE))`, so an event is drawn by
//! picking a class with probability proportional to `rate * members` and
//! then a member uniformly. After a flip only the flipped site and its
//! four neighbours can change class; each move is an O(1) swap-remove
//! plus push, tracked through a per-site slot table.
//!
//! Time advances by an exponential waiting time `-ln(u) / R` with `R` the
//! total rate, so a frame ends on the first event at or past `t + dt`.

use kising_core::{Params, Spin};
use kising_lattice::Lattice;

use super::{Advance, SpinDynamics, StepContext};

/// 2 spin states x 0..=4 up neighbours.
const CLASSES: usize = 10;

#[inline]
fn class_of_site(lattice: &Lattice, idx: usize) -> u8 {
    lattice.spin_at(idx).to_bit() * 5 + lattice.up_neighbours_at(idx)
}

/// Flip rate for every member of class `c`.
fn class_rate(params: &Params, c: usize) -> f64 {
    let s = if c >= 5 { Spin::Up } else { Spin::Down };
    let n = 2 * (c % 5) as i8 - 4;
    let de = params.flip_energy(s.value(), n);
    params.freq / (1.0 + de.exp())
}

/// n-fold-way event tables for Glauber dynamics.
#[derive(Clone, Debug, Default)]
pub struct GlauberKmc {
    rates: [f64; CLASSES],
    members: [Vec<u32>; CLASSES],
    class: Vec<u8>,
    slot: Vec<u32>,
}

impl GlauberKmc {
    /// Kernel name.
    pub const NAME: &'static str = "glauber";

    /// Empty tables; call [`rebuild`](SpinDynamics::rebuild) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-class flip rates.
    pub fn rates(&self) -> &[f64; CLASSES] {
        &self.rates
    }

    /// Number of sites in each class.
    pub fn class_sizes(&self) -> [usize; CLASSES] {
        std::array::from_fn(|c| self.members[c].len())
    }

    /// Total event rate `sum(rate_c * |class_c|)`.
    pub fn total_rate(&self) -> f64 {
        self.rates
            .iter()
            .zip(&self.members)
            .map(|(r, m)| r * m.len() as f64)
            .sum()
    }

    fn remove(&mut self, idx: usize) {
        let c = usize::from(self.class[idx]);
        let pos = self.slot[idx] as usize;
        let list = &mut self.members[c];
        list.swap_remove(pos);
        if let Some(&moved) = list.get(pos) {
            self.slot[moved as usize] = pos as u32;
        }
    }

    fn insert(&mut self, idx: usize, c: u8) {
        let list = &mut self.members[usize::from(c)];
        self.slot[idx] = list.len() as u32;
        list.push(idx as u32);
        self.class[idx] = c;
    }

    /// Re-file `idx` under the class its current neighbourhood implies.
    fn refile(&mut self, lattice: &Lattice, idx: usize) {
        let c = class_of_site(lattice, idx);
        if c != self.class[idx] {
            self.remove(idx);
            self.insert(idx, c);
        }
    }

    fn refile_around(&mut self, lattice: &Lattice, idx: usize) {
        self.refile(lattice, idx);
        for n in lattice.neighbour_indices_at(idx) {
            self.refile(lattice, n);
        }
    }

    /// Draw a class with probability proportional to its share of `total`.
    fn pick_class(&self, u: f64, total: f64) -> usize {
        let target = u * total;
        let mut acc = 0.0;
        let mut last = 0;
        for c in 0..CLASSES {
            let w = self.rates[c] * self.members[c].len() as f64;
            if w <= 0.0 {
                continue;
            }
            acc += w;
            last = c;
            if target < acc {
                return c;
            }
        }
        // Rounding left target at or past the final partial sum.
        last
    }

    /// Whether the tables exactly describe `lattice`.
    pub fn is_consistent_with(&self, lattice: &Lattice) -> bool {
        if self.class.len() != lattice.cell_count() {
            return false;
        }
        let filed: usize = self.members.iter().map(Vec::len).sum();
        if filed != lattice.cell_count() {
            return false;
        }
        self.members.iter().enumerate().all(|(c, list)| {
            list.iter().enumerate().all(|(pos, &idx)| {
                let idx = idx as usize;
                usize::from(self.class[idx]) == c
                    && self.slot[idx] as usize == pos
                    && class_of_site(lattice, idx) as usize == c
            })
        })
    }
}

impl SpinDynamics for GlauberKmc {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rebuild(&mut self, lattice: &Lattice, params: &Params) {
        for c in 0..CLASSES {
            self.rates[c] = class_rate(params, c);
            self.members[c].clear();
        }
        let cells = lattice.cell_count();
        self.class.clear();
        self.class.resize(cells, 0);
        self.slot.clear();
        self.slot.resize(cells, 0);
        for idx in 0..cells {
            let c = class_of_site(lattice, idx);
            self.insert(idx, c);
        }
    }

    fn site_changed(&mut self, lattice: &Lattice, _params: &Params, idx: usize) {
        self.refile_around(lattice, idx);
    }

    fn advance(&mut self, ctx: StepContext<'_>, t: f64, dt: f64) -> Advance {
        let StepContext {
            lattice,
            rng,
            params,
        } = ctx;
        if !(dt > 0.0 && params.freq > 0.0) {
            return Advance::idle(t);
        }
        // Frame-relative clock: waiting times stay representable however
        // large the caller's absolute `t` grows.
        let mut elapsed = 0.0;
        let mut events = 0u64;

        while elapsed < dt {
            let total = self.total_rate();
            if !(total > 0.0) {
                // Frozen: no class can fire, time simply passes.
                elapsed = dt;
                break;
            }
            let c = self.pick_class(rng.uniform(), total);
            let list = &self.members[c];
            let idx = list[rng.index(list.len())] as usize;
            lattice.flip_at(idx);
            self.refile_around(lattice, idx);
            events += 1;
            elapsed += -rng.open_unit().ln() / total;
        }

        Advance {
            attempted: events,
            accepted: events,
            t_end: (t + elapsed).max(t + dt),
        }
    }
}
