//! Attempt budgeting for fixed-budget kernels.
//!
//! A frame of length `dt` on a lattice with total attempt rate
//! `rate = freq * cells` is worth `rate * dt` attempts, which is rarely an
//! integer. [`AttemptBudget`] rounds it according to a [`RoundingPolicy`]
//! and converts the whole number back into elapsed model time.

use crate::config::RoundingPolicy;

/// Rounds per-frame attempt counts, optionally carrying the residual.
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptBudget {
    policy: RoundingPolicy,
    /// Requested minus performed attempts, in `[-0.5, 0.5]`.
    residual: f64,
    /// Clock value returned by the previous frame.
    last_end: Option<f64>,
}

impl AttemptBudget {
    /// A budget with no carried residual.
    pub fn new(policy: RoundingPolicy) -> Self {
        Self {
            policy,
            residual: 0.0,
            last_end: None,
        }
    }

    /// The rounding policy in force.
    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Fractional attempts carried into the next frame.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Drop the carried residual.
    pub fn reset(&mut self) {
        self.residual = 0.0;
        self.last_end = None;
    }

    /// Number of attempts for a frame `[t, t + dt)` at total rate `rate`,
    /// and the clock value those attempts reach.
    ///
    /// Non-positive `rate` or `dt` yields `(0, t)` and leaves the residual
    /// alone. Under [`RoundingPolicy::Accumulated`] the residual is dropped
    /// first when `t` is not the clock the previous frame returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use kising_engine::dynamics::clock::AttemptBudget;
    /// use kising_engine::RoundingPolicy;
    ///
    /// let mut budget = AttemptBudget::new(RoundingPolicy::Accumulated);
    /// assert_eq!(budget.plan(16.0, 0.0, 1.0), (16, 1.0));
    /// assert_eq!(budget.plan(16.0, 1.0, 0.0), (0, 1.0));
    /// ```
    pub fn plan(&mut self, rate: f64, t: f64, dt: f64) -> (u64, f64) {
        if !(rate > 0.0 && dt > 0.0) {
            return (0, t);
        }
        let wanted = rate * dt;
        let n = match self.policy {
            RoundingPolicy::PerCall => round_attempts(wanted),
            RoundingPolicy::Accumulated => {
                if self.last_end != Some(t) {
                    self.residual = 0.0;
                }
                let n = round_attempts(wanted + self.residual);
                self.residual += wanted - n as f64;
                n
            }
        };
        let t_end = if n == 0 { t } else { t + n as f64 / rate };
        self.last_end = Some(t_end);
        (n, t_end)
    }
}

/// `round(x)` clamped to `0..=u64::MAX`.
fn round_attempts(x: f64) -> u64 {
    let r = x.round();
    if r > 0.0 {
        // Saturating float-to-int cast.
        r as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_by_four_unit_frame_is_sixteen_attempts() {
        for policy in [RoundingPolicy::PerCall, RoundingPolicy::Accumulated] {
            let mut b = AttemptBudget::new(policy);
            let (n, t) = b.plan(16.0, 0.0, 1.0);
            assert_eq!(n, 16);
            assert_eq!(t, 1.0);
        }
    }

    #[test]
    fn non_positive_inputs_do_not_advance() {
        let mut b = AttemptBudget::new(RoundingPolicy::Accumulated);
        assert_eq!(b.plan(16.0, 3.0, 0.0), (0, 3.0));
        assert_eq!(b.plan(16.0, 3.0, -1.0), (0, 3.0));
        assert_eq!(b.plan(0.0, 3.0, 1.0), (0, 3.0));
        assert_eq!(b.plan(-16.0, 3.0, 1.0), (0, 3.0));
    }

    #[test]
    fn per_call_rounds_every_frame_the_same_way() {
        // 16 * 0.1 = 1.6 rounds to 2 on every frame.
        let mut b = AttemptBudget::new(RoundingPolicy::PerCall);
        let mut t = 0.0;
        for _ in 0..10 {
            let (n, next) = b.plan(16.0, t, 0.1);
            assert_eq!(n, 2);
            t = next;
        }
        assert!((t - 20.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn accumulated_keeps_the_clock_near_the_schedule() {
        let rate = 16.0;
        let dt = 0.1;
        let mut b = AttemptBudget::new(RoundingPolicy::Accumulated);
        let mut t = 0.0;
        let mut total = 0u64;
        for k in 1..=1000 {
            let (n, next) = b.plan(rate, t, dt);
            total += n;
            t = next;
            let drift = (t - k as f64 * dt).abs();
            assert!(drift <= 0.5 / rate + 1e-9, "frame {k}: drift {drift}");
        }
        assert_eq!(total, 1600);
        assert!(b.residual().abs() <= 0.5 + 1e-9);
    }

    #[test]
    fn accumulated_first_frame_matches_per_call() {
        let mut a = AttemptBudget::new(RoundingPolicy::Accumulated);
        let mut p = AttemptBudget::new(RoundingPolicy::PerCall);
        assert_eq!(a.plan(12.0, 5.0, 0.37), p.plan(12.0, 5.0, 0.37));
    }

    #[test]
    fn residual_is_dropped_when_the_caller_restarts_its_clock() {
        let mut b = AttemptBudget::new(RoundingPolicy::Accumulated);
        let (n0, t0) = b.plan(16.0, 0.0, 0.1);
        assert_eq!(n0, 2);
        assert!(b.residual() < 0.0);
        // Feeding back t0 carries the residual: 1.6 - 0.4 = 1.2 -> 1.
        let (n1, _) = b.plan(16.0, t0, 0.1);
        assert_eq!(n1, 1);
        // A fresh clock starts over: 1.6 -> 2.
        let (n2, _) = b.plan(16.0, 0.0, 0.1);
        assert_eq!(n2, 2);
    }

    #[test]
    fn reset_clears_residual() {
        let mut b = AttemptBudget::new(RoundingPolicy::Accumulated);
        b.plan(16.0, 0.0, 0.1);
        b.reset();
        assert_eq!(b.residual(), 0.0);
    }

    #[test]
    fn huge_budgets_saturate() {
        assert_eq!(round_attempts(1e30), u64::MAX);
        assert_eq!(round_attempts(-3.0), 0);
        assert_eq!(round_attempts(0.49), 0);
        assert_eq!(round_attempts(0.5), 1);
    }
}
