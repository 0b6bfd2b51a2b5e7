//! Per-frame step reports.
//!
//! [`StepReport`] captures what a single `next_frame` did; [`StepTotals`]
//! accumulates across frames since the last `init_system`.

/// What one `next_frame` call did.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Kernel that ran the frame.
    pub kernel: &'static str,
    /// Flip attempts (events, for rejection-free kernels).
    pub attempted: u64,
    /// Flips applied.
    pub accepted: u64,
    /// Caller's clock on entry.
    pub t_start: f64,
    /// Clock returned to the caller.
    pub t_end: f64,
    /// Wall-clock time spent in the kernel, in microseconds.
    pub elapsed_us: u64,
}

impl StepReport {
    /// Fraction of attempts that flipped a spin, or 0 when nothing was
    /// attempted.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}

/// Cumulative counters since the last `init_system`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepTotals {
    /// Frames run.
    pub frames: u64,
    /// Flip attempts across all frames.
    pub attempted: u64,
    /// Applied flips across all frames.
    pub accepted: u64,
}

impl StepTotals {
    pub(crate) fn record(&mut self, report: &StepReport) {
        self.frames += 1;
        self.attempted = self.attempted.saturating_add(report.attempted);
        self.accepted = self.accepted.saturating_add(report.accepted);
    }
}
