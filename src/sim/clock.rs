//! Jump-gated run clock
//!
//! Elapsed time starts counting at the first jump, not at scene load, and a
//! pause must not leak its own duration into the run time: pausing snapshots
//! the elapsed seconds, resuming back-dates the start so the count continues
//! exactly where it stood.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clock {
    /// Wall-clock ms of the (possibly back-dated) run start; `None` while the
    /// clock is stopped (before the first jump, or while paused)
    start_ms: Option<f64>,
    /// Elapsed run time in seconds
    elapsed: f32,
    /// Snapshot taken by `pause`, consumed by `resume`
    paused_at: Option<f32>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the clock at the first jump. Later calls are no-ops.
    pub fn start(&mut self, now_ms: f64) {
        if self.start_ms.is_none() && self.paused_at.is_none() {
            self.start_ms = Some(now_ms);
        }
    }

    /// Advance elapsed time. Does nothing while stopped.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(start) = self.start_ms {
            self.elapsed = (((now_ms - start) / 1000.0).max(0.0)) as f32;
        }
    }

    /// Freeze the clock, remembering where it stood. No-op if never started.
    pub fn pause(&mut self) {
        if self.start_ms.take().is_some() {
            self.paused_at = Some(self.elapsed);
        }
    }

    /// Continue from the pause snapshot. No-op if not paused.
    pub fn resume(&mut self, now_ms: f64) {
        if let Some(at) = self.paused_at.take() {
            self.start_ms = Some(now_ms - f64::from(at) * 1000.0);
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    pub fn running(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
