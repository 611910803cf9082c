//! Fixed-step clock and the periodic gameplay timers.

use std::time::Duration;

/// Periodic trigger advanced by the simulation tick rather than by wall
/// time, so its callbacks are serialized with the tick.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTimer {
    period_ms: f32,
    elapsed_ms: f32,
    running: bool,
}

impl IntervalTimer {
    pub fn new(period_ms: f32) -> Self {
        Self { period_ms: period_ms.max(1.0), elapsed_ms: 0.0, running: false }
    }

    /// (Re)start from zero elapsed time.
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = true;
    }

    /// Safe to call on a stopped timer.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Takes effect from the next period; time already elapsed is kept.
    pub fn set_period(&mut self, period_ms: f32) {
        self.period_ms = period_ms.max(1.0);
    }

    /// Advance by `dt_ms`; returns `true` if the timer fired. Fires at most
    /// once per call.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            self.elapsed_ms = self.elapsed_ms.min(self.period_ms);
            true
        } else {
            false
        }
    }
}

/// Converts wall-clock frame time into a whole number of fixed steps.
#[derive(Clone, Debug)]
pub struct FrameClock {
    step: Duration,
    accumulated: Duration,
    max_steps: u32,
}

impl FrameClock {
    pub fn new(step: Duration, max_steps: u32) -> Self {
        Self { step, accumulated: Duration::ZERO, max_steps: max_steps.max(1) }
    }

    /// Steps to simulate for `elapsed` wall time. Backlog beyond
    /// `max_steps` is dropped rather than replayed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated >= self.step && steps < self.max_steps {
            self.accumulated -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulated = Duration::ZERO;
        }
        steps
    }
}
