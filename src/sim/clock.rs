//! Simulation clock
//!
//! Two independent periodic loops: ticks and days. The clock only computes
//! effective intervals; the driver owns the actual timers. Pause is derived
//! from engine state (an open prompt or a held table selection), and resumed
//! timers restart from zero elapsed time - ticks skipped while paused are
//! lost by design, never replayed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    tick_interval_ms: u64,
    day_interval_ms: u64,
    /// The fast-forward divisor applied when fast mode is on
    multiplier: u32,
    fast: bool,
}

impl SimClock {
    pub fn new(tick_interval_ms: u64, day_interval_ms: u64, multiplier: u32) -> Self {
        Self {
            tick_interval_ms,
            day_interval_ms,
            multiplier: multiplier.max(1),
            fast: false,
        }
    }

    pub fn speed(&self) -> u32 {
        if self.fast {
            self.multiplier
        } else {
            1
        }
    }

    /// Toggle between normal and fast-forward speed
    pub fn toggle_speed(&mut self) {
        self.fast = !self.fast;
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms / self.speed() as u64)
    }

    pub fn day_interval(&self) -> Duration {
        Duration::from_millis(self.day_interval_ms / self.speed() as u64)
    }
}
