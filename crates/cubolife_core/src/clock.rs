//! Simulation time and tick cadence.

use serde::{Deserialize, Serialize};

/// Accumulates caller-supplied time deltas and decides when a tick is due.
///
/// A tick fires when the rounded total elapsed time exceeds the last tick
/// marker by more than `interval`; the marker then jumps to that rounded
/// time. The check is edge-triggered: at most one tick per `advance`, with no
/// catch-up for large deltas and no drift correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    elapsed: f64,
    last_tick: f64,
    interval: f64,
}

impl SimulationClock {
    /// A negative or NaN `interval` is stored as zero.
    #[must_use]
    pub fn new(interval: f64) -> Self {
        Self {
            elapsed: 0.0,
            last_tick: 0.0,
            interval: sanitize_interval(interval),
        }
    }

    /// Adds `dt` to the elapsed time; returns `true` when a tick is due.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        let rounded = self.elapsed.round();
        if rounded - self.last_tick > self.interval {
            self.last_tick = rounded;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.last_tick = 0.0;
    }

    /// A negative or NaN `interval` is stored as zero.
    pub fn set_interval(&mut self, interval: f64) {
        self.interval = sanitize_interval(interval);
    }

    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn last_tick(&self) -> f64 {
        self.last_tick
    }

    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

fn sanitize_interval(interval: f64) -> f64 {
    if interval.is_nan() {
        0.0
    } else {
        interval.max(0.0)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
