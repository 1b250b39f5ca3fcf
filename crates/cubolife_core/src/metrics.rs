//! Tick statistics and structured logging for the simulation.

use crate::automaton::TickReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// How often (in ticks) a summary line is logged at info level.
const SUMMARY_INTERVAL: u64 = 100;

/// Running counters for a simulation instance.
///
/// Counters are atomics so a presentation thread can read them through a
/// shared reference while the simulation thread keeps recording.
pub struct Metrics {
    tick_count: AtomicU64,
    alive_count: AtomicU64,
    total_births: AtomicU64,
    total_deaths: AtomicU64,
    restarts: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            alive_count: AtomicU64::new(0),
            total_births: AtomicU64::new(0),
            total_deaths: AtomicU64::new(0),
            restarts: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, report: &TickReport, duration: Duration) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.alive_count.store(report.alive as u64, Ordering::Relaxed);
        self.total_births.fetch_add(report.births as u64, Ordering::Relaxed);
        self.total_deaths.fetch_add(report.deaths as u64, Ordering::Relaxed);

        if tick % SUMMARY_INTERVAL == 0 {
            tracing::info!(
                tick = tick,
                alive = report.alive,
                total_births = self.total_births(),
                total_deaths = self.total_deaths(),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_restart(&self, alive: usize) {
        self.restarts.fetch_add(1, Ordering::Relaxed);
        self.alive_count.store(alive as u64, Ordering::Relaxed);
    }

    /// Gets the current tick count.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Alive cells after the most recent tick or restart.
    #[must_use]
    pub fn alive_count(&self) -> u64 {
        self.alive_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_births(&self) -> u64 {
        self.total_births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_deaths(&self) -> u64 {
        self.total_deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn restarts(&self) -> u64 {
        self.restarts.load(Ordering::Relaxed)
    }

    /// Gets elapsed wall-clock time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
