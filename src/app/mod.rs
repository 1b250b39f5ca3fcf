pub mod state;

pub use state::{App, RunOptions, RunSummary};

use anyhow::Result;

impl App {
    /// Drives the controller with fixed `1 / fps` frames until the tick
    /// budget is spent or, if enabled, the lattice dies out.
    ///
    /// Frames are fed back to back without sleeping; simulated time is
    /// decoupled from wall-clock time.
    pub fn run(&mut self) -> Result<RunSummary> {
        let dt = self.frame_dt();

        while self.running {
            if let Some(report) = self.controller.update(dt)? {
                tracing::info!(
                    tick = report.tick,
                    births = report.births,
                    deaths = report.deaths,
                    alive = report.alive,
                    "Tick"
                );
            }
            self.frame_count += 1;

            if self.controller.metrics().tick_count() >= self.options.max_ticks {
                self.running = false;
            } else if self.options.stop_on_extinction && self.is_extinct() {
                tracing::info!(frame = self.frame_count, "Lattice went extinct");
                self.running = false;
            }
        }

        Ok(self.summary())
    }
}
