use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::config::SimConfig;
use crate::model::SimulationController;

/// Frame-loop settings of the headless driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Stop after this many automaton ticks.
    pub max_ticks: u64,
    /// Frames per simulated second; each frame feeds `1 / fps` to `update`.
    pub fps: u32,
    /// Stop early once every cell is dead and settled.
    pub stop_on_extinction: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_ticks: 20,
            fps: 30,
            stop_on_extinction: true,
        }
    }
}

/// What a headless run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    /// Simulated seconds fed to the controller.
    pub simulated_seconds: f64,
    pub cells: usize,
    pub alive: usize,
    pub total_births: u64,
    pub total_deaths: u64,
    pub extinct: bool,
}

pub struct App {
    pub running: bool,
    pub controller: SimulationController,
    pub options: RunOptions,
    pub frame_count: u64,
}

impl App {
    pub fn new(config: SimConfig, options: RunOptions) -> Result<Self> {
        anyhow::ensure!(options.fps > 0, "fps must be positive");
        let controller = SimulationController::new(config)?;
        Ok(Self {
            running: true,
            controller,
            options,
            frame_count: 0,
        })
    }

    #[must_use]
    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.options.fps)
    }

    /// No live cells and no fade in flight.
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.controller
            .lattice()
            .cells()
            .iter()
            .all(|c| !c.alive && c.time <= 0.0)
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let lattice = self.controller.lattice();
        let metrics = self.controller.metrics();
        RunSummary {
            ticks: metrics.tick_count(),
            frames: self.frame_count,
            simulated_seconds: self.controller.clock().elapsed(),
            cells: lattice.len(),
            alive: lattice.alive_count(),
            total_births: metrics.total_births(),
            total_deaths: metrics.total_deaths(),
            extinct: self.is_extinct(),
        }
    }
}
