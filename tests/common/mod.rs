#[macro_use]
pub mod macros;

use cubolife_lib::model::automaton::AutomatonEngine;
use cubolife_lib::model::cell::Point3;
use cubolife_lib::model::config::{Rules, SimConfig};
use cubolife_lib::model::lattice::{Lattice, NeighborGraphBuilder};
use cubolife_lib::model::SimulationController;

/// `count` points on the x axis, `spacing` apart.
#[allow(dead_code)]
pub fn line_points(count: usize, spacing: f64) -> Vec<Point3> {
    (0..count)
        .map(|i| Point3::new(i as f64 * spacing, 0.0, 0.0))
        .collect()
}

/// Engine over hand-placed points with the given cells alive.
#[allow(dead_code)]
pub fn engine_from_points(
    points: Vec<Point3>,
    threshold: f64,
    rules: Rules,
    alive: &[usize],
) -> AutomatonEngine {
    let builder = NeighborGraphBuilder::new(threshold).expect("valid threshold");
    let mut lattice = Lattice::from_points(points, builder).expect("finite points");
    for &index in alive {
        lattice.set_alive(index, true).expect("index in range");
    }
    AutomatonEngine::new(lattice, rules)
}

#[allow(dead_code)]
pub struct SimBuilder {
    config: SimConfig,
    alive: Vec<usize>,
}

#[allow(dead_code)]
impl SimBuilder {
    /// Deterministic seed and no random seeding, so tests place cells explicitly.
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.seed = Some(0);
        config.structure.start_seed = 0;
        Self {
            config,
            alive: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_alive(mut self, index: usize) -> Self {
        self.alive.push(index);
        self
    }

    pub fn build(self) -> SimulationController {
        let mut controller = SimulationController::new(self.config)
            .expect("Failed to create controller in test builder");
        for index in self.alive {
            controller
                .lattice_mut()
                .set_alive(index, true)
                .expect("index in range");
        }
        controller
    }
}
