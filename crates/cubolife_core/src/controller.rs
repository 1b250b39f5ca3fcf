//! Orchestration: lattice, automaton, clock and seeding behind the three
//! external commands `update`, `restart` and `seed`.

use crate::automaton::{AutomatonEngine, SeedReport, TickReport};
use crate::clock::SimulationClock;
use crate::config::{ClockConfig, Rules, SimConfig, StructureConfig};
use crate::error::{ensure_non_negative, Result};
use crate::lattice::{Lattice, NeighborGraphBuilder};
use crate::metrics::Metrics;
use cubolife_data::LatticeSnapshot;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Owns one simulation instance.
///
/// Structure, rules and clock settings are live: they are read at the start
/// of every `update` and `restart`, so a presentation layer may edit them
/// through the `*_mut` accessors between calls.
pub struct SimulationController<R: Rng = ChaCha8Rng> {
    engine: AutomatonEngine,
    structure: StructureConfig,
    clock_config: ClockConfig,
    clock: SimulationClock,
    seed: Option<u64>,
    rng: R,
    metrics: Metrics,
}

impl SimulationController<ChaCha8Rng> {
    /// Builds and seeds a controller. The RNG is seeded from `config.seed`
    /// when present, from entropy otherwise.
    pub fn new(config: SimConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SimulationController<R> {
    /// Builds and seeds a controller around an explicit randomness source.
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let SimConfig {
            seed,
            structure,
            rules,
            clock,
        } = config;

        let builder = NeighborGraphBuilder::new(structure.effective_threshold())?;
        let lattice = Lattice::with_threshold(structure.shells, structure.spacing, builder)?;
        let mut controller = Self {
            engine: AutomatonEngine::new(lattice, rules),
            clock: SimulationClock::new(clock.tick_interval),
            clock_config: clock,
            structure,
            seed,
            rng,
            metrics: Metrics::new(),
        };
        let report = controller.seed(controller.structure.start_seed);
        tracing::info!(
            cells = controller.engine.lattice().len(),
            seeded = report.distinct,
            "Simulation started"
        );
        Ok(controller)
    }

    /// Feeds `dt` of elapsed time: ticks when the cadence says so, then
    /// advances every fade by one step.
    ///
    /// Live edits to rules and clock settings are validated here, before
    /// anything advances.
    ///
    /// # Errors
    /// `InvalidParameter` for a negative or non-finite `dt`, or for rules or
    /// a tick interval edited out of range since the last call. Nothing
    /// changes when an error is returned.
    pub fn update(&mut self, dt: f64) -> Result<Option<TickReport>> {
        ensure_non_negative("dt", dt)?;
        self.engine.rules().validate()?;
        self.clock_config.validate()?;
        self.clock.set_interval(self.clock_config.tick_interval);

        let report = if self.clock.advance(dt) {
            let started = Instant::now();
            let report = self.engine.step();
            self.metrics.record_tick(&report, started.elapsed());
            Some(report)
        } else {
            None
        };
        self.engine.advance_fade();
        Ok(report)
    }

    /// Regenerates the lattice from the current structure settings, clears
    /// all state, resets the clock and reseeds with `start_seed` draws.
    ///
    /// Positions are recomputed in place. The neighbor graph is kept unless
    /// the configured threshold differs from the rescaled one in force, in
    /// which case it is rebuilt over the new positions.
    ///
    /// # Errors
    /// `UnsupportedResize` when the configured shell count no longer matches
    /// the lattice (use [`Self::resize`]); `InvalidParameter` for bad settings.
    /// The lattice is untouched on error.
    pub fn restart(&mut self) -> Result<SeedReport> {
        self.structure.validate()?;
        let StructureConfig {
            shells, spacing, ..
        } = self.structure;
        let builder = NeighborGraphBuilder::with_tolerance(
            self.structure.effective_threshold(),
            self.lattice().neighbor_policy().tolerance(),
        )?;

        let lattice = self.engine.lattice_mut();
        lattice.regenerate(shells, spacing)?;
        if !lattice.neighbor_policy().matches_threshold(builder.threshold()) {
            lattice.set_neighbor_policy(builder);
        }
        Ok(self.reset_and_seed())
    }

    /// Like [`Self::restart`] but rebuilds the lattice from scratch, so the
    /// shell count may change. Cell indices are reassigned.
    pub fn resize(&mut self, shells: u32, spacing: f64) -> Result<SeedReport> {
        let mut structure = self.structure.clone();
        structure.shells = shells;
        structure.spacing = spacing;
        structure.validate()?;

        let builder = NeighborGraphBuilder::new(structure.effective_threshold())?;
        self.engine
            .lattice_mut()
            .rebuild(shells, spacing, builder)?;
        self.structure = structure;
        Ok(self.reset_and_seed())
    }

    fn reset_and_seed(&mut self) -> SeedReport {
        self.engine.clear();
        self.clock.reset();
        self.clock.set_interval(self.clock_config.tick_interval);
        let report = self.seed(self.structure.start_seed);
        self.metrics.record_restart(self.engine.lattice().alive_count());
        tracing::info!(
            shells = self.structure.shells,
            spacing = self.structure.spacing,
            cells = self.engine.lattice().len(),
            seeded = report.distinct,
            "Simulation restarted"
        );
        report
    }

    /// Marks `count` randomly drawn cells alive (draws may repeat).
    pub fn seed(&mut self, count: usize) -> SeedReport {
        self.engine.seed(count, &mut self.rng)
    }

    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        self.engine.lattice()
    }

    /// Direct cell access, e.g. for hand-placed patterns.
    pub fn lattice_mut(&mut self) -> &mut Lattice {
        self.engine.lattice_mut()
    }

    #[must_use]
    pub fn engine(&self) -> &AutomatonEngine {
        &self.engine
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn snapshot(&self) -> LatticeSnapshot {
        self.engine.lattice().snapshot()
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        self.engine.rules()
    }

    pub fn rules_mut(&mut self) -> &mut Rules {
        self.engine.rules_mut()
    }

    #[must_use]
    pub fn structure(&self) -> &StructureConfig {
        &self.structure
    }

    /// Takes effect on the next `restart`/`resize`.
    pub fn structure_mut(&mut self) -> &mut StructureConfig {
        &mut self.structure
    }

    pub fn clock_config_mut(&mut self) -> &mut ClockConfig {
        &mut self.clock_config
    }

    /// Settings in force, assembled into a config value.
    ///
    /// Geometry comes from the lattice, so structure edits that have not
    /// been applied by `restart`/`resize` yet are not reported.
    #[must_use]
    pub fn config(&self) -> SimConfig {
        let lattice = self.engine.lattice();
        let policy = lattice.neighbor_policy();
        let neighbor_threshold =
            (!policy.matches_threshold(lattice.spacing())).then(|| policy.threshold());
        SimConfig {
            seed: self.seed,
            structure: StructureConfig {
                shells: lattice.shells(),
                spacing: lattice.spacing(),
                neighbor_threshold,
                ..self.structure.clone()
            },
            rules: *self.engine.rules(),
            clock: self.clock_config,
        }
    }
}
