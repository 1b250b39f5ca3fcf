//! Birth/survival/death rules and the fade model.
//!
//! A tick is synchronous: every next state is computed from the pre-tick
//! snapshot into a scratch buffer, then written back in one pass. Cells born
//! during a tick never count towards another cell's neighbors in that tick.

use crate::config::Rules;
use crate::lattice::Lattice;
use cubolife_data::LIFETIME;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of one [`AutomatonEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based tick number since the last clear.
    pub tick: u64,
    pub births: usize,
    pub deaths: usize,
    /// Alive cells after the tick.
    pub alive: usize,
}

/// Outcome of one [`AutomatonEngine::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeedReport {
    /// Random draws made; always the requested count on a non-empty lattice.
    pub draws: usize,
    /// Distinct cells hit; draws are with replacement so `distinct <= draws`.
    pub distinct: usize,
}

/// Next alive flag of a cell with `alive_neighbors` alive neighbors.
///
/// Survival is the closed range `[underpopulated, overpopulated]`; birth
/// requires exactly `birth` alive neighbors.
#[inline]
#[must_use]
pub fn next_state(alive: bool, alive_neighbors: usize, rules: &Rules) -> bool {
    let count = alive_neighbors as u64;
    if alive {
        !(count < u64::from(rules.underpopulated) || count > u64::from(rules.overpopulated))
    } else {
        count == u64::from(rules.birth)
    }
}

/// Runs the automaton over a lattice it owns.
#[derive(Debug, Clone)]
pub struct AutomatonEngine {
    lattice: Lattice,
    rules: Rules,
    next_alive: Vec<bool>,
    tick: u64,
}

impl AutomatonEngine {
    #[must_use]
    pub fn new(lattice: Lattice, rules: Rules) -> Self {
        Self {
            next_alive: Vec::with_capacity(lattice.len()),
            lattice,
            rules,
            tick: 0,
        }
    }

    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn lattice_mut(&mut self) -> &mut Lattice {
        &mut self.lattice
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Live-editable rules; changes apply from the next `step`/`advance_fade`.
    pub fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Applies one synchronous tick.
    pub fn step(&mut self) -> TickReport {
        let Self {
            lattice,
            rules,
            next_alive,
            tick,
        } = self;
        let rules = *rules;

        next_alive.clear();
        next_alive.extend(
            lattice
                .cells()
                .iter()
                .map(|cell| next_state(cell.alive, lattice.count_alive(&cell.neighbors), &rules)),
        );

        let mut report = TickReport::default();
        for (cell, &next) in lattice.cells_mut().iter_mut().zip(next_alive.iter()) {
            if next != cell.alive {
                cell.begin_transition();
                if next {
                    report.births += 1;
                } else {
                    report.deaths += 1;
                }
                cell.alive = next;
            }
            if next {
                report.alive += 1;
            }
        }

        *tick += 1;
        report.tick = *tick;
        tracing::debug!(
            tick = report.tick,
            births = report.births,
            deaths = report.deaths,
            alive = report.alive,
            "Automaton tick"
        );
        report
    }

    /// Decays every in-flight transition by one fade step, keeping the
    /// intensity within `0..=LIFETIME`.
    ///
    /// Rules edited out of range through [`Self::rules_mut`] cannot push the
    /// intensity outside that range: a non-finite step counts as zero and a
    /// negative one saturates at `LIFETIME`.
    ///
    /// Returns the number of cells still transitioning.
    pub fn advance_fade(&mut self) -> usize {
        let fade_in = finite_or_zero(self.rules.fade_in_step());
        let fade_out = finite_or_zero(self.rules.fade_out_step());
        let mut transitioning = 0;
        for cell in self.lattice.cells_mut().iter_mut().filter(|c| c.time > 0.0) {
            let step = if cell.alive { fade_in } else { fade_out };
            cell.time = (cell.time - step).clamp(0.0, LIFETIME);
            if cell.time > 0.0 {
                transitioning += 1;
            }
        }
        transitioning
    }

    /// Makes `count` uniform draws with replacement and marks each drawn cell
    /// alive with no fade-in.
    pub fn seed<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> SeedReport {
        let len = self.lattice.len();
        if len == 0 {
            return SeedReport::default();
        }

        let mut hit = vec![false; len];
        let cells = self.lattice.cells_mut();
        for _ in 0..count {
            let index = rng.gen_range(0..len);
            hit[index] = true;
            cells[index].alive = true;
            cells[index].time = 0.0;
        }

        let report = SeedReport {
            draws: count,
            distinct: hit.iter().filter(|&&h| h).count(),
        };
        tracing::debug!(draws = report.draws, distinct = report.distinct, "Lattice seeded");
        report
    }

    /// Kills every cell, drops all transitions and resets the tick counter.
    pub fn clear(&mut self) {
        self.lattice.clear();
        self.tick = 0;
    }
}

#[inline]
fn finite_or_zero(step: f64) -> f64 {
    if step.is_finite() {
        step
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::NeighborGraphBuilder;
    use cubolife_data::Point3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pair_engine(rules: Rules) -> AutomatonEngine {
        let points = vec![Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)];
        let builder = NeighborGraphBuilder::new(1.0).unwrap();
        let lattice = Lattice::from_points(points, builder).unwrap();
        AutomatonEngine::new(lattice, rules)
    }

    #[test]
    fn test_next_state_defaults() {
        let rules = Rules::default();
        assert!(!next_state(true, 1, &rules));
        assert!(next_state(true, 2, &rules));
        assert!(next_state(true, 3, &rules));
        assert!(!next_state(true, 4, &rules));
        assert!(!next_state(false, 2, &rules));
        assert!(next_state(false, 3, &rules));
        assert!(!next_state(false, 4, &rules));
    }

    #[test]
    fn test_equal_bounds_narrow_survival() {
        let rules = Rules {
            overpopulated: 2,
            underpopulated: 2,
            ..Rules::default()
        };
        assert!(!next_state(true, 1, &rules));
        assert!(next_state(true, 2, &rules));
        assert!(!next_state(true, 3, &rules));
    }

    #[test]
    fn test_birth_zero_spawns_isolated_cells() {
        let rules = Rules {
            birth: 0,
            ..Rules::default()
        };
        let mut engine = pair_engine(rules);
        let report = engine.step();
        assert_eq!(report.births, 2);
        assert_eq!(engine.lattice().alive_count(), 2);
    }

    #[test]
    fn test_death_starts_fade() {
        let mut engine = pair_engine(Rules::default());
        engine.lattice_mut().set_alive(0, true).unwrap();
        let report = engine.step();
        assert_eq!(report.deaths, 1);
        assert_eq!(report.tick, 1);
        let cell = engine.lattice().cell(0).unwrap();
        assert!(!cell.alive);
        assert_eq!(cell.time, LIFETIME);
    }

    #[test]
    fn test_inflight_fade_not_reset() {
        let mut engine = pair_engine(Rules::default());
        engine.lattice_mut().set_alive(0, true).unwrap();
        engine.lattice_mut().cells_mut()[0].time = 2.5;
        engine.step();
        assert_eq!(engine.lattice().cell(0).unwrap().time, 2.5);
    }

    #[test]
    fn test_unchanged_cells_keep_intensity() {
        let rules = Rules {
            underpopulated: 0,
            ..Rules::default()
        };
        let mut engine = pair_engine(rules);
        engine.lattice_mut().set_alive(0, true).unwrap();
        let report = engine.step();
        assert_eq!(report.births + report.deaths, 0);
        assert_eq!(engine.lattice().cell(0).unwrap().time, 0.0);
    }

    #[test]
    fn test_fade_uses_state_specific_rate() {
        let rules = Rules {
            fade_in: 100.0,
            fade_out: 500.0,
            ..Rules::default()
        };
        let mut engine = pair_engine(rules);
        {
            let cells = engine.lattice_mut().cells_mut();
            cells[0].alive = true;
            cells[0].time = 1.0;
            cells[1].time = 1.0;
        }
        assert_eq!(engine.advance_fade(), 2);
        assert!((engine.lattice().cell(0).unwrap().time - 0.9).abs() < 1e-12);
        assert!((engine.lattice().cell(1).unwrap().time - 0.5).abs() < 1e-12);

        engine.advance_fade();
        assert_eq!(engine.lattice().cell(1).unwrap().time, 0.0);
        assert_eq!(engine.advance_fade(), 1);
    }

    #[test]
    fn test_fade_clamps_at_zero() {
        let rules = Rules {
            fade_out: 10_000.0,
            ..Rules::default()
        };
        let mut engine = pair_engine(rules);
        engine.lattice_mut().cells_mut()[0].time = 0.3;
        assert_eq!(engine.advance_fade(), 0);
        assert_eq!(engine.lattice().cell(0).unwrap().time, 0.0);
    }

    #[test]
    fn test_rules_read_live() {
        let mut engine = pair_engine(Rules::default());
        engine.lattice_mut().set_alive(0, true).unwrap();
        engine.rules_mut().underpopulated = 0;
        engine.step();
        assert!(engine.lattice().cell(0).unwrap().alive);
    }

    #[test]
    fn test_seed_marks_alive_without_fade() {
        let lattice = Lattice::new(2, 1.5).unwrap();
        let mut engine = AutomatonEngine::new(lattice, Rules::default());
        engine.lattice_mut().cells_mut()[0].time = 5.0;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let report = engine.seed(15, &mut rng);
        assert_eq!(report.draws, 15);
        assert!((1..=15).contains(&report.distinct));
        assert_eq!(engine.lattice().alive_count(), report.distinct);
        for cell in engine.lattice().cells().iter().filter(|c| c.alive) {
            assert_eq!(cell.time, 0.0);
        }
    }

    #[test]
    fn test_seed_empty_lattice_is_noop() {
        let builder = NeighborGraphBuilder::new(1.0).unwrap();
        let lattice = Lattice::from_points(Vec::new(), builder).unwrap();
        let mut engine = AutomatonEngine::new(lattice, Rules::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(engine.seed(10, &mut rng), SeedReport::default());
        assert_eq!(engine.step().alive, 0);
    }

    #[test]
    fn test_clear_resets_tick() {
        let mut engine = pair_engine(Rules::default());
        engine.step();
        engine.step();
        assert_eq!(engine.tick(), 2);
        engine.clear();
        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.lattice().alive_count(), 0);
    }

    #[test]
    fn test_tick_report_json_shape() {
        let mut engine = pair_engine(Rules::default());
        let report = engine.step();
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["tick"], 1);
        assert_eq!(json["deaths"], report.deaths);
    }

    #[test]
    fn test_live_negative_fade_stays_within_lifetime() {
        let mut engine = pair_engine(Rules::default());
        engine.lattice_mut().set_alive(0, true).unwrap();
        engine.step();
        assert_eq!(engine.lattice().cell(0).unwrap().time, LIFETIME);

        engine.rules_mut().fade_out = -50.0;
        for _ in 0..100 {
            engine.advance_fade();
        }
        assert_eq!(engine.lattice().cell(0).unwrap().time, LIFETIME);

        engine.rules_mut().fade_out = f64::NAN;
        assert_eq!(engine.advance_fade(), 1);
        assert_eq!(engine.lattice().view(0).unwrap().fade_ratio(), 1.0);
    }
}
