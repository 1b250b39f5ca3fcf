use super::geometry::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound of a cell's transition-intensity counter.
pub const LIFETIME: f64 = 10.0;

/// A single lattice vertex and its automaton state.
///
/// `neighbors` holds indices into the owning lattice, never references, so
/// cells can be moved and cloned without any ownership cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Cell {
    /// Position of the cell in the lattice's cell sequence.
    pub index: usize,
    pub position: Point3,
    pub neighbors: BTreeSet<usize>,
    pub alive: bool,
    /// Remaining transition time in `[0, LIFETIME]`; 0 means fully settled.
    pub time: f64,
}

impl Cell {
    #[must_use]
    pub fn new(index: usize, position: Point3) -> Self {
        Self {
            index,
            position,
            neighbors: BTreeSet::new(),
            alive: false,
            time: 0.0,
        }
    }

    /// Starts a fade unless one is already in flight.
    #[inline]
    pub fn begin_transition(&mut self) {
        if self.time <= 0.0 {
            self.time = LIFETIME;
        }
    }

    /// Settles the cell: dead with no transition pending.
    pub fn reset(&mut self) {
        self.alive = false;
        self.time = 0.0;
    }

    #[must_use]
    pub fn view(&self) -> CellView {
        CellView {
            index: self.index,
            position: self.position,
            alive: self.alive,
            intensity: self.time,
        }
    }
}

/// Read-only copy of a cell handed to presentation layers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub index: usize,
    pub position: Point3,
    pub alive: bool,
    pub intensity: f64,
}

impl CellView {
    /// `intensity / LIFETIME`, the interpolation factor between the alive and dead colors.
    #[must_use]
    pub fn fade_ratio(&self) -> f64 {
        (self.intensity / LIFETIME).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_dead_and_settled() {
        let cell = Cell::new(4, Point3::ORIGIN);
        assert_eq!(cell.index, 4);
        assert!(!cell.alive);
        assert_eq!(cell.time, 0.0);
        assert!(cell.neighbors.is_empty());
    }

    #[test]
    fn test_begin_transition_keeps_inflight_fade() {
        let mut cell = Cell::new(0, Point3::ORIGIN);
        cell.begin_transition();
        assert_eq!(cell.time, LIFETIME);

        cell.time = 3.5;
        cell.begin_transition();
        assert_eq!(cell.time, 3.5);
    }

    #[test]
    fn test_fade_ratio_bounds() {
        let mut view = Cell::new(0, Point3::ORIGIN).view();
        assert_eq!(view.fade_ratio(), 0.0);
        view.intensity = LIFETIME / 2.0;
        assert_eq!(view.fade_ratio(), 0.5);
        view.intensity = LIFETIME * 3.0;
        assert_eq!(view.fade_ratio(), 1.0);
    }
}
