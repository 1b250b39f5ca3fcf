use super::cell::CellView;
use serde::{Deserialize, Serialize};

/// Lattice-level view consumed by renderers and the headless driver.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LatticeSnapshot {
    pub shells: u32,
    pub spacing: f64,
    pub cells: Vec<CellView>,
}

impl LatticeSnapshot {
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Cells still fading towards their settled color.
    #[must_use]
    pub fn transitioning_count(&self) -> usize {
        self.cells.iter().filter(|c| c.intensity > 0.0).count()
    }
}
