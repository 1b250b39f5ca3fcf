//! The cuboctahedron lattice: generated vertices bound to automaton cells.

pub mod generation;
pub mod neighbors;

use crate::error::{Result, SimError};
use cubolife_data::{Cell, CellView, LatticeSnapshot, Point3};
use std::collections::BTreeSet;

pub use generation::{expected_vertex_count, generate, generate_layer, MAX_SHELLS};
pub use neighbors::{NeighborGraphBuilder, DEFAULT_TOLERANCE};

/// Ordered cell sequence plus the parameters that produced it.
///
/// Cell `i` always sits at index `i`; neighbor sets refer to cells by index.
#[derive(Debug, Clone)]
pub struct Lattice {
    cells: Vec<Cell>,
    shells: u32,
    spacing: f64,
    builder: NeighborGraphBuilder,
}

impl Lattice {
    /// Generates a lattice whose neighbor threshold equals `spacing`.
    pub fn new(shells: u32, spacing: f64) -> Result<Self> {
        let builder = NeighborGraphBuilder::new(spacing)?;
        Self::with_threshold(shells, spacing, builder)
    }

    /// Generates a lattice with an explicit neighbor policy.
    pub fn with_threshold(
        shells: u32,
        spacing: f64,
        builder: NeighborGraphBuilder,
    ) -> Result<Self> {
        let points = generate(shells, spacing)?;
        let lattice = Self::bind(points, builder, shells, spacing);
        tracing::info!(
            shells = shells,
            spacing = spacing,
            cells = lattice.len(),
            edges = lattice.edge_count(),
            "Lattice generated"
        );
        Ok(lattice)
    }

    /// Wraps arbitrary points, e.g. hand-built fixtures. Reports `shells = 0`
    /// and the builder threshold as spacing.
    pub fn from_points(points: Vec<Point3>, builder: NeighborGraphBuilder) -> Result<Self> {
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(SimError::invalid(
                "points",
                format!("point {bad} has a non-finite coordinate"),
            ));
        }
        let spacing = builder.threshold();
        Ok(Self::bind(points, builder, 0, spacing))
    }

    fn bind(points: Vec<Point3>, builder: NeighborGraphBuilder, shells: u32, spacing: f64) -> Self {
        let graph = builder.build(&points);
        let cells = points
            .into_iter()
            .zip(graph)
            .enumerate()
            .map(|(index, (position, neighbors))| Cell {
                neighbors,
                ..Cell::new(index, position)
            })
            .collect();
        Self {
            cells,
            shells,
            spacing,
            builder,
        }
    }

    /// Recomputes every position in place, keeping indices, alive flags,
    /// intensities and the neighbor graph.
    ///
    /// The graph survives because uniform rescaling preserves adjacency; the
    /// stored threshold is rescaled with the spacing so a later `rebuild`
    /// sees the same policy.
    ///
    /// # Errors
    /// `UnsupportedResize` when the new vertex count differs from the current
    /// cell count (the lattice is left untouched), `InvalidParameter` for a
    /// bad spacing.
    pub fn regenerate(&mut self, shells: u32, spacing: f64) -> Result<()> {
        let points = generate(shells, spacing)?;
        if points.len() != self.cells.len() {
            tracing::warn!(
                current = self.cells.len(),
                requested = points.len(),
                "Rejected in-place lattice resize"
            );
            return Err(SimError::UnsupportedResize {
                current: self.cells.len(),
                requested: points.len(),
            });
        }

        let scale = spacing / self.spacing;
        self.builder = NeighborGraphBuilder::with_tolerance(
            self.builder.threshold() * scale,
            self.builder.tolerance(),
        )?;
        for (cell, position) in self.cells.iter_mut().zip(points) {
            cell.position = position;
        }
        self.shells = shells;
        self.spacing = spacing;
        tracing::debug!(shells = shells, spacing = spacing, "Lattice regenerated in place");
        Ok(())
    }

    /// Full reconstruction with fresh cells; the explicit way to change the
    /// shell count.
    pub fn rebuild(
        &mut self,
        shells: u32,
        spacing: f64,
        builder: NeighborGraphBuilder,
    ) -> Result<()> {
        *self = Self::with_threshold(shells, spacing, builder)?;
        Ok(())
    }

    /// Swaps the neighbor policy and recomputes every neighbor set from the
    /// current positions. Indices, alive flags and intensities are kept.
    pub fn set_neighbor_policy(&mut self, builder: NeighborGraphBuilder) {
        let points = self.positions();
        for (cell, neighbors) in self.cells.iter_mut().zip(builder.build(&points)) {
            cell.neighbors = neighbors;
        }
        self.builder = builder;
        tracing::debug!(
            threshold = builder.threshold(),
            edges = self.edge_count(),
            "Neighbor graph rebuilt"
        );
    }

    /// Marks every cell dead and settled.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn shells(&self) -> u32 {
        self.shells
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn neighbor_policy(&self) -> &NeighborGraphBuilder {
        &self.builder
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells
            .get(index)
            .ok_or_else(|| SimError::out_of_bounds(index, self.cells.len()))
    }

    pub fn neighbors(&self, index: usize) -> Result<&BTreeSet<usize>> {
        self.cell(index).map(|cell| &cell.neighbors)
    }

    pub fn view(&self, index: usize) -> Result<CellView> {
        self.cell(index).map(Cell::view)
    }

    /// Sets a cell's alive flag without touching its intensity.
    pub fn set_alive(&mut self, index: usize, alive: bool) -> Result<()> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| SimError::out_of_bounds(index, len))?;
        cell.alive = alive;
        Ok(())
    }

    pub fn alive_neighbor_count(&self, index: usize) -> Result<usize> {
        let neighbors = self.neighbors(index)?;
        Ok(self.count_alive(neighbors))
    }

    #[inline]
    pub(crate) fn count_alive(&self, neighbors: &BTreeSet<usize>) -> usize {
        neighbors.iter().filter(|&&j| self.cells[j].alive).count()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Alive flags in index order.
    #[must_use]
    pub fn alive_states(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.alive).collect()
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Point3> {
        self.cells.iter().map(|c| c.position).collect()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.cells.iter().map(|c| c.neighbors.len()).sum::<usize>() / 2
    }

    #[must_use]
    pub fn snapshot(&self) -> LatticeSnapshot {
        LatticeSnapshot {
            shells: self.shells,
            spacing: self.spacing,
            cells: self.cells.iter().map(Cell::view).collect(),
        }
    }
}
