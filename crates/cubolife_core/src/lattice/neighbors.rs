//! Distance-threshold adjacency.

use crate::error::{ensure_non_negative, ensure_positive, Result};
use cubolife_data::Point3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Absolute slack added to the threshold to absorb rounding in generated coordinates.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Builds the neighbor graph of a point cloud by pairwise distance.
///
/// `j` is a neighbor of `i` iff `i != j` and
/// `0 < |p_i - p_j| <= threshold + tolerance`. The threshold is a policy of
/// its own: it defaults to the generation spacing but can be set
/// independently to probe boundary behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborGraphBuilder {
    threshold: f64,
    tolerance: f64,
}

impl NeighborGraphBuilder {
    /// # Errors
    /// `InvalidParameter` when `threshold` is not finite and positive.
    pub fn new(threshold: f64) -> Result<Self> {
        Self::with_tolerance(threshold, DEFAULT_TOLERANCE)
    }

    /// # Errors
    /// `InvalidParameter` for a non-positive threshold or a negative tolerance.
    pub fn with_tolerance(threshold: f64, tolerance: f64) -> Result<Self> {
        Ok(Self {
            threshold: ensure_positive("neighbor_threshold", threshold)?,
            tolerance: ensure_non_negative("neighbor_tolerance", tolerance)?,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether `threshold` equals this policy's threshold up to float noise
    /// from rescaling.
    #[must_use]
    pub fn matches_threshold(&self, threshold: f64) -> bool {
        (self.threshold - threshold).abs() <= 1e-9 * threshold.abs().max(1.0)
    }

    #[inline]
    #[must_use]
    pub fn is_adjacent(&self, a: &Point3, b: &Point3) -> bool {
        let dist = a.distance(b);
        dist > 0.0 && dist <= self.threshold + self.tolerance
    }

    /// One neighbor set per input point, in input order. O(N²).
    #[must_use]
    pub fn build(&self, points: &[Point3]) -> Vec<BTreeSet<usize>> {
        #[cfg(feature = "parallel")]
        let graph: Vec<BTreeSet<usize>> = (0..points.len())
            .into_par_iter()
            .map(|i| self.neighbors_of(i, points))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let graph: Vec<BTreeSet<usize>> = (0..points.len())
            .map(|i| self.neighbors_of(i, points))
            .collect();

        graph
    }

    fn neighbors_of(&self, i: usize, points: &[Point3]) -> BTreeSet<usize> {
        let origin = &points[i];
        points
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != i && self.is_adjacent(origin, other))
            .map(|(j, _)| j)
            .collect()
    }
}
