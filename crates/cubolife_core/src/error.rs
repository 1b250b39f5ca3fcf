//! Error types for the simulation core.
//!
//! Tick, fade and seed are total over a valid lattice; only construction,
//! resizing and index lookups can fail.

use thiserror::Error;

/// Main error type for cubolife_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A geometry, threshold, timing or configuration input is out of its domain.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// In-place regeneration would change the number of cells.
    #[error("Unsupported resize: {current} cells in place, {requested} requested")]
    UnsupportedResize { current: usize, requested: usize },

    /// A cell index past the end of the lattice.
    #[error("Lattice index {index} out of bounds (len {len})")]
    LatticeIndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for cubolife_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new invalid parameter error.
    #[must_use]
    pub fn invalid<S: Into<String>>(name: &'static str, reason: S) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::LatticeIndexOutOfBounds { index, len }
    }
}

/// Rejects NaN, infinities and values `<= 0`.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(SimError::invalid(name, format!("must be positive, got {value}")));
    }
    Ok(value)
}

/// Rejects NaN, infinities and values `< 0`.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::invalid(
            name,
            format!("must be a finite non-negative number, got {value}"),
        ));
    }
    Ok(value)
}
