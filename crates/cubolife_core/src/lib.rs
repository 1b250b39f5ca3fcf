//! # Cubolife Core
//!
//! Simulation engine for a three-dimensional Game of Life running on the
//! vertices of a cuboctahedron.
//!
//! This crate contains the deterministic simulation logic:
//! - Lattice generation (close-packed cuboctahedron shells)
//! - Distance-threshold neighbor graphs
//! - Synchronous birth/survival/death rules with a fade model
//! - Tick cadence and seeding orchestration
//! - Configuration, metrics collection and structured logging
//!
//! Rendering is left to consumers, which read [`cubolife_data::CellView`]
//! snapshots and map `(alive, intensity)` to colors themselves.
//!
//! ## Example
//!
//! ```
//! use cubolife_core::{SimConfig, SimulationController};
//!
//! let config = SimConfig {
//!     seed: Some(42),
//!     ..SimConfig::default()
//! };
//! let mut sim = SimulationController::new(config).unwrap();
//! for _ in 0..90 {
//!     sim.update(1.0 / 30.0).unwrap();
//! }
//! assert_eq!(sim.lattice().len(), 55);
//! ```

/// Synchronous automaton rules and fade model
pub mod automaton;
/// Tick cadence
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Orchestration of lattice, automaton, clock and seeding
pub mod controller;
/// Error types
pub mod error;
/// Lattice generation, neighbor graphs and cell storage
pub mod lattice;
/// Tick statistics and logging setup
pub mod metrics;

pub use automaton::{next_state, AutomatonEngine, SeedReport, TickReport};
pub use clock::SimulationClock;
pub use config::{ClockConfig, Rules, SimConfig, StructureConfig};
pub use controller::SimulationController;
pub use cubolife_data::{Cell, CellView, LatticeSnapshot, Point3, LIFETIME};
pub use error::{Result, SimError};
pub use lattice::{Lattice, NeighborGraphBuilder, MAX_SHELLS};
pub use metrics::{init_logging, Metrics};
