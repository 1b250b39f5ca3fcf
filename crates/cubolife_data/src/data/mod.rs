//! Core data structures for the Cubolife simulation.

pub mod cell;
pub mod geometry;
pub mod snapshot;
