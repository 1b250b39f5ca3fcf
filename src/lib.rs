//! Headless driver for the Cubolife simulation.
//!
//! The simulation itself lives in `cubolife_core`; this crate wires it to a
//! fixed-step frame loop and a command-line surface.

pub mod app;
pub mod model;
