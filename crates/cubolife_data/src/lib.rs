//! Plain data records shared between the simulation core and its consumers.

pub mod data;

pub use data::cell::{Cell, CellView, LIFETIME};
pub use data::geometry::Point3;
pub use data::snapshot::LatticeSnapshot;
