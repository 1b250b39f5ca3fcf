pub use cubolife_core::{SimError, SimulationController};
pub mod automaton {
    pub use cubolife_core::automaton::*;
}
pub mod clock {
    pub use cubolife_core::clock::*;
}
pub mod config {
    pub use cubolife_core::config::*;
}
pub mod lattice {
    pub use cubolife_core::lattice::*;
}
pub mod metrics {
    pub use cubolife_core::metrics::*;
}
pub mod cell {
    pub use cubolife_data::{Cell, CellView, LatticeSnapshot, Point3, LIFETIME};
}
