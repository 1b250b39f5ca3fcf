#![allow(unused_macros)]

/// Asserts that the cell at `index` is alive.
macro_rules! assert_alive {
    ($lattice:expr, $index:expr) => {
        let cell = $lattice.cell($index).expect("cell index in range");
        assert!(cell.alive, "Cell {} should be alive but is dead", $index);
    };
}

/// Asserts that the cell at `index` is dead.
macro_rules! assert_dead {
    ($lattice:expr, $index:expr) => {
        let cell = $lattice.cell($index).expect("cell index in range");
        assert!(!cell.alive, "Cell {} should be dead but is alive", $index);
    };
}

/// Asserts that the lattice's neighbor relation is symmetric and irreflexive.
macro_rules! assert_symmetric_neighbors {
    ($lattice:expr) => {
        for cell in $lattice.cells() {
            assert!(
                !cell.neighbors.contains(&cell.index),
                "Cell {} is its own neighbor",
                cell.index
            );
            for &j in &cell.neighbors {
                assert!(
                    $lattice.neighbors(j).unwrap().contains(&cell.index),
                    "Cell {} lists {} as neighbor but not vice versa",
                    cell.index,
                    j
                );
            }
        }
    };
}
