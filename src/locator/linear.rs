use super::{CellIndex, Locator};
use crate::grid::Grid;
use crate::Float;

/// Exhaustive scan over every cell. O(n_x) per query, kept as a correctness
/// oracle and benchmark baseline for [`BinaryLocator`](super::BinaryLocator).
///
/// Only half-open cells are matched, so the last grid point is `NotFound` here.
/// The two locators agree on `[x_min, x_max)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearLocator {}

impl LinearLocator {
    pub const fn new() -> Self {
        LinearLocator {}
    }
}

impl Locator for LinearLocator {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn locate(&self, grid: &Grid, x: Float) -> CellIndex {
        // no early exit, the last matching cell wins
        let mut found = CellIndex::NotFound;
        for (j, cell) in grid.points().windows(2).enumerate() {
            if cell[0] <= x && x < cell[1] {
                found = CellIndex::Cell(j);
            }
        }
        found
    }
}
