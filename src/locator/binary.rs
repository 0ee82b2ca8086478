use super::{CellIndex, Locator};
use crate::grid::Grid;
use crate::Float;

/// Binary search over the cells of a sorted grid.
///
/// Narrows strictly, so the search range shrinks every iteration and the loop
/// ends after at most `floor(log2(n_x - 1)) + 1` probes without an iteration cap.
#[derive(Copy, Clone, Debug, Default)]
pub struct BinaryLocator {}

impl BinaryLocator {
    pub const fn new() -> Self {
        BinaryLocator {}
    }

    /// Locates `x` and reports how many probes it took.
    pub fn locate_counted(&self, grid: &Grid, x: Float) -> (CellIndex, usize) {
        let points = grid.points();
        let last = points.len() - 1;

        // half-open range of candidate cells
        let mut low = 0;
        let mut high = last;
        let mut count = 0;
        while low < high {
            let guess = low + (high - low) / 2;
            count += 1;
            if points[guess] <= x && x < points[guess + 1] {
                return (CellIndex::Cell(guess), count);
            } else if x < points[guess] {
                high = guess;
            } else if x >= points[guess + 1] {
                low = guess + 1;
            } else {
                // unordered, x is NaN
                break;
            }
        }

        if x == points[last] {
            (CellIndex::Boundary(last), count)
        } else {
            (CellIndex::NotFound, count)
        }
    }
}

impl Locator for BinaryLocator {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn locate(&self, grid: &Grid, x: Float) -> CellIndex {
        self.locate_counted(grid, x).0
    }
}
