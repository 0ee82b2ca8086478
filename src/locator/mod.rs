mod binary;
mod linear;

pub use binary::BinaryLocator;
pub use linear::LinearLocator;

use crate::grid::Grid;
use crate::particles::ParticleSet;
use crate::Float;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::Deserialize;

/// Where a query position landed on a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellIndex {
    /// Inside the half-open cell `[grid[j], grid[j + 1])`.
    Cell(usize),
    /// Exactly on the last grid point. Holds `n_x - 1`.
    Boundary(usize),
    NotFound,
}

impl CellIndex {
    /// Integer form: the cell index, `n_x - 1` for the boundary, `-1` when not found.
    pub fn raw(self) -> i64 {
        match self {
            CellIndex::Cell(j) | CellIndex::Boundary(j) => j as i64,
            CellIndex::NotFound => -1,
        }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// One located cell per particle, in particle order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundIndices {
    cells: Vec<CellIndex>,
}

impl FoundIndices {
    pub fn new(n: usize) -> Self {
        FoundIndices {
            cells: vec![CellIndex::NotFound; n],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<CellIndex> {
        self.cells.get(i).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellIndex> {
        self.cells.iter()
    }

    pub fn raw(&self) -> Vec<i64> {
        self.cells.iter().map(|c| c.raw()).collect()
    }

    /// Particle indices where `self` and `other` disagree, among those `keep` accepts.
    pub fn mismatches_where<F>(&self, other: &FoundIndices, mut keep: F) -> Vec<usize>
    where
        F: FnMut(usize) -> bool,
    {
        debug_assert_eq!(self.len(), other.len());
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|&(i, (a, b))| a != b && keep(i))
            .map(|(i, _)| i)
            .collect()
    }
}

pub trait Locator {
    fn name(&self) -> &'static str;

    fn locate(&self, grid: &Grid, x: Float) -> CellIndex;

    fn locate_all(&self, grid: &Grid, particles: &ParticleSet) -> FoundIndices {
        let mut found = FoundIndices::new(particles.len());
        for (slot, &x) in found.cells.iter_mut().zip(particles.iter()) {
            *slot = self.locate(grid, x);
        }
        found
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    #[default]
    Binary,
    Linear,
}

impl FromStr for LocatorKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(LocatorKind::Binary),
            "linear" => Ok(LocatorKind::Linear),
            other => bail!("unknown locator {:?}, expected \"binary\" or \"linear\"", other),
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorKind::Binary => f.write_str(BinaryLocator::new().name()),
            LocatorKind::Linear => f.write_str(LinearLocator::new().name()),
        }
    }
}

pub fn construct_locator(kind: LocatorKind) -> Box<dyn Locator> {
    match kind {
        LocatorKind::Binary => Box::new(BinaryLocator::new()),
        LocatorKind::Linear => Box::new(LinearLocator::new()),
    }
}

pub fn locate(grid: &Grid, x: Float) -> CellIndex {
    BinaryLocator::new().locate(grid, x)
}

pub fn locate_linear(grid: &Grid, x: Float) -> CellIndex {
    LinearLocator::new().locate(grid, x)
}
