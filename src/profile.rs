use crate::locator::{CellIndex, FoundIndices};

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct SearchProfile {
    pub queries: usize,   // all particles searched for
    pub located: usize,   // landed inside a cell
    pub boundary: usize,  // exactly on the last grid point
    pub not_found: usize, // outside the grid
}

impl SearchProfile {
    pub fn new(queries: usize, located: usize, boundary: usize, not_found: usize) -> Self {
        SearchProfile {
            queries,
            located,
            boundary,
            not_found,
        }
    }

    pub fn from_found(found: &FoundIndices) -> Self {
        found.iter().fold(SearchProfile::default(), |mut profile, cell| {
            profile.queries += 1;
            match cell {
                CellIndex::Cell(_) => profile.located += 1,
                CellIndex::Boundary(_) => profile.boundary += 1,
                CellIndex::NotFound => profile.not_found += 1,
            }
            profile
        })
    }

    pub fn combine(&self, other: Self) -> Self {
        SearchProfile::new(
            self.queries + other.queries,
            self.located + other.located,
            self.boundary + other.boundary,
            self.not_found + other.not_found,
        )
    }

    pub fn pretty_print(&self, method: &str, elapsed: f64) {
        let &SearchProfile {
            queries,
            located,
            boundary,
            not_found,
        } = self;
        info!(
            "{} search: {} queries in {}s at {} queries per second",
            method,
            queries,
            elapsed,
            queries as f64 / elapsed
        );
        info!(
            "{} located in cells, {} on the boundary, {} not found",
            located, boundary, not_found
        );
        if not_found > 0 {
            warn!("{} particles could not be located", not_found);
        }
    }
}
