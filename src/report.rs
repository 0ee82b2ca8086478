// human readable dumps of a run. only practical for small problems.

use crate::grid::Grid;
use crate::locator::{FoundIndices, LinearLocator, Locator};
use crate::particles::ParticleSet;

use std::io::{self, Write};

pub fn write_grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    for (j, value) in grid.iter().enumerate() {
        writeln!(out, "Gridpoint {} has value {:4.3}", j, value)?;
    }
    Ok(())
}

pub fn write_particles<W: Write>(
    out: &mut W,
    particles: &ParticleSet,
    found: &FoundIndices,
) -> io::Result<()> {
    for (i, (value, cell)) in particles.iter().zip(found.iter()).enumerate() {
        writeln!(
            out,
            "Particle {}, located at {:4.3}, was found in cell {}",
            i, value, cell
        )?;
    }
    Ok(())
}

pub fn print_data(grid: &Grid, particles: &ParticleSet, found: &FoundIndices) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_grid(&mut out, grid)?;
    write_particles(&mut out, particles, found)?;
    out.flush()
}

/// Outcome of re-running a search with the linear locator. Only particles in
/// `[x_min, x_max)` are compared, the linear scan never reports the boundary.
#[derive(Clone, Debug)]
pub struct CrossCheck {
    pub linear: FoundIndices,
    pub mismatches: Vec<usize>,
}

impl CrossCheck {
    pub fn run(grid: &Grid, particles: &ParticleSet, found: &FoundIndices) -> Self {
        let linear = LinearLocator::new().locate_all(grid, particles);
        let positions = particles.positions();
        let mismatches = found.mismatches_where(&linear, |i| grid.covers(positions[i]));
        CrossCheck { linear, mismatches }
    }

    pub fn found_same(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn report(&self, particles: &ParticleSet, found: &FoundIndices) {
        for &i in self.mismatches.iter().take(16) {
            if let (Some(binary), Some(linear)) = (found.get(i), self.linear.get(i)) {
                warn!(
                    "particle {} at {} was found in cell {}, linear search says {}",
                    i,
                    particles.positions()[i],
                    binary,
                    linear
                );
            }
        }
        if self.mismatches.len() > 16 {
            warn!("... and {} more mismatches", self.mismatches.len() - 16);
        }
        println!("Did searches find the same? {}", self.found_same());
    }
}
