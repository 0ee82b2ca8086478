use crate::Float;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::ensure;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Particle positions, each drawn independently from `[x_min, x_max]`.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    positions: Vec<Float>,
}

impl ParticleSet {
    pub fn from_positions(positions: Vec<Float>) -> Self {
        ParticleSet { positions }
    }

    pub fn generate<R: Rng + ?Sized>(
        n: usize,
        x_min: Float,
        x_max: Float,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        ensure!(
            x_min.is_finite() && x_max.is_finite() && x_min <= x_max,
            "invalid particle domain [{}, {}]",
            x_min,
            x_max
        );
        ensure!(
            (x_max - x_min).is_finite(),
            "particle domain width of [{}, {}] overflows",
            x_min,
            x_max
        );
        let distribution = Uniform::new_inclusive(x_min, x_max);
        let positions = distribution.sample_iter(rng).take(n).collect();
        Ok(ParticleSet { positions })
    }

    pub fn from_seed(n: usize, x_min: Float, x_max: Float, seed: u64) -> anyhow::Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(n, x_min, x_max, &mut rng)
    }

    pub fn positions(&self) -> &[Float] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Float> {
        self.positions.iter()
    }
}

/// Seed derived from the system clock, for runs that don't ask for one.
pub fn time_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(_) => {
            warn!("system clock is before the unix epoch, seeding with 0");
            0
        }
    }
}
