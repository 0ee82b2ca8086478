pub use crate::grid::Grid;
pub use crate::locator::{
    construct_locator, locate, locate_linear, BinaryLocator, CellIndex, FoundIndices,
    LinearLocator, Locator, LocatorKind,
};
pub use crate::particles::{time_seed, ParticleSet};
pub use crate::profile::SearchProfile;
pub use crate::Float;

pub use std::f64::consts::PI;
