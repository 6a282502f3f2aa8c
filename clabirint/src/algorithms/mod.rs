mod backtracker;

pub use backtracker::RecursiveBacktracker;

use rand::{thread_rng, Rng, SeedableRng as _};
use thiserror::Error;

use crate::grid::Grid;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeded generator, or a freshly seeded one when no seed is given.
pub fn random(seed: Option<u64>) -> Random {
    Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    #[error("invalid maze size {0}, expected an odd number of at least 3")]
    InvalidSize(usize),
}

pub fn is_valid_size(size: usize) -> bool {
    size >= 3 && size % 2 == 1
}

pub trait MazeAlgorithm {
    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Grid, GenError>;
}
