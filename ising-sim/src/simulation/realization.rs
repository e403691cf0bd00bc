use crate::config::SimConfig;
use crate::error::SimError;
use crate::geometry::Lattice;
use crate::spins::SpinGrid;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// State for one seeded run.
///
/// Holds the lattice geometry, the initial spin configuration and the single
/// PRNG stream of the run. The stream is seeded once, fills `initial`, and is
/// then handed to the Metropolis loop where it left off, so a given
/// `(size, seed)` pins the whole trajectory.
pub struct Realization {
    pub lattice: Lattice,
    /// Configuration before any flip. Runs work on a copy of it.
    pub initial: SpinGrid,
    /// Stream shared by initialization and simulation.
    pub rng: Xoshiro256StarStar,
    pub seed: u64,
}

impl Realization {
    /// Initialize a realization with random ±1 spins drawn from a generator
    /// seeded with `seed`.
    pub fn new(size: usize, seed: u64) -> Result<Self, SimError> {
        let lattice = Lattice::square(size)?;
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let initial = SpinGrid::random(size, &mut rng)?;

        Ok(Self {
            lattice,
            initial,
            rng,
            seed,
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        Self::new(config.size, config.seed)
    }

    /// Re-seed the stream and re-randomize the initial spins.
    pub fn reset(&mut self, seed: u64) -> Result<(), SimError> {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
        self.initial = SpinGrid::random(self.lattice.size, &mut self.rng)?;
        self.seed = seed;
        Ok(())
    }
}
