//! Acceptance-counted Metropolis Monte Carlo for the 2D Ising model on a
//! periodic square lattice.

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;

pub use config::SimConfig;
pub use error::SimError;
pub use geometry::Lattice;
pub use mcmc::{simulate, Acceptance, RunStats};
pub use simulation::{run, Realization, SimOutcome};
pub use spins::SpinGrid;
