pub mod acceptance;
pub mod metropolis;

pub use acceptance::{celsius_to_kelvin, Acceptance, BOLTZMANN_EV_PER_K, CELSIUS_OFFSET};
pub use metropolis::{run_until_accepted, simulate, RunStats};
