use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use super::acceptance::Acceptance;
use crate::error::SimError;
use crate::geometry::Lattice;
use crate::spins::energy::delta_energy;
use crate::spins::SpinGrid;

/// How many attempts pass between two reads of the cancellation flag.
const INTERRUPT_CHECK_INTERVAL: u64 = 4096;

/// Counters of one acceptance-counted run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Flips that passed the Metropolis test and were applied.
    pub accepted: u64,
    /// Proposals made, accepted or not.
    pub attempts: u64,
}

impl RunStats {
    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempts as f64
    }
}

/// Single-site Metropolis loop that runs until exactly `target_accepted` flips
/// have been accepted, mutating `spins` in place.
///
/// Each attempt draws a row then a column uniformly (with replacement),
/// computes the flip's energy change with periodic neighbors and applies the
/// [`Acceptance`] test. Rejected attempts change nothing and do not count.
///
/// There is no bound on the number of attempts unless `max_attempts` is set,
/// in which case reaching it is an error. `interrupted` is polled every few
/// thousand attempts; `on_accept` is called after every accepted flip.
#[allow(clippy::too_many_arguments)]
pub fn run_until_accepted<R: Rng>(
    lattice: &Lattice,
    spins: &mut SpinGrid,
    target_accepted: u64,
    acceptance: &Acceptance,
    rng: &mut R,
    max_attempts: Option<u64>,
    interrupted: &AtomicBool,
    on_accept: &dyn Fn(),
) -> Result<RunStats, SimError> {
    if spins.size() != lattice.size {
        return Err(SimError::invalid(format!(
            "grid is {n}x{n} but lattice is {m}x{m}",
            n = spins.size(),
            m = lattice.size
        )));
    }

    let size = lattice.size;
    let mut stats = RunStats::default();

    while stats.accepted < target_accepted {
        if stats.attempts % INTERRUPT_CHECK_INTERVAL == 0 && interrupted.load(Ordering::Relaxed)
        {
            return Err(SimError::Interrupted {
                accepted: stats.accepted,
                target: target_accepted,
            });
        }
        if let Some(limit) = max_attempts {
            if stats.attempts >= limit {
                return Err(SimError::AttemptLimit {
                    limit,
                    accepted: stats.accepted,
                    target: target_accepted,
                });
            }
        }

        stats.attempts += 1;
        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        let site = lattice.site(row, col);

        let eng_change = delta_energy(lattice, spins.as_slice(), site);
        if acceptance.accepts(eng_change, rng) {
            spins.flip(site);
            stats.accepted += 1;
            on_accept();
        }
    }

    Ok(stats)
}

/// Evolve a copy of `grid` until `target_accepted` flips have been accepted at
/// `temperature_celsius`, drawing all randomness from `rng`.
///
/// The input grid is never modified. Arguments are validated before any draw,
/// and a zero target returns an unchanged copy without touching `rng`.
pub fn simulate<R: Rng>(
    grid: &SpinGrid,
    target_accepted: u64,
    temperature_celsius: f64,
    rng: &mut R,
) -> Result<SpinGrid, SimError> {
    let acceptance = Acceptance::from_celsius(temperature_celsius)?;
    let lattice = Lattice::square(grid.size())?;

    let mut working = grid.clone();
    if target_accepted == 0 {
        return Ok(working);
    }

    let interrupted = AtomicBool::new(false);
    run_until_accepted(
        &lattice,
        &mut working,
        target_accepted,
        &acceptance,
        rng,
        None,
        &interrupted,
        &|| {},
    )?;
    Ok(working)
}
