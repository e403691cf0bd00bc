pub mod realization;

pub use realization::Realization;

use std::sync::atomic::AtomicBool;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::mcmc::{run_until_accepted, Acceptance, RunStats};
use crate::spins::SpinGrid;
use tracing::{debug, info, warn};
use validator::Validate;

/// Final grid of a run together with its counters.
#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub grid: SpinGrid,
    pub stats: RunStats,
}

/// Run the acceptance-counted Metropolis loop for one [`Realization`].
///
/// The loop works on a copy of `real.initial`, which is left as it was, and
/// continues `real.rng` from wherever initialization left it. `config.size`
/// must match the realization.
///
/// `on_accept` is called once per accepted flip (useful for progress bars).
pub fn run(
    real: &mut Realization,
    config: &SimConfig,
    interrupted: &AtomicBool,
    on_accept: &dyn Fn(),
) -> Result<SimOutcome, SimError> {
    config.validate()?;
    if config.size != real.lattice.size {
        return Err(SimError::invalid(format!(
            "config size {} does not match realization size {}",
            config.size, real.lattice.size
        )));
    }

    let acceptance = Acceptance::from_celsius(config.temperature_celsius)?;
    debug!(
        size = config.size,
        seed = real.seed,
        target = config.target_accepted,
        kelvin = acceptance.kelvin(),
        p4 = acceptance.probability(4),
        p8 = acceptance.probability(8),
        "starting metropolis run"
    );

    let mut grid = real.initial.clone();
    let result = run_until_accepted(
        &real.lattice,
        &mut grid,
        config.target_accepted,
        &acceptance,
        &mut real.rng,
        config.max_attempts,
        interrupted,
        on_accept,
    );

    match result {
        Ok(stats) => {
            info!(
                accepted = stats.accepted,
                attempts = stats.attempts,
                ratio = stats.acceptance_ratio(),
                "metropolis run finished"
            );
            Ok(SimOutcome { grid, stats })
        }
        Err(e) => {
            warn!("metropolis run aborted: {e}");
            Err(e)
        }
    }
}
