use std::path::PathBuf;

use clap::Parser;
use ising_sim::{SimConfig, SimError};
use validator::Validate;

/// Metropolis Monte Carlo simulation of the 2D Ising model.
#[derive(Debug, Parser)]
#[command(name = "ising", version, about)]
pub struct Args {
    /// Side length of the square lattice.
    #[arg(long, default_value_t = 100)]
    pub size: usize,

    /// Seed of the random stream (initial lattice and simulation).
    #[arg(long, default_value_t = 93)]
    pub seed: u64,

    /// Number of accepted spin flips to perform.
    #[arg(long, default_value_t = 100_000)]
    pub steps: u64,

    /// Temperature in degrees Celsius.
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Give up after this many proposals (default: never).
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Directory for the rendered PNG images.
    #[arg(long, default_value = "results")]
    pub out_dir: PathBuf,

    /// Pixels per spin in the rendered images.
    #[arg(long, default_value_t = 4)]
    pub scale: u32,

    /// Skip writing PNG images.
    #[arg(long)]
    pub no_render: bool,

    /// Also write the final lattice as CSV to this path.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "info", "ising_sim=debug").
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Validated run configuration.
    pub fn sim_config(&self) -> Result<SimConfig, SimError> {
        let config = SimConfig {
            size: self.size,
            seed: self.seed,
            target_accepted: self.steps,
            temperature_celsius: self.temperature,
            max_attempts: self.max_attempts,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sim_config() {
        let args = Args::try_parse_from(["ising"]).unwrap();
        assert_eq!(args.sim_config().unwrap(), SimConfig::default());
        assert!(!args.no_render);
        assert_eq!(args.scale, 4);
    }

    #[test]
    fn test_negative_temperature() {
        let args = Args::try_parse_from([
            "ising",
            "--size",
            "8",
            "--steps",
            "10",
            "--temperature",
            "-20.5",
        ])
        .unwrap();
        let config = args.sim_config().unwrap();
        assert_eq!(config.size, 8);
        assert_eq!(config.target_accepted, 10);
        assert_eq!(config.temperature_celsius, -20.5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let args = Args::try_parse_from(["ising", "--size", "0"]).unwrap();
        assert!(matches!(
            args.sim_config(),
            Err(SimError::InvalidArgument(_))
        ));

        let args = Args::try_parse_from(["ising", "--temperature", "-300"]).unwrap();
        assert!(args.sim_config().is_err());

        assert!(Args::try_parse_from(["ising", "--steps", "-5"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
