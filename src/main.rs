use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising::cli::Args;
use ising::export::write_csv;
use ising::render::{corner_preview, PngRenderer, Renderer};
use ising_sim::{simulation, Realization};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PREVIEW: usize = 5;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn progress_bar(len: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message("accepted flips");
    Ok(pb)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    let config = args.sim_config()?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("installing Ctrl-C handler")?;

    info!(
        size = config.size,
        seed = config.seed,
        "creating the initial lattice"
    );
    let mut real = Realization::from_config(&config)?;
    println!(
        "Initial lattice (top-left {PREVIEW}x{PREVIEW}):\n{}",
        corner_preview(&real.initial, PREVIEW)
    );

    let renderer = (!args.no_render).then(|| PngRenderer::new(&args.out_dir, args.scale));
    if let Some(renderer) = &renderer {
        renderer.render(&real.initial, "Initial spins (white = +1, black = -1)")?;
    }

    info!(
        steps = config.target_accepted,
        celsius = config.temperature_celsius,
        "starting simulation, this may take a moment"
    );
    let pb = progress_bar(config.target_accepted, args.no_progress)?;
    let start = Instant::now();
    let result = simulation::run(&mut real, &config, &interrupted, &|| pb.inc(1));
    let elapsed = start.elapsed();
    pb.finish_and_clear();
    let outcome = result?;

    println!("Simulation finished in {:.2} s.", elapsed.as_secs_f64());
    info!(
        attempts = outcome.stats.attempts,
        changed_sites = outcome.grid.count_differences(&real.initial),
        "run summary"
    );
    println!(
        "Final lattice (top-left {PREVIEW}x{PREVIEW}):\n{}",
        corner_preview(&outcome.grid, PREVIEW)
    );

    if let Some(renderer) = &renderer {
        renderer.render(
            &outcome.grid,
            &format!("Final spins after {} steps", config.target_accepted),
        )?;
    }
    if let Some(path) = &args.csv {
        write_csv(&outcome.grid, path)?;
        info!(path = %path.display(), "wrote final lattice");
    }

    Ok(())
}
