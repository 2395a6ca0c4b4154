//! Console Game of Life.

mod console;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use life_core::RunConfig;
use life_world::{Simulation, StopToken};
use std::time::Duration;
use tracing::info;

/// Conway's Game of Life on a randomly seeded square grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square grid
    #[arg(allow_hyphen_values = true)]
    side_length: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry()?;

    // Validate before anything is drawn
    let config = RunConfig::from_side_length_arg(cli.side_length.as_deref())?;
    let mut simulation = Simulation::from_config(&config)?;

    let stop = StopToken::new();
    let handler_token = stop.clone();
    ctrlc::set_handler(move || handler_token.stop())
        .context("failed to install Ctrl+C handler")?;

    info!(
        side_length = config.grid.side_length,
        mode = ?config.update_mode,
        "Starting Game of Life"
    );

    let mut renderer = console::ConsoleRenderer::new(std::io::stdout().lock());
    let outcome = simulation.run(
        &stop,
        &mut renderer,
        Duration::from_millis(config.frame_interval_ms),
    )?;

    info!(?outcome, "Exiting");
    Ok(())
}
