//! Run loop that drives a grid until it stabilizes or is stopped.

use crate::grid::Grid;
use life_core::{Result, RunConfig, UpdateMode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Cooperative stop request shared between the run loop and a signal handler.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Statistics for one computed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Cycle index, starting at 0
    pub cycle: u64,
    /// Cells that flipped state during this cycle
    pub changed: usize,
    pub alive: usize,
    pub dead: usize,
}

impl GenerationReport {
    pub fn is_stable(&self) -> bool {
        self.changed == 0
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The generation computed at `cycle` changed no cells.
    Stabilized { cycle: u64 },
    /// A stop was requested before `cycle` was computed.
    Interrupted { cycle: u64 },
}

/// Output side of the run loop.
pub trait Renderer {
    fn render_grid(&mut self, grid: &Grid) -> Result<()>;

    fn render_report(&mut self, report: &GenerationReport) -> Result<()>;

    fn render_outcome(&mut self, _outcome: &Outcome) -> Result<()> {
        Ok(())
    }
}

pub struct Simulation {
    grid: Grid,
    mode: UpdateMode,
    cycle: u64,
}

impl Simulation {
    pub fn new(grid: Grid, mode: UpdateMode) -> Self {
        Self {
            grid,
            mode,
            cycle: 0,
        }
    }

    /// Seed a grid from configuration. Without a configured seed the random
    /// source is seeded from the operating system.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        let mut rng = match config.grid.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid = Grid::from_config(&config.grid, &mut rng)?;
        Ok(Self::new(grid, config.update_mode))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Index of the next cycle to be computed
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Compute one generation.
    pub fn advance(&mut self) -> GenerationReport {
        let changed = self.grid.step_with(self.mode);
        let report = GenerationReport {
            cycle: self.cycle,
            changed,
            alive: self.grid.alive_count(),
            dead: self.grid.dead_count(),
        };
        self.cycle += 1;

        debug!(
            cycle = report.cycle,
            changed = report.changed,
            alive = report.alive,
            dead = report.dead,
            "Cycle complete"
        );
        report
    }

    /// Render and advance until a generation changes nothing or `stop` is
    /// requested. The stop token is checked between generations only.
    #[instrument(skip_all, fields(side_length = self.grid.side_length(), mode = ?self.mode))]
    pub fn run<R: Renderer>(
        &mut self,
        stop: &StopToken,
        renderer: &mut R,
        pause: Duration,
    ) -> Result<Outcome> {
        info!("Starting simulation");

        let outcome = loop {
            if stop.is_stopped() {
                break Outcome::Interrupted { cycle: self.cycle };
            }

            renderer.render_grid(&self.grid)?;

            let report = self.advance();
            if report.is_stable() {
                break Outcome::Stabilized {
                    cycle: report.cycle,
                };
            }

            renderer.render_report(&report)?;

            if !pause.is_zero() {
                std::thread::sleep(pause);
            }
        };

        info!(
            ?outcome,
            alive = self.grid.alive_count(),
            dead = self.grid.dead_count(),
            "Simulation finished"
        );
        renderer.render_outcome(&outcome)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::GridConfig;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<String>,
        reports: Vec<GenerationReport>,
        outcome: Option<Outcome>,
        stop_after: Option<(usize, StopToken)>,
    }

    impl Renderer for Recorder {
        fn render_grid(&mut self, grid: &Grid) -> Result<()> {
            self.frames.push(grid.render());
            Ok(())
        }

        fn render_report(&mut self, report: &GenerationReport) -> Result<()> {
            self.reports.push(*report);
            if let Some((limit, token)) = &self.stop_after {
                if self.reports.len() >= *limit {
                    token.stop();
                }
            }
            Ok(())
        }

        fn render_outcome(&mut self, outcome: &Outcome) -> Result<()> {
            self.outcome = Some(*outcome);
            Ok(())
        }
    }

    fn blinker() -> Grid {
        Grid::from_rows(&[".....", ".....", ".XXX.", ".....", "....."]).unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let config = RunConfig {
            grid: GridConfig {
                side_length: 12,
                seed: Some(42),
                ..Default::default()
            },
            ..Default::default()
        };

        let a = Simulation::from_config(&config).unwrap();
        let b = Simulation::from_config(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.mode(), UpdateMode::InPlace);
        assert_eq!(a.cycle(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RunConfig {
            grid: GridConfig {
                side_length: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Simulation::from_config(&config).is_err());
    }

    #[test]
    fn test_advance_counts_cycles() {
        let mut sim = Simulation::new(blinker(), UpdateMode::DoubleBuffered);

        let first = sim.advance();
        assert_eq!(first.cycle, 0);
        assert_eq!(first.changed, 4);
        assert_eq!(first.alive + first.dead, 25);

        let second = sim.advance();
        assert_eq!(second.cycle, 1);
        assert_eq!(sim.cycle(), 2);
    }

    #[test]
    fn test_run_stops_when_stable() {
        let grid = Grid::from_rows(&["...", ".X.", "..."]).unwrap();
        let mut sim = Simulation::new(grid, UpdateMode::InPlace);
        let mut recorder = Recorder::default();

        let outcome = sim
            .run(&StopToken::new(), &mut recorder, Duration::ZERO)
            .unwrap();

        // Cycle 0 kills the lone cell, cycle 1 changes nothing.
        assert_eq!(outcome, Outcome::Stabilized { cycle: 1 });
        assert_eq!(recorder.frames.len(), 2);
        assert_eq!(recorder.reports.len(), 1);
        assert_eq!(recorder.reports[0].changed, 1);
        assert_eq!(recorder.outcome, Some(outcome));
    }

    #[test]
    fn test_run_honors_stop_before_first_step() {
        let mut sim = Simulation::new(blinker(), UpdateMode::DoubleBuffered);
        let token = StopToken::new();
        token.stop();

        let mut recorder = Recorder::default();
        let outcome = sim.run(&token, &mut recorder, Duration::ZERO).unwrap();

        assert_eq!(outcome, Outcome::Interrupted { cycle: 0 });
        assert!(recorder.frames.is_empty());
        assert_eq!(sim.grid(), &blinker());
    }

    #[test]
    fn test_run_interrupted_between_steps() {
        // A blinker never stabilizes, so only the stop token ends the run.
        let mut sim = Simulation::new(blinker(), UpdateMode::DoubleBuffered);
        let token = StopToken::new();
        let mut recorder = Recorder {
            stop_after: Some((3, token.clone())),
            ..Default::default()
        };

        let outcome = sim.run(&token, &mut recorder, Duration::ZERO).unwrap();

        assert_eq!(outcome, Outcome::Interrupted { cycle: 3 });
        assert_eq!(recorder.reports.len(), 3);
        let cycles: Vec<u64> = recorder.reports.iter().map(|r| r.cycle).collect();
        assert_eq!(cycles, vec![0, 1, 2]);
    }

    #[test]
    fn test_report_serialization() {
        let report = GenerationReport {
            cycle: 3,
            changed: 4,
            alive: 5,
            dead: 20,
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["changed"], 4);
        assert_eq!(json["cycle"], 3);
    }
}
