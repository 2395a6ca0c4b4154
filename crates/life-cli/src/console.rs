//! Terminal renderer.

use life_core::Result;
use life_world::{GenerationReport, Grid, Outcome, Renderer};
use std::io::Write;

/// Moves the cursor home and clears the screen
const CLEAR_SCREEN: &str = "\x1b[1;1H\x1b[2J";

/// Writes each generation to a terminal-like sink.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render_grid(&mut self, grid: &Grid) -> Result<()> {
        write!(self.out, "{}", CLEAR_SCREEN)?;
        writeln!(self.out, "Game of life")?;
        writeln!(
            self.out,
            "  This organism can die of 'natural order' or  you can kill it using CTRL^C\n"
        )?;

        for line in grid.render().lines() {
            writeln!(self.out, "\t{}", line)?;
        }
        writeln!(self.out, "\n")?;
        self.out.flush()?;
        Ok(())
    }

    fn render_report(&mut self, report: &GenerationReport) -> Result<()> {
        writeln!(self.out, "Summary:")?;
        writeln!(self.out, "  {} Cycles (year) of this organism", report.cycle)?;
        writeln!(self.out, "  {} Alive cells", report.alive)?;
        writeln!(self.out, "  {} Dead cells", report.dead)?;
        writeln!(self.out, "  {} Items changed", report.changed)?;
        self.out.flush()?;
        Ok(())
    }

    fn render_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        match outcome {
            Outcome::Stabilized { .. } => {
                writeln!(self.out, "No more changed on the cell, quitting the game")?
            }
            Outcome::Interrupted { .. } => {
                writeln!(self.out, "\n\nThanks for 'playing' with me. Bye!")?
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
