//! Square cell grid and the generation update.

use life_core::{CellState, Error, GridConfig, Position, Result, UpdateMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// A square grid with bounded (non-wrapping) edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    side_length: usize,
    cells: Vec<CellState>,
    alive_count: usize,
    dead_count: usize,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(side_length: usize) -> Result<Self> {
        let len = Self::cell_count(side_length)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, CellState::Dead);

        Ok(Self {
            side_length,
            cells,
            alive_count: 0,
            dead_count: len,
        })
    }

    /// Create a randomly seeded grid using a process-seeded random source.
    pub fn create(side_length: usize) -> Result<Self> {
        let config = GridConfig {
            side_length,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::from_entropy();
        Self::from_config(&config, &mut rng)
    }

    /// Create a grid from configuration, each cell alive with
    /// `config.alive_probability`.
    pub fn from_config(config: &GridConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let mut grid = Self::new(config.side_length)?;

        for cell in grid.cells.iter_mut() {
            if rng.gen::<f32>() < config.alive_probability {
                *cell = CellState::Alive;
            }
        }
        grid.recount();

        debug!(
            side_length = grid.side_length,
            alive = grid.alive_count,
            "Seeded grid"
        );
        Ok(grid)
    }

    /// Build a grid from a textual pattern, one string per row.
    ///
    /// `X`, `O` and `#` are alive; `.` and `-` are dead.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let side_length = rows.len();
        let mut grid = Self::new(side_length)?;

        for (row, line) in rows.iter().enumerate() {
            let states = line
                .chars()
                .map(|ch| match ch {
                    'X' | 'O' | '#' => Ok(CellState::Alive),
                    '.' | '-' => Ok(CellState::Dead),
                    other => Err(Error::InvalidArgument(format!(
                        "unknown cell character '{}' in row {}",
                        other, row
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;

            if states.len() != side_length {
                return Err(Error::InvalidArgument(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    states.len(),
                    side_length
                )));
            }

            let start = row * side_length;
            grid.cells[start..start + side_length].copy_from_slice(&states);
        }

        grid.recount();
        Ok(grid)
    }

    fn cell_count(side_length: usize) -> Result<usize> {
        if side_length == 0 {
            return Err(Error::InvalidArgument(
                "grid side length must be positive".to_string(),
            ));
        }
        side_length.checked_mul(side_length).ok_or_else(|| {
            Error::AllocationFailure(format!(
                "a {0}x{0} grid does not fit in memory",
                side_length
            ))
        })
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub fn dead_count(&self) -> usize {
        self.dead_count
    }

    /// Get the cell at a position, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<CellState> {
        pos.in_bounds(self.side_length)
            .then(|| self.cells[self.pos_to_index(pos)])
    }

    /// Set the cell at a position
    pub fn set(&mut self, pos: Position, state: CellState) -> Result<()> {
        if !pos.in_bounds(self.side_length) {
            return Err(Error::InvalidArgument(format!(
                "position {} is outside a {}x{} grid",
                pos, self.side_length, self.side_length
            )));
        }

        let index = self.pos_to_index(pos);
        let previous = std::mem::replace(&mut self.cells[index], state);
        match (previous, state) {
            (CellState::Dead, CellState::Alive) => {
                self.alive_count += 1;
                self.dead_count -= 1;
            }
            (CellState::Alive, CellState::Dead) => {
                self.alive_count -= 1;
                self.dead_count += 1;
            }
            _ => {}
        }
        Ok(())
    }

    /// Count live neighbors; positions outside the grid are not counted.
    pub fn live_neighbors(&self, pos: Position) -> u8 {
        pos.neighbors(self.side_length)
            .filter(|n| self.cells[self.pos_to_index(*n)].is_alive())
            .count() as u8
    }

    /// Advance one generation in place and return the number of cells that
    /// changed state.
    ///
    /// Cells are rewritten in row-major order as they are evaluated, so a cell
    /// sees the new state of every neighbor that precedes it in the scan.
    pub fn step(&mut self) -> usize {
        let mut changed = 0;

        for index in 0..self.cells.len() {
            let pos = self.index_to_pos(index);
            let current = self.cells[index];
            let next = current.next(self.live_neighbors(pos));

            if next != current {
                trace!(%pos, ?next, "Cell flipped");
                self.cells[index] = next;
                changed += 1;
            }
        }

        self.recount();
        debug!(
            changed,
            alive = self.alive_count,
            dead = self.dead_count,
            "Generation computed in place"
        );
        changed
    }

    /// Advance one generation against a snapshot of the previous one and
    /// return the number of cells that changed state.
    pub fn step_double_buffered(&mut self) -> usize {
        let next: Vec<CellState> = (0..self.cells.len())
            .map(|index| {
                let pos = self.index_to_pos(index);
                self.cells[index].next(self.live_neighbors(pos))
            })
            .collect();

        let changed = self
            .cells
            .iter()
            .zip(&next)
            .filter(|(before, after)| before != after)
            .count();

        self.cells = next;
        self.recount();
        debug!(
            changed,
            alive = self.alive_count,
            dead = self.dead_count,
            "Generation computed from snapshot"
        );
        changed
    }

    pub fn step_with(&mut self, mode: UpdateMode) -> usize {
        match mode {
            UpdateMode::InPlace => self.step(),
            UpdateMode::DoubleBuffered => self.step_double_buffered(),
        }
    }

    /// Row-major text rendering, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.side_length);
        for row in self.cells.chunks(self.side_length) {
            for cell in row {
                out.push_str(cell.glyph());
            }
            out.push('\n');
        }
        out
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    fn recount(&mut self) {
        self.alive_count = self.cells.iter().filter(|c| c.is_alive()).count();
        self.dead_count = self.cells.len() - self.alive_count;
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row * self.side_length + pos.col
    }

    fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.side_length, index % self.side_length)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
