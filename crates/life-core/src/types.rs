//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(&self) -> bool {
        *self == CellState::Alive
    }

    /// Console glyph for this state
    pub fn glyph(&self) -> &'static str {
        match self {
            CellState::Dead => " - ",
            CellState::Alive => " X ",
        }
    }

    /// Apply the transition rules given the number of live neighbors.
    pub fn next(self, live_neighbors: u8) -> CellState {
        match (self, live_neighbors) {
            // Reproduction
            (CellState::Dead, 3) => CellState::Alive,
            // Underpopulation
            (CellState::Alive, n) if n < 2 => CellState::Dead,
            // Overpopulation
            (CellState::Alive, n) if n > 3 => CellState::Dead,
            (state, _) => state,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Cell coordinate on a square grid, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self, side_length: usize) -> bool {
        self.row < side_length && self.col < side_length
    }

    /// Move one cell in `direction`. Returns `None` when the result leaves
    /// `[0, side_length)` on either axis; there is no wraparound.
    pub fn step(&self, direction: Direction, side_length: usize) -> Option<Position> {
        let (dr, dc) = direction.to_delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let pos = Position::new(row, col);
        pos.in_bounds(side_length).then_some(pos)
    }

    /// In-bounds neighbors of this position (at most 8)
    pub fn neighbors(&self, side_length: usize) -> impl Iterator<Item = Position> {
        let origin = *self;
        Direction::all()
            .into_iter()
            .filter_map(move |dir| origin.step(dir, side_length))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight neighbor directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// (row, col) offset
    pub fn to_delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_rules() {
        assert_eq!(CellState::Dead.next(3), CellState::Alive);
        assert_eq!(CellState::Dead.next(2), CellState::Dead);
        assert_eq!(CellState::Dead.next(4), CellState::Dead);

        assert_eq!(CellState::Alive.next(0), CellState::Dead);
        assert_eq!(CellState::Alive.next(1), CellState::Dead);
        assert_eq!(CellState::Alive.next(2), CellState::Alive);
        assert_eq!(CellState::Alive.next(3), CellState::Alive);
        assert_eq!(CellState::Alive.next(4), CellState::Dead);
        assert_eq!(CellState::Alive.next(8), CellState::Dead);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(CellState::Dead.glyph(), " - ");
        assert_eq!(CellState::Alive.to_string(), " X ");
    }

    #[test]
    fn test_position_step_stays_in_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::North, 5), None);
        assert_eq!(corner.step(Direction::West, 5), None);
        assert_eq!(corner.step(Direction::SouthEast, 5), Some(Position::new(1, 1)));

        let far = Position::new(4, 4);
        assert_eq!(far.step(Direction::South, 5), None);
        assert_eq!(far.step(Direction::NorthWest, 5), Some(Position::new(3, 3)));
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(Position::new(0, 0).neighbors(5).count(), 3);
        assert_eq!(Position::new(0, 2).neighbors(5).count(), 5);
        assert_eq!(Position::new(2, 2).neighbors(5).count(), 8);
        assert_eq!(Position::new(0, 0).neighbors(1).count(), 0);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.to_delta(), (-1, 0));
        assert_eq!(Direction::South.to_delta(), (1, 0));
        assert_eq!(Direction::East.to_delta(), (0, 1));
        assert_eq!(Direction::West.to_delta(), (0, -1));
    }
}
