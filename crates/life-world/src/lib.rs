//! Game of Life engine.
//!
//! This crate holds the square cell grid with its generation update and the
//! run loop that renders generations until the population stabilizes.

pub mod grid;
pub mod simulation;

pub use grid::Grid;
pub use simulation::{GenerationReport, Outcome, Renderer, Simulation, StopToken};
