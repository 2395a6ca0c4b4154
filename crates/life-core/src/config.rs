//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Side length used when none is given on the command line
pub const DEFAULT_SIDE_LENGTH: usize = 20;

/// Grid seeding parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Side length of the square grid
    pub side_length: usize,
    /// Probability that a cell starts alive (0.0 to 1.0)
    pub alive_probability: f32,
    /// Random seed; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            side_length: DEFAULT_SIDE_LENGTH,
            alive_probability: 0.2,
            seed: None,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.side_length == 0 {
            return Err(Error::InvalidArgument(
                "grid side length must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(Error::InvalidArgument(format!(
                "alive probability {} is outside [0, 1]",
                self.alive_probability
            )));
        }
        Ok(())
    }
}

/// How a generation is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Cells are overwritten during the scan; later cells see updated neighbors.
    #[default]
    InPlace,
    /// Every cell is evaluated against a snapshot of the previous generation.
    DoubleBuffered,
}

/// Run loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub update_mode: UpdateMode,
    /// Pause between generations (milliseconds)
    pub frame_interval_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            update_mode: UpdateMode::default(),
            frame_interval_ms: 100,
        }
    }
}

impl RunConfig {
    /// Build a run configuration from the optional side length argument.
    pub fn from_side_length_arg(arg: Option<&str>) -> Result<Self> {
        let side_length = parse_side_length(arg)?;
        Ok(Self {
            grid: GridConfig {
                side_length,
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

/// Parse the grid side length given on the command line.
///
/// A missing argument yields [`DEFAULT_SIDE_LENGTH`]. Zero, negative and
/// non-numeric values are rejected with [`Error::InvalidArgument`].
pub fn parse_side_length(arg: Option<&str>) -> Result<usize> {
    let Some(raw) = arg else {
        return Ok(DEFAULT_SIDE_LENGTH);
    };

    let value: i64 = raw.trim().parse().map_err(|_| {
        Error::InvalidArgument(format!("grid side length '{}' is not an integer", raw))
    })?;

    if value <= 0 {
        return Err(Error::InvalidArgument(format!(
            "grid side length must be positive, got {}",
            value
        )));
    }

    usize::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("grid side length {} is too large", value)))
}
