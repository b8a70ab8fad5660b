use crate::error::{LifeError, Result};
use crate::grid::DEFAULT_ALIVE_PROBABILITY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest accepted grid side
pub const MIN_DIMENSION: usize = 5;
/// Largest accepted grid side
pub const MAX_DIMENSION: usize = 100;
/// Fastest accepted tick interval (ms)
pub const MIN_TICK_MS: u64 = 10;
/// Slowest accepted tick interval (ms)
pub const MAX_TICK_MS: u64 = 5000;
pub const MIN_CELL_SIZE: u16 = 1;
pub const MAX_CELL_SIZE: u16 = 4;

/// Color used to draw live cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellColor {
    #[default]
    Green,
    Cyan,
    Yellow,
    Magenta,
    White,
}

impl CellColor {
    pub fn name(&self) -> &'static str {
        match self {
            CellColor::Green => "Green",
            CellColor::Cyan => "Cyan",
            CellColor::Yellow => "Yellow",
            CellColor::Magenta => "Magenta",
            CellColor::White => "White",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CellColor::Green => CellColor::Cyan,
            CellColor::Cyan => CellColor::Yellow,
            CellColor::Yellow => CellColor::Magenta,
            CellColor::Magenta => CellColor::White,
            CellColor::White => CellColor::Green,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            CellColor::Green => CellColor::White,
            CellColor::Cyan => CellColor::Green,
            CellColor::Yellow => CellColor::Cyan,
            CellColor::Magenta => CellColor::Yellow,
            CellColor::White => CellColor::Magenta,
        }
    }
}

/// Grid dimensions, timing, and rendering hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Grid ===
    /// Number of rows (5-100)
    pub rows: usize,
    /// Number of columns (5-100)
    pub cols: usize,

    // === Timing ===
    /// Delay between ticks in milliseconds (10-5000)
    pub tick_interval_ms: u64,

    // === Randomize ===
    /// Alive chance used by randomize when none is given (0.0-1.0)
    pub alive_probability: f64,

    // === Rendering hints (no effect on the simulation) ===
    /// Terminal columns per cell; 1 packs cells into Braille dots (1-4)
    pub cell_size: u16,
    pub live_color: CellColor,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 60,
            tick_interval_ms: 200,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            cell_size: 2,
            live_color: CellColor::default(),
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check every field against its documented bounds
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.rows, self.cols)?;
        check_tick_interval(self.tick_interval_ms)?;
        check_probability(self.alive_probability)?;
        check_cell_size(self.cell_size)
    }
}

pub fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    let in_range = |n: usize| (MIN_DIMENSION..=MAX_DIMENSION).contains(&n);
    if in_range(rows) && in_range(cols) {
        Ok(())
    } else {
        Err(LifeError::InvalidDimension { rows, cols })
    }
}

pub fn check_tick_interval(ms: u64) -> Result<()> {
    if (MIN_TICK_MS..=MAX_TICK_MS).contains(&ms) {
        Ok(())
    } else {
        Err(LifeError::out_of_range("tick interval", ms, MIN_TICK_MS, MAX_TICK_MS))
    }
}

pub fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(LifeError::out_of_range("alive probability", p, 0.0, 1.0))
    }
}

pub fn check_cell_size(size: u16) -> Result<()> {
    if (MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(LifeError::out_of_range("cell size", size, MIN_CELL_SIZE, MAX_CELL_SIZE))
    }
}
