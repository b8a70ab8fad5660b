use crate::error::{LifeError, Result};
use crate::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

/// Largest possible Moore-neighborhood count
pub const MAX_NEIGHBORS: u8 = 8;

/// Which rule threshold a command refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleParam {
    SurviveMin,
    SurviveMax,
    BirthCount,
}

impl RuleParam {
    pub fn name(&self) -> &'static str {
        match self {
            RuleParam::SurviveMin => "survive min",
            RuleParam::SurviveMax => "survive max",
            RuleParam::BirthCount => "birth count",
        }
    }
}

/// Survive range and birth count of a Life-like rule.
///
/// `survive_min > survive_max` is legal and means no live cell survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleParameters {
    pub survive_min: u8,
    pub survive_max: u8,
    pub birth_count: u8,
}

impl Default for RuleParameters {
    /// Conway's B3/S23
    fn default() -> Self {
        Self {
            survive_min: 2,
            survive_max: 3,
            birth_count: 3,
        }
    }
}

impl RuleParameters {
    pub fn new(survive_min: u8, survive_max: u8, birth_count: u8) -> Result<Self> {
        let mut rules = Self::default();
        rules.set(RuleParam::SurviveMin, survive_min)?;
        rules.set(RuleParam::SurviveMax, survive_max)?;
        rules.set(RuleParam::BirthCount, birth_count)?;
        Ok(rules)
    }

    pub fn get(&self, which: RuleParam) -> u8 {
        match which {
            RuleParam::SurviveMin => self.survive_min,
            RuleParam::SurviveMax => self.survive_max,
            RuleParam::BirthCount => self.birth_count,
        }
    }

    /// Set one threshold; values above 8 are rejected and leave `self` untouched
    pub fn set(&mut self, which: RuleParam, value: u8) -> Result<()> {
        if value > MAX_NEIGHBORS {
            return Err(LifeError::out_of_range(which.name(), value, 0, MAX_NEIGHBORS));
        }
        match which {
            RuleParam::SurviveMin => self.survive_min = value,
            RuleParam::SurviveMax => self.survive_max = value,
            RuleParam::BirthCount => self.birth_count = value,
        }
        Ok(())
    }

    /// Check all three thresholds, e.g. after deserializing
    pub fn validate(&self) -> Result<()> {
        Self::new(self.survive_min, self.survive_max, self.birth_count).map(|_| ())
    }

    /// Transition for one cell given its live-neighbor count
    pub fn next_state(&self, cell: Cell, neighbors: u8) -> Cell {
        match cell {
            Cell::Alive if neighbors < self.survive_min || neighbors > self.survive_max => Cell::Dead,
            Cell::Dead if neighbors == self.birth_count => Cell::Alive,
            _ => cell,
        }
    }

    /// Rulestring in B/S notation, e.g. "B3/S23"
    pub fn notation(&self) -> String {
        let survive: String = (self.survive_min..=self.survive_max)
            .map(|n| char::from(b'0' + n))
            .collect();
        format!("B{}/S{}", self.birth_count, survive)
    }
}

/// Compute the next generation.
///
/// Every count and transition reads the same pre-step `grid`; the result is
/// a fresh grid of identical dimensions.
pub fn step(grid: &Grid, rules: &RuleParameters) -> Grid {
    grid.map(|row, col, cell| rules.next_state(cell, grid.live_neighbors(row, col)))
}
