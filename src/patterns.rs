use crate::error::{LifeError, Result};
use crate::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

/// Canonical seed configurations, placed around the grid center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedPattern {
    #[default]
    Glider,
    Blinker,
}

impl SeedPattern {
    pub fn name(&self) -> &'static str {
        match self {
            SeedPattern::Glider => "Glider",
            SeedPattern::Blinker => "Blinker",
        }
    }

    /// Live-cell offsets as (row, col) relative to (rows / 2, cols / 2)
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            SeedPattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            SeedPattern::Blinker => &[(-1, 0), (0, 0), (1, 0)],
        }
    }

    /// Otherwise-empty grid holding this pattern.
    ///
    /// Rejects grids too small to hold every offset instead of clipping.
    pub fn place(&self, rows: usize, cols: usize) -> Result<Grid> {
        let mut grid = Grid::empty(rows, cols)?;
        let (center_row, center_col) = (rows / 2, cols / 2);

        for &(dr, dc) in self.offsets() {
            match (center_row.checked_add_signed(dr), center_col.checked_add_signed(dc)) {
                (Some(r), Some(c)) if grid.contains(r, c) => grid.set(r, c, Cell::Alive)?,
                _ => {
                    return Err(LifeError::PatternTooLarge {
                        pattern: self.name(),
                        rows,
                        cols,
                    })
                }
            }
        }
        Ok(grid)
    }
}

/// Empty grid with a glider anchored at the center
pub fn glider_at(rows: usize, cols: usize) -> Result<Grid> {
    SeedPattern::Glider.place(rows, cols)
}

/// Empty grid with a vertical blinker centered on the center
pub fn blinker_at(rows: usize, cols: usize) -> Result<Grid> {
    SeedPattern::Blinker.place(rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glider_offsets_from_center() {
        let grid = glider_at(10, 12).unwrap();
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(5, 7), (6, 8), (7, 6), (7, 7), (7, 8)]);
    }

    #[test]
    fn test_blinker_is_vertical() {
        let grid = blinker_at(9, 9).unwrap();
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(3, 4), (4, 4), (5, 4)]);
    }

    #[test]
    fn test_smallest_grids_that_fit() {
        assert_eq!(glider_at(5, 5).unwrap().population(), 5);
        assert_eq!(blinker_at(3, 1).unwrap().population(), 3);
    }

    #[test]
    fn test_too_small_grid_rejected() {
        assert!(matches!(
            glider_at(4, 10),
            Err(LifeError::PatternTooLarge { pattern: "Glider", rows: 4, cols: 10 })
        ));
        assert!(matches!(blinker_at(2, 5), Err(LifeError::PatternTooLarge { .. })));
        assert!(matches!(glider_at(0, 10), Err(LifeError::InvalidDimension { .. })));
    }
}
