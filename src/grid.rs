use crate::error::{LifeError, Result};
use crate::settings::check_probability;
use rand::Rng;

/// Relative offsets of the 8-cell Moore neighborhood as (row, col)
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Default chance that a randomized cell starts alive
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

/// Fixed-size, non-wrapping rectangle of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid. Zero-sized dimensions are rejected.
    pub fn empty(rows: usize, cols: usize) -> Result<Self> {
        Self::from_fn(rows, cols, |_, _| Cell::Dead)
    }

    /// Each cell alive independently with `alive_probability`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_probability(alive_probability)?;
        Self::from_fn(rows, cols, |_, _| {
            if rng.gen_bool(alive_probability) {
                Cell::Alive
            } else {
                Cell::Dead
            }
        })
    }

    /// Build a grid by evaluating `f(row, col)` for every position
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Cell) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// Same-sized grid with every cell replaced by `f(row, col, cell)`
    pub fn map(&self, mut f: impl FnMut(usize, usize, Cell) -> Cell) -> Grid {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| f(i / self.cols, i % self.cols, cell))
            .collect();
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Cell at (row, col), or None outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.contains(row, col).then(|| self.cells[self.index(row, col)])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Flip one cell, returning its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = self.cells[idx].toggled();
        Ok(self.cells[idx])
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(LifeError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Count live cells among the 8 neighbors. Offsets that leave the grid
    /// are skipped; there is no wraparound.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for &(dr, dc) in &MOORE_OFFSETS {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if self.is_alive(nr, nc) {
                count += 1;
            }
        }
        count
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Positions of all live cells in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// Row slices, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }
}
