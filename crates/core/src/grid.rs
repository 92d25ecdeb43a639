//! Grid module - the square board of gems
//!
//! The grid is an N x N matrix stored as a flat, row-major vector.
//! Coordinates are `(row, col)`, row 0 at the top, and gravity pulls toward
//! row N-1. The edge length is fixed when the grid is built.
//!
//! Accessors assert bounds: the engine never generates an out-of-range
//! coordinate, so one showing up is a bug and panics instead of clamping.

use std::fmt;

use crate::rng::GemSource;
use crate::types::{Cell, Gem, Pos, MAX_GRID_SIZE};

/// The game board - N columns x N rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty grid
    ///
    /// Panics if `size` exceeds [`MAX_GRID_SIZE`].
    pub fn new(size: usize) -> Self {
        assert!(size <= MAX_GRID_SIZE, "grid size {} exceeds {}", size, MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid and fill it without any pre-existing run of three.
    ///
    /// Callers must supply at least three gem kinds, otherwise the rejection
    /// loop may never find an acceptable gem.
    pub fn new_filled<R: GemSource + ?Sized>(size: usize, kinds: u8, rng: &mut R) -> Self {
        let mut grid = Self::new(size);
        grid.fill_no_matches(kinds, rng);
        grid
    }

    /// Parse a grid from text rows: `A`..`H` are gems 0..7, `.` is empty.
    ///
    /// Intended for tests and benchmarks; panics on malformed input.
    ///
    /// ```
    /// use gem_rush_core::Grid;
    /// use gem_rush_types::{Gem, Pos};
    ///
    /// let grid = Grid::from_rows(&["AB.", "CAB", "BCA"]);
    /// assert_eq!(grid.get(Pos::new(0, 1)), Some(Gem(1)));
    /// assert_eq!(grid.get(Pos::new(0, 2)), None);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = Self::new(size);
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), size, "row {} is not {} wide", row, size);
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    'A'..='H' => Some(Gem(ch as u8 - b'A')),
                    other => panic!("unexpected cell {:?} at ({}, {})", other, row, col),
                };
                grid.set(Pos::new(row, col), cell);
            }
        }
        grid
    }

    /// Edge length N
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn index(&self, pos: Pos) -> usize {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position ({}, {}) outside {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        pos.row * self.size + pos.col
    }

    /// Whether `pos` lies on the board
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Pos, b: Pos) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells.swap(ia, ib);
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Fill every cell in row-major order, re-rolling any gem that would
    /// complete a run of three with the two cells to its left or the two above.
    ///
    /// Only already-placed neighbours are checked, so no backtracking is needed.
    pub fn fill_no_matches<R: GemSource + ?Sized>(&mut self, kinds: u8, rng: &mut R) {
        for row in 0..self.size {
            for col in 0..self.size {
                let gem = loop {
                    let candidate = rng.next_gem(kinds);
                    if !self.completes_run(row, col, candidate) {
                        break candidate;
                    }
                };
                self.set(Pos::new(row, col), Some(gem));
            }
        }
    }

    fn completes_run(&self, row: usize, col: usize, gem: Gem) -> bool {
        let left = col >= 2
            && self.get(Pos::new(row, col - 1)) == Some(gem)
            && self.get(Pos::new(row, col - 2)) == Some(gem);
        let above = row >= 2
            && self.get(Pos::new(row - 1, col)) == Some(gem)
            && self.get(Pos::new(row - 2, col)) == Some(gem);
        left || above
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get(Pos::new(row, col)) {
                    Some(gem) => (b'A' + gem.index()) as char,
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            if row + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
