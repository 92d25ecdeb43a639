//! Cascade resolution - clear, drop, refill, repeat until stable
//!
//! One cascade step:
//!
//! 1. Award `POINTS_PER_GEM` for every matched cell
//! 2. Empty the matched cells
//! 3. Gravity: compact each column's gems toward the bottom, preserving order
//! 4. Refill: draw fresh gems for the empty cells left at the top of each
//!    column (column by column, top to bottom; no match-free guarantee)
//! 5. Detect matches again; a non-empty set starts the next step
//!
//! The whole chain runs synchronously. Each step is recorded as a
//! [`CascadeStep`] so a presentation layer can replay it at its own pace.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::GemSource;
use crate::types::{Gem, Pos, MAX_GRID_SIZE};

/// A gem moved down its column by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub col: usize,
    pub from_row: usize,
    pub to_row: usize,
    pub gem: Gem,
}

impl Fall {
    pub fn from(&self) -> Pos {
        Pos::new(self.from_row, self.col)
    }

    pub fn to(&self) -> Pos {
        Pos::new(self.to_row, self.col)
    }
}

/// Everything that changed during one clear/drop/refill pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Cells cleared, row-major
    pub matched: Vec<Pos>,
    /// Points awarded for this step alone
    pub points: u32,
    /// Gravity moves in the order they were applied
    pub falls: Vec<Fall>,
    /// Freshly drawn gems
    pub refills: Vec<(Pos, Gem)>,
}

impl CascadeStep {
    /// Replay this step on a grid holding the state the step started from
    pub fn apply_to(&self, grid: &mut Grid) {
        for &pos in &self.matched {
            grid.set(pos, None);
        }
        for fall in &self.falls {
            grid.set(fall.to(), Some(fall.gem));
            grid.set(fall.from(), None);
        }
        for &(pos, gem) in &self.refills {
            grid.set(pos, Some(gem));
        }
    }
}

/// Ordered description of a full cascade chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    start: Grid,
    steps: Vec<CascadeStep>,
    total_points: u32,
}

impl CascadeReport {
    /// Grid as it was right before the first removal (after the swap)
    pub fn start(&self) -> &Grid {
        &self.start
    }

    pub fn steps(&self) -> &[CascadeStep] {
        &self.steps
    }

    /// Number of chained steps (0 when nothing matched)
    pub fn chain_len(&self) -> usize {
        self.steps.len()
    }

    /// Sum of points across every step
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Split into the starting grid and the step list
    pub fn into_parts(self) -> (Grid, Vec<CascadeStep>) {
        (self.start, self.steps)
    }
}

impl IntoIterator for CascadeReport {
    type Item = CascadeStep;
    type IntoIter = std::vec::IntoIter<CascadeStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Resolve `initial` and every chain reaction it causes.
///
/// Mutates `grid` into a match-free, full state and returns the description
/// of every step. An empty `initial` set resolves to zero steps.
pub fn resolve<R: GemSource + ?Sized>(
    grid: &mut Grid,
    kinds: u8,
    initial: MatchSet,
    rng: &mut R,
) -> CascadeReport {
    let start = grid.clone();
    let mut steps = Vec::new();
    let mut total_points: u32 = 0;
    let mut matches = initial;

    while !matches.is_empty() {
        let points = matches.points();
        total_points = total_points.saturating_add(points);

        for pos in matches.iter() {
            grid.set(pos, None);
        }
        let falls = apply_gravity(grid);
        let refills = refill(grid, kinds, rng);

        log::debug!(
            "cascade step {}: {} matched, {} fell, {} refilled",
            steps.len() + 1,
            matches.len(),
            falls.len(),
            refills.len()
        );

        steps.push(CascadeStep {
            matched: matches.into_iter().collect(),
            points,
            falls,
            refills,
        });

        matches = find_matches(grid);
    }

    CascadeReport {
        start,
        steps,
        total_points,
    }
}

/// Compact every column downward, keeping the relative order of its gems.
///
/// Returns the moves in application order: column by column, bottom-most gem first.
pub fn apply_gravity(grid: &mut Grid) -> Vec<Fall> {
    let n = grid.size();
    let mut falls = Vec::new();

    for col in 0..n {
        // Survivors bottom to top.
        let mut column: ArrayVec<(usize, Gem), MAX_GRID_SIZE> = ArrayVec::new();
        for row in (0..n).rev() {
            if let Some(gem) = grid.get(Pos::new(row, col)) {
                column.push((row, gem));
            }
        }

        let mut write_row = n;
        for (from_row, gem) in column {
            write_row -= 1;
            if write_row != from_row {
                grid.set(Pos::new(write_row, col), Some(gem));
                grid.set(Pos::new(from_row, col), None);
                falls.push(Fall {
                    col,
                    from_row,
                    to_row: write_row,
                    gem,
                });
            }
        }
    }

    falls
}

/// Fill every empty cell with a fresh gem, column by column, top to bottom
pub fn refill<R: GemSource + ?Sized>(grid: &mut Grid, kinds: u8, rng: &mut R) -> Vec<(Pos, Gem)> {
    let n = grid.size();
    let mut refills = Vec::new();

    for col in 0..n {
        for row in 0..n {
            let pos = Pos::new(row, col);
            if grid.get(pos).is_none() {
                let gem = rng.next_gem(kinds);
                grid.set(pos, Some(gem));
                refills.push((pos, gem));
            }
        }
    }

    refills
}
