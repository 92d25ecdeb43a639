//! Match detection - finds every run of three or more equal gems
//!
//! Rows and columns are scanned with a sliding window of three. A longer run
//! is covered by its overlapping windows, and the result is a set, so every
//! cell of a run of length L is reported exactly once.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{Pos, MIN_RUN, POINTS_PER_GEM};

/// Deduplicated set of matched coordinates, iterated in row-major order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: BTreeSet<Pos>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: Pos) -> bool {
        self.cells.insert(pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// An empty set means the board is stable
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    /// Score for clearing this set once
    pub fn points(&self) -> u32 {
        self.len() as u32 * POINTS_PER_GEM
    }
}

impl FromIterator<Pos> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MatchSet {
    type Item = Pos;
    type IntoIter = std::collections::btree_set::IntoIter<Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// Scan the whole grid for horizontal and vertical runs. Empty cells never match.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matches = MatchSet::new();
    let n = grid.size();
    if n < MIN_RUN {
        return matches;
    }

    // Horizontal windows.
    for row in 0..n {
        for col in 0..=n - MIN_RUN {
            let window = [
                Pos::new(row, col),
                Pos::new(row, col + 1),
                Pos::new(row, col + 2),
            ];
            mark_window(grid, &window, &mut matches);
        }
    }

    // Vertical windows.
    for col in 0..n {
        for row in 0..=n - MIN_RUN {
            let window = [
                Pos::new(row, col),
                Pos::new(row + 1, col),
                Pos::new(row + 2, col),
            ];
            mark_window(grid, &window, &mut matches);
        }
    }

    matches
}

fn mark_window(grid: &Grid, window: &[Pos; MIN_RUN], matches: &mut MatchSet) {
    let Some(gem) = grid.get(window[0]) else {
        return;
    };
    if window[1..].iter().all(|&p| grid.get(p) == Some(gem)) {
        for &p in window {
            matches.insert(p);
        }
    }
}

/// True when at least one run exists anywhere on the grid
pub fn has_match(grid: &Grid) -> bool {
    !find_matches(grid).is_empty()
}
