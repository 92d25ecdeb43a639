//! Swap validation - exchanges two neighbours only when it creates a match
//!
//! The swap is applied optimistically and the match detector runs on the
//! result. Without a match the two gems are swapped back, leaving the grid
//! exactly as it was.

use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::types::Pos;

/// Result of a swap attempt on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Session is not accepting swaps (not playing, resolving, or out of moves)
    Blocked,
    /// Positions are not orthogonal neighbours on the board; nothing touched
    NotAdjacent,
    /// Swap produced no run and was reverted
    NoMatch,
    /// Swap committed; these cells match on the post-swap grid
    Matched(MatchSet),
}

impl SwapOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, SwapOutcome::Matched(_))
    }

    pub fn matches(&self) -> Option<&MatchSet> {
        match self {
            SwapOutcome::Matched(m) => Some(m),
            _ => None,
        }
    }
}

/// Attempt to swap `a` and `b` on `grid`.
///
/// On [`SwapOutcome::Matched`] the grid keeps the swapped gems; otherwise it is
/// left unchanged.
pub fn try_swap(grid: &mut Grid, a: Pos, b: Pos) -> SwapOutcome {
    if !grid.contains(a) || !grid.contains(b) || !a.is_adjacent(b) {
        return SwapOutcome::NotAdjacent;
    }

    grid.swap(a, b);
    let matches = find_matches(grid);
    if matches.is_empty() {
        grid.swap(a, b);
        return SwapOutcome::NoMatch;
    }

    SwapOutcome::Matched(matches)
}
