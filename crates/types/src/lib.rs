//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield is a square grid addressed by `(row, col)`:
//!
//! - **Rows** are indexed top to bottom, starting at 0
//! - **Columns** are indexed left to right, starting at 0
//! - **Gravity** pulls gems toward the highest row index
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 8 | Rows and columns of the shipped board |
//! | `DEFAULT_GEM_KINDS` | 6 | Distinct gem symbols |
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `POINTS_PER_GEM` | 10 | Points awarded per matched cell |
//!
//! # Presentation Pacing
//!
//! Timing values are in milliseconds. They pace animation only and never
//! influence engine state:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SWAP_REVERT_MS` | 300 | Flash shown before a matchless swap reverts |
//! | `MATCH_HIGHLIGHT_MS` | 500 | Matched cells stay highlighted |
//! | `SETTLE_MS` | 600 | Fallen and refilled cells settle |
//!
//! # Examples
//!
//! ```
//! use gem_rush_types::{GameAction, Pos, SessionPhase, DEFAULT_GRID_SIZE};
//!
//! let a = Pos::new(2, 3);
//! assert!(a.is_adjacent(Pos::new(2, 4)));
//! assert!(!a.is_adjacent(Pos::new(3, 4)));
//!
//! let action = GameAction::from_str("startLevel").unwrap();
//! assert_eq!(action, GameAction::StartLevel);
//!
//! assert_eq!(SessionPhase::Playing.as_str(), "playing");
//! assert_eq!(DEFAULT_GRID_SIZE, 8);
//! ```

/// Rows and columns of the default board
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Number of distinct gem symbols on the default board
pub const DEFAULT_GEM_KINDS: u8 = 6;

/// Smallest accepted board edge
pub const MIN_GRID_SIZE: usize = 3;

/// Largest accepted board edge
pub const MAX_GRID_SIZE: usize = 16;

/// Smallest accepted alphabet (fewer kinds can stall the match-free fill)
pub const MIN_GEM_KINDS: u8 = 3;

/// Largest accepted alphabet
pub const MAX_GEM_KINDS: u8 = 8;

/// Shortest horizontal or vertical run that counts as a match
pub const MIN_RUN: usize = 3;

/// Points awarded for each matched cell in a cascade step
pub const POINTS_PER_GEM: u32 = 10;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a rejected swap stays visible before it reverts
pub const SWAP_REVERT_MS: u32 = 300;

/// How long matched cells stay highlighted before removal
pub const MATCH_HIGHLIGHT_MS: u32 = 500;

/// How long fallen and refilled cells are marked after gravity
pub const SETTLE_MS: u32 = 600;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_rule_defaults() {
        assert_eq!(DEFAULT_GRID_SIZE, 8);
        assert_eq!(DEFAULT_GEM_KINDS, 6);
        assert_eq!(POINTS_PER_GEM, 10);
        assert_eq!(MIN_RUN, 3);

        assert_eq!(SWAP_REVERT_MS, 300);
        assert_eq!(MATCH_HIGHLIGHT_MS, 500);
        assert_eq!(SETTLE_MS, 600);
    }

    #[test]
    fn adjacency_is_manhattan_distance_one() {
        let p = Pos::new(4, 4);
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(p.is_adjacent(Pos::new(5, 4)));
        assert!(p.is_adjacent(Pos::new(4, 3)));
        assert!(p.is_adjacent(Pos::new(4, 5)));

        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Pos::new(5, 5)));
        assert!(!p.is_adjacent(Pos::new(4, 6)));
    }
}

/// A gem symbol, an index into the alphabet `0..gem_kinds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gem(pub u8);

impl Gem {
    pub fn index(self) -> u8 {
        self.0
    }
}

/// A cell on the grid
///
/// - `None`: Empty (only observable mid-cascade)
/// - `Some(Gem)`: Cell holds the given gem
pub type Cell = Option<Gem>;

/// A grid coordinate, `(row, col)` with `(0, 0)` the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates
    pub fn distance(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Orthogonal neighbours only; diagonals and the cell itself are not adjacent
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.distance(other) == 1
    }
}

/// Where a session currently is in the level lifecycle
///
/// ```text
/// AwaitingStart -> Playing -> LevelWon       -> AwaitingStart (next level)
///                          -> OutOfMoves     -> AwaitingStart (same level)
///                          -> SessionComplete-> AwaitingStart (level 1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Level overlay shown, no board yet
    AwaitingStart,
    /// Board live, swaps accepted
    Playing,
    /// Target reached and more levels remain
    LevelWon,
    /// Moves exhausted below target
    OutOfMoves,
    /// Target reached on the last configured level
    SessionComplete,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::AwaitingStart => "awaitingStart",
            SessionPhase::Playing => "playing",
            SessionPhase::LevelWon => "levelWon",
            SessionPhase::OutOfMoves => "outOfMoves",
            SessionPhase::SessionComplete => "sessionComplete",
        }
    }
}

/// Inbound events accepted by the engine
///
/// These are produced by the input layer (or tests) and applied with
/// `GameState::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Player clicked the cell at the given position
    CellClicked(Pos),
    /// Leave the level overlay and build a fresh board
    StartLevel,
    /// Move on from a won level
    AdvanceLevel,
    /// Replay the current level after running out of moves
    RetryLevel,
    /// Go back to level 1 after finishing every level
    RestartSession,
}

impl GameAction {
    /// Parse a payload-free action from its camelCase name (case-insensitive)
    ///
    /// `CellClicked` carries a position and cannot be parsed from a bare name.
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_rush_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("advanceLevel"), Some(GameAction::AdvanceLevel));
    /// assert_eq!(GameAction::from_str("RETRYLEVEL"), Some(GameAction::RetryLevel));
    /// assert_eq!(GameAction::from_str("cellClicked"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "startlevel" => Some(GameAction::StartLevel),
            "advancelevel" => Some(GameAction::AdvanceLevel),
            "retrylevel" => Some(GameAction::RetryLevel),
            "restartsession" => Some(GameAction::RestartSession),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CellClicked(_) => "cellClicked",
            GameAction::StartLevel => "startLevel",
            GameAction::AdvanceLevel => "advanceLevel",
            GameAction::RetryLevel => "retryLevel",
            GameAction::RestartSession => "restartSession",
        }
    }
}
