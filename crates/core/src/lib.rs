//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 grid engine and the session state machine
//! built on top of it. It has **zero dependencies** on rendering, input, or
//! timing, making it:
//!
//! - **Deterministic**: all randomness flows through an injectable [`GemSource`]
//! - **Testable**: boards can be written as text and refills scripted
//! - **Synchronous**: a swap resolves its entire cascade before returning
//!
//! # Module Structure
//!
//! - [`grid`]: N x N board storage and the match-free initial fill
//! - [`matcher`]: detection of horizontal and vertical runs of three or more
//! - [`swap`]: adjacency check and optimistic swap with revert
//! - [`cascade`]: clear / gravity / refill loop and its step-by-step description
//! - [`game_state`]: selection, moves, score, and the level lifecycle
//! - [`config`]: level list and board shape, loadable from JSON
//! - [`rng`]: seeded LCG and scripted gem sources
//! - [`snapshot`]: detached copy of everything a renderer reads
//!
//! # Game Rules
//!
//! - **Swaps**: only orthogonal neighbours; a swap that creates no run is undone
//!   and costs nothing
//! - **Moves**: each committed swap costs exactly one move, however long the chain
//! - **Scoring**: 10 points per matched cell per cascade step
//! - **Cascades**: matched gems vanish, columns fall, the top refills at random,
//!   and new runs keep the chain going
//! - **Levels**: reaching the target wins (checked before running out of moves)
//!
//! # Example
//!
//! ```
//! use gem_rush_core::GameState;
//! use gem_rush_types::{GameAction, Pos, SessionPhase};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::StartLevel);
//! assert_eq!(game.phase(), SessionPhase::Playing);
//!
//! // Select a gem, then click a neighbour to attempt a swap.
//! game.apply_action(GameAction::CellClicked(Pos::new(3, 3)));
//! game.apply_action(GameAction::CellClicked(Pos::new(3, 4)));
//! assert_eq!(game.selected(), None);
//! assert!(game.moves_remaining() >= 19);
//! ```

pub mod cascade;
pub mod config;
pub mod game_state;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod snapshot;
pub mod swap;

pub use gem_rush_types as types;

// Re-export commonly used types for convenience
pub use cascade::{resolve, CascadeReport, CascadeStep, Fall};
pub use config::{ConfigError, GameConfig, LevelConfig};
pub use game_state::{EngineEvent, GameState, ResolvePhase};
pub use grid::Grid;
pub use matcher::{find_matches, has_match, MatchSet};
pub use rng::{GemSource, ScriptedGems, SimpleRng};
pub use snapshot::GameSnapshot;
pub use swap::{try_swap, SwapOutcome};
