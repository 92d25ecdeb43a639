//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`UiCommand`]s, moves a board [`Cursor`], and
//! turns the confirm key into the [`crate::types::GameAction`] that fits the
//! current session phase.

pub mod cursor;
pub mod map;

pub use gem_rush_types as types;

pub use cursor::Cursor;
pub use map::{command_to_action, handle_key_event, should_quit, UiCommand};
