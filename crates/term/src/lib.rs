//! Terminal presentation for the gem board.
//!
//! Rendering goes through a small framebuffer that is diffed and flushed with
//! crossterm, instead of a widget toolkit. The view is pure so it can be
//! tested without a terminal, and the animator replays engine events at a
//! readable pace.

pub mod animator;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gem_rush_core as core;
pub use gem_rush_types as types;

pub use animator::{CascadeAnimator, Stage};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{overlay_lines, BoardOverlay, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
