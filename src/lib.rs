//! Gem Rush (workspace facade crate).
//!
//! Re-exports the `gem_rush::{core,input,term,types}` API while the
//! implementation lives in dedicated crates under `crates/`.

pub use gem_rush_core as core;
pub use gem_rush_input as input;
pub use gem_rush_term as term;
pub use gem_rush_types as types;
