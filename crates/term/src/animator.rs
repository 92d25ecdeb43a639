//! Paces engine events for display.
//!
//! The engine settles a whole cascade synchronously; this replays it one step
//! at a time: a match highlight on the board as it was, then a settle frame
//! after the step's removal, gravity and refill were applied.

use std::collections::VecDeque;

use crate::core::{CascadeStep, EngineEvent, Grid};
use crate::game_view::BoardOverlay;
use crate::types::{Pos, MATCH_HIGHLIGHT_MS, SETTLE_MS, SWAP_REVERT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    /// Flashing a swap that was undone
    Revert,
    /// Showing the cells about to be cleared
    Highlight,
    /// Showing the board after the step, fresh cells marked
    Settle,
}

#[derive(Debug, Clone)]
pub struct CascadeAnimator {
    stage: Stage,
    remaining_ms: u32,
    board: Option<Grid>,
    current: Option<CascadeStep>,
    pending: VecDeque<CascadeStep>,
    highlighted: Vec<Pos>,
    fresh: Vec<Pos>,
    rejected: Vec<Pos>,
}

impl Default for CascadeAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeAnimator {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            remaining_ms: 0,
            board: None,
            current: None,
            pending: VecDeque::new(),
            highlighted: Vec::new(),
            fresh: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Start animating an event, dropping whatever was still playing.
    pub fn play(&mut self, event: EngineEvent) {
        self.skip();
        match event {
            EngineEvent::SwapRejected { a, b } => {
                self.rejected.extend([a, b]);
                self.enter(Stage::Revert, SWAP_REVERT_MS);
            }
            EngineEvent::CascadeResolved(report) => {
                let (start, steps) = report.into_parts();
                if steps.is_empty() {
                    return;
                }
                log::debug!("animating {} cascade step(s)", steps.len());
                self.board = Some(start);
                self.pending = steps.into();
                self.next_step();
            }
        }
    }

    /// Advance the clock, crossing as many stage boundaries as needed.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let mut left = elapsed_ms;
        while self.stage != Stage::Idle {
            if left < self.remaining_ms {
                self.remaining_ms -= left;
                return;
            }
            left -= self.remaining_ms;
            self.advance();
        }
    }

    /// Jump to the end; the engine's board is already final.
    pub fn skip(&mut self) {
        self.stage = Stage::Idle;
        self.remaining_ms = 0;
        self.board = None;
        self.current = None;
        self.pending.clear();
        self.highlighted.clear();
        self.fresh.clear();
        self.rejected.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.stage != Stage::Idle
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Board to draw instead of the snapshot's, while a cascade plays
    pub fn board(&self) -> Option<&Grid> {
        self.board.as_ref()
    }

    pub fn highlighted(&self) -> &[Pos] {
        &self.highlighted
    }

    pub fn fresh(&self) -> &[Pos] {
        &self.fresh
    }

    pub fn rejected(&self) -> &[Pos] {
        &self.rejected
    }

    /// Everything the view needs from the animation this frame
    pub fn overlay(&self, cursor: Option<Pos>) -> BoardOverlay<'_> {
        BoardOverlay {
            cursor,
            board: self.board.as_ref(),
            highlighted: &self.highlighted,
            fresh: &self.fresh,
            rejected: &self.rejected,
        }
    }

    fn enter(&mut self, stage: Stage, ms: u32) {
        self.stage = stage;
        self.remaining_ms = ms;
    }

    fn next_step(&mut self) {
        match self.pending.pop_front() {
            Some(step) => {
                self.highlighted.clone_from(&step.matched);
                self.current = Some(step);
                self.enter(Stage::Highlight, MATCH_HIGHLIGHT_MS);
            }
            None => self.skip(),
        }
    }

    fn advance(&mut self) {
        match self.stage {
            Stage::Idle => {}
            Stage::Revert => self.skip(),
            Stage::Highlight => {
                self.highlighted.clear();
                if let (Some(step), Some(board)) = (self.current.take(), self.board.as_mut()) {
                    step.apply_to(board);
                    self.fresh = step.refills.iter().map(|&(pos, _)| pos).collect();
                }
                self.enter(Stage::Settle, SETTLE_MS);
            }
            Stage::Settle => {
                self.fresh.clear();
                self.next_step();
            }
        }
    }
}
