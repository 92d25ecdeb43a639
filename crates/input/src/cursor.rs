//! Keyboard cursor over the board.

use crate::types::Pos;

/// Cursor position, always clamped to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Pos,
    size: usize,
}

impl Cursor {
    /// Start in the middle of a `size` x `size` board
    pub fn new(size: usize) -> Self {
        let mid = size / 2;
        Self {
            pos: Pos::new(mid, mid),
            size,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Adopt a new board size, keeping the cursor on the board
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        let last = size.saturating_sub(1);
        self.pos.row = self.pos.row.min(last);
        self.pos.col = self.pos.col.min(last);
    }

    /// Move by one step; returns false when already at the edge
    pub fn step(&mut self, d_row: isize, d_col: isize) -> bool {
        let last = self.size.saturating_sub(1) as isize;
        let row = (self.pos.row as isize + d_row).clamp(0, last) as usize;
        let col = (self.pos.col as isize + d_col).clamp(0, last) as usize;
        let moved = row != self.pos.row || col != self.pos.col;
        self.pos = Pos::new(row, col);
        moved
    }
}
