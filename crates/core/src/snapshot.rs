use crate::types::{Cell, Pos, SessionPhase};

/// Everything a renderer needs to draw one frame, detached from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Board edge length, known even before the board is built
    pub size: usize,
    /// Row-major cells; empty while awaiting the level start
    pub cells: Vec<Cell>,
    pub phase: SessionPhase,
    pub selected: Option<Pos>,
    pub processing: bool,
    pub score: u32,
    pub moves_remaining: u32,
    pub level: u32,
    pub level_count: u32,
    pub target: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.size = 0;
        self.cells.clear();
        self.phase = SessionPhase::AwaitingStart;
        self.selected = None;
        self.processing = false;
        self.score = 0;
        self.moves_remaining = 0;
        self.level = 1;
        self.level_count = 0;
        self.target = 0;
    }

    pub fn has_board(&self) -> bool {
        !self.cells.is_empty() && self.cells.len() == self.size * self.size
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        self.cells.get(pos.row * self.size + pos.col).copied().flatten()
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> u32 {
        if self.target == 0 {
            return 100;
        }
        let pct = (self.score as u64 * 100) / self.target as u64;
        pct.min(100) as u32
    }

    /// Whether a click on the board could currently do anything
    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::Playing && !self.processing && self.moves_remaining > 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            size: 0,
            cells: Vec::new(),
            phase: SessionPhase::AwaitingStart,
            selected: None,
            processing: false,
            score: 0,
            moves_remaining: 0,
            level: 1,
            level_count: 0,
            target: 0,
        };
        s.clear();
        s
    }
}
