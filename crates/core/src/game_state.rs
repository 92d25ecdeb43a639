//! Game state module - one play session
//!
//! Ties the grid engine to level progression: selection handling, swap
//! validation, cascade resolution, scoring, move accounting and the
//! level lifecycle. Everything runs synchronously in response to a single
//! [`GameAction`]; animation pacing is left to whoever consumes the
//! [`EngineEvent`]s.

use crate::cascade::{self, CascadeReport};
use crate::config::{ConfigError, GameConfig, LevelConfig};
use crate::grid::Grid;
use crate::rng::{GemSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::swap::{self, SwapOutcome};
use crate::types::*;

/// Non-reentrant lock guarding the grid while a cascade runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePhase {
    Idle,
    Resolving,
}

/// What the last board-changing action did, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Neighbouring swap produced no match and was undone
    SwapRejected { a: Pos, b: Pos },
    /// Swap committed and the cascade chain settled
    CascadeResolved(CascadeReport),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R: GemSource = SimpleRng> {
    config: GameConfig,
    rng: R,
    /// Present from level start until the session returns to the overlay
    grid: Option<Grid>,
    phase: SessionPhase,
    resolve: ResolvePhase,
    selected: Option<Pos>,
    score: u32,
    moves_remaining: u32,
    /// 1-based index into the configured levels
    level: u32,
    target: u32,
    last_event: Option<EngineEvent>,
}

impl GameState<SimpleRng> {
    /// Create a session with the default level list and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::from_parts(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: GemSource> GameState<R> {
    /// Create a session from a config and a gem source
    pub fn with_source(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, rng))
    }

    fn from_parts(config: GameConfig, rng: R) -> Self {
        let mut state = Self {
            config,
            rng,
            grid: None,
            phase: SessionPhase::AwaitingStart,
            resolve: ResolvePhase::Idle,
            selected: None,
            score: 0,
            moves_remaining: 0,
            level: 1,
            target: 0,
            last_event: None,
        };
        state.enter_awaiting_start();
        state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True while a cascade is in flight; swaps are dropped
    pub fn processing(&self) -> bool {
        self.resolve == ResolvePhase::Resolving
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn is_last_level(&self) -> bool {
        self.level >= self.config.level_count()
    }

    fn level_config(&self) -> LevelConfig {
        // `level` only moves within 1..=level_count and the list is validated non-empty.
        self.config.levels[(self.level as usize) - 1]
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.size = self.config.grid_size;
        out.cells.clear();
        if let Some(grid) = &self.grid {
            out.cells.extend_from_slice(grid.cells());
        }
        out.phase = self.phase;
        out.selected = self.selected;
        out.processing = self.processing();
        out.score = self.score;
        out.moves_remaining = self.moves_remaining;
        out.level = self.level;
        out.level_count = self.config.level_count();
        out.target = self.target;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last swap/cascade event.
    pub fn take_last_event(&mut self) -> Option<EngineEvent> {
        self.last_event.take()
    }

    /// Apply an inbound event. Returns false when the event was ignored.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CellClicked(pos) => self.click_cell(pos),
            GameAction::StartLevel => self.start_level(),
            GameAction::AdvanceLevel => self.advance_level(),
            GameAction::RetryLevel => self.retry_level(),
            GameAction::RestartSession => self.restart_session(),
        }
    }

    /// Leave the overlay: reset score and moves and build a match-free board
    pub fn start_level(&mut self) -> bool {
        if self.phase != SessionPhase::AwaitingStart {
            return false;
        }

        let level = self.level_config();
        self.target = level.target;
        self.moves_remaining = level.moves;
        self.score = 0;
        self.selected = None;
        self.resolve = ResolvePhase::Idle;
        self.last_event = None;
        self.grid = Some(Grid::new_filled(
            self.config.grid_size,
            self.config.gem_kinds,
            &mut self.rng,
        ));
        self.phase = SessionPhase::Playing;

        log::info!(
            "level {} started: target {}, {} moves",
            self.level,
            self.target,
            self.moves_remaining
        );
        true
    }

    pub fn advance_level(&mut self) -> bool {
        if self.phase != SessionPhase::LevelWon {
            return false;
        }
        self.level += 1;
        self.enter_awaiting_start();
        true
    }

    pub fn retry_level(&mut self) -> bool {
        if self.phase != SessionPhase::OutOfMoves {
            return false;
        }
        self.enter_awaiting_start();
        true
    }

    pub fn restart_session(&mut self) -> bool {
        if self.phase != SessionPhase::SessionComplete {
            return false;
        }
        self.level = 1;
        self.enter_awaiting_start();
        true
    }

    fn enter_awaiting_start(&mut self) {
        let level = self.level_config();
        self.phase = SessionPhase::AwaitingStart;
        self.grid = None;
        self.selected = None;
        self.resolve = ResolvePhase::Idle;
        self.score = 0;
        self.target = level.target;
        self.moves_remaining = level.moves;
        log::info!("awaiting start of level {}", self.level);
    }

    /// Selection state machine for a click on `pos`.
    ///
    /// - nothing selected: select `pos`
    /// - `pos` already selected: deselect
    /// - `pos` adjacent to the selection: attempt the swap, clear selection
    /// - otherwise: move the selection to `pos`
    pub fn click_cell(&mut self, pos: Pos) -> bool {
        self.last_event = None;
        if self.phase != SessionPhase::Playing || self.processing() || self.moves_remaining == 0 {
            return false;
        }
        if !self.grid.as_ref().is_some_and(|g| g.contains(pos)) {
            return false;
        }

        match self.selected {
            None => self.selected = Some(pos),
            Some(prev) if prev == pos => self.selected = None,
            Some(prev) if prev.is_adjacent(pos) => {
                self.selected = None;
                self.try_swap(prev, pos);
            }
            Some(_) => self.selected = Some(pos),
        }
        true
    }

    /// Validate and perform a swap, resolving the full cascade on success.
    ///
    /// Exactly one move is spent per committed swap no matter how long the
    /// chain runs. The win/lose check happens once, after the chain settles.
    pub fn try_swap(&mut self, a: Pos, b: Pos) -> SwapOutcome {
        if self.phase != SessionPhase::Playing || self.processing() || self.moves_remaining == 0 {
            return SwapOutcome::Blocked;
        }
        let Some(grid) = self.grid.as_mut() else {
            return SwapOutcome::Blocked;
        };

        let outcome = swap::try_swap(grid, a, b);
        match &outcome {
            SwapOutcome::Blocked | SwapOutcome::NotAdjacent => {}
            SwapOutcome::NoMatch => {
                log::debug!("swap {:?} <-> {:?} reverted", a, b);
                self.last_event = Some(EngineEvent::SwapRejected { a, b });
            }
            SwapOutcome::Matched(matches) => {
                self.resolve = ResolvePhase::Resolving;
                self.moves_remaining -= 1;

                let report =
                    cascade::resolve(grid, self.config.gem_kinds, matches.clone(), &mut self.rng);
                self.score = self.score.saturating_add(report.total_points());
                log::debug!(
                    "swap {:?} <-> {:?}: {} step chain, +{} points",
                    a,
                    b,
                    report.chain_len(),
                    report.total_points()
                );

                self.resolve = ResolvePhase::Idle;
                self.last_event = Some(EngineEvent::CascadeResolved(report));
                self.check_progress();
            }
        }
        outcome
    }

    /// Settled-state evaluation: reaching the target wins even when the same
    /// swap spent the last move.
    fn check_progress(&mut self) {
        if self.score >= self.target {
            self.selected = None;
            self.phase = if self.is_last_level() {
                SessionPhase::SessionComplete
            } else {
                SessionPhase::LevelWon
            };
            log::info!(
                "level {} cleared with {} points ({})",
                self.level,
                self.score,
                self.phase.as_str()
            );
        } else if self.moves_remaining == 0 {
            self.selected = None;
            self.phase = SessionPhase::OutOfMoves;
            log::info!("level {} out of moves at {} points", self.level, self.score);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_matches;
    use crate::rng::ScriptedGems;

    fn small_config(levels: &[(u32, u32)]) -> GameConfig {
        GameConfig {
            grid_size: 3,
            gem_kinds: 3,
            levels: levels
                .iter()
                .enumerate()
                .map(|(i, &(target, moves))| LevelConfig::new(i as u32 + 1, target, moves))
                .collect(),
        }
    }

    /// A session already playing on a hand-made board
    fn playing_on(rows: &[&str], levels: &[(u32, u32)], refills: &[u8]) -> GameState<ScriptedGems> {
        let mut state =
            GameState::with_source(small_config(levels), ScriptedGems::new(refills.to_vec()))
                .unwrap();
        state.phase = SessionPhase::Playing;
        state.grid = Some(Grid::from_rows(rows));
        state
    }

    // Swapping (0,1) <-> (1,1) lines up A A A on row 0; refilling it with
    // B C A leaves a stable board.
    const BOARD: [&str; 3] = ["ABA", "CAC", "BCB"];

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), SessionPhase::AwaitingStart);
        assert!(state.grid().is_none());
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.target(), 500);
        assert_eq!(state.moves_remaining(), 20);
        assert!(!state.processing());
    }

    #[test]
    fn test_start_level_builds_match_free_board() {
        let mut state = GameState::new(7);
        assert!(state.apply_action(GameAction::StartLevel));
        assert_eq!(state.phase(), SessionPhase::Playing);

        let grid = state.grid().unwrap();
        assert_eq!(grid.size(), 8);
        assert!(grid.is_full());
        assert!(find_matches(grid).is_empty());

        // Starting twice is ignored.
        assert!(!state.start_level());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = small_config(&[]);
        assert!(GameState::with_source(config, SimpleRng::new(1)).is_err());
    }

    #[test]
    fn test_selection_state_machine() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[]);

        assert!(state.click_cell(Pos::new(0, 0)));
        assert_eq!(state.selected(), Some(Pos::new(0, 0)));

        // Same cell deselects.
        assert!(state.click_cell(Pos::new(0, 0)));
        assert_eq!(state.selected(), None);

        // Non-adjacent click moves the selection without swapping.
        state.click_cell(Pos::new(0, 0));
        state.click_cell(Pos::new(2, 2));
        assert_eq!(state.selected(), Some(Pos::new(2, 2)));
        assert_eq!(state.grid().unwrap(), &Grid::from_rows(&BOARD));

        // Off-board clicks are ignored.
        assert!(!state.click_cell(Pos::new(3, 0)));
        assert_eq!(state.selected(), Some(Pos::new(2, 2)));
    }

    #[test]
    fn test_adjacent_matchless_click_reverts_and_clears_selection() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[]);

        state.click_cell(Pos::new(2, 1));
        state.click_cell(Pos::new(2, 2));

        assert_eq!(state.selected(), None);
        assert_eq!(state.moves_remaining(), 5);
        assert_eq!(state.grid().unwrap(), &Grid::from_rows(&BOARD));
        assert_eq!(
            state.take_last_event(),
            Some(EngineEvent::SwapRejected {
                a: Pos::new(2, 1),
                b: Pos::new(2, 2)
            })
        );
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_single_match_scores_thirty() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[1, 2, 0]);

        state.click_cell(Pos::new(0, 1));
        state.click_cell(Pos::new(1, 1));

        assert_eq!(state.score(), 30);
        assert_eq!(state.moves_remaining(), 4);
        assert_eq!(state.phase(), SessionPhase::Playing);
        assert!(!state.processing());
        assert_eq!(state.grid().unwrap().to_string(), "BCA\nCBC\nBCB");

        match state.take_last_event() {
            Some(EngineEvent::CascadeResolved(report)) => {
                assert_eq!(report.chain_len(), 1);
                assert_eq!(report.total_points(), 30);
            }
            other => panic!("expected cascade, got {:?}", other),
        }
    }

    #[test]
    fn test_swap_blocked_while_resolving() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[1, 2, 0]);
        state.resolve = ResolvePhase::Resolving;

        assert!(!state.click_cell(Pos::new(0, 1)));
        assert_eq!(
            state.try_swap(Pos::new(0, 1), Pos::new(1, 1)),
            SwapOutcome::Blocked
        );
        assert_eq!(state.moves_remaining(), 5);
        assert_eq!(state.grid().unwrap(), &Grid::from_rows(&BOARD));
    }

    #[test]
    fn test_swap_blocked_without_moves() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[1, 2, 0]);
        state.selected = Some(Pos::new(0, 1));
        state.moves_remaining = 0;

        assert_eq!(
            state.try_swap(Pos::new(0, 1), Pos::new(1, 1)),
            SwapOutcome::Blocked
        );
        assert!(!state.click_cell(Pos::new(1, 1)));
        assert_eq!(state.selected(), Some(Pos::new(0, 1)));
        assert_eq!(state.grid().unwrap(), &Grid::from_rows(&BOARD));
        assert_eq!(state.score(), 0);
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_stale_event_cleared_by_next_click() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[]);

        state.click_cell(Pos::new(2, 1));
        state.click_cell(Pos::new(2, 2));
        // Selecting a cell is not a board change.
        state.click_cell(Pos::new(0, 0));

        assert_eq!(state.selected(), Some(Pos::new(0, 0)));
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_target_reached_wins_level() {
        let mut state = playing_on(&BOARD, &[(30, 5), (60, 5)], &[1, 2, 0]);
        state.try_swap(Pos::new(0, 1), Pos::new(1, 1));

        assert_eq!(state.phase(), SessionPhase::LevelWon);

        // Clicks are ignored once the level is over.
        assert!(!state.click_cell(Pos::new(0, 0)));

        assert!(state.apply_action(GameAction::AdvanceLevel));
        assert_eq!(state.phase(), SessionPhase::AwaitingStart);
        assert_eq!(state.level(), 2);
        assert_eq!(state.score(), 0);
        assert_eq!(state.target(), 60);
        assert!(state.grid().is_none());
    }

    #[test]
    fn test_win_beats_out_of_moves_on_last_move() {
        let mut state = playing_on(&BOARD, &[(30, 1)], &[1, 2, 0]);
        state.try_swap(Pos::new(0, 1), Pos::new(1, 1));

        assert_eq!(state.moves_remaining(), 0);
        assert_eq!(state.phase(), SessionPhase::SessionComplete);
    }

    #[test]
    fn test_out_of_moves_and_retry() {
        let mut state = playing_on(&BOARD, &[(1000, 1)], &[1, 2, 0]);
        state.try_swap(Pos::new(0, 1), Pos::new(1, 1));
        assert_eq!(state.phase(), SessionPhase::OutOfMoves);

        // Wrong lifecycle actions are ignored.
        assert!(!state.apply_action(GameAction::AdvanceLevel));
        assert!(!state.apply_action(GameAction::RestartSession));

        assert!(state.apply_action(GameAction::RetryLevel));
        assert_eq!(state.phase(), SessionPhase::AwaitingStart);
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.moves_remaining(), 1);
    }

    #[test]
    fn test_restart_after_session_complete() {
        let mut state = playing_on(&BOARD, &[(10, 5), (20, 5)], &[1, 2, 0]);
        state.level = 2;
        state.target = 20;
        state.try_swap(Pos::new(0, 1), Pos::new(1, 1));
        assert_eq!(state.phase(), SessionPhase::SessionComplete);

        assert!(state.apply_action(GameAction::RestartSession));
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.target(), 10);
        assert_eq!(state.phase(), SessionPhase::AwaitingStart);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = playing_on(&BOARD, &[(100, 5)], &[]);
        state.click_cell(Pos::new(1, 1));

        let snap = state.snapshot();
        assert_eq!(snap.size, 3);
        assert_eq!(snap.cells.len(), 9);
        assert_eq!(snap.cell(Pos::new(0, 0)), Some(Gem(0)));
        assert_eq!(snap.selected, Some(Pos::new(1, 1)));
        assert_eq!(snap.phase, SessionPhase::Playing);
        assert_eq!(snap.moves_remaining, 5);
        assert_eq!(snap.level_count, 1);
        assert!(snap.playable());
    }
}
