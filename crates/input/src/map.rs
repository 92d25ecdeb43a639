//! Key mapping from terminal events to board commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{GameAction, Pos, SessionPhase};

/// Player intent decoded from a single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Click the cursor cell, or press the overlay button
    Confirm,
    /// Drop the current selection
    Cancel,
}

/// Map keyboard input to board commands.
pub fn handle_key_event(key: KeyEvent) -> Option<UiCommand> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiCommand::CursorUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiCommand::CursorDown)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiCommand::CursorLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiCommand::CursorRight)
        }

        KeyCode::Enter | KeyCode::Char(' ') => Some(UiCommand::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(UiCommand::Cancel),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translate a non-movement command into the engine action it stands for.
///
/// Confirm clicks the cursor cell while playing and presses the overlay
/// button otherwise. Cancel re-clicks the selected cell, which deselects it.
/// Cursor movement never reaches the engine.
pub fn command_to_action(
    cmd: UiCommand,
    phase: SessionPhase,
    cursor: Pos,
    selected: Option<Pos>,
) -> Option<GameAction> {
    match cmd {
        UiCommand::Confirm => Some(match phase {
            SessionPhase::Playing => GameAction::CellClicked(cursor),
            SessionPhase::AwaitingStart => GameAction::StartLevel,
            SessionPhase::LevelWon => GameAction::AdvanceLevel,
            SessionPhase::OutOfMoves => GameAction::RetryLevel,
            SessionPhase::SessionComplete => GameAction::RestartSession,
        }),
        UiCommand::Cancel if phase == SessionPhase::Playing => {
            selected.map(GameAction::CellClicked)
        }
        _ => None,
    }
}
