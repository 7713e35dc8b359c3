//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Action(GameAction),
    Quit,
}

/// Map a key event to a shell command. Releases and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    handle_key_event(key).map(KeyCommand::Action)
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let KeyCode::Char(ch) = key.code else {
        return match key.code {
            KeyCode::Left => Some(GameAction::MoveLeft),
            KeyCode::Right => Some(GameAction::MoveRight),
            KeyCode::Down => Some(GameAction::SoftDrop),
            KeyCode::Up => Some(GameAction::RotateCw),
            _ => None,
        };
    };

    match ch.to_ascii_lowercase() {
        'h' | 'a' => Some(GameAction::MoveLeft),
        'l' | 'd' => Some(GameAction::MoveRight),
        'j' | 's' => Some(GameAction::SoftDrop),
        'k' | 'w' | 'x' => Some(GameAction::RotateCw),
        'z' | 'y' => Some(GameAction::RotateCcw),
        ' ' => Some(GameAction::HardDrop),
        'c' => Some(GameAction::Hold),
        'g' => Some(GameAction::ToggleGhost),
        'p' => Some(GameAction::Pause),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL))
}
