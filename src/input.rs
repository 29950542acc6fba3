use crate::game::Command;
use crate::snake::Direction::*;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

/// Classifies a raw key press. Keys outside the bindings map to `KeyAction::None`.
pub fn classify(ev: &KeyEvent) -> KeyAction {
    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    let command = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Turn(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Turn(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Turn(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Turn(Right),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Command::TogglePause,
        KeyCode::Char(' ') => Command::StartOrResume,
        KeyCode::Enter => Command::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
        _ => return KeyAction::None,
    };

    KeyAction::Game(command)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
