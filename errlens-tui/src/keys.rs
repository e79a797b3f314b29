//! Keybinding definitions for the TUI.
//!
//! Keys that map to no action are handed to the input editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Classify,
    LoadExample(usize),
    CheckHealth,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::Classify),
            KeyCode::Char('r') => Some(Action::CheckHealth),
            _ => None,
        };
    }

    if modifiers.contains(KeyModifiers::ALT) {
        return match code {
            KeyCode::Char(c @ '1'..='9') => Some(Action::LoadExample(c as usize - '1' as usize)),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::F(5) => Some(Action::Classify),
        KeyCode::F(n @ 1..=4) => Some(Action::LoadExample(usize::from(n - 1))),
        _ => None,
    }
}
