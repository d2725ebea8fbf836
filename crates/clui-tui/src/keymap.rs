//! Keyboard shortcut handling.

use clui_console::{ControlCode, Key, SpecialKey};

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleLogs,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    None,
}

/// Map a key to an action.
#[must_use]
pub fn map_key(key: &Key) -> KeyAction {
    match key {
        Key::Char('q') | Key::Control(ControlCode::Esc | ControlCode::Etx) => KeyAction::Quit,
        Key::Char('l') => KeyAction::ToggleLogs,
        Key::Special { key, .. } => match key {
            SpecialKey::Up => KeyAction::ScrollUp,
            SpecialKey::Down => KeyAction::ScrollDown,
            SpecialKey::PageUp => KeyAction::PageUp,
            SpecialKey::PageDown => KeyAction::PageDown,
            SpecialKey::Home => KeyAction::Home,
            SpecialKey::End => KeyAction::End,
            _ => KeyAction::None,
        },
        _ => KeyAction::None,
    }
}
