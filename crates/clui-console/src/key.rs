//! Logical keystrokes and input events.

use std::fmt;

use crate::control::ControlCode;

/// Modifier keys reported with special keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        ctrl: false,
    };

    /// Decode an xterm modifier parameter (`1 + shift + 2*alt + 4*ctrl`).
    #[must_use]
    pub fn from_xterm(param: u16) -> Self {
        let bits = param.saturating_sub(1);
        Self {
            shift: bits & 1 != 0,
            alt: bits & 2 != 0,
            ctrl: bits & 4 != 0,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Keys that have no character of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    BackTab,
    F(u8),
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::Home => f.write_str("Home"),
            Self::End => f.write_str("End"),
            Self::Insert => f.write_str("Insert"),
            Self::Delete => f.write_str("Delete"),
            Self::PageUp => f.write_str("PageUp"),
            Self::PageDown => f.write_str("PageDown"),
            Self::BackTab => f.write_str("Shift-Tab"),
            Self::F(n) => write!(f, "F{n}"),
        }
    }
}

/// One logical keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// A single-byte control code (including Enter, Tab, Esc, Backspace).
    Control(ControlCode),
    /// Alt held with a printable character.
    Alt(char),
    /// Arrow, navigation and function keys.
    Special {
        key: SpecialKey,
        modifiers: Modifiers,
    },
    /// An escape sequence nobody knows.
    Unknown(Vec<u8>),
}

impl Key {
    #[must_use]
    pub fn special(key: SpecialKey) -> Self {
        Self::Special {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Compare with a key description such as `q`, `Ctrl-c`, `Esc` or `Alt-x`.
    ///
    /// Control codes match any of their key combinations and their symbolic
    /// name.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match self {
            Self::Char(c) => {
                let mut chars = pattern.chars();
                chars.next() == Some(*c) && chars.next().is_none()
            }
            Self::Control(code) => code.name() == pattern || code.keys().contains(&pattern),
            _ => self.to_string() == pattern,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Control(code) => write!(f, "{code}"),
            Self::Alt(c) => write!(f, "Alt-{c}"),
            Self::Special { key, modifiers } => {
                if modifiers.ctrl {
                    f.write_str("Ctrl-")?;
                }
                if modifiers.alt {
                    f.write_str("Alt-")?;
                }
                if modifiers.shift {
                    f.write_str("Shift-")?;
                }
                write!(f, "{key}")
            }
            Self::Unknown(bytes) => {
                f.write_str("Unknown(")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b:02x}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// What an event source delivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { width: u16, height: u16 },
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}
