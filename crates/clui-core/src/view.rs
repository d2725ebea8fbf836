//! Base trait for single-line views and text alignment.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::UiError;

/// A single-line view that renders to exactly `width()` characters.
pub trait View: Send + Sync {
    /// Render the view as a string of `width()` characters.
    fn render(&self) -> String;

    /// Current width in characters.
    fn width(&self) -> usize;

    /// Smallest width the view accepts. Equals `width()` for fixed views.
    fn min_width(&self) -> usize {
        self.width()
    }

    /// Whether a container may change the width of this view.
    fn is_scalable(&self) -> bool {
        false
    }

    /// Change the width. Fixed views reject any change.
    fn set_width(&mut self, width: usize) -> Result<(), UiError>;
}

/// Horizontal alignment of text inside a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Pad `text` with spaces on the side(s) given by the alignment.
    #[must_use]
    pub fn pad(self, text: &str, width: usize) -> String {
        let len = text.chars().count();
        let remains = width.saturating_sub(len);
        let (left, right) = match self {
            Self::Left => (0, remains),
            Self::Right => (remains, 0),
            Self::Center => (remains / 2, remains - remains / 2),
        };
        let mut out = String::with_capacity(text.len() + remains);
        out.extend(std::iter::repeat(' ').take(left));
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(right));
        out
    }
}

impl FromStr for Alignment {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "c" | "center" | "centre" => Ok(Self::Center),
            "r" | "right" => Ok(Self::Right),
            _ => Err(UiError::InvalidAlignment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Alignment {
    type Error = UiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Left => "l",
            Self::Center => "c",
            Self::Right => "r",
        };
        f.write_str(code)
    }
}
