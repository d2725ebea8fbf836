//! Text labels with fixed or variable width.

use std::any::Any;

use crate::error::UiError;
use crate::view::{Alignment, View};
use crate::widget::Widget;

/// A text label.
///
/// A fixed label keeps its width and truncates values that do not fit,
/// always leaving one blank column. A variable label grows with its value
/// (`len + 1`) and can be widened by a container.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    value: String,
    width: usize,
    min_width: usize,
    alignment: Alignment,
    variable: bool,
}

impl TextLabel {
    /// Create a fixed-width label.
    ///
    /// `None` or `Some(0)` sizes the label to the value plus one column.
    #[must_use]
    pub fn new(value: impl Into<String>, width: Option<usize>, alignment: Alignment) -> Self {
        let value = value.into();
        let width = match width {
            Some(w) if w > 0 => w,
            _ => natural_width(&value),
        };
        Self {
            value,
            width,
            min_width: width,
            alignment,
            variable: false,
        }
    }

    /// Create a variable-width label.
    pub fn variable(
        value: impl Into<String>,
        width: Option<usize>,
        alignment: Alignment,
    ) -> Result<Self, UiError> {
        let value = value.into();
        let min_width = natural_width(&value);
        let width = match width {
            None | Some(0) => min_width,
            Some(w) if w >= min_width => w,
            Some(w) => return Err(UiError::WidthTooSmall { width: w, min: min_width }),
        };
        Ok(Self {
            value,
            width,
            min_width,
            alignment,
            variable: true,
        })
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Alignment used for padding.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Whether the label resizes with its value.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.variable
    }

    /// Replace the text. A variable label resizes to the new value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.variable {
            self.min_width = natural_width(&self.value);
            self.width = self.min_width;
        }
    }

    /// Change the alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }
}

fn natural_width(value: &str) -> usize {
    value.chars().count() + 1
}

impl View for TextLabel {
    fn render(&self) -> String {
        let len = self.value.chars().count();
        if len < self.width {
            self.alignment.pad(&self.value, self.width)
        } else {
            let shown: String = self.value.chars().take(self.width - 1).collect();
            self.alignment.pad(&shown, self.width)
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn min_width(&self) -> usize {
        self.min_width
    }

    fn is_scalable(&self) -> bool {
        self.variable
    }

    fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        if !self.variable {
            return Err(UiError::FixedWidth(self.width));
        }
        if width < self.min_width {
            return Err(UiError::WidthTooSmall {
                width,
                min: self.min_width,
            });
        }
        self.width = width;
        Ok(())
    }
}

impl Widget for TextLabel {
    fn render(&self) -> String {
        View::render(self)
    }

    fn width(&self) -> usize {
        View::width(self)
    }

    fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        View::set_width(self, width)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_width_is_len_plus_one() {
        let label = TextLabel::new("abc", None, Alignment::Left);
        assert_eq!(View::width(&label), 4);
        assert_eq!(View::render(&label), "abc ");
    }

    #[test]
    fn zero_width_means_natural() {
        let label = TextLabel::new("abc", Some(0), Alignment::Left);
        assert_eq!(View::width(&label), 4);
    }

    #[test]
    fn fixed_label_alignments() {
        let left = TextLabel::new("abc", Some(6), Alignment::Left);
        let right = TextLabel::new("abc", Some(6), Alignment::Right);
        let center = TextLabel::new("abc", Some(6), Alignment::Center);
        assert_eq!(View::render(&left), "abc   ");
        assert_eq!(View::render(&right), "   abc");
        assert_eq!(View::render(&center), " abc  ");
    }

    #[test]
    fn fixed_label_truncates_leaving_a_blank() {
        let label = TextLabel::new("abcdef", Some(4), Alignment::Left);
        assert_eq!(View::render(&label), "abc ");
        let label = TextLabel::new("abcdef", Some(4), Alignment::Right);
        assert_eq!(View::render(&label), " abc");
    }

    #[test]
    fn value_equal_to_width_is_truncated() {
        let label = TextLabel::new("abcd", Some(4), Alignment::Left);
        assert_eq!(View::render(&label), "abc ");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let label = TextLabel::new("héllo", Some(3), Alignment::Left);
        assert_eq!(View::render(&label), "hé ");
    }

    #[test]
    fn fixed_label_rejects_set_width() {
        let mut label = TextLabel::new("abc", Some(6), Alignment::Left);
        assert_eq!(View::set_width(&mut label, 10), Err(UiError::FixedWidth(6)));
        assert!(!label.is_scalable());
    }

    #[test]
    fn fixed_label_keeps_width_on_new_value() {
        let mut label = TextLabel::new("abc", Some(6), Alignment::Left);
        label.set_value("a much longer value");
        assert_eq!(View::width(&label), 6);
        assert_eq!(View::render(&label), "a muc ");
    }

    #[test]
    fn variable_label_grows_with_value() {
        let mut label = TextLabel::variable("ab", None, Alignment::Left).unwrap();
        assert_eq!(View::width(&label), 3);
        label.set_value("a much longer value");
        assert_eq!(View::width(&label), 20);
        assert_eq!(View::render(&label), "a much longer value ");
    }

    #[test]
    fn variable_label_rejects_narrow_width() {
        let err = TextLabel::variable("abcd", Some(3), Alignment::Left).unwrap_err();
        assert_eq!(err, UiError::WidthTooSmall { width: 3, min: 5 });

        let mut label = TextLabel::variable("abcd", Some(8), Alignment::Right).unwrap();
        assert_eq!(View::render(&label), "    abcd");
        assert!(View::set_width(&mut label, 4).is_err());
        View::set_width(&mut label, 6).unwrap();
        assert_eq!(View::render(&label), "  abcd");
    }

    #[test]
    fn set_alignment_changes_padding() {
        let mut label = TextLabel::new("ab", Some(4), Alignment::Left);
        label.set_alignment(Alignment::Right);
        assert_eq!(label.alignment(), Alignment::Right);
        assert_eq!(View::render(&label), "  ab");
    }
}
