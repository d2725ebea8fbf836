//! Progress bar and slider views.

use std::any::Any;

use crate::constants::MIN_BAR_WIDTH;
use crate::error::UiError;
use crate::view::View;
use crate::widget::Widget;

/// How a bar draws its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// `[####    ]`
    Progress,
    /// `<---I--->`
    Slider,
}

/// A bar showing a ratio in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    style: BarStyle,
    value: f64,
    width: usize,
    scalable: bool,
}

impl Bar {
    /// Create a fixed-width bar.
    pub fn new(style: BarStyle, value: f64, width: usize) -> Result<Self, UiError> {
        check_ratio(value)?;
        check_width(width)?;
        Ok(Self {
            style,
            value,
            width,
            scalable: false,
        })
    }

    /// Fixed progress bar of the minimum width.
    pub fn progress(value: f64) -> Result<Self, UiError> {
        Self::new(BarStyle::Progress, value, MIN_BAR_WIDTH)
    }

    /// Fixed slider of the minimum width.
    pub fn slider(value: f64) -> Result<Self, UiError> {
        Self::new(BarStyle::Slider, value, MIN_BAR_WIDTH)
    }

    /// Let containers resize this bar.
    #[must_use]
    pub fn scalable(mut self) -> Self {
        self.scalable = true;
        self
    }

    #[must_use]
    pub fn style(&self) -> BarStyle {
        self.style
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) -> Result<(), UiError> {
        check_ratio(value)?;
        self.value = value;
        Ok(())
    }

    pub(crate) fn set_ratio_clamped(&mut self, value: f64) {
        self.value = value.clamp(0.0, 1.0);
    }

    /// Cells between the two borders.
    fn inner(&self) -> usize {
        self.width - 2
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn scaled(&self, cells: usize) -> usize {
        ((self.value * cells as f64) as usize).min(cells)
    }
}

fn check_ratio(value: f64) -> Result<(), UiError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(UiError::RatioOutOfRange(value))
    }
}

fn check_width(width: usize) -> Result<(), UiError> {
    if width < MIN_BAR_WIDTH {
        Err(UiError::WidthTooSmall {
            width,
            min: MIN_BAR_WIDTH,
        })
    } else {
        Ok(())
    }
}

impl View for Bar {
    fn render(&self) -> String {
        let inner = self.inner();
        let mut out = String::with_capacity(self.width);
        match self.style {
            BarStyle::Progress => {
                let filled = self.scaled(inner);
                out.push('[');
                out.extend(std::iter::repeat('#').take(filled));
                out.extend(std::iter::repeat(' ').take(inner - filled));
                out.push(']');
            }
            BarStyle::Slider => {
                let pos = 1 + self.scaled(inner - 1);
                out.push('<');
                out.extend(std::iter::repeat('-').take(pos - 1));
                out.push('I');
                out.extend(std::iter::repeat('-').take(inner - pos));
                out.push('>');
            }
        }
        out
    }

    fn width(&self) -> usize {
        self.width
    }

    fn min_width(&self) -> usize {
        if self.scalable {
            MIN_BAR_WIDTH
        } else {
            self.width
        }
    }

    fn is_scalable(&self) -> bool {
        self.scalable
    }

    fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        if !self.scalable {
            return Err(UiError::FixedWidth(self.width));
        }
        check_width(width)?;
        self.width = width;
        Ok(())
    }
}

impl Widget for Bar {
    fn render(&self) -> String {
        View::render(self)
    }

    fn width(&self) -> usize {
        View::width(self)
    }

    fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        View::set_width(self, width)
    }

    fn ratio(&self) -> Option<f64> {
        Some(self.value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
