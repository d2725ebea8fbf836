//! Progress indicator: a scalable bar followed by counter and percent labels.
//!
//! ```text
//! [################                ]   50/100  50%
//! ```

use std::any::Any;

use serde::Deserialize;

use crate::bar::Bar;
use crate::constants::{DEFAULT_CONTAINER_WIDTH, MIN_BAR_WIDTH, PERCENT_LABEL_WIDTH};
use crate::container::{distribute_width, Slot};
use crate::error::UiError;
use crate::label::TextLabel;
use crate::view::{Alignment, View};
use crate::widget::Widget;

/// Construction options for [`ProgressIndicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndicatorOptions {
    /// Initial value, `0..=range`.
    pub value: u64,
    /// Show `value/range`.
    pub show_counter: bool,
    /// Show the integer percentage.
    pub show_percents: bool,
    /// Total width in characters.
    pub width: usize,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            value: 0,
            show_counter: true,
            show_percents: true,
            width: DEFAULT_CONTAINER_WIDTH,
        }
    }
}

/// Counter-driven progress line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressIndicator {
    range: u64,
    value: u64,
    width: usize,
    active: bool,
    bar: Bar,
    counter: Option<TextLabel>,
    percents: Option<TextLabel>,
}

impl ProgressIndicator {
    pub fn new(range: u64, options: IndicatorOptions) -> Result<Self, UiError> {
        if range == 0 {
            return Err(UiError::ZeroRange);
        }
        if options.value > range {
            return Err(UiError::CounterOutOfRange {
                value: options.value,
                range,
            });
        }
        let mut indicator = Self {
            range,
            value: options.value,
            width: options.width,
            active: false,
            bar: Bar::progress(0.0)?.scalable(),
            counter: options
                .show_counter
                .then(|| TextLabel::new("", Some(counter_width(range)), Alignment::Right)),
            percents: options
                .show_percents
                .then(|| TextLabel::new("", Some(PERCENT_LABEL_WIDTH), Alignment::Right)),
        };
        let min = indicator.min_width();
        if options.width < min {
            return Err(UiError::WidthTooSmall {
                width: options.width,
                min,
            });
        }
        indicator.relayout()?;
        indicator.refresh();
        Ok(indicator)
    }

    /// Indicator with default options.
    pub fn with_range(range: u64) -> Result<Self, UiError> {
        Self::new(range, IndicatorOptions::default())
    }

    #[must_use]
    pub fn range(&self) -> u64 {
        self.range
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Narrowest width the current parts fit in.
    #[must_use]
    pub fn min_width(&self) -> usize {
        MIN_BAR_WIDTH
            + self.counter.as_ref().map_or(0, View::width)
            + self.percents.as_ref().map_or(0, View::width)
    }

    /// `value / range`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        self.value as f64 / self.range as f64
    }

    /// Integer percentage, rounded down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(&self) -> u64 {
        (u128::from(self.value) * 100 / u128::from(self.range)) as u64
    }

    /// Mark the indicator as drawn.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Mark the indicator as no longer drawn.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.refresh();
    }

    /// Increment by one, saturating at the range.
    pub fn inc(&mut self) {
        if self.value < self.range {
            self.value += 1;
            self.refresh();
        }
    }

    /// Decrement by one, saturating at zero.
    pub fn dec(&mut self) {
        if self.value > 0 {
            self.value -= 1;
            self.refresh();
        }
    }

    pub fn set_value(&mut self, value: u64) -> Result<(), UiError> {
        if value > self.range {
            return Err(UiError::CounterOutOfRange {
                value,
                range: self.range,
            });
        }
        self.value = value;
        self.refresh();
        Ok(())
    }

    pub fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        let min = self.min_width();
        if width < min {
            return Err(UiError::WidthTooSmall { width, min });
        }
        self.width = width;
        self.relayout()
    }

    /// Change the range, clamping the value.
    ///
    /// When the counter needs more digits the indicator grows to its new
    /// minimum width; it never shrinks on its own.
    pub fn set_range(&mut self, range: u64) -> Result<(), UiError> {
        if range == 0 {
            return Err(UiError::ZeroRange);
        }
        self.value = self.value.min(range);
        if self.counter.is_some() && digits(range) != digits(self.range) {
            self.counter = Some(TextLabel::new(
                "",
                Some(counter_width(range)),
                Alignment::Right,
            ));
            self.width = self.width.max(self.min_width());
        }
        self.range = range;
        self.relayout()?;
        self.refresh();
        Ok(())
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut line = View::render(&self.bar);
        if let Some(counter) = &self.counter {
            line.push_str(&View::render(counter));
        }
        if let Some(percents) = &self.percents {
            line.push_str(&View::render(percents));
        }
        line
    }

    fn relayout(&mut self) -> Result<(), UiError> {
        let mut slots = vec![Slot::scalable(MIN_BAR_WIDTH)];
        slots.extend(self.counter.as_ref().map(|c| Slot::fixed(View::width(c))));
        slots.extend(self.percents.as_ref().map(|p| Slot::fixed(View::width(p))));
        let widths = distribute_width(self.width, &slots)?;
        View::set_width(&mut self.bar, widths[0])
    }

    fn refresh(&mut self) {
        self.bar.set_ratio_clamped(self.ratio());
        let (value, range, percent) = (self.value, self.range, self.percent());
        if let Some(counter) = &mut self.counter {
            counter.set_value(format!("{value}/{range}"));
        }
        if let Some(percents) = &mut self.percents {
            percents.set_value(format!("{percent}%"));
        }
    }
}

fn digits(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Room for `range/range` plus a separating blank.
fn counter_width(range: u64) -> usize {
    2 * (digits(range) + 1)
}

impl Widget for ProgressIndicator {
    fn render(&self) -> String {
        ProgressIndicator::render(self)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        ProgressIndicator::set_width(self, width)
    }

    fn ratio(&self) -> Option<f64> {
        Some(ProgressIndicator::ratio(self))
    }

    fn caption(&self) -> Option<String> {
        Some(format!("{}/{} {}%", self.value, self.range, self.percent()))
    }

    fn is_active(&self) -> bool {
        self.active
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

    fn indicator(range: u64, value: u64, width: usize) -> ProgressIndicator {
        ProgressIndicator::new(
            range,
            IndicatorOptions {
                value,
                width,
                ..IndicatorOptions::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn default_layout() {
        let ind = indicator(100, 50, 80);
        let line = ind.render();
        assert_eq!(line.chars().count(), 80);
        let expected = format!("[{}{}]  50/100  50%", "#".repeat(32), " ".repeat(33));
        assert_eq!(line, expected);
    }

    #[test]
    fn minimum_width_accounts_for_parts() {
        assert_eq!(indicator(100, 0, 80).min_width(), 18);
        assert_eq!(indicator(9, 0, 80).min_width(), 14);
        let bare = ProgressIndicator::new(
            10,
            IndicatorOptions {
                show_counter: false,
                show_percents: false,
                width: 5,
                ..IndicatorOptions::default()
            },
        )
        .unwrap();
        assert_eq!(bare.min_width(), 5);
    }

    #[test]
    fn rejects_invalid_construction() {
        assert_eq!(
            ProgressIndicator::with_range(0),
            Err(UiError::ZeroRange)
        );
        let err = ProgressIndicator::new(
            10,
            IndicatorOptions {
                value: 11,
                ..IndicatorOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, UiError::CounterOutOfRange { value: 11, range: 10 });
        let err = ProgressIndicator::new(
            100,
            IndicatorOptions {
                width: 17,
                ..IndicatorOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, UiError::WidthTooSmall { width: 17, min: 18 });
    }

    #[test]
    fn inc_and_dec_saturate() {
        let mut ind = indicator(3, 0, 20);
        for _ in 0..5 {
            ind.inc();
        }
        assert_eq!(ind.value(), 3);
        assert_eq!(ind.percent(), 100);
        for _ in 0..5 {
            ind.dec();
        }
        assert_eq!(ind.value(), 0);
    }

    #[test]
    fn set_value_validates() {
        let mut ind = indicator(10, 0, 30);
        ind.set_value(3).unwrap();
        assert_eq!(ind.render(), format!("[#####{}]  3/10  30%", " ".repeat(12)));
        assert!(ind.set_value(11).is_err());
        assert_eq!(ind.value(), 3);
        ind.reset();
        assert_eq!(ind.value(), 0);
    }

    #[test]
    fn start_and_stop_toggle_activity() {
        let mut ind = indicator(10, 0, 30);
        assert!(!ind.is_active());
        ind.start();
        assert!(Widget::is_active(&ind));
        ind.stop();
        assert!(!ind.is_active());
    }

    #[test]
    fn set_width_respects_minimum() {
        let mut ind = indicator(100, 100, 80);
        assert!(ind.set_width(17).is_err());
        ind.set_width(18).unwrap();
        assert_eq!(ind.render(), "[###] 100/100 100%");
    }

    #[test]
    fn set_range_grows_counter() {
        let mut ind = indicator(100, 100, 18);
        ind.set_range(1000).unwrap();
        assert_eq!(ind.width(), 20);
        assert_eq!(ind.render(), "[   ]  100/1000  10%");
    }

    #[test]
    fn set_range_clamps_value_and_keeps_width() {
        let mut ind = indicator(100, 100, 18);
        ind.set_range(50).unwrap();
        assert_eq!(ind.value(), 50);
        assert_eq!(ind.width(), 18);
        assert_eq!(ind.render(), "[#####] 50/50 100%");
        assert_eq!(ind.min_width(), 16);
        ind.set_width(16).unwrap();
        assert_eq!(ind.render().chars().count(), 16);
    }

    #[test]
    fn set_range_rejects_zero() {
        let mut ind = indicator(10, 5, 30);
        assert_eq!(ind.set_range(0), Err(UiError::ZeroRange));
        assert_eq!(ind.range(), 10);
    }

    #[test]
    fn percent_only_layout() {
        let ind = ProgressIndicator::new(
            3,
            IndicatorOptions {
                value: 1,
                show_counter: false,
                width: 20,
                ..IndicatorOptions::default()
            },
        )
        .unwrap();
        assert_eq!(ind.render(), format!("[####{}]  33%", " ".repeat(9)));
    }

    #[test]
    fn caption_summarises_state() {
        let ind = indicator(4, 1, 20);
        assert_eq!(Widget::caption(&ind).as_deref(), Some("1/4 25%"));
        assert_eq!(Widget::ratio(&ind), Some(0.25));
    }

    #[test]
    fn huge_range_does_not_overflow_percent() {
        let ind = indicator(u64::MAX, u64::MAX / 2, 60);
        assert_eq!(ind.percent(), 49);
    }
}
