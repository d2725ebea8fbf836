//! Horizontal container and the width distribution rule.

use std::any::Any;
use std::fmt;

use crate::constants::DEFAULT_CONTAINER_WIDTH;
use crate::error::UiError;
use crate::view::View;
use crate::widget::Widget;

/// Layout input for one child of a horizontal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Current width (kept as is for fixed slots).
    pub width: usize,
    /// Minimum width (only meaningful for scalable slots).
    pub min_width: usize,
    pub scalable: bool,
}

impl Slot {
    #[must_use]
    pub fn fixed(width: usize) -> Self {
        Self {
            width,
            min_width: width,
            scalable: false,
        }
    }

    #[must_use]
    pub fn scalable(min_width: usize) -> Self {
        Self {
            width: min_width,
            min_width,
            scalable: true,
        }
    }

    fn required(&self) -> usize {
        if self.scalable {
            self.min_width
        } else {
            self.width
        }
    }

    fn of(view: &dyn View) -> Self {
        Self {
            width: view.width(),
            min_width: view.min_width(),
            scalable: view.is_scalable(),
        }
    }
}

/// Sum of the space the slots need at least.
#[must_use]
pub fn min_total_width(slots: &[Slot]) -> usize {
    slots.iter().map(Slot::required).sum()
}

/// Distribute `total` columns over `slots`.
///
/// Fixed slots keep their width. The free space is split evenly across
/// scalable slots and the last scalable slot also takes the remainder.
pub fn distribute_width(total: usize, slots: &[Slot]) -> Result<Vec<usize>, UiError> {
    let min = min_total_width(slots);
    if total < min {
        return Err(UiError::WidthTooSmall { width: total, min });
    }
    let free = total - min;
    let scalable = slots.iter().filter(|s| s.scalable).count();
    let mut widths: Vec<usize> = slots
        .iter()
        .map(|s| if s.scalable { s.min_width } else { s.width })
        .collect();
    if scalable > 0 {
        let share = free / scalable;
        let remainder = free - share * scalable;
        let mut seen = 0;
        for (width, slot) in widths.iter_mut().zip(slots) {
            if slot.scalable {
                seen += 1;
                *width += share;
                if seen == scalable {
                    *width += remainder;
                }
            }
        }
    }
    Ok(widths)
}

/// Views stacked left to right on one line.
pub struct HContainer {
    width: usize,
    children: Vec<Box<dyn View>>,
}

impl HContainer {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            children: Vec::new(),
        }
    }

    /// Append a view, then re-apply the container width.
    pub fn add(&mut self, view: impl View + 'static) -> Result<(), UiError> {
        self.add_boxed(Box::new(view))
    }

    pub fn add_boxed(&mut self, view: Box<dyn View>) -> Result<(), UiError> {
        let required = Slot::of(view.as_ref()).required();
        let available = self.width - self.min_width();
        if required > available {
            return Err(UiError::DoesNotFit {
                required,
                available,
            });
        }
        self.children.push(view);
        self.set_width(self.width)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn min_width(&self) -> usize {
        min_total_width(&self.slots())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Widths of the children, left to right.
    #[must_use]
    pub fn child_widths(&self) -> Vec<usize> {
        self.children.iter().map(|c| c.width()).collect()
    }

    pub fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        let widths = distribute_width(width, &self.slots())?;
        for (child, w) in self.children.iter_mut().zip(widths) {
            if child.is_scalable() {
                child.set_width(w)?;
            }
        }
        self.width = width;
        Ok(())
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.children.iter().map(|c| c.render()).collect()
    }

    fn slots(&self) -> Vec<Slot> {
        self.children.iter().map(|c| Slot::of(c.as_ref())).collect()
    }
}

impl Default for HContainer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_WIDTH)
    }
}

impl fmt::Debug for HContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HContainer")
            .field("width", &self.width)
            .field("children", &self.child_widths())
            .finish()
    }
}

impl Widget for HContainer {
    fn render(&self) -> String {
        HContainer::render(self)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_width(&mut self, width: usize) -> Result<(), UiError> {
        HContainer::set_width(self, width)
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
    use crate::bar::{Bar, BarStyle};
    use crate::label::TextLabel;
    use crate::view::Alignment;

    #[test]
    fn distribute_splits_free_space() {
        let slots = [Slot::fixed(5), Slot::scalable(5), Slot::scalable(3)];
        assert_eq!(distribute_width(20, &slots).unwrap(), vec![5, 8, 7]);
    }

    #[test]
    fn distribute_without_scalable_keeps_widths() {
        let slots = [Slot::fixed(4), Slot::fixed(6)];
        assert_eq!(distribute_width(30, &slots).unwrap(), vec![4, 6]);
    }

    #[test]
    fn distribute_rejects_narrow_total() {
        let slots = [Slot::fixed(4), Slot::scalable(5)];
        assert_eq!(
            distribute_width(8, &slots),
            Err(UiError::WidthTooSmall { width: 8, min: 9 })
        );
    }

    #[test]
    fn empty_container_renders_nothing() {
        let container = HContainer::new(10);
        assert_eq!(container.render(), "");
        assert_eq!(container.min_width(), 0);
        assert!(container.is_empty());
    }

    #[test]
    fn default_width_is_eighty() {
        assert_eq!(HContainer::default().width(), 80);
    }

    #[test]
    fn add_rescales_children() {
        let mut container = HContainer::new(20);
        container
            .add(TextLabel::new("abcd", Some(5), Alignment::Left))
            .unwrap();
        container
            .add(Bar::new(BarStyle::Progress, 0.5, 5).unwrap().scalable())
            .unwrap();
        container
            .add(TextLabel::variable("ab", None, Alignment::Right).unwrap())
            .unwrap();
        assert_eq!(container.child_widths(), vec![5, 8, 7]);
        assert_eq!(container.min_width(), 13);
        assert_eq!(container.render(), "abcd [###   ]     ab");
    }

    #[test]
    fn add_rejects_when_full() {
        let mut container = HContainer::new(10);
        container
            .add(TextLabel::new("abcdefg", Some(8), Alignment::Left))
            .unwrap();
        let err = container
            .add(Bar::progress(0.0).unwrap().scalable())
            .unwrap_err();
        assert_eq!(
            err,
            UiError::DoesNotFit {
                required: 5,
                available: 2
            }
        );
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn set_width_below_minimum_fails() {
        let mut container = HContainer::new(20);
        container.add(Bar::progress(0.0).unwrap().scalable()).unwrap();
        container
            .add(TextLabel::new("x", Some(6), Alignment::Left))
            .unwrap();
        assert!(container.set_width(10).is_err());
        assert_eq!(container.width(), 20);
        container.set_width(11).unwrap();
        assert_eq!(container.child_widths(), vec![5, 6]);
    }

    #[test]
    fn render_width_matches_container() {
        let mut container = HContainer::new(33);
        container.add(Bar::slider(0.5).unwrap().scalable()).unwrap();
        container.add(Bar::progress(0.5).unwrap().scalable()).unwrap();
        container
            .add(TextLabel::new("label", None, Alignment::Center))
            .unwrap();
        assert_eq!(container.render().chars().count(), 33);
    }
}
