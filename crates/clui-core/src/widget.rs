//! Widgets held by the store, their identifiers, snapshots, and events.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::error::UiError;

/// A line widget that can live in a [`WidgetStore`](crate::store::WidgetStore).
pub trait Widget: Send + Sync + 'static {
    /// Render the widget as one line.
    fn render(&self) -> String;

    /// Current width in characters.
    fn width(&self) -> usize;

    /// Resize the widget.
    fn set_width(&mut self, width: usize) -> Result<(), UiError>;

    /// Completion ratio in `[0.0, 1.0]`, for widgets that have one.
    fn ratio(&self) -> Option<f64> {
        None
    }

    /// Short text summarising the state (used by gauges).
    fn caption(&self) -> Option<String> {
        None
    }

    /// Inactive widgets are kept in the store but not drawn.
    fn is_active(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Identifier of a registered widget. Ordered by registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed handle returned by registration.
pub struct WidgetHandle<W> {
    id: WidgetId,
    _kind: PhantomData<fn() -> W>,
}

impl<W> WidgetHandle<W> {
    pub(crate) fn new(id: WidgetId) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }
}

impl<W> Clone for WidgetHandle<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for WidgetHandle<W> {}

impl<W> fmt::Debug for WidgetHandle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetHandle").field(&self.id).finish()
    }
}

/// Display state of one widget at one revision.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub id: WidgetId,
    /// Store-wide revision, increasing with every emitted event.
    pub revision: u64,
    pub title: String,
    pub line: String,
    pub ratio: Option<f64>,
    pub caption: Option<String>,
    pub active: bool,
    pub width: usize,
}

/// What happened to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The widget became active (or was registered active).
    Started,
    /// An active widget renders a different line.
    Changed,
    /// The widget became inactive.
    Stopped,
    /// The widget left the store.
    Removed,
}

/// Notification sent to store observers.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEvent {
    pub kind: EventKind,
    pub snapshot: WidgetSnapshot,
}

impl WidgetEvent {
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.snapshot.id
    }
}
