//! Concrete observer implementations.

use crossbeam_channel::Sender;
use tracing::{debug, trace};

use crate::observer::WidgetObserver;
use crate::widget::{EventKind, WidgetEvent};

/// Forwards events through a channel without blocking.
///
/// Events are dropped when a bounded channel is full.
pub struct ChannelObserver {
    sender: Sender<WidgetEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(sender: Sender<WidgetEvent>) -> Self {
        Self { sender }
    }
}

impl WidgetObserver for ChannelObserver {
    fn on_event(&self, event: &WidgetEvent) {
        let _ = self.sender.try_send(event.clone());
    }
}

/// Traces widget lifecycle events.
pub struct LoggingObserver;

impl LoggingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetObserver for LoggingObserver {
    fn on_event(&self, event: &WidgetEvent) {
        let snap = &event.snapshot;
        match event.kind {
            EventKind::Changed => trace!(
                widget = %snap.id,
                title = %snap.title,
                revision = snap.revision,
                "Widget redrawn"
            ),
            kind => debug!(
                widget = %snap.id,
                title = %snap.title,
                ?kind,
                "Widget lifecycle"
            ),
        }
    }
}

/// Null object: ignores every event.
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetObserver for NoOpObserver {
    fn on_event(&self, _event: &WidgetEvent) {}
}
