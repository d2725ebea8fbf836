//! Observer pattern for widget state changes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::widget::WidgetEvent;

/// Receives every event emitted by a widget store.
///
/// Called on the thread that mutated the widget, after the store lock is
/// released.
pub trait WidgetObserver: Send + Sync {
    fn on_event(&self, event: &WidgetEvent);
}

/// A collection of observers notified in registration order.
pub struct ObserverSet {
    observers: RwLock<Vec<Arc<dyn WidgetObserver>>>,
}

impl ObserverSet {
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn register(&self, observer: Arc<dyn WidgetObserver>) {
        self.observers.write().push(observer);
    }

    pub fn clear(&self) {
        self.observers.write().clear();
    }

    pub fn notify(&self, event: &WidgetEvent) {
        // Clone the list so observers may register others while being notified.
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_event(event);
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ObserverSet {
    fn default() -> Self {
        Self::new()
    }
}
