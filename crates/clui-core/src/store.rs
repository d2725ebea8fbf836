//! Widget state store shared by task threads and render loops.
//!
//! Every mutation goes through [`WidgetStore::update`] (or a sibling), which
//! re-renders the widget, compares it with the last rendered state, and
//! notifies observers with a [`WidgetEvent`] once the lock is released.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::UiError;
use crate::observer::{ObserverSet, WidgetObserver};
use crate::widget::{EventKind, Widget, WidgetEvent, WidgetHandle, WidgetId, WidgetSnapshot};

struct Entry {
    title: String,
    widget: Box<dyn Widget>,
    line: String,
    active: bool,
}

struct Inner {
    entries: RwLock<BTreeMap<WidgetId, Entry>>,
    next_id: AtomicU64,
    revision: AtomicU64,
    observers: ObserverSet,
}

impl Inner {
    fn next_revision(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn snapshot(&self, id: WidgetId, entry: &Entry, revision: u64) -> WidgetSnapshot {
        WidgetSnapshot {
            id,
            revision,
            title: entry.title.clone(),
            line: entry.line.clone(),
            ratio: entry.widget.ratio(),
            caption: entry.widget.caption(),
            active: entry.active,
            width: entry.widget.width(),
        }
    }

    /// Re-render `entry` and work out which event, if any, the change means.
    fn diff(&self, id: WidgetId, entry: &mut Entry) -> Option<WidgetEvent> {
        let active = entry.widget.is_active();
        let line = entry.widget.render();
        let kind = match (entry.active, active) {
            (false, true) => Some(EventKind::Started),
            (true, false) => Some(EventKind::Stopped),
            (true, true) if line != entry.line => Some(EventKind::Changed),
            _ => None,
        };
        entry.active = active;
        entry.line = line;
        kind.map(|kind| WidgetEvent {
            kind,
            snapshot: self.snapshot(id, entry, self.next_revision()),
        })
    }
}

/// Shared map from widget id to display state.
///
/// Cloning is cheap; all clones see the same widgets and observers.
#[derive(Clone)]
pub struct WidgetStore {
    inner: Arc<Inner>,
}

impl WidgetStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(BTreeMap::new()),
                next_id: AtomicU64::new(1),
                revision: AtomicU64::new(0),
                observers: ObserverSet::new(),
            }),
        }
    }

    /// Add an observer for all future events.
    pub fn subscribe(&self, observer: Arc<dyn WidgetObserver>) {
        self.inner.observers.register(observer);
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observers.count()
    }

    /// Insert a widget. An active widget emits `Started` right away.
    pub fn register<W: Widget>(&self, title: impl Into<String>, widget: W) -> WidgetHandle<W> {
        let id = WidgetId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let event = {
            let mut entries = self.inner.entries.write();
            let entry = Entry {
                title: title.into(),
                line: widget.render(),
                active: widget.is_active(),
                widget: Box::new(widget),
            };
            let event = entry.active.then(|| WidgetEvent {
                kind: EventKind::Started,
                snapshot: self.inner.snapshot(id, &entry, self.inner.next_revision()),
            });
            entries.insert(id, entry);
            event
        };
        if let Some(event) = event {
            self.inner.observers.notify(&event);
        }
        WidgetHandle::new(id)
    }

    /// Mutate a widget with a fallible closure.
    ///
    /// The widget is re-rendered even when the closure fails, since it may
    /// have changed state before failing.
    pub fn try_update<W, R, F>(&self, handle: &WidgetHandle<W>, f: F) -> Result<R, UiError>
    where
        W: Widget,
        F: FnOnce(&mut W) -> Result<R, UiError>,
    {
        let id = handle.id();
        let (result, event) = {
            let mut entries = self.inner.entries.write();
            let entry = entries.get_mut(&id).ok_or(UiError::UnknownWidget(id))?;
            let widget = entry
                .widget
                .as_any_mut()
                .downcast_mut::<W>()
                .ok_or(UiError::UnknownWidget(id))?;
            let result = f(widget);
            (result, self.inner.diff(id, entry))
        };
        if let Some(event) = event {
            self.inner.observers.notify(&event);
        }
        result
    }

    /// Mutate a widget.
    pub fn update<W, R, F>(&self, handle: &WidgetHandle<W>, f: F) -> Result<R, UiError>
    where
        W: Widget,
        F: FnOnce(&mut W) -> R,
    {
        self.try_update(handle, |w| Ok(f(w)))
    }

    /// Read a widget without emitting anything.
    pub fn read<W, R, F>(&self, handle: &WidgetHandle<W>, f: F) -> Result<R, UiError>
    where
        W: Widget,
        F: FnOnce(&W) -> R,
    {
        let id = handle.id();
        let entries = self.inner.entries.read();
        let widget = entries
            .get(&id)
            .and_then(|e| e.widget.as_any().downcast_ref::<W>())
            .ok_or(UiError::UnknownWidget(id))?;
        Ok(f(widget))
    }

    /// Drop a widget from the store, emitting `Removed`.
    pub fn remove<W: Widget>(&self, handle: &WidgetHandle<W>) -> Result<(), UiError> {
        let id = handle.id();
        let event = {
            let mut entries = self.inner.entries.write();
            let entry = entries.remove(&id).ok_or(UiError::UnknownWidget(id))?;
            WidgetEvent {
                kind: EventKind::Removed,
                snapshot: self.inner.snapshot(id, &entry, self.inner.next_revision()),
            }
        };
        self.inner.observers.notify(&event);
        Ok(())
    }

    /// Resize every widget, collecting the ones that refused.
    pub fn resize_all(&self, width: usize) -> Vec<(WidgetId, UiError)> {
        let mut failures = Vec::new();
        let events: Vec<WidgetEvent> = {
            let mut entries = self.inner.entries.write();
            entries
                .iter_mut()
                .filter_map(|(id, entry)| {
                    if let Err(err) = entry.widget.set_width(width) {
                        failures.push((*id, err));
                    }
                    self.inner.diff(*id, entry)
                })
                .collect()
        };
        for event in &events {
            self.inner.observers.notify(event);
        }
        failures
    }

    #[must_use]
    pub fn snapshot(&self, id: WidgetId) -> Option<WidgetSnapshot> {
        let entries = self.inner.entries.read();
        entries.get(&id).map(|entry| {
            let revision = self.inner.revision.load(Ordering::Relaxed);
            self.inner.snapshot(id, entry, revision)
        })
    }

    /// Snapshots of every widget, in registration order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<WidgetSnapshot> {
        let entries = self.inner.entries.read();
        let revision = self.inner.revision.load(Ordering::Relaxed);
        entries
            .iter()
            .map(|(id, entry)| self.inner.snapshot(*id, entry, revision))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetStore")
            .field("widgets", &self.len())
            .field("observers", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::Bar;
    use crate::indicator::{IndicatorOptions, ProgressIndicator};
    use crate::label::TextLabel;
    use crate::observers::ChannelObserver;
    use crate::view::Alignment;
    use crossbeam_channel::Receiver;

    fn observed() -> (WidgetStore, Receiver<WidgetEvent>) {
        let store = WidgetStore::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        store.subscribe(Arc::new(ChannelObserver::new(tx)));
        (store, rx)
    }

    fn indicator(range: u64) -> ProgressIndicator {
        ProgressIndicator::new(
            range,
            IndicatorOptions {
                width: 20,
                ..IndicatorOptions::default()
            },
        )
        .unwrap()
    }

    fn kinds(rx: &Receiver<WidgetEvent>) -> Vec<EventKind> {
        rx.try_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn active_registration_emits_started() {
        let (store, rx) = observed();
        let handle = store.register("label", TextLabel::new("hi", None, Alignment::Left));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, EventKind::Started);
        assert_eq!(event.id(), handle.id());
        assert_eq!(event.snapshot.line, "hi ");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn inactive_registration_is_silent() {
        let (store, rx) = observed();
        store.register("job", indicator(10));
        assert!(rx.try_recv().is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lifecycle_events() {
        let (store, rx) = observed();
        let job = store.register("job", indicator(10));
        store.update(&job, ProgressIndicator::start).unwrap();
        store.update(&job, ProgressIndicator::inc).unwrap();
        store.update(&job, ProgressIndicator::stop).unwrap();
        store.update(&job, ProgressIndicator::inc).unwrap();
        assert_eq!(
            kinds(&rx),
            vec![EventKind::Started, EventKind::Changed, EventKind::Stopped]
        );
        assert_eq!(store.read(&job, ProgressIndicator::value).unwrap(), 2);
    }

    #[test]
    fn unchanged_line_emits_nothing() {
        let (store, rx) = observed();
        let job = store.register("job", indicator(10));
        store.update(&job, ProgressIndicator::start).unwrap();
        let _ = kinds(&rx);
        store.update(&job, ProgressIndicator::dec).unwrap();
        assert!(kinds(&rx).is_empty());
    }

    #[test]
    fn revisions_increase() {
        let (store, rx) = observed();
        let job = store.register("job", indicator(10));
        store.update(&job, ProgressIndicator::start).unwrap();
        for _ in 0..5 {
            store.update(&job, ProgressIndicator::inc).unwrap();
        }
        let revisions: Vec<u64> = rx.try_iter().map(|e| e.snapshot.revision).collect();
        assert_eq!(revisions.len(), 6);
        assert!(revisions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn failed_update_still_reports_partial_change() {
        let (store, rx) = observed();
        let job = store.register("job", indicator(10));
        let result = store.try_update(&job, |w| {
            w.start();
            w.set_value(11)
        });
        assert_eq!(
            result,
            Err(UiError::CounterOutOfRange {
                value: 11,
                range: 10
            })
        );
        assert_eq!(kinds(&rx), vec![EventKind::Started]);
    }

    #[test]
    fn removed_handle_is_unknown() {
        let (store, rx) = observed();
        let bar = store.register("bar", Bar::progress(0.5).unwrap());
        store.remove(&bar).unwrap();
        assert_eq!(kinds(&rx), vec![EventKind::Started, EventKind::Removed]);
        assert_eq!(
            store.update(&bar, |b| b.set_value(1.0)),
            Err(UiError::UnknownWidget(bar.id()))
        );
        assert!(store.remove(&bar).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn snapshots_in_registration_order() {
        let store = WidgetStore::new();
        let a = store.register("a", TextLabel::new("a", None, Alignment::Left));
        let b = store.register("b", Bar::progress(1.0).unwrap());
        let snaps = store.snapshots();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].id, a.id());
        assert_eq!(snaps[1].id, b.id());
        assert_eq!(snaps[1].ratio, Some(1.0));
        assert_eq!(store.snapshot(a.id()).unwrap().title, "a");
        assert!(store.snapshot(WidgetId::new(99)).is_none());
    }

    #[test]
    fn resize_all_reports_failures() {
        let (store, rx) = observed();
        let job = store.register("job", indicator(10));
        store.update(&job, ProgressIndicator::start).unwrap();
        let fixed = store.register("fixed", TextLabel::new("x", Some(3), Alignment::Left));
        let _ = kinds(&rx);

        let failures = store.resize_all(30);
        assert_eq!(failures, vec![(fixed.id(), UiError::FixedWidth(3))]);
        assert_eq!(store.read(&job, ProgressIndicator::width).unwrap(), 30);
        assert_eq!(kinds(&rx), vec![EventKind::Changed]);
    }

    #[test]
    fn clones_share_state_across_threads() {
        let (store, rx) = observed();
        let job = store.register("job", indicator(100));
        store.update(&job, ProgressIndicator::start).unwrap();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.update(&job, ProgressIndicator::inc).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(store.read(&job, ProgressIndicator::value).unwrap(), 100);
        let last = rx.try_iter().max_by_key(|e| e.snapshot.revision).unwrap();
        assert!(last.snapshot.line.ends_with("100/100 100%"));
    }
}
