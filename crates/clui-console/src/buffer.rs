//! Queue between the listener thread and its consumer that doubles as an
//! on/off switch.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

struct Shared<T> {
    queue: Mutex<VecDeque<T>>,
    ready: Condvar,
    active: AtomicBool,
}

/// FIFO of input items with an activity flag.
///
/// While inactive, `put` discards items and `get` yields nothing, so the
/// consumer can switch input on and off without stopping the producer.
/// Clones share the same queue.
pub struct InputBuffer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> InputBuffer<T> {
    /// New, inactive buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(VecDeque::new()),
                ready: Condvar::new(),
                active: AtomicBool::new(false),
            }),
        }
    }

    pub fn activate(&self) {
        self.shared.active.store(true, Ordering::Release);
    }

    /// Switch off; also wakes a consumer blocked in `wait_get`.
    pub fn deactivate(&self) {
        let _queue = self.shared.queue.lock();
        self.shared.active.store(false, Ordering::Release);
        self.shared.ready.notify_all();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Append an item. Ignored while inactive.
    pub fn put(&self, item: T) {
        if !self.is_active() {
            return;
        }
        self.shared.queue.lock().push_back(item);
        self.shared.ready.notify_one();
    }

    /// Oldest item, or `None` when empty or inactive.
    pub fn get(&self) -> Option<T> {
        if !self.is_active() {
            return None;
        }
        self.shared.queue.lock().pop_front()
    }

    /// Like `get`, but waits up to `timeout` for an item.
    pub fn wait_get(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut queue = self.shared.queue.lock();
        loop {
            if !self.is_active() {
                return None;
            }
            if let Some(item) = queue.pop_front() {
                return Some(item);
            }
            if self.shared.ready.wait_until(&mut queue, deadline).timed_out() {
                return if self.is_active() {
                    queue.pop_front()
                } else {
                    None
                };
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.queue.lock().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// Drop queued items, keeping the activity state.
    pub fn clear(&self) {
        self.shared.queue.lock().clear();
    }
}

impl<T> Clone for InputBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for InputBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for InputBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBuffer")
            .field("active", &self.is_active())
            .field("len", &self.len())
            .finish()
    }
}
