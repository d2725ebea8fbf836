//! The keyboard listener thread.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use clui_core::progress::CancellationToken;
use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::buffer::InputBuffer;
use crate::key::InputEvent;
use crate::source::EventSource;

/// Destination of decoded input events.
pub trait EventSink {
    /// Deliver one event. `false` means the sink is gone for good.
    fn push(&self, event: InputEvent) -> bool;

    /// Whether the listener should keep running.
    fn is_open(&self) -> bool {
        true
    }
}

/// A deactivated buffer closes the sink, so activate it before spawning.
impl EventSink for InputBuffer<InputEvent> {
    fn push(&self, event: InputEvent) -> bool {
        self.put(event);
        self.is_active()
    }

    fn is_open(&self) -> bool {
        self.is_active()
    }
}

impl<T> EventSink for Sender<T>
where
    T: From<InputEvent> + Send,
{
    fn push(&self, event: InputEvent) -> bool {
        self.send(T::from(event)).is_ok()
    }
}

/// Handle to a running listener thread.
///
/// The thread polls its source every `poll` interval and forwards events to
/// the sink until stopped, until the sink rejects an event, or until the
/// input ends. Dropping the handle stops and joins the thread.
pub struct KeyboardListener {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl KeyboardListener {
    pub fn spawn<S, K>(mut source: S, sink: K, poll: Duration) -> io::Result<Self>
    where
        S: EventSource + Send + 'static,
        K: EventSink + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name("clui-input".into())
            .spawn(move || {
                debug!("Input listener started");
                'listen: while !token.is_cancelled() && sink.is_open() {
                    match source.next_events(poll) {
                        Ok(Some(events)) => {
                            for event in events {
                                if token.is_cancelled() || !sink.push(event) {
                                    break 'listen;
                                }
                            }
                        }
                        Ok(None) => break,
                        Err(err) => {
                            warn!(error = %err, "Input source failed");
                            break;
                        }
                    }
                }
                debug!("Input listener stopped");
            })?;
        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    /// Ask the thread to stop after its current poll.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the thread and wait for it.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Input listener panicked");
            }
        }
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use std::collections::VecDeque;
    use std::time::Instant;

    /// Replays scripted batches, then either ends or idles.
    struct Scripted {
        batches: VecDeque<Vec<InputEvent>>,
        end: bool,
    }

    impl EventSource for Scripted {
        fn next_events(&mut self, timeout: Duration) -> io::Result<Option<Vec<InputEvent>>> {
            match self.batches.pop_front() {
                Some(batch) => Ok(Some(batch)),
                None if self.end => Ok(None),
                None => {
                    thread::sleep(timeout);
                    Ok(Some(Vec::new()))
                }
            }
        }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key(Key::Char(c))
    }

    #[test]
    fn forwards_to_buffer_until_input_ends() {
        let buffer = InputBuffer::new();
        buffer.activate();
        let source = Scripted {
            batches: VecDeque::from(vec![vec![key('a'), key('b')], vec![key('c')]]),
            end: true,
        };
        let listener =
            KeyboardListener::spawn(source, buffer.clone(), Duration::from_millis(1)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !listener.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        listener.join();
        let got: Vec<_> = std::iter::from_fn(|| buffer.get()).collect();
        assert_eq!(got, vec![key('a'), key('b'), key('c')]);
    }

    #[test]
    fn forwards_to_channel() {
        let (tx, rx) = crossbeam_channel::unbounded::<InputEvent>();
        let source = Scripted {
            batches: VecDeque::from(vec![vec![key('x')]]),
            end: false,
        };
        let listener = KeyboardListener::spawn(source, tx, Duration::from_millis(1)).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), key('x'));
        listener.stop();
        listener.join();
    }

    #[test]
    fn stops_when_channel_closes() {
        let (tx, rx) = crossbeam_channel::unbounded::<InputEvent>();
        drop(rx);
        let source = Scripted {
            batches: VecDeque::from(vec![vec![key('x')]]),
            end: false,
        };
        let listener = KeyboardListener::spawn(source, tx, Duration::from_millis(1)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !listener.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(listener.is_finished());
    }

    #[test]
    fn deactivated_buffer_stops_the_listener() {
        let buffer = InputBuffer::new();
        buffer.activate();
        let source = Scripted {
            batches: VecDeque::new(),
            end: false,
        };
        let listener =
            KeyboardListener::spawn(source, buffer.clone(), Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(10));
        assert!(!listener.is_finished());

        buffer.deactivate();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !listener.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(listener.is_finished());
    }

    #[test]
    fn drop_stops_idle_listener() {
        let source = Scripted {
            batches: VecDeque::new(),
            end: false,
        };
        let buffer: InputBuffer<InputEvent> = InputBuffer::new();
        let listener = KeyboardListener::spawn(source, buffer, Duration::from_millis(5)).unwrap();
        drop(listener);
    }
}
