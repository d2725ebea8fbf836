//! Where input events come from.

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::control::ControlCode;
use crate::decoder::KeyDecoder;
use crate::key::{InputEvent, Key, Modifiers, SpecialKey};

/// A blocking source of input events.
pub trait EventSource {
    /// Wait up to `timeout` for input.
    ///
    /// `Ok(Some(vec![]))` means nothing arrived in time, `Ok(None)` means
    /// the input has ended for good.
    fn next_events(&mut self, timeout: Duration) -> io::Result<Option<Vec<InputEvent>>>;
}

/// Portable source backed by crossterm's event reader.
#[derive(Debug, Default)]
pub struct CrosstermSource;

impl CrosstermSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermSource {
    fn next_events(&mut self, timeout: Duration) -> io::Result<Option<Vec<InputEvent>>> {
        let mut events = Vec::new();
        if !event::poll(timeout)? {
            return Ok(Some(events));
        }
        loop {
            match event::read()? {
                Event::Key(key) => events.extend(translate_key(&key).map(InputEvent::Key)),
                Event::Resize(width, height) => events.push(InputEvent::Resize { width, height }),
                _ => {}
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(Some(events))
    }
}

/// Map a crossterm key event onto a [`Key`]. Releases are dropped.
#[must_use]
pub fn translate_key(event: &KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let mods = event.modifiers;
    let modifiers = Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
    };
    let special = |key| Key::Special { key, modifiers };
    let key = match event.code {
        KeyCode::Char(c) if modifiers.ctrl => match ControlCode::from_ctrl_letter(c) {
            Some(code) => Key::Control(code),
            None => Key::Unknown(c.to_string().into_bytes()),
        },
        KeyCode::Char(c) if modifiers.alt => Key::Alt(c),
        KeyCode::Char(' ') => Key::Control(ControlCode::Space),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Control(ControlCode::Cr),
        KeyCode::Tab => Key::Control(ControlCode::Tab),
        KeyCode::Backspace => Key::Control(ControlCode::Del),
        KeyCode::Esc => Key::Control(ControlCode::Esc),
        KeyCode::Null => Key::Control(ControlCode::Nul),
        KeyCode::BackTab => Key::special(SpecialKey::BackTab),
        KeyCode::Up => special(SpecialKey::Up),
        KeyCode::Down => special(SpecialKey::Down),
        KeyCode::Left => special(SpecialKey::Left),
        KeyCode::Right => special(SpecialKey::Right),
        KeyCode::Home => special(SpecialKey::Home),
        KeyCode::End => special(SpecialKey::End),
        KeyCode::Insert => special(SpecialKey::Insert),
        KeyCode::Delete => special(SpecialKey::Delete),
        KeyCode::PageUp => special(SpecialKey::PageUp),
        KeyCode::PageDown => special(SpecialKey::PageDown),
        KeyCode::F(n) => special(SpecialKey::F(n)),
        _ => return None,
    };
    Some(key)
}

/// POSIX-style source: raw bytes from a reader, decoded per burst.
///
/// A background thread forwards whatever the reader yields. Bytes arriving
/// within the settle window of each other are decoded together, which is
/// how an escape sequence is told apart from separate keystrokes.
///
/// The reader thread blocks in `read`, so it only exits after one more byte
/// or end of input; it is detached rather than joined.
pub struct RawByteSource {
    chunks: Receiver<Vec<u8>>,
    decoder: KeyDecoder,
    settle: Duration,
}

impl RawByteSource {
    pub fn spawn<R>(mut reader: R, settle: Duration) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        thread::Builder::new()
            .name("clui-stdin".into())
            .spawn(move || {
                let mut buf = [0u8; 64];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            if tx.send(buf[..n].to_vec()).is_err() {
                                break;
                            }
                        }
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                        Err(err) => {
                            warn!(error = %err, "Raw input reader failed");
                            break;
                        }
                    }
                }
                debug!("Raw input reader finished");
            })?;
        Ok(Self {
            chunks: rx,
            decoder: KeyDecoder::new(),
            settle,
        })
    }

    /// Read the process's standard input.
    pub fn stdin(settle: Duration) -> io::Result<Self> {
        Self::spawn(io::stdin(), settle)
    }
}

impl EventSource for RawByteSource {
    fn next_events(&mut self, timeout: Duration) -> io::Result<Option<Vec<InputEvent>>> {
        let mut burst = match self.chunks.recv_timeout(timeout) {
            Ok(chunk) => chunk,
            Err(RecvTimeoutError::Timeout) => return Ok(Some(Vec::new())),
            Err(RecvTimeoutError::Disconnected) => return Ok(None),
        };
        while let Ok(more) = self.chunks.recv_timeout(self.settle) {
            burst.extend(more);
        }
        let keys = self.decoder.feed(&burst);
        Ok(Some(keys.into_iter().map(InputEvent::Key).collect()))
    }
}
