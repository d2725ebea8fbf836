//! Splits bursts of raw terminal bytes into logical keys.

use crate::control::ControlCode;
use crate::csi::{parse_escape, utf8_len};
use crate::key::Key;

const ESC: u8 = 0x1b;

fn is_continuation(byte: u8) -> bool {
    (0x80..=0xbf).contains(&byte)
}

/// Stateful byte-to-key decoder.
///
/// Each call to [`feed`](Self::feed) handles one burst: the bytes a terminal
/// delivered for one or more simultaneous keystrokes. An escape sequence is
/// never split across bursts, but a multi-byte UTF-8 character may be, so an
/// incomplete character is kept until the next burst.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes waiting for the rest of a UTF-8 character.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Key> {
        let mut data = std::mem::take(&mut self.pending);
        data.extend_from_slice(bytes);

        let mut keys = Vec::new();
        let mut i = 0;
        while i < data.len() {
            let byte = data[i];
            if byte == ESC {
                let (key, used) = parse_escape(&data[i..]);
                keys.push(key);
                i += used;
            } else if let Some(code) = ControlCode::from_byte(byte) {
                keys.push(Key::Control(code));
                i += 1;
            } else {
                let Some(len) = utf8_len(byte) else {
                    keys.push(Key::Char(char::REPLACEMENT_CHARACTER));
                    i += 1;
                    continue;
                };
                let tail = &data[i + 1..data.len().min(i + len)];
                let continued = tail.iter().take_while(|b| is_continuation(**b)).count();
                if continued < tail.len() {
                    // A non-continuation byte cuts the character short; it
                    // starts the next key.
                    keys.push(Key::Char(char::REPLACEMENT_CHARACTER));
                    i += 1 + continued;
                } else if i + len > data.len() {
                    self.pending = data[i..].to_vec();
                    break;
                } else {
                    match std::str::from_utf8(&data[i..i + len]) {
                        Ok(s) => keys.extend(s.chars().map(Key::Char)),
                        Err(_) => keys.push(Key::Char(char::REPLACEMENT_CHARACTER)),
                    }
                    i += len;
                }
            }
        }
        keys
    }

    /// Drop any partial character.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
