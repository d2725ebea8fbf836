//! xterm escape sequences: CSI (`ESC [`) and SS3 (`ESC O`).

use crate::control::ControlCode;
use crate::key::{Key, Modifiers, SpecialKey};

const ESC: u8 = 0x1b;

/// Decode the escape sequence at the start of `data` (`data[0]` is ESC).
///
/// Returns the key and the number of bytes it used.
pub(crate) fn parse_escape(data: &[u8]) -> (Key, usize) {
    debug_assert_eq!(data.first(), Some(&ESC));
    let lone_esc = (Key::Control(ControlCode::Esc), 1);
    let Some(&next) = data.get(1) else {
        return lone_esc;
    };
    match next {
        b'[' => parse_csi(data),
        b'O' => match data.get(2).and_then(|&b| letter_key(b)) {
            Some(key) => (Key::special(key), 3),
            None => (Key::Alt('O'), 2),
        },
        0x20..=0x7e => (Key::Alt(char::from(next)), 2),
        0x80..=0xff => match decode_char(&data[1..]) {
            Some((c, len)) => (Key::Alt(c), 1 + len),
            None => lone_esc,
        },
        _ => lone_esc,
    }
}

fn parse_csi(data: &[u8]) -> (Key, usize) {
    let mut end = 2;
    while data.get(end).is_some_and(|b| (0x30..=0x3f).contains(b)) {
        end += 1;
    }
    let params_end = end;
    while data.get(end).is_some_and(|b| (0x20..=0x2f).contains(b)) {
        end += 1;
    }
    let Some(&last) = data.get(end) else {
        if data.len() == 2 {
            return (Key::Alt('['), 2);
        }
        return (Key::Unknown(data.to_vec()), data.len());
    };
    if !(0x40..=0x7e).contains(&last) {
        return (Key::Unknown(data[..end].to_vec()), end);
    }
    let sequence = &data[..=end];
    let params = parse_params(&data[2..params_end]);
    let modifiers = Modifiers::from_xterm(params.get(1).copied().unwrap_or(1));
    let key = match last {
        b'~' => params.first().and_then(|&n| tilde_key(n)),
        b'Z' => Some(SpecialKey::BackTab),
        other => letter_key(other),
    };
    match key {
        Some(key) => (Key::Special { key, modifiers }, sequence.len()),
        None => (Key::Unknown(sequence.to_vec()), sequence.len()),
    }
}

/// `;`-separated decimal parameters; empty ones default to 1.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|part| {
            std::str::from_utf8(part)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1)
        })
        .collect()
}

fn letter_key(byte: u8) -> Option<SpecialKey> {
    Some(match byte {
        b'A' => SpecialKey::Up,
        b'B' => SpecialKey::Down,
        b'C' => SpecialKey::Right,
        b'D' => SpecialKey::Left,
        b'H' => SpecialKey::Home,
        b'F' => SpecialKey::End,
        b'P' => SpecialKey::F(1),
        b'Q' => SpecialKey::F(2),
        b'R' => SpecialKey::F(3),
        b'S' => SpecialKey::F(4),
        _ => return None,
    })
}

fn tilde_key(code: u16) -> Option<SpecialKey> {
    Some(match code {
        1 | 7 => SpecialKey::Home,
        2 => SpecialKey::Insert,
        3 => SpecialKey::Delete,
        4 | 8 => SpecialKey::End,
        5 => SpecialKey::PageUp,
        6 => SpecialKey::PageDown,
        11 => SpecialKey::F(1),
        12 => SpecialKey::F(2),
        13 => SpecialKey::F(3),
        14 => SpecialKey::F(4),
        15 => SpecialKey::F(5),
        17 => SpecialKey::F(6),
        18 => SpecialKey::F(7),
        19 => SpecialKey::F(8),
        20 => SpecialKey::F(9),
        21 => SpecialKey::F(10),
        23 => SpecialKey::F(11),
        24 => SpecialKey::F(12),
        _ => return None,
    })
}

/// Decode one UTF-8 character at the start of `data`.
pub(crate) fn decode_char(data: &[u8]) -> Option<(char, usize)> {
    let len = utf8_len(*data.first()?)?;
    let bytes = data.get(..len)?;
    let c = std::str::from_utf8(bytes).ok()?.chars().next()?;
    Some((c, len))
}

/// Length of a UTF-8 sequence from its lead byte.
pub(crate) fn utf8_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}
