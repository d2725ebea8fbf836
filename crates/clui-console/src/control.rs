//! ASCII control codes and the keys that produce them on xterm-like terminals.

use std::fmt;

/// A single-byte control code: C0 (`0x00..=0x1F`), `SPACE` and `DEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlCode {
    Nul = 0,
    Soh = 1,
    Stx = 2,
    Etx = 3,
    Eot = 4,
    Enq = 5,
    Ack = 6,
    Bel = 7,
    Bs = 8,
    Tab = 9,
    Lf = 10,
    Vt = 11,
    Ff = 12,
    Cr = 13,
    So = 14,
    Si = 15,
    Dle = 16,
    Dc1 = 17,
    Dc2 = 18,
    Dc3 = 19,
    Dc4 = 20,
    Nak = 21,
    Syn = 22,
    Etb = 23,
    Can = 24,
    Em = 25,
    Sub = 26,
    Esc = 27,
    Fs = 28,
    Gs = 29,
    Rs = 30,
    Us = 31,
    Space = 32,
    Del = 127,
}

/// `(code, symbolic name, key combinations)`, ordered by byte value.
const TABLE: [(ControlCode, &str, &[&str]); 34] = [
    (ControlCode::Nul, "NUL", &["Ctrl-Space", "Ctrl-@", "Ctrl-2"]),
    (ControlCode::Soh, "SOH", &["Ctrl-a"]),
    (ControlCode::Stx, "STX", &["Ctrl-b"]),
    (ControlCode::Etx, "ETX", &["Ctrl-c"]),
    (ControlCode::Eot, "EOT", &["Ctrl-d"]),
    (ControlCode::Enq, "ENQ", &["Ctrl-e"]),
    (ControlCode::Ack, "ACK", &["Ctrl-f"]),
    (ControlCode::Bel, "BEL", &["Ctrl-g"]),
    (ControlCode::Bs, "BS", &["Ctrl-h", "Ctrl-Backspace"]),
    (ControlCode::Tab, "TAB", &["Tab", "Ctrl-i"]),
    (ControlCode::Lf, "LF", &["Enter", "Ctrl-j"]),
    (ControlCode::Vt, "VT", &["Ctrl-k"]),
    (ControlCode::Ff, "FF", &["Ctrl-l"]),
    (ControlCode::Cr, "CR", &["Enter", "Ctrl-m"]),
    (ControlCode::So, "SO", &["Ctrl-n"]),
    (ControlCode::Si, "SI", &["Ctrl-o"]),
    (ControlCode::Dle, "DLE", &["Ctrl-p"]),
    (ControlCode::Dc1, "DC1", &["Ctrl-q"]),
    (ControlCode::Dc2, "DC2", &["Ctrl-r"]),
    (ControlCode::Dc3, "DC3", &["Ctrl-s"]),
    (ControlCode::Dc4, "DC4", &["Ctrl-t"]),
    (ControlCode::Nak, "NAK", &["Ctrl-u"]),
    (ControlCode::Syn, "SYN", &["Ctrl-v"]),
    (ControlCode::Etb, "ETB", &["Ctrl-w"]),
    (ControlCode::Can, "CAN", &["Ctrl-x"]),
    (ControlCode::Em, "EM", &["Ctrl-y"]),
    (ControlCode::Sub, "SUB", &["Ctrl-z"]),
    (ControlCode::Esc, "ESC", &["Esc", "Ctrl-[", "Ctrl-3"]),
    (ControlCode::Fs, "FS", &["Ctrl-\\", "Ctrl-4"]),
    (ControlCode::Gs, "GS", &["Ctrl-]", "Ctrl-5"]),
    (ControlCode::Rs, "RS", &["Ctrl-^", "Ctrl-6"]),
    (ControlCode::Us, "US", &["Ctrl-_", "Ctrl-/", "Ctrl-7"]),
    (ControlCode::Space, "SPACE", &["Space"]),
    (ControlCode::Del, "DEL", &["Backspace", "Ctrl-8"]),
];

impl ControlCode {
    /// Control code for a raw byte, if it is one.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0..=32 => Some(TABLE[usize::from(byte)].0),
            127 => Some(Self::Del),
            _ => None,
        }
    }

    /// Control code produced by `Ctrl` plus an ASCII letter.
    #[must_use]
    pub fn from_ctrl_letter(letter: char) -> Option<Self> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let byte = u8::try_from(letter.to_ascii_lowercase()).ok()?;
        Self::from_byte(byte - b'a' + 1)
    }

    #[must_use]
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Symbolic ASCII name, e.g. `ETX`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Key combinations that generate this code, most common first.
    #[must_use]
    pub fn keys(self) -> &'static [&'static str] {
        self.entry().2
    }

    /// Every known control code, by byte value.
    pub fn all() -> impl Iterator<Item = Self> {
        TABLE.iter().map(|entry| entry.0)
    }

    fn entry(self) -> &'static (ControlCode, &'static str, &'static [&'static str]) {
        let index = match self {
            Self::Del => TABLE.len() - 1,
            other => usize::from(other.byte()),
        };
        &TABLE[index]
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keys()[0])
    }
}
