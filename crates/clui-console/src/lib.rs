//! # clui-console
//!
//! Keyboard input for console applications: control codes, logical keys,
//! xterm escape-sequence decoding, the input buffer, event sources, and the
//! listener thread that feeds decoded events to a consumer.

pub mod buffer;
pub mod control;
pub(crate) mod csi;
pub mod decoder;
pub mod key;
pub mod listener;
pub mod source;
pub mod terminal;

// Re-exports
pub use buffer::InputBuffer;
pub use control::ControlCode;
pub use decoder::KeyDecoder;
pub use key::{InputEvent, Key, Modifiers, SpecialKey};
pub use listener::{EventSink, KeyboardListener};
pub use source::{CrosstermSource, EventSource, RawByteSource};
pub use terminal::RawModeGuard;
