//! Key-echo demo: prints every keystroke until the stop key.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clui_console::{
    CrosstermSource, InputBuffer, InputEvent, KeyboardListener, RawByteSource, RawModeGuard,
};
use tracing::debug;

use crate::config::{AppConfig, InputKind};

/// Echo keys from `buffer` to `out` until `stop_key` or Ctrl-c is pressed,
/// or until `is_open` reports the input gone. Returns how many keys were
/// echoed.
///
/// Output uses `\r\n` since the terminal is in raw mode.
pub fn echo_keys<W, F>(
    buffer: &InputBuffer<InputEvent>,
    out: &mut W,
    stop_key: &str,
    poll: Duration,
    is_open: F,
) -> io::Result<usize>
where
    W: Write,
    F: Fn() -> bool,
{
    let mut echoed = 0;
    loop {
        let Some(event) = buffer.wait_get(poll) else {
            if is_open() {
                continue;
            }
            break;
        };
        let InputEvent::Key(key) = event else {
            continue;
        };
        if key.matches(stop_key) || key.matches("Ctrl-c") {
            debug!(%key, "Stop key pressed");
            break;
        }
        write!(out, "You pressed {key}\r\n")?;
        out.flush()?;
        echoed += 1;
    }
    Ok(echoed)
}

/// Run the demo on the real terminal.
pub fn run_key_echo(config: &AppConfig) -> anyhow::Result<()> {
    let poll = config.input_poll();
    let buffer = InputBuffer::new();
    buffer.activate();

    let mut out = io::stdout();
    writeln!(out, "Press keys to see them decoded; {} quits.", config.stop_key)?;

    let _raw = RawModeGuard::enable().context("failed to switch the terminal to raw mode")?;
    let listener = match config.input {
        InputKind::Raw => {
            KeyboardListener::spawn(RawByteSource::stdin(config.settle)?, buffer.clone(), poll)?
        }
        InputKind::Crossterm => {
            KeyboardListener::spawn(CrosstermSource::new(), buffer.clone(), poll)?
        }
    };

    let echoed = echo_keys(&buffer, &mut out, &config.stop_key, poll, || {
        !listener.is_finished()
    });
    buffer.deactivate();
    listener.join();
    let echoed = echoed?;
    debug!(echoed, "Key echo finished");
    Ok(())
}
