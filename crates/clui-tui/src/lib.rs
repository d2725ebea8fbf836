//! # clui-tui
//!
//! Threaded TUI mode using ratatui with Elm architecture. Tasks run on a
//! worker thread and talk to the render loop through [`TuiMessage`]s; the
//! keyboard listener feeds the same channel.

pub mod bridge;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod tasks;
pub mod widgets;

pub use bridge::{TuiBridgeObserver, TuiConsole, TuiResultPresenter};
pub use logs::LogScrollState;
pub use messages::{PromptRequest, TuiMessage};
pub use model::TuiApp;
