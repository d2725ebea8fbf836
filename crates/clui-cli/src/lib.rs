//! # clui-cli
//!
//! Blocking CLI mode: the line renderer that draws widgets in place, the
//! console that interleaves prompts with them, result presentation, and
//! shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod prompt;
pub mod renderer;
pub mod ui;

pub use presenter::CliResultPresenter;
pub use prompt::CliConsole;
pub use renderer::LineRenderer;
