//! # clui-engine
//!
//! Task execution shared by both modes: the task abstraction, the context a
//! running task sees, sequential execution with cancellation, and the
//! interfaces each mode implements to present results and talk to the user.

pub mod context;
pub mod executor;
pub mod interfaces;
pub mod mode;

// Re-exports
pub use context::{ExecutionEnv, TaskContext};
pub use executor::{execute_tasks, summarize_results};
pub use interfaces::{Console, FnTask, NullConsole, NullPresenter, ResultPresenter, Task, TaskResult};
pub use mode::Mode;
