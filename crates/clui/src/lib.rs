//! clui-demo library: mode controller, configuration, and demo tasks for
//! the console widget engine.

pub mod app;
pub mod config;
pub mod demo;
pub mod engine;
pub mod errors;
pub mod keys;
pub mod version;

pub use engine::{Engine, EngineSettings};
