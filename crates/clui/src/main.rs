//! clui-demo: progress widgets and prompts in CLI or TUI mode.

use std::process;

use clui_core::constants::exit_codes;
use clui_lib::{app, config, errors};

fn main() {
    // Widgets own stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match config::AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(exit_codes::ERROR_CONFIG);
        }
    };

    if let Err(err) = app::run(&config) {
        eprintln!("Error: {err:#}");
        process::exit(errors::exit_code(&err));
    }
}
