//! Application entry point and dispatch.

use anyhow::Result;
use clui_engine::summarize_results;
use tracing::debug;

use crate::config::AppConfig;
use crate::demo::demo_tasks;
use crate::engine::{install_ctrlc_handler, Engine, EngineSettings};
use crate::keys::run_key_echo;
use crate::version::full_version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clui_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    if config.keys {
        return run_key_echo(config);
    }

    run_demo(config)
}

/// Engine settings for `config`.
#[must_use]
pub fn engine_settings(config: &AppConfig) -> EngineSettings {
    EngineSettings {
        mode: config.mode,
        tick: config.tick,
        poll: config.input_poll(),
        timeout: config.timeout,
        exit_on_finish: config.exit_on_finish,
        width: config.width,
        verbose: config.verbose,
        quiet: config.quiet,
    }
}

fn run_demo(config: &AppConfig) -> Result<()> {
    if config.verbose && !config.quiet {
        println!("{}", full_version());
    }
    let engine = Engine::new(engine_settings(config));
    install_ctrlc_handler(engine.cancel_token());

    let tasks = demo_tasks(config);
    debug!(tasks = tasks.len(), mode = %engine.resolved_mode(), "Running demo");
    let results = engine.run(tasks)?;
    summarize_results(&results)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clui_engine::Mode;
    use std::time::Duration;

    #[test]
    fn settings_follow_config() {
        let config = AppConfig::load_from([
            "clui-demo",
            "--mode",
            "tui",
            "--tick",
            "250ms",
            "--timeout",
            "3s",
            "--width",
            "60",
            "--exit-on-finish",
        ])
        .unwrap();
        let settings = engine_settings(&config);
        assert_eq!(settings.mode, Mode::Tui);
        assert_eq!(settings.tick, Duration::from_millis(250));
        assert_eq!(settings.timeout, Some(Duration::from_secs(3)));
        assert_eq!(settings.width, 60);
        assert!(settings.exit_on_finish);
        assert!(!settings.quiet);
    }
}
