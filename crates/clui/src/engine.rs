//! Mode controller: wires the store, renderer, console and input for the
//! chosen mode and runs the tasks.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clui_cli::{CliConsole, CliResultPresenter, LineRenderer};
use clui_console::{CrosstermSource, EventSink, InputBuffer, InputEvent, KeyboardListener};
use clui_core::constants::{DEFAULT_CONTAINER_WIDTH, DEFAULT_INPUT_POLL, DEFAULT_TICK};
use clui_core::error::UiError;
use clui_core::observers::LoggingObserver;
use clui_core::progress::{CancellationToken, TimeoutCancellationToken};
use clui_core::store::WidgetStore;
use clui_engine::{execute_tasks, ExecutionEnv, Mode, Task, TaskResult};
use clui_tui::{TuiApp, TuiBridgeObserver, TuiConsole, TuiMessage, TuiResultPresenter};
use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

/// How long to wait for the task thread after the TUI closes.
const JOIN_GRACE: Duration = Duration::from_secs(2);

/// How the engine runs.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub mode: Mode,
    /// TUI redraw interval.
    pub tick: Duration,
    /// Input listener poll interval.
    pub poll: Duration,
    /// Deadline for the whole run.
    pub timeout: Option<Duration>,
    /// Leave the TUI once every task has finished.
    pub exit_on_finish: bool,
    /// Width tasks give their widgets.
    pub width: usize,
    pub verbose: bool,
    pub quiet: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            tick: DEFAULT_TICK,
            poll: DEFAULT_INPUT_POLL,
            timeout: None,
            exit_on_finish: false,
            width: DEFAULT_CONTAINER_WIDTH,
            verbose: false,
            quiet: false,
        }
    }
}

/// Runs tasks in CLI or TUI mode.
///
/// Each run gets its own cancellation token below the engine's, so closing
/// the TUI ends that run only and the engine can run again. Cancelling
/// [`Engine::cancel_token`] stops the current run and every later one.
///
/// Tasks see keystrokes through `poll_input` in TUI mode only; in CLI mode
/// stdin belongs to prompts.
pub struct Engine {
    settings: EngineSettings,
    cancel: CancellationToken,
}

impl Engine {
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the run when cancelled, e.g. from a signal handler.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The mode `run` will use.
    #[must_use]
    pub fn resolved_mode(&self) -> Mode {
        self.settings
            .mode
            .resolve(console::Term::stdout().is_term())
    }

    /// Run `tasks` to completion in the resolved mode.
    pub fn run(&self, tasks: Vec<Arc<dyn Task>>) -> Result<Vec<TaskResult>, UiError> {
        let mode = self.resolved_mode();
        info!(%mode, tasks = tasks.len(), "Starting run");
        match mode {
            Mode::Tui => self.run_tui(tasks),
            Mode::Cli | Mode::Auto => {
                let renderer = Arc::new(LineRenderer::stdout());
                let console = CliConsole::stdin(renderer.clone());
                Ok(self.run_cli_with(&tasks, &renderer, console))
            }
        }
    }

    /// Blocking run: tasks execute on the calling thread and draw through
    /// `renderer` as they go.
    pub fn run_cli_with<W>(
        &self,
        tasks: &[Arc<dyn Task>],
        renderer: &Arc<LineRenderer<W>>,
        console: CliConsole<W>,
    ) -> Vec<TaskResult>
    where
        W: Write + Send + 'static,
    {
        let store = WidgetStore::new();
        store.subscribe(Arc::new(LoggingObserver::new()));
        store.subscribe(renderer.clone());
        let env = ExecutionEnv {
            store,
            cancel: self.deadline(&self.begin_run()),
            console: Arc::new(console),
            input: None,
            widget_width: self.settings.width,
        };
        let presenter =
            CliResultPresenter::new(renderer.clone(), self.settings.verbose, self.settings.quiet);
        let results = execute_tasks(tasks, &env, &presenter);
        if let Err(err) = renderer.finish() {
            warn!(error = %err, "Failed to finish output");
        }
        results
    }

    /// Convenience for callers with their own writer and input.
    pub fn run_cli_on<W>(
        &self,
        tasks: &[Arc<dyn Task>],
        out: W,
        input: Box<dyn BufRead + Send>,
    ) -> Vec<TaskResult>
    where
        W: Write + Send + 'static,
    {
        let renderer = Arc::new(LineRenderer::new(out));
        let console = CliConsole::new(renderer.clone(), input, false);
        self.run_cli_with(tasks, &renderer, console)
    }

    /// Threaded run: tasks on a worker thread, keyboard on a listener
    /// thread, rendering on the calling thread.
    fn run_tui(&self, tasks: Vec<Arc<dyn Task>>) -> Result<Vec<TaskResult>, UiError> {
        let (tx, rx) = crossbeam_channel::unbounded::<TuiMessage>();
        let store = WidgetStore::new();
        store.subscribe(Arc::new(LoggingObserver::new()));
        store.subscribe(Arc::new(TuiBridgeObserver::new(tx.clone())));
        let run = self.begin_run();
        let cancel = self.deadline(&run);
        let keys = InputBuffer::new();
        keys.activate();
        let env = ExecutionEnv {
            store: store.clone(),
            cancel: cancel.clone(),
            console: Arc::new(TuiConsole::new(tx.clone(), cancel)),
            input: Some(keys.clone()),
            widget_width: self.settings.width,
        };

        let mut app = TuiApp::new(rx, run.clone())
            .with_tick(self.settings.tick)
            .with_exit_on_finish(self.settings.exit_on_finish)
            .with_task_count(tasks.len());

        let sink = TuiInputSink {
            tx: tx.clone(),
            keys: keys.clone(),
            store,
            max_width: self.settings.width,
        };
        let listener = KeyboardListener::spawn(CrosstermSource::new(), sink, self.settings.poll)?;

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let worker = thread::Builder::new()
            .name("clui-tasks".into())
            .spawn(move || {
                let presenter = TuiResultPresenter::new(tx);
                let results = execute_tasks(&tasks, &env, &presenter);
                let _ = done_tx.send(results);
            })?;

        let ui = app.run();
        // The run is over once the TUI closes, whatever the tasks are doing.
        run.cancel();
        keys.deactivate();
        listener.stop();
        listener.join();

        let results = match done_rx.recv_timeout(JOIN_GRACE) {
            Ok(results) => {
                if worker.join().is_err() {
                    warn!("Task thread panicked");
                }
                results
            }
            Err(_) => {
                warn!("Task thread did not stop in time");
                return Err(UiError::Cancelled);
            }
        };
        ui?;
        debug!(tasks = results.len(), "TUI run finished");
        Ok(results)
    }

    fn begin_run(&self) -> CancellationToken {
        self.cancel.child()
    }

    fn deadline(&self, run: &CancellationToken) -> TimeoutCancellationToken {
        TimeoutCancellationToken::with_token(run.clone(), self.settings.timeout)
    }
}

/// Sends listener events to the TUI and to the tasks' input buffer, and
/// fits the widgets to the panel on a terminal resize.
struct TuiInputSink {
    tx: Sender<TuiMessage>,
    keys: InputBuffer<InputEvent>,
    store: WidgetStore,
    /// Widgets never grow past the configured width.
    max_width: usize,
}

impl EventSink for TuiInputSink {
    fn push(&self, event: InputEvent) -> bool {
        if let InputEvent::Resize { width, height } = event {
            let fitted = TuiApp::widget_width(width, height).min(self.max_width);
            for (id, err) in self.store.resize_all(fitted) {
                debug!(widget = %id, error = %err, "Widget kept its width");
            }
        }
        self.keys.put(event.clone());
        self.tx.send(TuiMessage::from(event)).is_ok()
    }

    fn is_open(&self) -> bool {
        self.keys.is_active()
    }
}

/// Cancel `token` on Ctrl-C.
pub fn install_ctrlc_handler(token: CancellationToken) {
    if let Err(err) = ctrlc::set_handler(move || token.cancel()) {
        warn!(error = %err, "Failed to install Ctrl-C handler");
    }
}
