//! TUI application model (Elm architecture).

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::time::{Duration, Instant};

use clui_console::{ControlCode, InputEvent, Key};
use clui_core::constants::{DEFAULT_TICK, MAX_LOG_LINES};
use clui_core::error::UiError;
use clui_core::progress::CancellationToken;
use clui_core::widget::{EventKind, WidgetEvent, WidgetId, WidgetSnapshot};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::debug;

use crate::footer::{render_footer, FooterState};
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, LogScrollState};
use crate::messages::{PromptRequest, TuiMessage};
use crate::tasks::{render_tasks, TaskRow, TaskStatus};
use crate::widgets::render_widgets;

/// Log lines moved by PageUp / PageDown.
const PAGE_SIZE: usize = 10;

/// TUI application state (Elm Model).
pub struct TuiApp {
    pub should_quit: bool,
    /// Every task has finished.
    pub finished: bool,
    /// Quit as soon as the tasks finish.
    pub exit_on_finish: bool,
    /// Latest snapshot of each widget.
    pub widgets: BTreeMap<WidgetId, WidgetSnapshot>,
    /// Widgets removed from the store; late events for them are dropped.
    removed: BTreeSet<WidgetId>,
    pub tasks: Vec<TaskRow>,
    /// Number of tasks in the run, when known.
    pub total_tasks: usize,
    pub logs: Vec<String>,
    pub log_scroll: LogScrollState,
    pub show_logs: bool,
    /// Questions waiting for an answer, oldest first.
    prompts: VecDeque<PromptRequest>,
    /// Answer typed so far.
    pub input: String,
    start_time: Instant,
    finished_at: Option<Instant>,
    cancel: CancellationToken,
    rx: Receiver<TuiMessage>,
    tick: Duration,
    dirty: bool,
}

impl TuiApp {
    /// Quitting cancels `cancel`, which the task thread watches.
    #[must_use]
    pub fn new(rx: Receiver<TuiMessage>, cancel: CancellationToken) -> Self {
        Self {
            should_quit: false,
            finished: false,
            exit_on_finish: false,
            widgets: BTreeMap::new(),
            removed: BTreeSet::new(),
            tasks: Vec::new(),
            total_tasks: 0,
            logs: Vec::new(),
            log_scroll: LogScrollState::new(),
            show_logs: true,
            prompts: VecDeque::new(),
            input: String::new(),
            start_time: Instant::now(),
            finished_at: None,
            cancel,
            rx,
            tick: DEFAULT_TICK,
            dirty: true,
        }
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    #[must_use]
    pub fn with_exit_on_finish(mut self, exit: bool) -> Self {
        self.exit_on_finish = exit;
        self
    }

    #[must_use]
    pub fn with_task_count(mut self, total: usize) -> Self {
        self.total_tasks = total;
        self
    }

    /// Question currently shown, if any.
    #[must_use]
    pub fn pending_prompt(&self) -> Option<&str> {
        self.prompts.front().map(|p| p.question.as_str())
    }

    /// Time since start, frozen once the tasks finish.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .unwrap_or_else(Instant::now)
            .duration_since(self.start_time)
    }

    /// Tasks that have finished, successfully or not.
    #[must_use]
    pub fn tasks_done(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Running)
            .count()
    }

    /// Drain pending messages without blocking (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        self.dirty = true;
        match msg {
            TuiMessage::Widget(event) => self.apply_widget(event),
            TuiMessage::Input(InputEvent::Key(key)) => self.handle_key(&key),
            TuiMessage::Input(InputEvent::Resize { .. }) | TuiMessage::Tick => {}
            TuiMessage::TaskStarted { index, name } => {
                self.set_task(index, name, TaskStatus::Running);
            }
            TuiMessage::TaskFinished {
                index,
                name,
                duration,
                error,
            } => {
                let status = match error {
                    None => TaskStatus::Done(duration),
                    Some(err) => TaskStatus::Failed(err),
                };
                self.set_task(index, name, status);
            }
            TuiMessage::Log(line) => self.push_log(line),
            TuiMessage::Prompt(request) => {
                debug!(question = %request.question, "Prompt shown");
                self.prompts.push_back(request);
            }
            TuiMessage::Finished => {
                self.finished = true;
                self.finished_at.get_or_insert_with(Instant::now);
                if self.exit_on_finish {
                    self.should_quit = true;
                }
            }
            TuiMessage::Quit => self.quit(),
        }
    }

    fn apply_widget(&mut self, event: WidgetEvent) {
        let id = event.id();
        if self.removed.contains(&id) {
            return;
        }
        if self
            .widgets
            .get(&id)
            .is_some_and(|s| s.revision > event.snapshot.revision)
        {
            return;
        }
        if event.kind == EventKind::Removed {
            self.widgets.remove(&id);
            self.removed.insert(id);
        } else {
            self.widgets.insert(id, event.snapshot);
        }
    }

    fn set_task(&mut self, index: usize, name: String, status: TaskStatus) {
        while self.tasks.len() <= index {
            self.tasks.push(TaskRow {
                name: String::new(),
                status: TaskStatus::Running,
            });
        }
        self.tasks[index] = TaskRow { name, status };
        self.total_tasks = self.total_tasks.max(self.tasks.len());
    }

    fn push_log(&mut self, line: String) {
        self.logs.push(line);
        let dropped = self.logs.len().saturating_sub(MAX_LOG_LINES);
        self.logs.drain(..dropped);
        self.log_scroll.on_new_message(self.logs.len(), dropped);
    }

    fn handle_key(&mut self, key: &Key) {
        if self.prompts.is_empty() {
            self.handle_key_action(map_key(key));
        } else {
            self.edit_prompt(key);
        }
    }

    /// Line editing while a question is shown.
    fn edit_prompt(&mut self, key: &Key) {
        match key {
            Key::Char(c) => self.input.push(*c),
            Key::Control(ControlCode::Space) => self.input.push(' '),
            Key::Control(ControlCode::Del | ControlCode::Bs) => {
                self.input.pop();
            }
            Key::Control(ControlCode::Cr | ControlCode::Lf) => {
                let answer = std::mem::take(&mut self.input);
                self.answer(Ok(answer));
            }
            Key::Control(ControlCode::Esc) => {
                self.input.clear();
                self.answer(Err(UiError::InputClosed));
            }
            Key::Control(ControlCode::Etx) => self.quit(),
            _ => {}
        }
    }

    fn answer(&mut self, answer: Result<String, UiError>) {
        if let Some(request) = self.prompts.pop_front() {
            // The task may have given up on the question already.
            let _ = request.reply.try_send(answer);
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        let total = self.logs.len();
        match action {
            KeyAction::Quit => self.quit(),
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::ScrollUp => self.log_scroll.scroll_up(),
            KeyAction::ScrollDown => self.log_scroll.scroll_down(total),
            KeyAction::PageUp => self.log_scroll.page_up(PAGE_SIZE),
            KeyAction::PageDown => self.log_scroll.page_down(PAGE_SIZE, total),
            KeyAction::Home => self.log_scroll.home(),
            KeyAction::End => self.log_scroll.end(total),
            KeyAction::None => {}
        }
    }

    /// Stop the run: cancel the tasks and refuse any open question.
    pub fn quit(&mut self) {
        self.should_quit = true;
        self.cancel.cancel();
        while !self.prompts.is_empty() {
            self.answer(Err(UiError::Cancelled));
        }
    }

    /// Returns (header, widgets, side panel, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(area);
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(outer[1]);
        (outer[0], main[0], main[1], outer[2])
    }

    /// Room for a widget line inside the bordered widget panel of a
    /// `width` by `height` terminal.
    #[must_use]
    pub fn widget_width(width: u16, height: u16) -> usize {
        let (_, panel, _, _) = Self::compute_layout(Rect::new(0, 0, width, height));
        usize::from(panel.width.saturating_sub(2))
    }

    /// Split the side panel into (tasks, logs).
    #[must_use]
    pub fn compute_side_layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let (header_area, widget_area, side_area, footer_area) =
            Self::compute_layout(frame.area());

        render_header(
            frame,
            header_area,
            self.elapsed(),
            self.tasks_done(),
            self.total_tasks,
        );

        let widgets: Vec<&WidgetSnapshot> = self.widgets.values().collect();
        render_widgets(frame, widget_area, &widgets);

        if self.show_logs {
            let (tasks_area, logs_area) = Self::compute_side_layout(side_area);
            render_tasks(frame, tasks_area, &self.tasks);
            render_logs(frame, logs_area, &self.logs, &self.log_scroll);
        } else {
            render_tasks(frame, side_area, &self.tasks);
        }

        let footer = match self.pending_prompt() {
            Some(question) => FooterState::Prompt {
                question,
                input: &self.input,
            },
            None if self.finished => FooterState::Finished,
            None => FooterState::Running,
        };
        render_footer(frame, footer_area, footer);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(terminal)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI on the real terminal until the user quits or, with
    /// `exit_on_finish`, until the tasks are done.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        let teardown = Self::teardown_terminal(&mut terminal);
        result.and(teardown)
    }

    /// Draw when something changed, then wait up to one tick for messages.
    pub fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            if self.dirty {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }
            if self.should_quit {
                return Ok(());
            }
            match self.rx.recv_timeout(self.tick) {
                Ok(msg) => {
                    self.handle_message(msg);
                    self.update();
                }
                Err(RecvTimeoutError::Timeout) => self.handle_message(TuiMessage::Tick),
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("Message channel closed");
                    self.should_quit = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clui_core::indicator::{IndicatorOptions, ProgressIndicator};
    use clui_core::observer::WidgetObserver;
    use clui_core::store::WidgetStore;
    use crossbeam_channel::{unbounded, Sender};
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    use crate::bridge::TuiBridgeObserver;

    fn make_app() -> (TuiApp, Sender<TuiMessage>, CancellationToken) {
        let (tx, rx) = unbounded();
        let cancel = CancellationToken::new();
        (TuiApp::new(rx, cancel.clone()), tx, cancel)
    }

    fn key(k: Key) -> TuiMessage {
        TuiMessage::Input(InputEvent::Key(k))
    }

    fn snapshot(id: u64, revision: u64, line: &str) -> WidgetSnapshot {
        WidgetSnapshot {
            id: WidgetId::new(id),
            revision,
            title: "w".into(),
            line: line.into(),
            ratio: None,
            caption: None,
            active: true,
            width: line.len(),
        }
    }

    fn event(kind: EventKind, snapshot: WidgetSnapshot) -> TuiMessage {
        TuiMessage::Widget(WidgetEvent { kind, snapshot })
    }

    #[test]
    fn initial_state() {
        let (app, _tx, _cancel) = make_app();
        assert!(!app.should_quit);
        assert!(!app.finished);
        assert!(app.widgets.is_empty());
        assert!(app.show_logs);
        assert!(app.pending_prompt().is_none());
    }

    #[test]
    fn stale_revisions_are_ignored() {
        let (mut app, _tx, _cancel) = make_app();
        app.handle_message(event(EventKind::Changed, snapshot(1, 5, "new")));
        app.handle_message(event(EventKind::Changed, snapshot(1, 3, "old")));
        assert_eq!(app.widgets[&WidgetId::new(1)].line, "new");
    }

    #[test]
    fn removed_widgets_stay_removed() {
        let (mut app, _tx, _cancel) = make_app();
        app.handle_message(event(EventKind::Started, snapshot(1, 1, "a")));
        app.handle_message(event(EventKind::Removed, snapshot(1, 3, "a")));
        app.handle_message(event(EventKind::Changed, snapshot(1, 2, "late")));
        assert!(app.widgets.is_empty());
    }

    #[test]
    fn store_events_reach_the_model() {
        let (mut app, tx, _cancel) = make_app();
        let store = WidgetStore::new();
        let bridge: Arc<dyn WidgetObserver> = Arc::new(TuiBridgeObserver::new(tx));
        store.subscribe(bridge);
        let job = store.register(
            "job",
            ProgressIndicator::new(
                4,
                IndicatorOptions {
                    width: 20,
                    ..IndicatorOptions::default()
                },
            )
            .unwrap(),
        );
        store.update(&job, ProgressIndicator::start).unwrap();
        store.update(&job, ProgressIndicator::inc).unwrap();
        app.update();
        let snap = &app.widgets[&job.id()];
        assert_eq!(snap.caption.as_deref(), Some("1/4 25%"));
        assert_eq!(snap.title, "job");
    }

    #[test]
    fn task_rows_track_progress() {
        let (mut app, _tx, _cancel) = make_app();
        app.handle_message(TuiMessage::TaskStarted {
            index: 1,
            name: "b".into(),
        });
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.tasks_done(), 0);
        app.handle_message(TuiMessage::TaskFinished {
            index: 1,
            name: "b".into(),
            duration: Duration::from_millis(3),
            error: Some("boom".into()),
        });
        assert_eq!(app.tasks[1].status, TaskStatus::Failed("boom".into()));
        assert_eq!(app.total_tasks, 2);
    }

    #[test]
    fn quit_key_cancels_tasks() {
        let (mut app, _tx, cancel) = make_app();
        app.handle_message(key(Key::Char('q')));
        assert!(app.should_quit);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn finish_keeps_running_unless_asked_to_exit() {
        let (mut app, _tx, cancel) = make_app();
        app.handle_message(TuiMessage::Finished);
        assert!(app.finished);
        assert!(!app.should_quit);

        let (tx, rx) = unbounded();
        drop(tx);
        let mut app = TuiApp::new(rx, cancel.clone()).with_exit_on_finish(true);
        app.handle_message(TuiMessage::Finished);
        assert!(app.should_quit);
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn prompt_editing() {
        let (mut app, _tx, _cancel) = make_app();
        let (reply, answers) = crossbeam_channel::bounded(1);
        app.handle_message(TuiMessage::Prompt(PromptRequest {
            question: "Name?".into(),
            reply,
        }));
        assert_eq!(app.pending_prompt(), Some("Name?"));
        for k in [
            Key::Char('A'),
            Key::Char('x'),
            Key::Control(ControlCode::Del),
            Key::Char('d'),
            Key::Control(ControlCode::Space),
            Key::Char('a'),
            Key::Char('q'),
        ] {
            app.handle_message(key(k));
        }
        assert!(!app.should_quit);
        assert_eq!(app.input, "Ad aq");
        app.handle_message(key(Key::Control(ControlCode::Cr)));
        assert_eq!(answers.try_recv().unwrap(), Ok("Ad aq".to_string()));
        assert!(app.pending_prompt().is_none());
        assert!(app.input.is_empty());
    }

    #[test]
    fn escape_dismisses_prompt() {
        let (mut app, _tx, _cancel) = make_app();
        let (reply, answers) = crossbeam_channel::bounded(1);
        app.handle_message(TuiMessage::Prompt(PromptRequest {
            question: "?".into(),
            reply,
        }));
        app.handle_message(key(Key::Control(ControlCode::Esc)));
        assert_eq!(answers.try_recv().unwrap(), Err(UiError::InputClosed));
        assert!(!app.should_quit);
    }

    #[test]
    fn quitting_refuses_open_prompts() {
        let (mut app, _tx, cancel) = make_app();
        let (reply, answers) = crossbeam_channel::bounded(1);
        app.handle_message(TuiMessage::Prompt(PromptRequest {
            question: "?".into(),
            reply,
        }));
        app.handle_message(key(Key::Control(ControlCode::Etx)));
        assert!(app.should_quit);
        assert!(cancel.is_cancelled());
        assert_eq!(answers.try_recv().unwrap(), Err(UiError::Cancelled));
    }

    #[test]
    fn log_is_capped() {
        let (mut app, _tx, _cancel) = make_app();
        for i in 0..MAX_LOG_LINES + 10 {
            app.handle_message(TuiMessage::Log(format!("msg {i}")));
        }
        assert_eq!(app.logs.len(), MAX_LOG_LINES);
        assert_eq!(app.logs[0], "msg 10");
        assert_eq!(app.log_scroll.offset, MAX_LOG_LINES - 1);
    }

    #[test]
    fn scroll_keys_move_the_log() {
        let (mut app, _tx, _cancel) = make_app();
        for i in 0..30 {
            app.handle_message(TuiMessage::Log(format!("log {i}")));
        }
        app.handle_key_action(KeyAction::PageUp);
        assert!(!app.log_scroll.auto_scroll);
        assert_eq!(app.log_scroll.offset, 19);
        app.handle_key_action(KeyAction::End);
        assert!(app.log_scroll.auto_scroll);
        app.handle_key_action(KeyAction::ToggleLogs);
        assert!(!app.show_logs);
    }

    #[test]
    fn layout_fills_the_area() {
        let area = Rect::new(0, 0, 80, 24);
        let (header, widgets, side, footer) = TuiApp::compute_layout(area);
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 2);
        assert_eq!(footer.y + footer.height, area.height);
        assert_eq!(widgets.width + side.width, area.width);
        assert_eq!(header.height + widgets.height + footer.height, area.height);
    }

    #[test]
    fn widget_width_is_the_panel_interior() {
        let (_, widgets, _, _) = TuiApp::compute_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(TuiApp::widget_width(80, 24), usize::from(widgets.width) - 2);
        assert_eq!(TuiApp::widget_width(1, 1), 0);
    }

    #[test]
    fn event_loop_draws_and_exits() {
        let (app, tx, _cancel) = make_app();
        let mut app = app.with_tick(Duration::from_millis(5));
        tx.send(event(EventKind::Started, snapshot(1, 1, "hello widget")))
            .unwrap();
        tx.send(TuiMessage::Log("a log line".into())).unwrap();
        tx.send(TuiMessage::Quit).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        app.event_loop(&mut terminal).unwrap();
        assert!(app.should_quit);

        let buffer = terminal.backend().buffer().clone();
        let screen: String = (0..24u16)
            .flat_map(|y| (0..80u16).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("hello widget"));
        assert!(screen.contains("a log line"));
    }

    #[test]
    fn event_loop_stops_when_senders_are_gone() {
        let (app, tx, _cancel) = make_app();
        let mut app = app.with_tick(Duration::from_millis(5));
        drop(tx);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        app.event_loop(&mut terminal).unwrap();
        assert!(app.should_quit);
    }
}
