//! Demo tasks driving progress indicators and prompts.

use std::sync::Arc;
use std::time::Duration;

use clui_core::error::UiError;
use clui_core::indicator::{IndicatorOptions, ProgressIndicator};
use clui_core::widget::WidgetHandle;
use clui_engine::{Task, TaskContext};

use crate::config::AppConfig;

/// Register an indicator, start it, run `body`, and stop it whatever happens.
fn with_indicator<F>(
    ctx: &TaskContext,
    title: &str,
    range: u64,
    options: IndicatorOptions,
    body: F,
) -> Result<(), UiError>
where
    F: FnOnce(&WidgetHandle<ProgressIndicator>) -> Result<(), UiError>,
{
    let options = IndicatorOptions {
        width: ctx.widget_width(),
        ..options
    };
    let handle = ctx.store().register(title, ProgressIndicator::new(range, options)?);
    ctx.store().update(&handle, ProgressIndicator::start)?;
    let result = body(&handle);
    ctx.store().update(&handle, ProgressIndicator::stop)?;
    result
}

/// Counts to `steps`, one step per `delay`.
#[derive(Debug, Clone)]
pub struct CountingTask {
    name: String,
    steps: u64,
    delay: Duration,
    options: IndicatorOptions,
}

impl CountingTask {
    #[must_use]
    pub fn new(name: impl Into<String>, steps: u64, delay: Duration) -> Self {
        Self {
            name: name.into(),
            steps,
            delay,
            options: IndicatorOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: IndicatorOptions) -> Self {
        self.options = options;
        self
    }
}

impl Task for CountingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &TaskContext) -> Result<(), UiError> {
        with_indicator(ctx, &self.name, self.steps, self.options, |bar| {
            for _ in 0..self.steps {
                ctx.sleep(self.delay)?;
                ctx.store().update(bar, ProgressIndicator::inc)?;
            }
            Ok(())
        })
    }
}

/// Fills half way, then narrows, rescales, rewinds and refills its
/// indicator.
#[derive(Debug, Clone)]
pub struct ReshapeTask {
    steps: u64,
    delay: Duration,
    options: IndicatorOptions,
}

impl ReshapeTask {
    #[must_use]
    pub fn new(steps: u64, delay: Duration) -> Self {
        Self {
            steps,
            delay,
            options: IndicatorOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: IndicatorOptions) -> Self {
        self.options = options;
        self
    }
}

impl Task for ReshapeTask {
    fn name(&self) -> &str {
        "reshape"
    }

    fn run(&self, ctx: &TaskContext) -> Result<(), UiError> {
        let store = ctx.store();
        with_indicator(ctx, "reshape", self.steps, self.options, |bar| {
            for _ in 0..self.steps / 2 {
                ctx.sleep(self.delay)?;
                store.update(bar, ProgressIndicator::inc)?;
            }

            ctx.message("reshape: narrowing");
            store.try_update(bar, |w| {
                let narrow = (w.width() * 2 / 3).max(w.min_width());
                w.set_width(narrow)
            })?;
            ctx.sleep(self.delay)?;

            ctx.message("reshape: doubling the range");
            let range = self.steps.saturating_mul(2);
            store.try_update(bar, |w| w.set_range(range))?;
            for _ in 0..3 {
                ctx.sleep(self.delay)?;
                store.update(bar, ProgressIndicator::dec)?;
            }

            ctx.message("reshape: starting over");
            store.update(bar, ProgressIndicator::reset)?;
            let stride = (range / 10).max(1);
            let mut value = 0;
            while value < range {
                ctx.sleep(self.delay)?;
                value = (value + stride).min(range);
                store.try_update(bar, |w| w.set_value(value))?;
            }
            Ok(())
        })
    }
}

/// Asks for the user's name and greets them.
#[derive(Debug, Clone, Default)]
pub struct QuestionTask;

impl Task for QuestionTask {
    fn name(&self) -> &str {
        "question"
    }

    fn run(&self, ctx: &TaskContext) -> Result<(), UiError> {
        let answer = ctx.prompt("What is your name?")?;
        let name = answer.trim();
        if name.is_empty() {
            ctx.message("Hello, stranger!");
        } else {
            ctx.message(&format!("Hello, {name}!"));
        }
        Ok(())
    }
}

/// The tasks `config` asks for, in run order.
#[must_use]
pub fn demo_tasks(config: &AppConfig) -> Vec<Arc<dyn Task>> {
    let steps = config.steps.max(1);
    let mut tasks: Vec<Arc<dyn Task>> = (1..=config.tasks)
        .map(|i| {
            Arc::new(
                CountingTask::new(format!("count {i}"), steps, config.delay)
                    .with_options(config.indicator),
            ) as Arc<dyn Task>
        })
        .collect();
    if config.reshape {
        tasks.push(Arc::new(
            ReshapeTask::new(steps, config.delay).with_options(config.indicator),
        ));
    }
    if config.ask {
        tasks.push(Arc::new(QuestionTask));
    }
    tasks
}
