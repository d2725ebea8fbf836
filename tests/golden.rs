//! Golden file integration tests.
//!
//! Reads tests/testdata/widgets_golden.json and checks every view renders
//! exactly the recorded line, then runs a task through the CLI renderer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use clui_cli::LineRenderer;
use clui_core::{
    Alignment, Bar, BarStyle, HContainer, IndicatorOptions, ProgressIndicator, TextLabel, View,
    WidgetStore,
};
use clui_engine::{execute_tasks, ExecutionEnv, FnTask, NullPresenter, Task};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    bars: Vec<BarCase>,
    labels: Vec<LabelCase>,
    containers: Vec<ContainerCase>,
    indicators: Vec<IndicatorCase>,
}

#[derive(Deserialize)]
struct BarCase {
    style: String,
    value: f64,
    width: usize,
    expected: String,
}

#[derive(Deserialize)]
struct LabelCase {
    value: String,
    #[serde(default)]
    width: Option<usize>,
    align: Alignment,
    expected: String,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Child {
    Label { value: String, align: Alignment },
    Bar { value: f64 },
}

#[derive(Deserialize)]
struct ContainerCase {
    width: usize,
    children: Vec<Child>,
    expected: String,
}

#[derive(Deserialize)]
struct IndicatorCase {
    range: u64,
    width: usize,
    #[serde(default)]
    value: u64,
    #[serde(default = "yes")]
    counter: bool,
    #[serde(default = "yes")]
    percents: bool,
    #[serde(default)]
    ops: Vec<String>,
    expected: String,
}

fn yes() -> bool {
    true
}

fn load_golden_data() -> GoldenData {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/widgets_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn apply(indicator: &mut ProgressIndicator, op: &str) {
    let (name, arg) = op.split_once(':').unwrap_or((op, ""));
    let number = || arg.parse::<u64>().expect("numeric argument");
    match name {
        "inc" => indicator.inc(),
        "dec" => indicator.dec(),
        "reset" => indicator.reset(),
        "set_value" => indicator.set_value(number()).unwrap(),
        "set_range" => indicator.set_range(number()).unwrap(),
        "set_width" => indicator
            .set_width(usize::try_from(number()).unwrap())
            .unwrap(),
        other => panic!("unknown op {other}"),
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn golden_bars() {
    for case in load_golden_data().bars {
        let style = match case.style.as_str() {
            "progress" => BarStyle::Progress,
            "slider" => BarStyle::Slider,
            other => panic!("unknown bar style {other}"),
        };
        let bar = Bar::new(style, case.value, case.width).unwrap();
        assert_eq!(View::render(&bar), case.expected, "{} at {}", case.style, case.value);
        assert_eq!(View::render(&bar).chars().count(), case.width);
    }
}

#[test]
fn golden_labels() {
    for case in load_golden_data().labels {
        let label = TextLabel::new(case.value.as_str(), case.width, case.align);
        assert_eq!(View::render(&label), case.expected, "label {:?}", case.value);
    }
}

#[test]
fn golden_containers() {
    for case in load_golden_data().containers {
        let mut container = HContainer::new(case.width);
        for child in case.children {
            match child {
                Child::Label { value, align } => {
                    container.add(TextLabel::new(value, None, align)).unwrap();
                }
                Child::Bar { value } => {
                    container
                        .add(Bar::progress(value).unwrap().scalable())
                        .unwrap();
                }
            }
        }
        assert_eq!(container.render(), case.expected);
        assert_eq!(container.render().chars().count(), case.width);
    }
}

#[test]
fn golden_indicators() {
    for case in load_golden_data().indicators {
        let options = IndicatorOptions {
            value: case.value,
            show_counter: case.counter,
            show_percents: case.percents,
            width: case.width,
        };
        let mut indicator = ProgressIndicator::new(case.range, options).unwrap();
        for op in &case.ops {
            apply(&mut indicator, op);
        }
        let line = indicator.render();
        assert_eq!(line, case.expected, "range {} ops {:?}", case.range, case.ops);
        assert_eq!(line.chars().count(), indicator.width());
    }
}

#[test]
fn cli_session_output() {
    let buf = SharedBuf::default();
    let renderer = Arc::new(LineRenderer::new(buf.clone()));
    let store = WidgetStore::new();
    store.subscribe(renderer.clone());

    let task: Arc<dyn Task> = Arc::new(FnTask::new("fill", |ctx| {
        let options = IndicatorOptions {
            width: 16,
            ..IndicatorOptions::default()
        };
        let bar = ctx
            .store()
            .register("fill", ProgressIndicator::new(2, options)?);
        ctx.store().update(&bar, ProgressIndicator::start)?;
        ctx.store().update(&bar, ProgressIndicator::inc)?;
        ctx.store().update(&bar, ProgressIndicator::inc)?;
        ctx.store().update(&bar, ProgressIndicator::stop)?;
        Ok(())
    }));
    let results = execute_tasks(&[task], &ExecutionEnv::headless(store), &NullPresenter);
    assert!(results[0].is_ok());

    let blank = format!("\r{}\r", " ".repeat(16));
    let expected =
        format!("[     ] 0/2   0%{blank}[##   ] 1/2  50%{blank}[#####] 2/2 100%\n");
    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert_eq!(output, expected);
}
