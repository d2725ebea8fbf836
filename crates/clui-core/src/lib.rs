//! # clui-core
//!
//! Building blocks shared by both console modes: single-line views and
//! their width layout, the progress indicator, the widget state store with
//! its observers, cooperative cancellation, and the common error type.

pub mod bar;
pub mod constants;
pub mod container;
pub mod error;
pub mod indicator;
pub mod label;
pub mod observer;
pub mod observers;
pub mod progress;
pub mod store;
pub mod view;
pub mod widget;

// Re-exports
pub use bar::{Bar, BarStyle};
pub use constants::{exit_codes, DEFAULT_CONTAINER_WIDTH, MIN_BAR_WIDTH};
pub use container::{distribute_width, HContainer, Slot};
pub use error::UiError;
pub use indicator::{IndicatorOptions, ProgressIndicator};
pub use label::TextLabel;
pub use observer::{ObserverSet, WidgetObserver};
pub use progress::{CancellationToken, TimeoutCancellationToken};
pub use store::WidgetStore;
pub use view::{Alignment, View};
pub use widget::{EventKind, Widget, WidgetEvent, WidgetHandle, WidgetId, WidgetSnapshot};
