//! widget-chart: editable chart labels, live data rebinding and embedded
//! control widgets.
//!
//! A chart's axis and title labels double as input fields. Editing a label
//! either renames it or, when the text names a field of a registered data
//! source, swaps the plotted series in place. Widgets attached through
//! `WidgetInjector` drive chart properties without rebuilding the chart.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartHandle};
pub use error::{BindingError, ChartError, ChartResult};
