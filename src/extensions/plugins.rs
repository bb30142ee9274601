use serde::{Deserialize, Serialize};

use crate::core::{Axis, ChartProperties, TargetProperty, Viewport};
use crate::extensions::WidgetId;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub editing: Option<Axis>,
    pub x_len: usize,
    pub y_len: usize,
    pub source_count: usize,
    pub properties: ChartProperties,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    LabelEditStarted { axis: Axis },
    LabelEditCancelled { axis: Axis },
    LabelRenamed { axis: Axis },
    SeriesRebound { axis: Axis, len: usize },
    BindingFailed { axis: Axis },
    PropertyChanged { target: TargetProperty },
    WidgetMounted { widget: WidgetId },
    WidgetUnmounted { widget: WidgetId },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating chart
/// state directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
