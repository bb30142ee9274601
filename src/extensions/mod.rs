//! Modules that decorate a chart without owning its state: embedded control
//! widgets and observer plugins.

pub mod plugins;
pub mod widget_injector;
pub mod widgets;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
pub use widget_injector::WidgetInjector;
pub use widgets::{
    Widget, WidgetAnchor, WidgetBounds, WidgetId, WidgetKind, WidgetOverlay, WidgetPlacement,
    WidgetSpec,
};
