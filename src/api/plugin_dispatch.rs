use tracing::trace;

use crate::core::Axis;
use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.model.viewport,
            editing: self.editor.pending().map(|field| field.axis()),
            x_len: self.model.series(Axis::X).map_or(0, |series| series.len()),
            y_len: self.model.series(Axis::Y).map_or(0, |series| series.len()),
            source_count: self.model.sources.len(),
            properties: self.model.properties,
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.runtime.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.runtime.plugins.len(), "dispatch plugin event");
        for plugin in &mut self.runtime.plugins {
            plugin.on_event(event, context);
        }
    }
}
