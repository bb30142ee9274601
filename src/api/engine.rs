use tracing::trace;

use crate::core::{Axis, ChartLabel, ChartProperties, DataSeries, SourceRef, Viewport};
use crate::error::ChartResult;
use crate::extensions::{WidgetId, WidgetOverlay};
use crate::interaction::{EditKindPolicy, EditableField, LabelEditController};
use crate::render::Renderer;

use super::{
    ChartModel, DataBindingResolver, FieldIndex, InlineMessage, PluginEvent,
    chart_runtime::ChartRuntimeState, render_frame_builder,
};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the state of exactly one chart: labels, bound series,
/// registered data sources, appearance properties and mounted widget
/// overlays. Label editing, data rebinding and rendering all run through it
/// synchronously, one event at a time.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) model: ChartModel,
    pub(super) editor: LabelEditController,
    pub(super) resolver: DataBindingResolver,
    pub(super) runtime: ChartRuntimeState,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.model.viewport
    }

    /// Label of `axis`. Every engine has all three labels.
    #[must_use]
    pub fn label(&self, axis: Axis) -> Option<&ChartLabel> {
        self.model.labels.get(&axis)
    }

    pub fn labels(&self) -> impl Iterator<Item = &ChartLabel> {
        self.model.labels.values()
    }

    /// Series currently bound to `axis`.
    #[must_use]
    pub fn series(&self, axis: Axis) -> Option<&DataSeries> {
        self.model.series(axis)
    }

    #[must_use]
    pub fn sources(&self) -> &[SourceRef] {
        &self.model.sources
    }

    #[must_use]
    pub fn field_catalog(&self) -> &FieldIndex {
        &self.model.field_index
    }

    #[must_use]
    pub fn properties(&self) -> ChartProperties {
        self.model.properties
    }

    #[must_use]
    pub fn inline_message(&self) -> Option<&InlineMessage> {
        self.model.inline_message.as_ref()
    }

    #[must_use]
    pub fn edit_kind_policy(&self) -> EditKindPolicy {
        self.editor.policy()
    }

    pub fn set_edit_kind_policy(&mut self, policy: EditKindPolicy) {
        self.editor.set_policy(policy);
    }

    /// Editor currently replacing a label, if any.
    #[must_use]
    pub fn editing_label(&self) -> Option<&EditableField> {
        self.editor.pending()
    }

    pub fn overlays(&self) -> impl Iterator<Item = &WidgetOverlay> {
        self.model.overlays.values()
    }

    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.runtime.needs_render
    }

    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.runtime.render_count
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = render_frame_builder::build_render_frame(self)?;
        self.renderer.render(&frame)?;
        self.runtime.needs_render = false;
        self.runtime.render_count += 1;
        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            rects = frame.rects.len(),
            "chart rendered"
        );
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn invalidate(&mut self) {
        self.runtime.needs_render = true;
    }

    pub(super) fn mount_widget_overlay(&mut self, overlay: WidgetOverlay) {
        let widget = overlay.id;
        self.model.overlays.insert(widget, overlay);
        self.invalidate();
        self.emit_plugin_event(PluginEvent::WidgetMounted { widget });
    }

    pub(super) fn unmount_widget_overlay(&mut self, widget: WidgetId) -> bool {
        if self.model.overlays.shift_remove(&widget).is_none() {
            return false;
        }
        self.invalidate();
        self.emit_plugin_event(PluginEvent::WidgetUnmounted { widget });
        true
    }
}
