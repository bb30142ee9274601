use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::api::ChartHandle;
use crate::core::PropertyValue;
use crate::error::{ChartError, ChartResult};

use super::widgets::{Widget, WidgetBounds, WidgetId, WidgetPlacement, WidgetSpec};

/// Attaches widgets to a chart and routes their value changes to
/// [`ChartHandle::update_property`].
///
/// The injector owns the listener table: a widget receives change events
/// only while it is registered here. Widgets on the same target property are
/// allowed; the last dispatched change wins.
#[derive(Debug, Default)]
pub struct WidgetInjector {
    widgets: IndexMap<WidgetId, Widget>,
}

impl WidgetInjector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates and mounts a widget, returning a copy of its initial state.
    pub fn attach<H>(&mut self, chart: &mut H, spec: WidgetSpec) -> ChartResult<Widget>
    where
        H: ChartHandle + ?Sized,
    {
        spec.validate()?;

        let size = spec.kind.preferred_size();
        let stack_index = self
            .widgets
            .values()
            .filter(|widget| widget.placement.anchor == spec.placement.anchor)
            .count();
        let bounds = spec.placement.resolve(chart.viewport(), size, stack_index);

        let value = chart
            .property(spec.target)
            .filter(|_| !spec.kind.is_trigger())
            .and_then(|current| spec.kind.normalize(current).ok())
            .unwrap_or_else(|| spec.kind.default_value());

        let widget = Widget {
            id: WidgetId::next(),
            caption: spec
                .caption
                .unwrap_or_else(|| spec.target.as_str().to_owned()),
            kind: spec.kind,
            value,
            target: spec.target,
            placement: spec.placement,
            bounds,
        };

        chart.mount_overlay(widget.overlay());
        debug!(
            widget = %widget.id,
            kind = widget.kind.name(),
            target = %widget.target,
            "widget attached"
        );
        self.widgets.insert(widget.id, widget.clone());
        Ok(widget)
    }

    /// Delivers a value change from widget `id` to the chart.
    ///
    /// Returns `Ok(false)` when the widget is not attached. The widget keeps
    /// its previous value if normalization or the chart update fails. An
    /// accepted value redraws the chart immediately; a failed redraw is logged
    /// and does not turn the accepted change into an error.
    pub fn set_value<H>(&mut self, chart: &mut H, id: WidgetId, value: PropertyValue) -> ChartResult<bool>
    where
        H: ChartHandle + ?Sized,
    {
        let Some(widget) = self.widgets.get_mut(&id) else {
            trace!(widget = %id, "change event for detached widget ignored");
            return Ok(false);
        };

        let value = widget.kind.normalize(value)?;
        if let Err(err) = chart.update_property(widget.target, value.clone()) {
            warn!(widget = %id, target = %widget.target, error = %err, "chart rejected widget value");
            return Err(err);
        }

        trace!(widget = %id, target = %widget.target, %value, "widget value applied");
        widget.value = value;
        chart.mount_overlay(widget.overlay());
        if let Err(err) = chart.rerender() {
            // The update already landed; the chart stays dirty for the next pass.
            warn!(widget = %id, error = %err, "redraw after widget change failed");
        }
        Ok(true)
    }

    /// Fires a toolbar button or context-menu item.
    pub fn activate<H>(&mut self, chart: &mut H, id: WidgetId) -> ChartResult<bool>
    where
        H: ChartHandle + ?Sized,
    {
        let Some(widget) = self.widgets.get(&id) else {
            return Ok(false);
        };
        if !widget.kind.is_trigger() {
            return Err(ChartError::InvalidData(format!(
                "{} `{id}` cannot be activated",
                widget.kind.name()
            )));
        }
        let preset = widget.kind.default_value();
        self.set_value(chart, id, preset)
    }

    /// Moves an attached widget and remounts it at its new bounds.
    pub fn reposition<H>(
        &mut self,
        chart: &mut H,
        id: WidgetId,
        placement: WidgetPlacement,
    ) -> ChartResult<WidgetBounds>
    where
        H: ChartHandle + ?Sized,
    {
        let stack_index = self
            .widgets
            .values()
            .filter(|widget| widget.id != id && widget.placement.anchor == placement.anchor)
            .count();
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(ChartError::UnknownWidget(id))?;
        widget.placement = placement;
        widget.bounds = placement.resolve(chart.viewport(), widget.kind.preferred_size(), stack_index);
        chart.mount_overlay(widget.overlay());
        debug!(widget = %id, x = widget.bounds.x, y = widget.bounds.y, "widget repositioned");
        Ok(widget.bounds)
    }

    /// Removes the listener and the scene presence of widget `id`.
    ///
    /// Returns `false`, without touching the chart, when it is already gone.
    pub fn detach<H>(&mut self, chart: &mut H, id: WidgetId) -> bool
    where
        H: ChartHandle + ?Sized,
    {
        let Some(widget) = self.widgets.shift_remove(&id) else {
            trace!(widget = %id, "detach of unknown widget ignored");
            return false;
        };
        chart.unmount_overlay(widget.id);
        debug!(widget = %id, target = %widget.target, "widget detached");
        true
    }

    /// Detaches every widget, e.g. on chart teardown. Returns the count.
    pub fn detach_all<H>(&mut self, chart: &mut H) -> usize
    where
        H: ChartHandle + ?Sized,
    {
        let ids: Vec<WidgetId> = self.widgets.keys().copied().collect();
        let mut detached = 0;
        for id in ids {
            if self.detach(&mut *chart, id) {
                detached += 1;
            }
        }
        detached
    }

    /// Re-reads the chart's current property values into non-trigger widgets,
    /// so widgets sharing a target show the value that won.
    pub fn sync_from_chart<H>(&mut self, chart: &mut H) -> usize
    where
        H: ChartHandle + ?Sized,
    {
        let mut updated = 0;
        for widget in self.widgets.values_mut() {
            if widget.kind.is_trigger() {
                continue;
            }
            let Some(current) = chart
                .property(widget.target)
                .and_then(|value| widget.kind.normalize(value).ok())
            else {
                continue;
            };
            if current != widget.value {
                widget.value = current;
                chart.mount_overlay(widget.overlay());
                updated += 1;
            }
        }
        updated
    }

    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
