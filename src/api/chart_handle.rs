use crate::core::{Axis, ChartLabel, PropertyValue, TargetProperty, Viewport};
use crate::error::ChartResult;
use crate::extensions::{WidgetId, WidgetOverlay};
use crate::render::Renderer;

use super::ChartEngine;

/// Surface of a rendered chart that widgets and hosts drive.
///
/// `ChartEngine` implements it; tests and alternative chart backends can
/// provide their own.
pub trait ChartHandle {
    fn label(&self, axis: Axis) -> Option<&ChartLabel>;

    fn viewport(&self) -> Viewport;

    fn property(&self, target: TargetProperty) -> Option<PropertyValue>;

    fn update_property(&mut self, target: TargetProperty, value: PropertyValue) -> ChartResult<()>;

    /// Adds or replaces the scene presence of a widget.
    fn mount_overlay(&mut self, overlay: WidgetOverlay);

    /// Removes a widget from the scene. Returns `false` if it was not mounted.
    fn unmount_overlay(&mut self, id: WidgetId) -> bool;

    fn rerender(&mut self) -> ChartResult<()>;
}

impl<R: Renderer> ChartHandle for ChartEngine<R> {
    fn label(&self, axis: Axis) -> Option<&ChartLabel> {
        self.model.labels.get(&axis)
    }

    fn viewport(&self) -> Viewport {
        self.model.viewport
    }

    fn property(&self, target: TargetProperty) -> Option<PropertyValue> {
        ChartEngine::property(self, target)
    }

    fn update_property(&mut self, target: TargetProperty, value: PropertyValue) -> ChartResult<()> {
        ChartEngine::update_property(self, target, value)
    }

    fn mount_overlay(&mut self, overlay: WidgetOverlay) {
        self.mount_widget_overlay(overlay);
    }

    fn unmount_overlay(&mut self, id: WidgetId) -> bool {
        self.unmount_widget_overlay(id)
    }

    fn rerender(&mut self) -> ChartResult<()> {
        self.render()
    }
}
