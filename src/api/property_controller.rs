use tracing::debug;

use crate::core::{Axis, PropertyValue, TargetProperty};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{EditIntent, EditKind};
use crate::render::Renderer;

use super::validation::validate_title;
use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Current value of a widget-drivable property.
    ///
    /// `XField`/`YField` report the bound field name and are `None` while the
    /// axis is unbound.
    #[must_use]
    pub fn property(&self, target: TargetProperty) -> Option<PropertyValue> {
        match target {
            TargetProperty::Title => self
                .model
                .labels
                .get(&Axis::Title)
                .map(|label| PropertyValue::Text(label.display_text.clone())),
            TargetProperty::XField => self.bound_field_value(Axis::X),
            TargetProperty::YField => self.bound_field_value(Axis::Y),
            _ => self.model.properties.get(target),
        }
    }

    /// Applies a property change coming from a widget or the host.
    ///
    /// Field targets rebind the axis through the data-binding path and share
    /// its all-or-nothing guarantee.
    pub fn update_property(&mut self, target: TargetProperty, value: PropertyValue) -> ChartResult<()> {
        match target {
            TargetProperty::Title => {
                let title = expect_text(target, &value)?;
                validate_title(title)?;
                if let Some(label) = self.model.labels.get_mut(&Axis::Title) {
                    label.display_text = title.trim().to_owned();
                }
            }
            TargetProperty::XField | TargetProperty::YField => {
                let axis = if target == TargetProperty::XField {
                    Axis::X
                } else {
                    Axis::Y
                };
                let intent = EditIntent {
                    axis,
                    new_text: expect_text(target, &value)?.trim().to_owned(),
                    kind: EditKind::DataRebind,
                };
                if let Err(err) = self.apply_rebind(&intent, None) {
                    self.report_binding_failure(axis, &err);
                    return Err(err);
                }
                self.model.inline_message = None;
            }
            _ => {
                self.model.properties.set(target, &value)?;
            }
        }

        debug!(%target, %value, "chart property updated");
        self.invalidate();
        self.emit_plugin_event(PluginEvent::PropertyChanged { target });
        Ok(())
    }

    fn bound_field_value(&self, axis: Axis) -> Option<PropertyValue> {
        self.model
            .series(axis)
            .map(|series| PropertyValue::Text(series.field_name().to_owned()))
    }
}

fn expect_text(target: TargetProperty, value: &PropertyValue) -> ChartResult<&str> {
    value.as_text().ok_or_else(|| {
        ChartError::InvalidData(format!(
            "property `{target}` expects a Text value, got {:?}",
            value.kind()
        ))
    })
}
