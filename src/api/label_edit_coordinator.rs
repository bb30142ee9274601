use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Axis;
use crate::error::ChartResult;
use crate::interaction::{EditCancelled, EditIntent, EditKind, EditableField};
use crate::render::Renderer;

use super::{ChartEngine, InlineMessage, PluginEvent, render_frame_builder};

/// What a confirmed or abandoned label edit did to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    Renamed { axis: Axis, text: String },
    Rebound { axis: Axis, field: String, len: usize },
    Cancelled,
}

impl<R: Renderer> ChartEngine<R> {
    /// Click on the label of `axis`: swaps it for an editable field.
    ///
    /// Returns `None` for read-only labels; the click then changes nothing.
    pub fn click_label(&mut self, axis: Axis) -> Option<EditableField> {
        let label = self.model.labels.get(&axis)?.clone();
        let blurred = self.editor.pending().map(EditableField::axis);
        let field = self.editor.on_label_click(&label)?;

        if let Some(previous) = blurred {
            self.emit_plugin_event(PluginEvent::LabelEditCancelled { axis: previous });
        }
        self.model.inline_message = None;
        self.invalidate();
        self.emit_plugin_event(PluginEvent::LabelEditStarted { axis });
        Some(field)
    }

    /// Pointer click at chart pixel `(x, y)`. Opens the editor of the label
    /// under the pointer; clicks elsewhere change nothing.
    pub fn click_at(&mut self, x: f64, y: f64) -> Option<EditableField> {
        let viewport = self.model.viewport;
        let axis = self
            .model
            .labels
            .values()
            .find(|label| render_frame_builder::label_hit_box(viewport, label).contains(x, y))
            .map(|label| label.axis)?;
        self.click_label(axis)
    }

    /// Replaces the draft text of the open editor (typing).
    pub fn set_edit_draft(&mut self, text: impl Into<String>) -> bool {
        let changed = self.editor.set_draft(text);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Sets the explicit cosmetic/rebind toggle of the open editor.
    pub fn set_edit_kind(&mut self, kind: Option<EditKind>) -> bool {
        let changed = self.editor.set_kind_toggle(kind);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Confirms the open editor with its draft text.
    pub fn confirm_label_edit(&mut self) -> ChartResult<EditOutcome> {
        let Some(axis) = self.editor.pending().map(EditableField::axis) else {
            return Ok(EditOutcome::Cancelled);
        };
        match self.editor.confirm_draft(&self.model.field_index) {
            Ok(intent) => self.apply_edit_intent(intent),
            Err(EditCancelled) => {
                self.invalidate();
                self.emit_plugin_event(PluginEvent::LabelEditCancelled { axis });
                Ok(EditOutcome::Cancelled)
            }
        }
    }

    /// Types `text` into the open editor and confirms it.
    pub fn confirm_label_edit_with(&mut self, text: &str) -> ChartResult<EditOutcome> {
        self.editor.set_draft(text);
        self.confirm_label_edit()
    }

    /// Abandons the open editor and restores the static label.
    ///
    /// Returns `false` when no editor was open.
    pub fn cancel_label_edit(&mut self) -> bool {
        let Some(field) = self.editor.cancel() else {
            return false;
        };
        self.invalidate();
        self.emit_plugin_event(PluginEvent::LabelEditCancelled { axis: field.axis() });
        true
    }

    /// Applies a classified edit.
    ///
    /// Binding failures leave the chart unchanged and leave an inline message
    /// next to the edited label.
    pub fn apply_edit_intent(&mut self, intent: EditIntent) -> ChartResult<EditOutcome> {
        let axis = intent.axis;
        match intent.kind {
            EditKind::Cosmetic => {
                if let Some(label) = self.model.labels.get_mut(&axis) {
                    label.display_text = intent.new_text.clone();
                }
                debug!(%axis, text = %intent.new_text, "label renamed");
                self.model.inline_message = None;
                self.invalidate();
                self.emit_plugin_event(PluginEvent::LabelRenamed { axis });
                Ok(EditOutcome::Renamed {
                    axis,
                    text: intent.new_text,
                })
            }
            EditKind::DataRebind => match self.apply_rebind(&intent, Some(intent.new_text.as_str())) {
                Ok((field, len)) => {
                    self.model.inline_message = None;
                    Ok(EditOutcome::Rebound { axis, field, len })
                }
                Err(err) => {
                    self.report_binding_failure(axis, &err);
                    Err(err)
                }
            },
        }
    }

    pub(super) fn report_binding_failure(&mut self, axis: Axis, err: &crate::error::ChartError) {
        self.model.inline_message = Some(InlineMessage {
            axis,
            text: err.to_string(),
        });
        self.invalidate();
        self.emit_plugin_event(PluginEvent::BindingFailed { axis });
    }
}
