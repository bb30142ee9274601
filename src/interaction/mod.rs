//! Click-to-edit state machine for chart text labels.
//!
//! The controller is pure: it never touches chart data. It opens an editable
//! field for a clicked label, and on confirmation classifies the text into an
//! [`EditIntent`] that the engine applies.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Axis, ChartLabel, FieldCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Only the displayed label text changes.
    Cosmetic,
    /// The axis is rebound to the field named by the new text.
    DataRebind,
}

/// How the edit kind is decided when the user did not pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EditKindPolicy {
    /// Text matching a field of the active dataset is a rebind request.
    #[default]
    InferFromFieldNames,
    /// Without an explicit toggle every edit is cosmetic.
    ExplicitOnly,
}

/// Signal produced when an edit ends without an intent. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCancelled;

/// In-place text editor that temporarily replaces a static label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableField {
    original: ChartLabel,
    draft: String,
    kind_toggle: Option<EditKind>,
}

impl EditableField {
    fn open(label: &ChartLabel) -> Self {
        Self {
            original: label.clone(),
            draft: label.display_text.clone(),
            kind_toggle: None,
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.original.axis
    }

    /// Label as it was when the editor opened; restored on cancel.
    #[must_use]
    pub fn original(&self) -> &ChartLabel {
        &self.original
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn kind_toggle(&self) -> Option<EditKind> {
        self.kind_toggle
    }
}

/// A confirmed edit waiting to be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditIntent {
    pub axis: Axis,
    pub new_text: String,
    pub kind: EditKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelEditController {
    policy: EditKindPolicy,
    pending: Option<EditableField>,
}

impl LabelEditController {
    #[must_use]
    pub fn new(policy: EditKindPolicy) -> Self {
        Self {
            policy,
            pending: None,
        }
    }

    #[must_use]
    pub fn policy(&self) -> EditKindPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EditKindPolicy) {
        self.policy = policy;
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&EditableField> {
        self.pending.as_ref()
    }

    /// Opens an editor for `label`.
    ///
    /// Non-editable labels are ignored and leave any open editor as is. An
    /// editor already open on another label is cancelled first.
    pub fn on_label_click(&mut self, label: &ChartLabel) -> Option<EditableField> {
        if !label.editable {
            trace!(axis = %label.axis, "ignoring click on read-only label");
            return None;
        }
        if let Some(previous) = self.pending.take() {
            debug!(axis = %previous.axis(), "label editor blurred by another click");
        }

        let field = EditableField::open(label);
        debug!(axis = %label.axis, text = %label.display_text, "label editor opened");
        self.pending = Some(field.clone());
        Some(field)
    }

    /// Updates the draft text of the open editor. Returns `false` when idle.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self.pending.as_mut() {
            Some(field) => {
                field.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Records the user's explicit edit kind choice on the open editor.
    pub fn set_kind_toggle(&mut self, kind: Option<EditKind>) -> bool {
        match self.pending.as_mut() {
            Some(field) => {
                field.kind_toggle = kind;
                true
            }
            None => false,
        }
    }

    /// Confirms the open editor with `new_text` and classifies the edit.
    ///
    /// The editor is closed in every case. Blank text, or no open editor,
    /// produces [`EditCancelled`].
    pub fn on_edit_confirm<C>(
        &mut self,
        new_text: &str,
        fields: &C,
    ) -> Result<EditIntent, EditCancelled>
    where
        C: FieldCatalog + ?Sized,
    {
        let field = self.pending.take().ok_or(EditCancelled)?;
        let new_text = new_text.trim();
        if new_text.is_empty() {
            debug!(axis = %field.axis(), "blank label text treated as cancel");
            return Err(EditCancelled);
        }

        let kind = self.classify(&field, new_text, fields);
        debug!(axis = %field.axis(), text = new_text, ?kind, "label edit confirmed");
        Ok(EditIntent {
            axis: field.axis(),
            new_text: new_text.to_owned(),
            kind,
        })
    }

    /// Confirms the open editor with its current draft text.
    pub fn confirm_draft<C>(&mut self, fields: &C) -> Result<EditIntent, EditCancelled>
    where
        C: FieldCatalog + ?Sized,
    {
        let draft = self
            .pending
            .as_ref()
            .map(|field| field.draft.clone())
            .ok_or(EditCancelled)?;
        self.on_edit_confirm(&draft, fields)
    }

    /// Abandons the open editor. Calling it while idle is a no-op.
    pub fn cancel(&mut self) -> Option<EditableField> {
        let field = self.pending.take()?;
        debug!(axis = %field.axis(), "label edit cancelled");
        Some(field)
    }

    fn classify<C>(&self, field: &EditableField, text: &str, fields: &C) -> EditKind
    where
        C: FieldCatalog + ?Sized,
    {
        // The title describes no field, so there is nothing to rebind.
        if !field.axis().is_data_axis() {
            return EditKind::Cosmetic;
        }
        if let Some(kind) = field.kind_toggle {
            return kind;
        }
        match self.policy {
            EditKindPolicy::ExplicitOnly => EditKind::Cosmetic,
            EditKindPolicy::InferFromFieldNames => match fields.match_field(text) {
                Some(matched) if !field.original.is_bound_to(matched) => EditKind::DataRebind,
                _ => EditKind::Cosmetic,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<String> {
        vec!["Y1".to_owned(), "Y2".to_owned()]
    }

    fn y_label() -> ChartLabel {
        ChartLabel::new(Axis::Y, "Y1").with_bound_field("Y1")
    }

    #[test]
    fn click_prepopulates_draft_with_label_text() {
        let mut controller = LabelEditController::default();
        let field = controller.on_label_click(&y_label()).expect("editable");
        assert_eq!(field.draft(), "Y1");
        assert!(controller.is_editing());
    }

    #[test]
    fn read_only_click_keeps_open_editor() {
        let mut controller = LabelEditController::default();
        controller.on_label_click(&y_label()).expect("editable");
        let locked = ChartLabel::new(Axis::Title, "Sales").with_editable(false);
        assert!(controller.on_label_click(&locked).is_none());
        assert_eq!(controller.pending().map(EditableField::axis), Some(Axis::Y));
    }

    #[test]
    fn matching_field_name_is_a_rebind() {
        let mut controller = LabelEditController::default();
        controller.on_label_click(&y_label());
        let intent = controller.on_edit_confirm(" Y2 ", &fields()).expect("intent");
        assert_eq!(intent.kind, EditKind::DataRebind);
        assert_eq!(intent.new_text, "Y2");
    }

    #[test]
    fn currently_bound_field_name_is_cosmetic() {
        let mut controller = LabelEditController::default();
        let mut label = y_label();
        label.display_text = "Revenue".to_owned();
        controller.on_label_click(&label);
        let intent = controller.on_edit_confirm("Y1", &fields()).expect("intent");
        assert_eq!(intent.kind, EditKind::Cosmetic);
    }

    #[test]
    fn explicit_toggle_overrides_inference() {
        let mut controller = LabelEditController::default();
        controller.on_label_click(&y_label());
        assert!(controller.set_kind_toggle(Some(EditKind::Cosmetic)));
        let intent = controller.on_edit_confirm("Y2", &fields()).expect("intent");
        assert_eq!(intent.kind, EditKind::Cosmetic);

        let mut explicit = LabelEditController::new(EditKindPolicy::ExplicitOnly);
        explicit.on_label_click(&y_label());
        let intent = explicit.on_edit_confirm("Y2", &fields()).expect("intent");
        assert_eq!(intent.kind, EditKind::Cosmetic);
    }

    #[test]
    fn blank_text_and_idle_confirm_cancel() {
        let mut controller = LabelEditController::default();
        assert_eq!(controller.on_edit_confirm("Y2", &fields()), Err(EditCancelled));
        controller.on_label_click(&y_label());
        assert_eq!(controller.on_edit_confirm("   ", &fields()), Err(EditCancelled));
        assert!(!controller.is_editing());
        assert!(controller.cancel().is_none());
    }
}
