use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Text labels a chart exposes for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Title,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Title];

    /// Axes whose label is bound to a data field.
    #[must_use]
    pub const fn is_data_axis(self) -> bool {
        matches!(self, Self::X | Self::Y)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editable text label of a rendered chart.
///
/// `bound_field` names the column/row the label describes. The title label
/// has no bound field, so edits on it are always cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLabel {
    pub axis: Axis,
    pub display_text: String,
    pub bound_field: Option<String>,
    pub editable: bool,
}

impl ChartLabel {
    #[must_use]
    pub fn new(axis: Axis, display_text: impl Into<String>) -> Self {
        Self {
            axis,
            display_text: display_text.into(),
            bound_field: None,
            editable: true,
        }
    }

    #[must_use]
    pub fn with_bound_field(mut self, field: impl Into<String>) -> Self {
        self.bound_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    #[must_use]
    pub fn is_bound_to(&self, field: &str) -> bool {
        self.bound_field.as_deref() == Some(field)
    }
}
