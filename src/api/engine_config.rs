use serde::{Deserialize, Serialize};

use crate::core::{ChartProperties, SourceRef, Viewport};
use crate::interaction::EditKindPolicy;

fn default_labels_editable() -> bool {
    true
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub title: String,
    /// Display text of the x-axis label. Defaults to the bound field name.
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
    #[serde(default)]
    pub x_field: Option<String>,
    #[serde(default)]
    pub y_field: Option<String>,
    #[serde(default = "default_labels_editable")]
    pub labels_editable: bool,
    #[serde(default)]
    pub edit_kind_policy: EditKindPolicy,
    #[serde(default)]
    pub properties: ChartProperties,
    /// Sources in lookup priority order.
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl ChartEngineConfig {
    /// Creates a minimal config with no data and default appearance.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: String::new(),
            x_label: None,
            y_label: None,
            x_field: None,
            y_field: None,
            labels_editable: default_labels_editable(),
            edit_kind_policy: EditKindPolicy::default(),
            properties: ChartProperties::default(),
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the fields initially bound to the x and y axes.
    #[must_use]
    pub fn with_fields(mut self, x_field: Option<&str>, y_field: &str) -> Self {
        self.x_field = x_field.map(str::to_owned);
        self.y_field = Some(y_field.to_owned());
        self
    }

    /// Overrides the axis label texts shown instead of the field names.
    #[must_use]
    pub fn with_axis_labels(mut self, x_label: Option<&str>, y_label: Option<&str>) -> Self {
        self.x_label = x_label.map(str::to_owned);
        self.y_label = y_label.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn with_labels_editable(mut self, editable: bool) -> Self {
        self.labels_editable = editable;
        self
    }

    #[must_use]
    pub fn with_edit_kind_policy(mut self, policy: EditKindPolicy) -> Self {
        self.edit_kind_policy = policy;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: ChartProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn to_json_pretty(&self) -> crate::error::ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::error::ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> crate::error::ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            crate::error::ChartError::InvalidData(format!("failed to parse chart config: {e}"))
        })
    }
}
