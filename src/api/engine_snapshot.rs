use serde::{Deserialize, Serialize};

use crate::core::{Axis, ChartLabel, ChartProperties, DataSeries, DataValue, Viewport};
use crate::extensions::WidgetId;
use crate::render::Renderer;

use super::{ChartEngine, InlineMessage};

/// Bound series as captured in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub field_name: String,
    pub source_name: String,
    pub values: Vec<DataValue>,
}

impl From<&DataSeries> for SeriesSnapshot {
    fn from(series: &DataSeries) -> Self {
        Self {
            field_name: series.field_name().to_owned(),
            source_name: series.source().name(),
            values: series.values().to_vec(),
        }
    }
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
///
/// Render bookkeeping (pending invalidation, frame counters) is left out so
/// two charts showing the same thing compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub labels: Vec<ChartLabel>,
    pub x_series: Option<SeriesSnapshot>,
    pub y_series: Option<SeriesSnapshot>,
    pub sources: Vec<String>,
    pub properties: ChartProperties,
    pub inline_message: Option<InlineMessage>,
    pub editing: Option<Axis>,
    pub widget_overlays: Vec<WidgetId>,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let model = &self.model;
        EngineSnapshot {
            viewport: model.viewport,
            labels: model.labels.values().cloned().collect(),
            x_series: model.series(Axis::X).map(SeriesSnapshot::from),
            y_series: model.series(Axis::Y).map(SeriesSnapshot::from),
            sources: model.sources.iter().map(|source| source.name()).collect(),
            properties: model.properties,
            inline_message: model.inline_message.clone(),
            editing: self.editor.pending().map(|field| field.axis()),
            widget_overlays: model.overlays.keys().copied().collect(),
        }
    }
}
