use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    Axis, ChartLabel, ChartProperties, DataSeries, FieldCatalog, SourceRef, Viewport,
    match_field_name,
};
use crate::extensions::{WidgetId, WidgetOverlay};

/// User-visible message shown next to a label after a failed edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineMessage {
    pub axis: Axis,
    pub text: String,
}

/// Field names of all registered sources, mapped to the first source that
/// declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    fields: IndexMap<String, usize>,
}

impl FieldIndex {
    pub(super) fn insert_source_fields(&mut self, source_index: usize, names: Vec<String>) {
        for name in names {
            self.fields.entry(name).or_insert(source_index);
        }
    }

    pub(super) fn clear(&mut self) {
        self.fields.clear();
    }

    /// Index of the source that owns the field matched by `query`.
    #[must_use]
    pub fn source_of(&self, query: &str) -> Option<usize> {
        let name = self.match_field(query)?;
        self.fields.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldCatalog for FieldIndex {
    fn match_field(&self, query: &str) -> Option<&str> {
        match_field_name(query, self.names())
    }
}

/// All mutable state of one chart instance.
///
/// Series are only ever replaced as whole values; nothing hands out `&mut`
/// access to a loaded `DataSeries`.
pub struct ChartModel {
    pub(super) viewport: Viewport,
    pub(super) labels: IndexMap<Axis, ChartLabel>,
    pub(super) x_series: Option<DataSeries>,
    pub(super) y_series: Option<DataSeries>,
    pub(super) sources: Vec<SourceRef>,
    pub(super) field_index: FieldIndex,
    pub(super) properties: ChartProperties,
    pub(super) inline_message: Option<InlineMessage>,
    pub(super) overlays: IndexMap<WidgetId, WidgetOverlay>,
}

impl ChartModel {
    #[must_use]
    pub(super) fn new(viewport: Viewport, properties: ChartProperties) -> Self {
        Self {
            viewport,
            labels: IndexMap::new(),
            x_series: None,
            y_series: None,
            sources: Vec::new(),
            field_index: FieldIndex::default(),
            properties,
            inline_message: None,
            overlays: IndexMap::new(),
        }
    }

    #[must_use]
    pub(super) fn series(&self, axis: Axis) -> Option<&DataSeries> {
        match axis {
            Axis::X => self.x_series.as_ref(),
            Axis::Y => self.y_series.as_ref(),
            Axis::Title => None,
        }
    }

    /// Swaps in a freshly resolved series, returning the one it replaces.
    pub(super) fn replace_series(&mut self, axis: Axis, series: DataSeries) -> Option<DataSeries> {
        match axis {
            Axis::X => self.x_series.replace(series),
            Axis::Y => self.y_series.replace(series),
            Axis::Title => None,
        }
    }
}
