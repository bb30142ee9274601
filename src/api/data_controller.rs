use tracing::{debug, warn};

use crate::core::{Axis, SourceRef};
use crate::error::{BindingError, BindingResult, ChartError, ChartResult};
use crate::interaction::{EditIntent, EditKind};
use crate::render::Renderer;

use super::{ChartEngine, FieldIndex, PluginEvent, render_frame_builder};

impl<R: Renderer> ChartEngine<R> {
    /// Registers a data source and indexes its field names.
    ///
    /// Returns the number of fields it declares. An unreadable source is
    /// rejected and nothing is registered.
    pub fn add_data_source(&mut self, source: SourceRef) -> ChartResult<usize> {
        let names = self.resolver.field_names(&source)?;
        let field_count = names.len();
        let source_index = self.model.sources.len();
        debug!(source = %source, field_count, "data source registered");
        self.model.field_index.insert_source_fields(source_index, names);
        self.model.sources.push(source);
        Ok(field_count)
    }

    /// Forgets all sources. Series already bound stay on the chart.
    pub fn clear_data_sources(&mut self) {
        self.model.sources.clear();
        self.model.field_index.clear();
    }

    /// Re-reads the field names of every source. The catalog is replaced
    /// only if all sources are readable.
    pub fn refresh_field_catalog(&mut self) -> ChartResult<()> {
        let mut index = FieldIndex::default();
        for (source_index, source) in self.model.sources.iter().enumerate() {
            index.insert_source_fields(source_index, self.resolver.field_names(source)?);
        }
        self.model.field_index = index;
        Ok(())
    }

    /// Binds `axis` to `field` and shows the field name as the label text.
    pub fn bind_axis(&mut self, axis: Axis, field: &str) -> ChartResult<()> {
        let intent = EditIntent {
            axis,
            new_text: field.trim().to_owned(),
            kind: EditKind::DataRebind,
        };
        self.apply_rebind(&intent, None).map(|_| ())
    }

    /// Resolves `intent` and swaps the new series in.
    ///
    /// The label gets `display_text`, or the resolved field name when `None`.
    /// Nothing on the chart changes unless resolution fully succeeds.
    pub(super) fn apply_rebind(
        &mut self,
        intent: &EditIntent,
        display_text: Option<&str>,
    ) -> ChartResult<(String, usize)> {
        if !intent.axis.is_data_axis() {
            return Err(ChartError::InvalidData(format!(
                "{} label cannot be bound to a data field",
                intent.axis
            )));
        }

        let series = self
            .resolve_across_sources(intent)
            .map_err(ChartError::from)
            .and_then(|series| render_frame_builder::ensure_plottable(&series).map(|()| series))
            .inspect_err(|err| {
                warn!(axis = %intent.axis, field = %intent.new_text, error = %err, "rebind failed");
            })?;
        let field = series.field_name().to_owned();
        let len = series.len();

        self.model.replace_series(intent.axis, series);
        if let Some(label) = self.model.labels.get_mut(&intent.axis) {
            label.bound_field = Some(field.clone());
            label.display_text = display_text.unwrap_or(&field).to_owned();
        }
        debug!(axis = %intent.axis, field = %field, len, "series rebound");

        self.invalidate();
        self.emit_plugin_event(PluginEvent::SeriesRebound {
            axis: intent.axis,
            len,
        });
        Ok((field, len))
    }

    /// Picks the source owning the field from the catalog, falling back to
    /// trying every source in priority order.
    fn resolve_across_sources(&self, intent: &EditIntent) -> BindingResult<crate::core::DataSeries> {
        if let Some(source_index) = self.model.field_index.source_of(&intent.new_text) {
            if let Some(source) = self.model.sources.get(source_index) {
                return self.resolver.resolve(intent, source);
            }
        }

        let mut last_err = None;
        for source in &self.model.sources {
            match self.resolver.resolve(intent, source) {
                Ok(series) => return Ok(series),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| BindingError::FieldNotFound {
            field: intent.new_text.clone(),
            source_name: "<no data source>".to_owned(),
        }))
    }
}
