use tracing::{debug, warn};

use crate::core::{DataSeries, DataTable, FieldCatalog, SourceRef};
use crate::error::{BindingError, BindingResult};
use crate::interaction::EditIntent;

/// Loads replacement series for data-level edits.
///
/// Resolution reads the source from scratch on every call and never sees
/// chart state, so a failed resolve cannot leave a chart half-updated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataBindingResolver;

impl DataBindingResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Looks `intent.new_text` up as a field of `source` and returns its
    /// series.
    pub fn resolve(&self, intent: &EditIntent, source: &SourceRef) -> BindingResult<DataSeries> {
        let table = DataTable::read(source).inspect_err(|err| {
            warn!(source = %source, error = %err, "data source unreadable");
        })?;

        let Some(field) = table.match_field(&intent.new_text).map(str::to_owned) else {
            debug!(source = %source, field = %intent.new_text, "rebind field not found");
            return Err(BindingError::FieldNotFound {
                field: intent.new_text.clone(),
                source_name: source.name(),
            });
        };

        let series = table
            .into_series(&field)
            .ok_or_else(|| BindingError::FieldNotFound {
                field: field.clone(),
                source_name: source.name(),
            })?;
        debug!(
            source = %source,
            field = %series.field_name(),
            len = series.len(),
            "rebind resolved"
        );
        Ok(series)
    }

    /// Reads only the field names declared by `source`.
    pub fn field_names(&self, source: &SourceRef) -> BindingResult<Vec<String>> {
        DataTable::read_field_names(source)
    }
}
