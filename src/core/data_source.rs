use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::parse_cell;
use crate::core::{DataSeries, DataValue, FieldCatalog, match_field_name};
use crate::error::{BindingError, BindingResult};

/// How field names are laid out in a delimited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FieldOrientation {
    /// First record holds the field names; each column is one series.
    #[default]
    Columns,
    /// First cell of every record is the field name; the rest of the row is
    /// the series.
    Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFormat {
    pub delimiter: u8,
    #[serde(default)]
    pub orientation: FieldOrientation,
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            orientation: FieldOrientation::Columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceLocation {
    Path(PathBuf),
    Inline { name: String, contents: String },
}

/// Reference to a read-only tabular data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub location: SourceLocation,
    #[serde(default)]
    pub format: SourceFormat,
}

impl SourceRef {
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: SourceLocation::Path(path.into()),
            format: SourceFormat::default(),
        }
    }

    #[must_use]
    pub fn inline(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::Inline {
                name: name.into(),
                contents: contents.into(),
            },
            format: SourceFormat::default(),
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.format.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: FieldOrientation) -> Self {
        self.format.orientation = orientation;
        self
    }

    /// Human-readable name used in errors and logs.
    #[must_use]
    pub fn name(&self) -> String {
        match &self.location {
            SourceLocation::Path(path) => path.display().to_string(),
            SourceLocation::Inline { name, .. } => name.clone(),
        }
    }

    fn read_records(&self) -> BindingResult<Vec<Vec<String>>> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.format.delimiter)
            .has_headers(false)
            .flexible(true);

        match &self.location {
            SourceLocation::Path(path) => {
                let reader = builder
                    .from_path(path)
                    .map_err(|e| BindingError::unreadable(self.name(), e.to_string()))?;
                self.collect_records(reader)
            }
            SourceLocation::Inline { contents, .. } => {
                self.collect_records(builder.from_reader(contents.as_bytes()))
            }
        }
    }

    fn collect_records<R: std::io::Read>(
        &self,
        mut reader: csv::Reader<R>,
    ) -> BindingResult<Vec<Vec<String>>> {
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| BindingError::unreadable(self.name(), e.to_string()))?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            records.push(record.iter().map(str::to_owned).collect());
        }
        trace!(source = %self.name(), records = records.len(), "read source records");
        Ok(records)
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&Path> for SourceRef {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

/// Fully parsed source: `{field name -> values}` in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    source: SourceRef,
    fields: IndexMap<String, Vec<DataValue>>,
}

impl DataTable {
    /// Reads and parses `source`. Duplicate or blank field names, ragged
    /// records wider than the header, and empty sources are rejected.
    pub fn read(source: &SourceRef) -> BindingResult<Self> {
        let records = source.read_records()?;
        let fields = match source.format.orientation {
            FieldOrientation::Columns => parse_columns(source, records)?,
            FieldOrientation::Rows => parse_rows(source, records)?,
        };
        debug!(source = %source, fields = fields.len(), "parsed data table");
        Ok(Self {
            source: source.clone(),
            fields,
        })
    }

    /// Reads only the field names of `source`, applying the same validation
    /// as [`DataTable::read`].
    pub fn read_field_names(source: &SourceRef) -> BindingResult<Vec<String>> {
        Ok(Self::read(source)?.fields.into_keys().collect())
    }

    #[must_use]
    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn values(&self, field: &str) -> Option<&[DataValue]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Consumes the table and extracts the series for an exact field name.
    #[must_use]
    pub fn into_series(mut self, field: &str) -> Option<DataSeries> {
        let (name, values) = self.fields.swap_remove_entry(field)?;
        Some(DataSeries::new(name, values, self.source))
    }
}

impl FieldCatalog for DataTable {
    fn match_field(&self, query: &str) -> Option<&str> {
        match_field_name(query, self.field_names())
    }
}

fn insert_unique(
    source: &SourceRef,
    fields: &mut IndexMap<String, Vec<DataValue>>,
    name: &str,
    values: Vec<DataValue>,
) -> BindingResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BindingError::unreadable(
            source.name(),
            "field name must not be blank",
        ));
    }
    match fields.entry(name.to_owned()) {
        Entry::Occupied(_) => Err(BindingError::unreadable(
            source.name(),
            format!("duplicate field name `{name}`"),
        )),
        Entry::Vacant(slot) => {
            slot.insert(values);
            Ok(())
        }
    }
}

fn parse_columns(
    source: &SourceRef,
    records: Vec<Vec<String>>,
) -> BindingResult<IndexMap<String, Vec<DataValue>>> {
    let mut rows = records.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| BindingError::unreadable(source.name(), "source has no header record"))?;

    let mut columns: Vec<Vec<DataValue>> = vec![Vec::new(); header.len()];
    for (index, row) in rows.enumerate() {
        if row.len() > header.len() {
            return Err(BindingError::unreadable(
                source.name(),
                format!(
                    "record {} has {} cells but the header declares {} fields",
                    index + 2,
                    row.len(),
                    header.len()
                ),
            ));
        }
        for (column, slot) in columns.iter_mut().enumerate() {
            slot.push(row.get(column).map_or(DataValue::Missing, |cell| parse_cell(cell)));
        }
    }

    let mut fields = IndexMap::with_capacity(header.len());
    for (name, values) in header.iter().zip(columns) {
        insert_unique(source, &mut fields, name, values)?;
    }
    Ok(fields)
}

fn parse_rows(
    source: &SourceRef,
    records: Vec<Vec<String>>,
) -> BindingResult<IndexMap<String, Vec<DataValue>>> {
    if records.is_empty() {
        return Err(BindingError::unreadable(source.name(), "source has no records"));
    }
    let mut fields = IndexMap::with_capacity(records.len());
    for record in records {
        let mut cells = record.iter();
        let name = cells.next().map_or("", String::as_str);
        let values = cells.map(|cell| parse_cell(cell)).collect();
        insert_unique(source, &mut fields, name, values)?;
    }
    Ok(fields)
}
