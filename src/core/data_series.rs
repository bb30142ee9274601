use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::SourceRef;

/// One typed cell of a tabular source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Number(f64),
    /// Unix seconds parsed from a date or date-time cell.
    Time(f64),
    Text(String),
    Missing,
}

impl DataValue {
    /// Numeric position of the value on a continuous scale, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) | Self::Time(value) => Some(*value),
            Self::Text(_) | Self::Missing => None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One loaded column (or row) of tabular data.
///
/// A series is immutable once built: rebinding replaces the whole value in
/// the chart model instead of editing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    field_name: String,
    values: Vec<DataValue>,
    source: SourceRef,
}

impl DataSeries {
    #[must_use]
    pub fn new(field_name: impl Into<String>, values: Vec<DataValue>, source: SourceRef) -> Self {
        Self {
            field_name: field_name.into(),
            values,
            source,
        }
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    #[must_use]
    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` when every present value sits on a continuous scale.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        let mut any = false;
        for value in &self.values {
            match value {
                DataValue::Number(_) | DataValue::Time(_) => any = true,
                DataValue::Missing => {}
                DataValue::Text(_) => return false,
            }
        }
        any
    }

    /// Min/max over the numeric values, ignoring text and missing cells.
    #[must_use]
    pub fn numeric_extent(&self) -> Option<(f64, f64)> {
        let numbers = self.values.iter().filter_map(DataValue::as_f64);
        let min = numbers.clone().map(OrderedFloat).min()?;
        let max = numbers.map(OrderedFloat).max()?;
        Some((min.0, max.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: Vec<DataValue>) -> DataSeries {
        DataSeries::new("v", values, SourceRef::inline("mem", "v\n"))
    }

    #[test]
    fn extent_skips_non_numeric_cells() {
        let s = series(vec![
            DataValue::Number(3.0),
            DataValue::Missing,
            DataValue::Number(-1.5),
            DataValue::Time(10.0),
        ]);
        assert_eq!(s.numeric_extent(), Some((-1.5, 10.0)));
        assert!(s.is_numeric());
    }

    #[test]
    fn text_series_is_categorical() {
        let s = series(vec![
            DataValue::Text("a".to_owned()),
            DataValue::Number(1.0),
        ]);
        assert!(!s.is_numeric());
        assert_eq!(series(vec![DataValue::Missing]).numeric_extent(), None);
    }
}
