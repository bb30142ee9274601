pub mod data_series;
pub mod data_source;
pub mod field_match;
pub mod primitives;
pub mod properties;
pub mod scale;
pub mod types;

pub use data_series::{DataSeries, DataValue};
pub use data_source::{DataTable, FieldOrientation, SourceFormat, SourceLocation, SourceRef};
pub use field_match::{FieldCatalog, match_field_name};
pub use properties::{ChartProperties, PropertyValue, PropertyValueKind, TargetProperty};
pub use scale::LinearScale;
pub use types::{Axis, ChartLabel, Viewport};
