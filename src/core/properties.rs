use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Value shape accepted by a chart property or produced by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValueKind {
    Number,
    Bool,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    #[must_use]
    pub fn kind(&self) -> PropertyValueKind {
        match self {
            Self::Number(_) => PropertyValueKind::Number,
            Self::Bool(_) => PropertyValueKind::Bool,
            Self::Text(_) => PropertyValueKind::Text,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{}", if *value { "on" } else { "off" }),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Chart properties a widget can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetProperty {
    Opacity,
    LineWidth,
    PointRadius,
    SeriesVisible,
    GridVisible,
    Title,
    /// Rebinds the x axis to the named field.
    XField,
    /// Rebinds the y axis to the named field.
    YField,
}

impl TargetProperty {
    #[must_use]
    pub const fn value_kind(self) -> PropertyValueKind {
        match self {
            Self::Opacity | Self::LineWidth | Self::PointRadius => PropertyValueKind::Number,
            Self::SeriesVisible | Self::GridVisible => PropertyValueKind::Bool,
            Self::Title | Self::XField | Self::YField => PropertyValueKind::Text,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::LineWidth => "line_width",
            Self::PointRadius => "point_radius",
            Self::SeriesVisible => "series_visible",
            Self::GridVisible => "grid_visible",
            Self::Title => "title",
            Self::XField => "x_field",
            Self::YField => "y_field",
        }
    }
}

impl fmt::Display for TargetProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appearance state of one chart, mutated through property updates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartProperties {
    pub opacity: f64,
    pub line_width: f64,
    pub point_radius: f64,
    pub series_visible: bool,
    pub grid_visible: bool,
}

impl Default for ChartProperties {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            line_width: 1.5,
            point_radius: 0.0,
            series_visible: true,
            grid_visible: true,
        }
    }
}

impl ChartProperties {
    pub fn validate(self) -> ChartResult<()> {
        check_opacity(self.opacity)?;
        check_line_width(self.line_width)?;
        check_point_radius(self.point_radius)
    }

    /// Reads an appearance property. Label-backed targets return `None`.
    #[must_use]
    pub fn get(&self, target: TargetProperty) -> Option<PropertyValue> {
        match target {
            TargetProperty::Opacity => Some(PropertyValue::Number(self.opacity)),
            TargetProperty::LineWidth => Some(PropertyValue::Number(self.line_width)),
            TargetProperty::PointRadius => Some(PropertyValue::Number(self.point_radius)),
            TargetProperty::SeriesVisible => Some(PropertyValue::Bool(self.series_visible)),
            TargetProperty::GridVisible => Some(PropertyValue::Bool(self.grid_visible)),
            TargetProperty::Title | TargetProperty::XField | TargetProperty::YField => None,
        }
    }

    /// Writes an appearance property after validating the value.
    ///
    /// Returns `Ok(false)` for label-backed targets, which the engine handles.
    pub fn set(&mut self, target: TargetProperty, value: &PropertyValue) -> ChartResult<bool> {
        let expected = target.value_kind();
        if value.kind() != expected {
            return Err(ChartError::InvalidData(format!(
                "property `{target}` expects a {expected:?} value, got {:?}",
                value.kind()
            )));
        }
        match (target, value) {
            (TargetProperty::Opacity, PropertyValue::Number(v)) => {
                check_opacity(*v)?;
                self.opacity = *v;
            }
            (TargetProperty::LineWidth, PropertyValue::Number(v)) => {
                check_line_width(*v)?;
                self.line_width = *v;
            }
            (TargetProperty::PointRadius, PropertyValue::Number(v)) => {
                check_point_radius(*v)?;
                self.point_radius = *v;
            }
            (TargetProperty::SeriesVisible, PropertyValue::Bool(v)) => self.series_visible = *v,
            (TargetProperty::GridVisible, PropertyValue::Bool(v)) => self.grid_visible = *v,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn check_opacity(value: f64) -> ChartResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ChartError::InvalidData(
            "opacity must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}

fn check_line_width(value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(
            "line width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

fn check_point_radius(value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(
            "point radius must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}
