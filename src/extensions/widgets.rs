//! Interactive controls embedded into a rendered chart.
//!
//! Widget kinds and target properties are closed enums so every supported
//! kind/property combination is checked by `match`, not at runtime lookups.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::primitives::snap_to_step;
use crate::core::{Axis, PropertyValue, PropertyValueKind, TargetProperty, Viewport};
use crate::error::{ChartError, ChartResult};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

const EDGE_MARGIN_PX: f64 = 8.0;
const STACK_GAP_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(u64);

impl WidgetId {
    pub(crate) fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetKind {
    Slider { min: f64, max: f64, step: f64 },
    Dropdown { options: Vec<String> },
    Checkbox,
    RadioGroup { options: Vec<String> },
    TextInput { numeric: bool },
    /// Applies `preset` to the target when clicked.
    ToolbarButton { label: String, preset: PropertyValue },
    /// Applies `preset` to the target when chosen from the context menu.
    ContextMenuItem { label: String, preset: PropertyValue },
}

impl WidgetKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Slider { .. } => "slider",
            Self::Dropdown { .. } => "dropdown",
            Self::Checkbox => "checkbox",
            Self::RadioGroup { .. } => "radio_group",
            Self::TextInput { .. } => "text_input",
            Self::ToolbarButton { .. } => "toolbar_button",
            Self::ContextMenuItem { .. } => "context_menu_item",
        }
    }

    #[must_use]
    pub fn value_kind(&self) -> PropertyValueKind {
        match self {
            Self::Slider { .. } => PropertyValueKind::Number,
            Self::Dropdown { .. } | Self::RadioGroup { .. } => PropertyValueKind::Text,
            Self::Checkbox => PropertyValueKind::Bool,
            Self::TextInput { numeric: true } => PropertyValueKind::Number,
            Self::TextInput { numeric: false } => PropertyValueKind::Text,
            Self::ToolbarButton { preset, .. } | Self::ContextMenuItem { preset, .. } => {
                preset.kind()
            }
        }
    }

    /// Buttons and menu items fire a preset instead of holding user input.
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            Self::ToolbarButton { .. } | Self::ContextMenuItem { .. }
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Slider { min, max, step } => {
                if !min.is_finite() || !max.is_finite() || min >= max {
                    return Err(ChartError::InvalidData(
                        "slider range must be finite with min < max".to_owned(),
                    ));
                }
                if !step.is_finite() || *step < 0.0 || *step > max - min {
                    return Err(ChartError::InvalidData(
                        "slider step must be finite and within [0, max - min]".to_owned(),
                    ));
                }
                // Every reachable value must be snappable without overflow.
                snap_to_step(*max, *min, *step).map_err(|_| {
                    ChartError::InvalidData(format!(
                        "slider range {min}..={max} with step {step} is too fine to snap"
                    ))
                })?;
            }
            Self::Dropdown { options } | Self::RadioGroup { options } => {
                if options.is_empty() {
                    return Err(ChartError::InvalidData(format!(
                        "{} needs at least one option",
                        self.name()
                    )));
                }
                for (index, option) in options.iter().enumerate() {
                    if option.trim().is_empty() {
                        return Err(ChartError::InvalidData(format!(
                            "{} options must not be blank",
                            self.name()
                        )));
                    }
                    if options[..index].contains(option) {
                        return Err(ChartError::InvalidData(format!(
                            "{} option `{option}` is listed twice",
                            self.name()
                        )));
                    }
                }
            }
            Self::ToolbarButton { label, .. } | Self::ContextMenuItem { label, .. } => {
                if label.trim().is_empty() {
                    return Err(ChartError::InvalidData(format!(
                        "{} label must not be blank",
                        self.name()
                    )));
                }
            }
            Self::Checkbox | Self::TextInput { .. } => {}
        }
        Ok(())
    }

    #[must_use]
    pub fn default_value(&self) -> PropertyValue {
        match self {
            Self::Slider { min, .. } => PropertyValue::Number(*min),
            Self::Dropdown { options } | Self::RadioGroup { options } => {
                PropertyValue::Text(options.first().cloned().unwrap_or_default())
            }
            Self::Checkbox => PropertyValue::Bool(false),
            Self::TextInput { numeric: true } => PropertyValue::Number(0.0),
            Self::TextInput { numeric: false } => PropertyValue::Text(String::new()),
            Self::ToolbarButton { preset, .. } | Self::ContextMenuItem { preset, .. } => {
                preset.clone()
            }
        }
    }

    /// Converts raw user input into the value the widget emits.
    ///
    /// Sliders clamp to their range and snap to `step`; choice widgets only
    /// accept listed options; numeric text inputs parse text.
    pub fn normalize(&self, value: PropertyValue) -> ChartResult<PropertyValue> {
        let mismatch = |value: &PropertyValue| {
            ChartError::InvalidData(format!(
                "{} expects a {:?} value, got {:?}",
                self.name(),
                self.value_kind(),
                value.kind()
            ))
        };

        match (self, value) {
            (Self::Slider { min, max, step }, PropertyValue::Number(raw)) => {
                if !raw.is_finite() {
                    return Err(ChartError::InvalidData(
                        "slider value must be finite".to_owned(),
                    ));
                }
                let snapped = snap_to_step(raw.clamp(*min, *max), *min, *step)?;
                Ok(PropertyValue::Number(snapped.clamp(*min, *max)))
            }
            (Self::Dropdown { options } | Self::RadioGroup { options }, PropertyValue::Text(choice)) => {
                if options.contains(&choice) {
                    Ok(PropertyValue::Text(choice))
                } else {
                    Err(ChartError::InvalidData(format!(
                        "`{choice}` is not an option of this {}",
                        self.name()
                    )))
                }
            }
            (Self::Checkbox, value @ PropertyValue::Bool(_)) => Ok(value),
            (Self::TextInput { numeric: true }, PropertyValue::Number(raw)) if raw.is_finite() => {
                Ok(PropertyValue::Number(raw))
            }
            (Self::TextInput { numeric: true }, PropertyValue::Text(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .map(PropertyValue::Number)
                .ok_or_else(|| {
                    ChartError::InvalidData(format!("`{text}` is not a finite number"))
                }),
            (Self::TextInput { numeric: false }, value @ PropertyValue::Text(_)) => Ok(value),
            (Self::ToolbarButton { preset, .. } | Self::ContextMenuItem { preset, .. }, value) => {
                if value.kind() == preset.kind() {
                    Ok(value)
                } else {
                    Err(mismatch(&value))
                }
            }
            (_, value) => Err(mismatch(&value)),
        }
    }

    /// Nominal on-screen size of the control in pixels.
    #[must_use]
    pub fn preferred_size(&self) -> (f64, f64) {
        match self {
            Self::Slider { .. } => (160.0, 24.0),
            Self::Dropdown { .. } => (140.0, 24.0),
            Self::Checkbox => (120.0, 20.0),
            Self::RadioGroup { options } => (140.0, 20.0 * options.len().max(1) as f64),
            Self::TextInput { .. } => (140.0, 24.0),
            Self::ToolbarButton { .. } => (28.0, 28.0),
            Self::ContextMenuItem { .. } => (160.0, 22.0),
        }
    }
}

/// Where a widget is placed relative to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidgetAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Next to the label of the given axis.
    NearLabel(Axis),
    /// Absolute pixel position, e.g. where a context menu was opened.
    At { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    pub anchor: WidgetAnchor,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for WidgetPlacement {
    fn default() -> Self {
        Self {
            anchor: WidgetAnchor::TopRight,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl WidgetPlacement {
    /// Resolves the widget box in chart pixels.
    ///
    /// `stack_index` counts widgets already sharing the anchor; they are
    /// stacked vertically. The box is clamped inside the viewport.
    #[must_use]
    pub fn resolve(
        self,
        viewport: Viewport,
        size: (f64, f64),
        stack_index: usize,
    ) -> WidgetBounds {
        let (width, height) = size;
        let view_w = f64::from(viewport.width);
        let view_h = f64::from(viewport.height);
        let right = view_w - width - EDGE_MARGIN_PX;
        let bottom = view_h - height - EDGE_MARGIN_PX;
        let center_x = (view_w - width) / 2.0;
        let center_y = (view_h - height) / 2.0;

        let (x, y, grows_up) = match self.anchor {
            WidgetAnchor::TopLeft => (EDGE_MARGIN_PX, EDGE_MARGIN_PX, false),
            WidgetAnchor::TopRight => (right, EDGE_MARGIN_PX, false),
            WidgetAnchor::BottomLeft => (EDGE_MARGIN_PX, bottom, true),
            WidgetAnchor::BottomRight => (right, bottom, true),
            WidgetAnchor::NearLabel(Axis::Title) => (center_x, EDGE_MARGIN_PX, false),
            WidgetAnchor::NearLabel(Axis::X) => (center_x, bottom, true),
            WidgetAnchor::NearLabel(Axis::Y) => (EDGE_MARGIN_PX, center_y, false),
            WidgetAnchor::At { x, y } => (x, y, false),
        };

        let stack_offset = stack_index as f64 * (height + STACK_GAP_PX);
        let y = if grows_up { y - stack_offset } else { y + stack_offset };

        WidgetBounds {
            x: (x + self.offset_x).clamp(0.0, (view_w - width).max(0.0)),
            y: (y + self.offset_y).clamp(0.0, (view_h - height).max(0.0)),
            width: width.min(view_w),
            height: height.min(view_h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Request to embed one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub target: TargetProperty,
    #[serde(default)]
    pub placement: WidgetPlacement,
    #[serde(default)]
    pub caption: Option<String>,
}

impl WidgetSpec {
    #[must_use]
    pub fn new(kind: WidgetKind, target: TargetProperty) -> Self {
        Self {
            kind,
            target,
            placement: WidgetPlacement::default(),
            caption: None,
        }
    }

    #[must_use]
    pub fn anchored(mut self, anchor: WidgetAnchor) -> Self {
        self.placement.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.placement.offset_x = offset_x;
        self.placement.offset_y = offset_y;
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Rejects invalid kind parameters and kind/target combinations whose
    /// value shapes differ.
    pub fn validate(&self) -> ChartResult<()> {
        self.kind.validate()?;
        if self.kind.value_kind() != self.target.value_kind() {
            return Err(ChartError::IncompatibleWidget {
                kind: self.kind.name(),
                target: self.target.as_str(),
            });
        }
        Ok(())
    }
}

/// One attached widget with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub value: PropertyValue,
    pub target: TargetProperty,
    pub placement: WidgetPlacement,
    pub bounds: WidgetBounds,
    pub caption: String,
}

impl Widget {
    /// Scene representation mounted on the chart.
    #[must_use]
    pub fn overlay(&self) -> WidgetOverlay {
        let text = match &self.kind {
            WidgetKind::ToolbarButton { label, .. } | WidgetKind::ContextMenuItem { label, .. } => {
                label.clone()
            }
            _ => format!("{}: {}", self.caption, self.value),
        };
        WidgetOverlay {
            id: self.id,
            kind: self.kind.name(),
            bounds: self.bounds,
            text,
        }
    }
}

/// What the chart scene needs to draw a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetOverlay {
    pub id: WidgetId,
    pub kind: &'static str,
    pub bounds: WidgetBounds,
    pub text: String,
}
