use crate::error::{ChartError, ChartResult};

fn invalid(message: impl Into<String>) -> ChartError {
    ChartError::InvalidData(message.into())
}

fn finite_coords(kind: &str, coords: &[f64]) -> ChartResult<()> {
    match coords.iter().position(|value| !value.is_finite()) {
        None => Ok(()),
        Some(index) => Err(invalid(format!(
            "{kind} coordinate #{index} is not a finite number"
        ))),
    }
}

fn strictly_positive(kind: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{kind} must be a positive finite number, got {value}")))
    }
}

/// Straight RGBA, every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue, alpha: 1.0 }
    }

    /// Scales alpha by the chart-wide `opacity` property.
    #[must_use]
    pub fn faded(mut self, opacity: f64) -> Self {
        self.alpha = (self.alpha * opacity).clamp(0.0, 1.0);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels.iter().all(|c| (0.0..=1.0).contains(c)) {
            Ok(())
        } else {
            Err(invalid(format!("color {channels:?} has a channel outside [0, 1]")))
        }
    }
}

/// One straight segment, pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self { x1, y1, x2, y2, stroke_width, color }
    }

    pub fn validate(self) -> ChartResult<()> {
        finite_coords("line", &[self.x1, self.y1, self.x2, self.y2])?;
        strictly_positive("line stroke width", self.stroke_width)?;
        self.color.validate()
    }
}

/// Box used for widget chrome and the inline label editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub border: Option<Color>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self { x, y, width, height, fill, border: None }
    }

    #[must_use]
    pub const fn with_border(self, border: Color) -> Self {
        Self { border: Some(border), ..self }
    }

    /// Edges count as inside.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x..=self.x + self.width).contains(&x) && (self.y..=self.y + self.height).contains(&y)
    }

    pub fn validate(self) -> ChartResult<()> {
        finite_coords("rect", &[self.x, self.y, self.width, self.height])?;
        if self.width.min(self.height) < 0.0 {
            return Err(invalid(format!(
                "rect has negative size {}x{}",
                self.width, self.height
            )));
        }
        self.fill.validate()?;
        self.border.map_or(Ok(()), Color::validate)
    }
}

/// Point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64, color: Color) -> Self {
        Self { x, y, radius, color }
    }

    pub fn validate(self) -> ChartResult<()> {
        finite_coords("circle", &[self.x, self.y])?;
        strictly_positive("circle radius", self.radius)?;
        self.color.validate()
    }
}

/// Where `TextPrimitive::x` sits relative to the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Clockwise degrees around the anchor; the y-axis label uses -90.
    pub rotation_deg: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub fn rotated(self, rotation_deg: f64) -> Self {
        Self { rotation_deg, ..self }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(invalid("text primitive has no content"));
        }
        finite_coords("text", &[self.x, self.y, self.rotation_deg])?;
        strictly_positive("font size", self.font_size_px)?;
        self.color.validate()
    }
}
