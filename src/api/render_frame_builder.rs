use crate::core::{Axis, ChartLabel, DataSeries, LinearScale, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::ChartEngine;

const PLOT_MARGIN_LEFT_PX: f64 = 56.0;
const PLOT_MARGIN_RIGHT_PX: f64 = 16.0;
const PLOT_MARGIN_TOP_PX: f64 = 40.0;
const PLOT_MARGIN_BOTTOM_PX: f64 = 48.0;
const GRID_DIVISIONS: u32 = 4;

const TITLE_FONT_PX: f64 = 16.0;
const LABEL_FONT_PX: f64 = 12.0;
const WIDGET_FONT_PX: f64 = 11.0;
const EDITOR_PADDING_PX: f64 = 4.0;
// Rough glyph advance used to size editor boxes without a text backend.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

const AXIS_COLOR: Color = Color::rgb(0.25, 0.25, 0.25);
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.12);
const SERIES_COLOR: Color = Color::rgb(0.13, 0.45, 0.85);
const EDITOR_FILL: Color = Color::WHITE;
const EDITOR_BORDER: Color = Color::rgb(0.13, 0.45, 0.85);
const MESSAGE_COLOR: Color = Color::rgb(0.8, 0.1, 0.1);
const WIDGET_FILL: Color = Color::rgba(0.96, 0.96, 0.96, 0.95);

/// Pixel rectangle the data is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl PlotArea {
    fn for_viewport(viewport: Viewport) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        if width <= PLOT_MARGIN_LEFT_PX + PLOT_MARGIN_RIGHT_PX + 1.0
            || height <= PLOT_MARGIN_TOP_PX + PLOT_MARGIN_BOTTOM_PX + 1.0
        {
            return Self {
                left: 0.0,
                top: 0.0,
                right: width,
                bottom: height,
            };
        }
        Self {
            left: PLOT_MARGIN_LEFT_PX,
            top: PLOT_MARGIN_TOP_PX,
            right: width - PLOT_MARGIN_RIGHT_PX,
            bottom: height - PLOT_MARGIN_BOTTOM_PX,
        }
    }

    /// Anchor point of the label of `axis`.
    fn label_anchor(self, viewport: Viewport, axis: Axis) -> (f64, f64) {
        let center_x = (self.left + self.right) / 2.0;
        match axis {
            Axis::Title => (center_x, (self.top / 2.0).max(TITLE_FONT_PX)),
            Axis::X => (
                center_x,
                (self.bottom + f64::from(viewport.height)) / 2.0 + LABEL_FONT_PX / 2.0,
            ),
            Axis::Y => (self.left / 2.0, (self.top + self.bottom) / 2.0),
        }
    }
}

/// Approximate on-screen box of a label, used for pointer hit testing.
pub(super) fn label_hit_box(viewport: Viewport, label: &ChartLabel) -> RectPrimitive {
    let area = PlotArea::for_viewport(viewport);
    let (x, y) = area.label_anchor(viewport, label.axis);
    let font_size = if label.axis == Axis::Title {
        TITLE_FONT_PX
    } else {
        LABEL_FONT_PX
    };
    let text_width =
        (label.display_text.chars().count().max(4) as f64) * font_size * GLYPH_WIDTH_RATIO;
    let (width, height) = if label.axis == Axis::Y {
        (font_size + 2.0 * EDITOR_PADDING_PX, text_width + 2.0 * EDITOR_PADDING_PX)
    } else {
        (text_width + 2.0 * EDITOR_PADDING_PX, font_size + 2.0 * EDITOR_PADDING_PX)
    };
    RectPrimitive::new(
        x - width / 2.0,
        y - height / 2.0 - font_size / 4.0,
        width,
        height,
        EDITOR_FILL,
    )
}

/// Checks that `series` maps onto a finite value scale before it is swapped in.
pub(super) fn ensure_plottable(series: &DataSeries) -> ChartResult<()> {
    match series.numeric_extent() {
        Some((min, max)) => LinearScale::from_extent(min, max).map(|_| ()),
        None => Ok(()),
    }
}

pub(super) fn build_render_frame<R: Renderer>(engine: &ChartEngine<R>) -> ChartResult<RenderFrame> {
    let model = &engine.model;
    let viewport = model.viewport;
    let area = PlotArea::for_viewport(viewport);
    let mut frame = RenderFrame::new(viewport);

    if model.properties.grid_visible {
        push_grid(&mut frame, area);
    }
    frame.lines.push(LinePrimitive::new(
        area.left, area.bottom, area.right, area.bottom, 1.0, AXIS_COLOR,
    ));
    frame.lines.push(LinePrimitive::new(
        area.left, area.top, area.left, area.bottom, 1.0, AXIS_COLOR,
    ));

    if model.properties.series_visible {
        if let Some(y_series) = model.series(Axis::Y) {
            push_series(
                &mut frame,
                area,
                model.series(Axis::X),
                y_series,
                engine,
            )?;
        }
    }

    let editing = engine.editor.pending();
    for label in model.labels.values() {
        let (x, y) = area.label_anchor(viewport, label.axis);
        let font_size = if label.axis == Axis::Title {
            TITLE_FONT_PX
        } else {
            LABEL_FONT_PX
        };
        let rotation = if label.axis == Axis::Y { -90.0 } else { 0.0 };

        if let Some(field) = editing.filter(|field| field.axis() == label.axis) {
            push_editor(&mut frame, x, y, font_size, field.draft(), rotation);
            continue;
        }
        if label.display_text.is_empty() {
            continue;
        }
        frame.texts.push(
            TextPrimitive::new(
                label.display_text.clone(),
                x,
                y,
                font_size,
                AXIS_COLOR,
                TextHAlign::Center,
            )
            .rotated(rotation),
        );
    }

    if let Some(message) = &model.inline_message {
        let (x, y) = area.label_anchor(viewport, message.axis);
        let (x, y, align) = match message.axis {
            Axis::Y => (x + LABEL_FONT_PX, y, TextHAlign::Left),
            _ => (x, y + LABEL_FONT_PX + EDITOR_PADDING_PX, TextHAlign::Center),
        };
        let y = y.min(f64::from(viewport.height) - 1.0);
        frame.texts.push(TextPrimitive::new(
            message.text.clone(),
            x,
            y,
            LABEL_FONT_PX,
            MESSAGE_COLOR,
            align,
        ));
    }

    for overlay in model.overlays.values() {
        let bounds = overlay.bounds;
        frame.rects.push(
            RectPrimitive::new(bounds.x, bounds.y, bounds.width, bounds.height, WIDGET_FILL)
                .with_border(AXIS_COLOR),
        );
        if !overlay.text.is_empty() {
            frame.texts.push(TextPrimitive::new(
                overlay.text.clone(),
                bounds.x + EDITOR_PADDING_PX,
                bounds.y + bounds.height / 2.0 + WIDGET_FONT_PX / 2.0,
                WIDGET_FONT_PX,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }
    }

    Ok(frame)
}

fn push_grid(frame: &mut RenderFrame, area: PlotArea) {
    let width = area.right - area.left;
    let height = area.bottom - area.top;
    for step in 1..GRID_DIVISIONS {
        let ratio = f64::from(step) / f64::from(GRID_DIVISIONS);
        let x = area.left + width * ratio;
        let y = area.top + height * ratio;
        frame
            .lines
            .push(LinePrimitive::new(x, area.top, x, area.bottom, 1.0, GRID_COLOR));
        frame
            .lines
            .push(LinePrimitive::new(area.left, y, area.right, y, 1.0, GRID_COLOR));
    }
}

/// Polyline (and optional markers) of the y series.
///
/// X positions come from a numeric x series when one is bound with matching
/// rows; otherwise rows are spread evenly. Rows without a numeric y value
/// break the line.
fn push_series<R: Renderer>(
    frame: &mut RenderFrame,
    area: PlotArea,
    x_series: Option<&DataSeries>,
    y_series: &DataSeries,
    engine: &ChartEngine<R>,
) -> ChartResult<()> {
    let Some((y_min, y_max)) = y_series.numeric_extent() else {
        return Ok(());
    };
    let y_scale = LinearScale::from_extent(y_min, y_max)?;

    let x_values: Vec<Option<f64>> = match x_series.filter(|series| series.is_numeric()) {
        Some(series) => (0..y_series.len())
            .map(|row| series.values().get(row).and_then(|value| value.as_f64()))
            .collect(),
        None => (0..y_series.len()).map(|row| Some(row as f64)).collect(),
    };
    let (x_min, x_max) = x_values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(*value), hi.max(*value))
        });
    if !x_min.is_finite() || !x_max.is_finite() {
        return Ok(());
    }
    let x_scale = LinearScale::from_extent(x_min, x_max)?;

    let properties = engine.model.properties;
    let color = SERIES_COLOR.faded(properties.opacity);
    let mut previous: Option<(f64, f64)> = None;
    for (x_value, y_value) in x_values.iter().zip(y_series.values()) {
        let point = match (x_value, y_value.as_f64()) {
            (Some(x), Some(y)) => Some((
                x_scale.domain_to_pixel(*x, area.left, area.right)?,
                y_scale.domain_to_pixel(y, area.bottom, area.top)?,
            )),
            _ => None,
        };
        if let (Some((x1, y1)), Some((x2, y2))) = (previous, point) {
            frame
                .lines
                .push(LinePrimitive::new(x1, y1, x2, y2, properties.line_width, color));
        }
        if let Some((x, y)) = point {
            if properties.point_radius > 0.0 {
                frame
                    .points
                    .push(CirclePrimitive::new(x, y, properties.point_radius, color));
            }
        }
        previous = point;
    }
    Ok(())
}

fn push_editor(frame: &mut RenderFrame, x: f64, y: f64, font_size: f64, draft: &str, rotation: f64) {
    let text_width = (draft.chars().count().max(4) as f64) * font_size * GLYPH_WIDTH_RATIO;
    let (box_w, box_h) = if rotation == 0.0 {
        (text_width + 2.0 * EDITOR_PADDING_PX, font_size + 2.0 * EDITOR_PADDING_PX)
    } else {
        (font_size + 2.0 * EDITOR_PADDING_PX, text_width + 2.0 * EDITOR_PADDING_PX)
    };
    let viewport = frame.viewport;
    let box_x = (x - box_w / 2.0).clamp(0.0, (f64::from(viewport.width) - box_w).max(0.0));
    let box_y = (y - box_h / 2.0 - font_size / 4.0)
        .clamp(0.0, (f64::from(viewport.height) - box_h).max(0.0));
    frame.rects.push(
        RectPrimitive::new(box_x, box_y, box_w, box_h, EDITOR_FILL).with_border(EDITOR_BORDER),
    );
    if !draft.is_empty() {
        frame.texts.push(
            TextPrimitive::new(draft, x, y, font_size, Color::BLACK, TextHAlign::Center)
                .rotated(rotation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_falls_back_to_full_viewport_when_tiny() {
        let area = PlotArea::for_viewport(Viewport::new(40, 30));
        assert_eq!(area.left, 0.0);
        assert_eq!(area.right, 40.0);
        assert_eq!(area.bottom, 30.0);
    }

    #[test]
    fn hit_box_surrounds_label_anchor() {
        let viewport = Viewport::new(800, 600);
        let label = ChartLabel::new(Axis::X, "month");
        let (x, y) = PlotArea::for_viewport(viewport).label_anchor(viewport, Axis::X);
        assert!(label_hit_box(viewport, &label).contains(x, y));
    }

    #[test]
    fn plottable_series_need_a_finite_extent() {
        use crate::core::{DataValue, SourceRef};

        let source = SourceRef::inline("mem", "v\n");
        let extreme = DataSeries::new(
            "v",
            vec![DataValue::Number(-1e308), DataValue::Number(1e308)],
            source.clone(),
        );
        assert!(ensure_plottable(&extreme).is_ok());

        let text_only = DataSeries::new("v", vec![DataValue::Text("n/a".to_owned())], source.clone());
        assert!(ensure_plottable(&text_only).is_ok());

        let unbounded = DataSeries::new(
            "v",
            vec![DataValue::Number(1.0), DataValue::Number(f64::INFINITY)],
            source,
        );
        assert!(ensure_plottable(&unbounded).is_err());
    }

    #[test]
    fn labels_sit_outside_plot_area() {
        let viewport = Viewport::new(800, 600);
        let area = PlotArea::for_viewport(viewport);
        let (_, x_label_y) = area.label_anchor(viewport, Axis::X);
        let (y_label_x, _) = area.label_anchor(viewport, Axis::Y);
        let (_, title_y) = area.label_anchor(viewport, Axis::Title);
        assert!(x_label_y > area.bottom);
        assert!(y_label_x < area.left);
        assert!(title_y < area.top);
    }
}
