use widget_chart::api::{ChartEngine, ChartEngineConfig};
use widget_chart::core::{Axis, PropertyValue, SourceRef, TargetProperty, Viewport};
use widget_chart::extensions::{WidgetInjector, WidgetKind, WidgetSpec};
use widget_chart::render::NullRenderer;
use widget_chart::{ChartError, ChartHandle};

const CSV: &str = "day,temp,rain\n2024-01-01,3.5,0\n2024-01-02,4,1.2\n2024-01-03,,0.4\n2024-01-04,6,0\n";

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 600))
        .with_title("Weather")
        .with_source(SourceRef::inline("weather", CSV))
        .with_fields(Some("day"), "temp");
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

#[test]
fn invalid_viewport_is_rejected() {
    let config = ChartEngineConfig::new(Viewport::new(0, 300));
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), config),
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 300
        })
    ));
}

#[test]
fn render_draws_labels_grid_and_series() {
    let mut engine = engine();
    assert!(engine.needs_render());

    engine.render().expect("render");

    assert!(!engine.needs_render());
    assert_eq!(engine.render_count(), 1);
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    let frame = renderer.last_frame.as_ref().expect("frame");
    for text in ["Weather", "day", "temp"] {
        assert_eq!(frame.texts_matching(text).count(), 1, "missing label {text}");
    }
    let y_label = frame.texts_matching("temp").next().expect("y label");
    assert_eq!(y_label.rotation_deg, -90.0);
    // 6 grid lines, 2 axes and one segment; the missing temp breaks the line.
    assert_eq!(frame.lines.len(), 9);
}

#[test]
fn hidden_series_and_grid_draw_only_axes() {
    let mut engine = engine();
    engine
        .update_property(TargetProperty::SeriesVisible, PropertyValue::Bool(false))
        .expect("hide series");
    engine
        .update_property(TargetProperty::GridVisible, PropertyValue::Bool(false))
        .expect("hide grid");
    engine.render().expect("render");

    assert_eq!(engine.renderer().last_line_count(), 2);
}

#[test]
fn point_radius_draws_markers_for_present_values() {
    let mut engine = engine();
    engine
        .update_property(TargetProperty::PointRadius, PropertyValue::Number(2.5))
        .expect("markers");
    engine.render().expect("render");

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.points.len(), 3);
    assert!(frame.points.iter().all(|point| point.radius == 2.5));
}

#[test]
fn properties_are_readable_through_the_chart_handle() {
    let mut engine = engine();

    assert_eq!(
        ChartHandle::property(&engine, TargetProperty::YField),
        Some(PropertyValue::Text("temp".to_owned()))
    );
    assert_eq!(
        engine.property(TargetProperty::Title),
        Some(PropertyValue::Text("Weather".to_owned()))
    );

    engine
        .update_property(TargetProperty::Title, PropertyValue::Text("Rain".to_owned()))
        .expect("title");
    engine
        .update_property(TargetProperty::YField, PropertyValue::Text("rain".to_owned()))
        .expect("rebind");

    assert_eq!(
        engine.label(Axis::Title).map(|l| l.display_text.as_str()),
        Some("Rain")
    );
    assert_eq!(engine.series(Axis::Y).map(|s| s.field_name()), Some("rain"));
    assert_eq!(
        engine.label(Axis::Y).map(|l| l.display_text.as_str()),
        Some("rain")
    );
}

#[test]
fn mismatched_property_values_are_rejected() {
    let mut engine = engine();
    let before = engine.snapshot();

    assert!(
        engine
            .update_property(TargetProperty::Opacity, PropertyValue::Bool(true))
            .is_err()
    );
    assert!(
        engine
            .update_property(TargetProperty::Opacity, PropertyValue::Number(1.5))
            .is_err()
    );
    assert!(
        engine
            .update_property(TargetProperty::Title, PropertyValue::Text("  ".to_owned()))
            .is_err()
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn inline_message_is_rendered_after_failed_rebind() {
    let mut engine = engine();
    let _ = engine.update_property(
        TargetProperty::YField,
        PropertyValue::Text("humidity".to_owned()),
    );
    engine.render().expect("render");

    let message = engine.inline_message().expect("message").text.clone();
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.texts_matching(&message).count(), 1);
}

#[test]
fn refresh_field_catalog_keeps_registered_sources() {
    let mut engine = engine();
    engine.refresh_field_catalog().expect("refresh");
    assert_eq!(
        engine.field_catalog().names().collect::<Vec<_>>(),
        vec!["day", "temp", "rain"]
    );

    engine.clear_data_sources();
    assert!(engine.field_catalog().is_empty());
    assert_eq!(engine.series(Axis::Y).map(|s| s.len()), Some(4));
}

#[test]
fn extreme_but_finite_values_still_render() {
    let config = ChartEngineConfig::new(Viewport::new(800, 600))
        .with_title("Extremes")
        .with_source(SourceRef::inline("extremes", "t,Y1,Y2\n0,1,-1e308\n1,2,1e308\n"))
        .with_fields(Some("t"), "Y1");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.bind_axis(Axis::Y, "Y2").expect("rebind");
    engine.render().expect("render after rebind");

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.lines.iter().all(|line| {
        [line.x1, line.y1, line.x2, line.y2].iter().all(|v| v.is_finite())
    }));
    assert!(!engine.needs_render());

    let mut injector = WidgetInjector::new();
    let slider = injector
        .attach(
            &mut engine,
            WidgetSpec::new(
                WidgetKind::Slider {
                    min: 0.0,
                    max: 1.0,
                    step: 0.1,
                },
                TargetProperty::Opacity,
            ),
        )
        .expect("attach");
    assert!(
        injector
            .set_value(&mut engine, slider.id, PropertyValue::Number(0.5))
            .expect("widget change renders")
    );
}
