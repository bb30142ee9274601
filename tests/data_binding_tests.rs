use std::fs;

use widget_chart::api::{ChartEngine, ChartEngineConfig, DataBindingResolver, EditOutcome};
use widget_chart::core::{
    Axis, DataTable, DataValue, FieldCatalog, FieldOrientation, SourceRef, Viewport,
};
use widget_chart::interaction::{EditIntent, EditKind};
use widget_chart::render::NullRenderer;
use widget_chart::{BindingError, ChartError};

fn rebind(axis: Axis, text: &str) -> EditIntent {
    EditIntent {
        axis,
        new_text: text.to_owned(),
        kind: EditKind::DataRebind,
    }
}

#[test]
fn resolver_returns_named_field_series() {
    let source = SourceRef::inline("ab", "A,B\n1,4\n2,5\n3,6\n");
    let resolver = DataBindingResolver::new();

    let series = resolver
        .resolve(&rebind(Axis::Y, "B"), &source)
        .expect("field B resolves");

    assert_eq!(series.field_name(), "B");
    assert_eq!(
        series.values(),
        &[
            DataValue::Number(4.0),
            DataValue::Number(5.0),
            DataValue::Number(6.0)
        ]
    );
    assert_eq!(series.source(), &source);
}

#[test]
fn resolver_reports_missing_field() {
    let source = SourceRef::inline("ab", "A,B\n1,4\n");
    let err = DataBindingResolver::new()
        .resolve(&rebind(Axis::Y, "C"), &source)
        .expect_err("C is not a field");

    assert_eq!(
        err,
        BindingError::FieldNotFound {
            field: "C".to_owned(),
            source_name: "ab".to_owned()
        }
    );
}

#[test]
fn malformed_sources_are_unreadable() {
    let resolver = DataBindingResolver::new();
    for contents in ["", "A,B\n1,2,3\n", "A,A\n1,2\n", "A,,B\n1,2,3\n"] {
        let source = SourceRef::inline("bad", contents);
        let err = resolver
            .resolve(&rebind(Axis::Y, "A"), &source)
            .expect_err("malformed source must fail");
        assert!(
            matches!(err, BindingError::SourceUnreadable { .. }),
            "unexpected error for {contents:?}: {err:?}"
        );
    }
}

#[test]
fn missing_file_is_unreadable() {
    let path = std::env::temp_dir().join("widget-chart-does-not-exist.csv");
    let _ = fs::remove_file(&path);

    let err = DataBindingResolver::new()
        .field_names(&SourceRef::path(&path))
        .expect_err("missing file");
    assert!(matches!(err, BindingError::SourceUnreadable { .. }));
}

#[test]
fn file_sources_are_read_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "widget-chart-binding-{}.csv",
        std::process::id()
    ));
    fs::write(&path, "day;temp\n2024-01-01;3.5\n2024-01-02;4.25\n").expect("write fixture");

    let source = SourceRef::from(path.as_path()).with_delimiter(b';');
    let table = DataTable::read(&source).expect("table");
    fs::remove_file(&path).expect("cleanup fixture");

    assert_eq!(table.field_names().collect::<Vec<_>>(), vec!["day", "temp"]);
    assert!(matches!(table.values("day"), Some([DataValue::Time(_), DataValue::Time(_)])));
    assert_eq!(
        table.values("temp"),
        Some(&[DataValue::Number(3.5), DataValue::Number(4.25)][..])
    );
}

#[test]
fn row_oriented_sources_use_leading_cells_as_names() {
    let source = SourceRef::inline("rows", "Q1,1,2,3\nQ2,4,5,6\n")
        .with_orientation(FieldOrientation::Rows);
    let table = DataTable::read(&source).expect("table");

    assert!(table.contains_field("q2"));
    let series = table.into_series("Q2").expect("Q2 row");
    assert_eq!(series.numeric_extent(), Some((4.0, 6.0)));
}

#[test]
fn engine_rebinds_across_multiple_sources() {
    let config = ChartEngineConfig::new(Viewport::new(640, 480))
        .with_source(SourceRef::inline("first", "t,A\n1,10\n2,20\n"))
        .with_source(SourceRef::inline("second", "t,B\n1,7\n2,8\n3,9\n"))
        .with_fields(Some("t"), "A");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    assert_eq!(engine.field_catalog().names().collect::<Vec<_>>(), vec!["t", "A", "B"]);
    assert_eq!(engine.field_catalog().source_of("b"), Some(1));

    engine.click_label(Axis::Y).expect("editor opens");
    let outcome = engine.confirm_label_edit_with("B").expect("rebind");

    assert_eq!(
        outcome,
        EditOutcome::Rebound {
            axis: Axis::Y,
            field: "B".to_owned(),
            len: 3
        }
    );
    let series = engine.series(Axis::Y).expect("y series");
    assert_eq!(series.source().name(), "second");
}

#[test]
fn first_registered_source_owns_shared_field_names() {
    let config = ChartEngineConfig::new(Viewport::new(640, 480))
        .with_source(SourceRef::inline("first", "t,A\n1,10\n"))
        .with_source(SourceRef::inline("second", "t,A\n1,99\n"))
        .with_fields(None, "A");
    let engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    let series = engine.series(Axis::Y).expect("y series");
    assert_eq!(series.source().name(), "first");
    assert_eq!(series.values(), &[DataValue::Number(10.0)]);
}

#[test]
fn unreadable_source_is_not_registered() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(640, 480)),
    )
    .expect("engine init");

    let err = engine
        .add_data_source(SourceRef::inline("bad", "A,B\n1,2,3\n"))
        .expect_err("rejected");
    assert!(matches!(
        err,
        ChartError::Binding(BindingError::SourceUnreadable { .. })
    ));
    assert!(engine.sources().is_empty());
    assert!(engine.field_catalog().is_empty());
}

#[test]
fn config_with_unknown_field_fails_to_build() {
    let config = ChartEngineConfig::new(Viewport::new(640, 480))
        .with_source(SourceRef::inline("s", "A\n1\n"))
        .with_fields(None, "Z");
    let err = ChartEngine::new(NullRenderer::default(), config)
        .err()
        .expect("unknown field");
    assert!(matches!(
        err,
        ChartError::Binding(BindingError::FieldNotFound { .. })
    ));
}

#[test]
fn axis_fields_require_a_source() {
    let config = ChartEngineConfig::new(Viewport::new(640, 480)).with_fields(None, "A");
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), config),
        Err(ChartError::InvalidData(_))
    ));
}
