use proptest::prelude::*;
use widget_chart::api::{ChartEngine, ChartEngineConfig, EditOutcome};
use widget_chart::core::{Axis, SourceRef, Viewport, match_field_name};
use widget_chart::interaction::EditKind;
use widget_chart::render::NullRenderer;

const CSV: &str = "t,alpha,beta,gamma\n1,1,2,3\n2,4,5,6\n3,7,8,9\n";

fn engine(editable: bool) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(640, 480))
        .with_title("Props")
        .with_source(SourceRef::inline("props", CSV))
        .with_fields(Some("t"), "alpha")
        .with_labels_editable(editable);
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Title)]
}

proptest! {
    #[test]
    fn read_only_labels_never_open_an_editor(
        clicks in proptest::collection::vec(axis_strategy(), 1..12)
    ) {
        let mut engine = engine(false);
        let before = engine.snapshot();

        for axis in clicks {
            prop_assert!(engine.click_label(axis).is_none());
            prop_assert!(engine.editing_label().is_none());
        }
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn cosmetic_edits_never_touch_series(
        axis in axis_strategy(),
        text in "[A-Za-z0-9 ()%$]{1,24}"
    ) {
        let mut engine = engine(true);
        let x_before = engine.series(Axis::X).cloned();
        let y_before = engine.series(Axis::Y).cloned();

        engine.click_label(axis).expect("editable label opens");
        engine.set_edit_kind(Some(EditKind::Cosmetic));
        let outcome = engine.confirm_label_edit_with(&text).expect("cosmetic edit");

        prop_assert!(matches!(outcome, EditOutcome::Renamed { .. } | EditOutcome::Cancelled), "outcome was neither Renamed nor Cancelled");
        prop_assert_eq!(engine.series(Axis::X).cloned(), x_before);
        prop_assert_eq!(engine.series(Axis::Y).cloned(), y_before);
    }

    #[test]
    fn failed_rebinds_leave_the_chart_unchanged(
        text in "[a-z]{1,12}"
    ) {
        prop_assume!(match_field_name(&text, ["t", "alpha", "beta", "gamma"]).is_none());
        let mut engine = engine(true);
        let before = engine.snapshot();

        engine.click_label(Axis::Y).expect("editor opens");
        engine.set_edit_kind(Some(EditKind::DataRebind));
        prop_assert!(engine.confirm_label_edit_with(&text).is_err());

        let after = engine.snapshot();
        prop_assert_eq!(&after.labels, &before.labels);
        prop_assert_eq!(&after.y_series, &before.y_series);
        prop_assert!(after.inline_message.is_some());
    }

    #[test]
    fn any_field_name_rebinds_regardless_of_case(
        index in 0usize..3,
        upper in any::<bool>()
    ) {
        let field = ["alpha", "beta", "gamma"][index];
        let typed = if upper { field.to_uppercase() } else { field.to_owned() };
        let mut engine = engine(true);

        engine.click_label(Axis::Y).expect("editor opens");
        engine.set_edit_kind(Some(EditKind::DataRebind));
        let outcome = engine.confirm_label_edit_with(&typed).expect("rebind");

        prop_assert_eq!(
            outcome,
            EditOutcome::Rebound { axis: Axis::Y, field: field.to_owned(), len: 3 }
        );
    }
}
