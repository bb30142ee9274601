use std::cell::RefCell;
use std::rc::Rc;

use widget_chart::ChartError;
use widget_chart::api::{ChartEngine, ChartEngineConfig};
use widget_chart::core::{Axis, PropertyValue, SourceRef, TargetProperty, Viewport};
use widget_chart::extensions::{ChartPlugin, PluginContext, PluginEvent};
use widget_chart::interaction::EditKind;
use widget_chart::render::NullRenderer;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PluginEvent, context: PluginContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 500))
        .with_source(SourceRef::inline("s", "t,A,B\n1,1,5\n2,2,6\n"))
        .with_fields(Some("t"), "A");
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn recorded(events: &Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>) -> Vec<PluginEvent> {
    events.borrow().iter().map(|(event, _)| *event).collect()
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.click_label(Axis::Y).expect("editor opens");
    engine.confirm_label_edit_with("B").expect("rebind");
    engine.click_label(Axis::X).expect("editor opens");
    engine.confirm_label_edit_with("time").expect("rename");
    engine.click_label(Axis::Title).expect("editor opens");
    assert!(engine.cancel_label_edit());
    engine.render().expect("render");

    assert_eq!(
        recorded(&events),
        vec![
            PluginEvent::LabelEditStarted { axis: Axis::Y },
            PluginEvent::SeriesRebound {
                axis: Axis::Y,
                len: 2
            },
            PluginEvent::LabelEditStarted { axis: Axis::X },
            PluginEvent::LabelRenamed { axis: Axis::X },
            PluginEvent::LabelEditStarted { axis: Axis::Title },
            PluginEvent::LabelEditCancelled { axis: Axis::Title },
            PluginEvent::Rendered,
        ]
    );
}

#[test]
fn plugin_context_reflects_engine_state() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("ctx", events.clone())))
        .expect("register plugin");

    engine.click_label(Axis::Y).expect("editor opens");
    engine
        .update_property(TargetProperty::Opacity, PropertyValue::Number(0.5))
        .expect("opacity");

    let log = events.borrow();
    let (_, started) = log.first().expect("edit started");
    assert_eq!(started.editing, Some(Axis::Y));
    assert_eq!(started.y_len, 2);
    assert_eq!(started.source_count, 1);

    let (event, changed) = log.last().expect("property changed");
    assert_eq!(
        *event,
        PluginEvent::PropertyChanged {
            target: TargetProperty::Opacity
        }
    );
    assert_eq!(changed.properties.opacity, 0.5);
}

#[test]
fn failed_binding_is_reported_to_plugins() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("failures", events.clone())))
        .expect("register plugin");

    engine.click_label(Axis::Y).expect("editor opens");
    engine.set_edit_kind(Some(EditKind::DataRebind));
    assert!(engine.confirm_label_edit_with("nope").is_err());

    assert_eq!(
        recorded(&events).last(),
        Some(&PluginEvent::BindingFailed { axis: Axis::Y })
    );
}

#[test]
fn duplicate_plugin_ids_are_rejected() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));

    engine
        .register_plugin(Box::new(RecordingPlugin::new("dup", events.clone())))
        .expect("register first");
    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("dup", events)))
        .expect_err("duplicate id");

    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(engine.plugin_count(), 1);
}

#[test]
fn unregistered_plugin_stops_receiving_events() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("temp", events.clone())))
        .expect("register plugin");

    assert!(engine.unregister_plugin("temp"));
    assert!(!engine.unregister_plugin("temp"));
    assert!(!engine.has_plugin("temp"));

    engine.render().expect("render");
    assert!(events.borrow().is_empty());
}
