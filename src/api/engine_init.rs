use indexmap::IndexMap;
use tracing::debug;

use crate::core::{Axis, ChartLabel};
use crate::error::ChartResult;
use crate::interaction::LabelEditController;
use crate::render::Renderer;

use super::{
    ChartEngine, ChartEngineConfig, ChartModel, DataBindingResolver,
    chart_runtime::ChartRuntimeState, validation::validate_engine_config,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine, registers the configured sources and binds the
    /// configured axis fields.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        validate_engine_config(&config)?;

        let mut model = ChartModel::new(config.viewport, config.properties);
        let editable = config.labels_editable;
        model.labels = IndexMap::from([
            (
                Axis::Title,
                ChartLabel::new(Axis::Title, config.title.clone()).with_editable(editable),
            ),
            (
                Axis::X,
                ChartLabel::new(Axis::X, Axis::X.as_str()).with_editable(editable),
            ),
            (
                Axis::Y,
                ChartLabel::new(Axis::Y, Axis::Y.as_str()).with_editable(editable),
            ),
        ]);

        let mut engine = Self {
            renderer,
            model,
            editor: LabelEditController::new(config.edit_kind_policy),
            resolver: DataBindingResolver::new(),
            runtime: ChartRuntimeState::with_full_invalidation(),
        };

        for source in config.sources {
            engine.add_data_source(source)?;
        }
        for (axis, field, text) in [
            (Axis::X, config.x_field, config.x_label),
            (Axis::Y, config.y_field, config.y_label),
        ] {
            if let Some(field) = field {
                engine.bind_axis(axis, &field)?;
            }
            if let Some(text) = text {
                if let Some(label) = engine.model.labels.get_mut(&axis) {
                    label.display_text = text;
                }
            }
        }

        debug!(
            width = engine.model.viewport.width,
            height = engine.model.viewport.height,
            sources = engine.model.sources.len(),
            "chart engine initialized"
        );
        Ok(engine)
    }
}
