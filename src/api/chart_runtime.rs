use crate::extensions::ChartPlugin;

/// Runtime orchestration state grouped separately from the chart model.
pub(super) struct ChartRuntimeState {
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) needs_render: bool,
    pub(super) render_count: u64,
}

impl ChartRuntimeState {
    #[must_use]
    pub(super) fn with_full_invalidation() -> Self {
        Self {
            plugins: Vec::new(),
            needs_render: true,
            render_count: 0,
        }
    }
}
