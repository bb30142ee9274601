//! Host-facing chart facade.
//!
//! `ChartEngine` is split across controller files by concern; each one adds
//! an `impl` block over the same per-chart state.

mod chart_handle;
mod chart_model;
mod chart_runtime;
mod data_binding_resolver;
mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod label_edit_coordinator;
mod plugin_dispatch;
mod plugin_registry;
mod property_controller;
mod render_frame_builder;
mod validation;

pub use crate::extensions::PluginEvent;
pub use chart_handle::ChartHandle;
pub use chart_model::{ChartModel, FieldIndex, InlineMessage};
pub use data_binding_resolver::DataBindingResolver;
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::{EngineSnapshot, SeriesSnapshot};
pub use json_contract::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1};
pub use label_edit_coordinator::EditOutcome;
