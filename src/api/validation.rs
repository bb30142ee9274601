use crate::error::{ChartError, ChartResult};

use super::ChartEngineConfig;

pub(super) fn validate_engine_config(config: &ChartEngineConfig) -> ChartResult<()> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }
    config.properties.validate()?;

    for (axis, field) in [("x", &config.x_field), ("y", &config.y_field)] {
        if field.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ChartError::InvalidData(format!(
                "{axis} field name must not be blank"
            )));
        }
    }
    if (config.x_field.is_some() || config.y_field.is_some()) && config.sources.is_empty() {
        return Err(ChartError::InvalidData(
            "axis fields require at least one data source".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_title(title: &str) -> ChartResult<()> {
    if title.trim().is_empty() {
        return Err(ChartError::InvalidData("title must not be blank".to_owned()));
    }
    Ok(())
}
