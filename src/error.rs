use thiserror::Error;

use crate::extensions::WidgetId;

pub type ChartResult<T> = Result<T, ChartError>;

pub type BindingResult<T> = Result<T, BindingError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("unknown widget: {0}")]
    UnknownWidget(WidgetId),

    #[error("widget kind `{kind}` cannot drive chart property `{target}`")]
    IncompatibleWidget {
        kind: &'static str,
        target: &'static str,
    },
}

/// Failure of a data-level edit. The chart is left untouched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("field `{field}` not found in source `{source_name}`")]
    FieldNotFound { field: String, source_name: String },

    #[error("source `{source_name}` is unreadable: {reason}")]
    SourceUnreadable { source_name: String, reason: String },
}

impl BindingError {
    pub(crate) fn unreadable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
