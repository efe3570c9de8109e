use crate::id::ComponentId;
use thiserror::Error;

/// Failures of the source-level JSX operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The source could not be parsed into a syntax tree.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// No element or insertion point matched.
    #[error("target not found: {0}")]
    TargetNotFound(String),

    /// No element carries the component's marker attribute.
    #[error("component {0} not found in source")]
    ComponentNotFound(ComponentId),

    /// The requested edit cannot be expressed by the chosen strategy.
    #[error("unsupported edit: {0}")]
    Unsupported(String),
}
