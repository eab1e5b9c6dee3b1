//! Codegen error types.

use thiserror::Error;

/// Errors that can occur while generating a pyactr script.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The model has no name, so no class name can be derived.
    #[error("model is missing name")]
    MissingModelName,

    /// A model construct has no pyactr counterpart.
    #[error("unsupported feature: {0}")]
    Unsupported(String),
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
