//! Compiler pipeline error types.

use actr_codegen::CodegenError;
use actr_types::ParseError;
use thiserror::Error;

/// Errors surfaced by the compile-and-run pipeline.
///
/// Nothing is retried; every error reaches the caller with its context.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// The model has no name.
    #[error("model is missing name")]
    MissingModelName,

    /// `write_model` or `run` was called before `set_model`.
    #[error("no model has been set")]
    ModelNotSet,

    /// An initial buffer names a buffer the model does not have.
    #[error("cannot initialize buffer '{buffer}' - not found in model '{model}'")]
    UnknownBuffer { buffer: String, model: String },

    /// Caller-supplied chunk text for a buffer failed to parse.
    #[error("error in initial buffer '{buffer}' - {source}")]
    InitialBuffer {
        buffer: String,
        #[source]
        source: ParseError,
    },

    /// The interpreter executable is not on the search path.
    #[error("could not find '{0}' executable on PATH")]
    ExecutableNotFound(String),

    /// The interpreter cannot import the runtime package.
    #[error(
        "python package '{package}' not found. Please ensure it is installed with pip or is in your PYTHONPATH env variable"
    )]
    PackageNotFound { package: String },

    /// The generated script exited unsuccessfully. Carries the captured
    /// output with the GUI warning banner removed.
    #[error("{output}")]
    Execution { output: String },

    /// Invalid framework configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the compiler pipeline.
pub type Result<T> = std::result::Result<T, CompilerError>;
