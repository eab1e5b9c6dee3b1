//! Shared types for the ACT-R model compiler.
//!
//! This crate defines the in-memory model description handed to the code
//! generator, source spans, and the structured error type produced when
//! chunk literal text fails to parse.

mod error;
mod span;
pub mod model;

pub use error::{ErrorCategory, ErrorCode, ParseError};
pub use span::Span;

/// Result type used by the chunk literal parser.
pub type Result<T> = std::result::Result<T, ParseError>;
