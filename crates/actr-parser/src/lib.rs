//! ACT-R chunk literal parser.
//!
//! Turns caller-supplied text such as `[count: 2 ?next nil]` into a
//! [`Pattern`](actr_types::model::Pattern) validated against a model's chunk
//! types.
//!
//! ```text
//! chunk literal → Lexer → tokens → Parser → Pattern
//! ```

pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_chunk, Parser};
