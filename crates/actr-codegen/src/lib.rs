//! pyactr code generator: compiles a model description to a Python script.
//!
//! # Architecture
//!
//! [`generate`] takes a [`actr_types::model::Model`] and produces the full
//! text of a script written against the `pyactr` package. Output order is
//! fixed:
//!
//! 1. generated-file header and model description
//! 2. `import pyactr as actr`
//! 3. `ACTRModel(...)` constructor
//! 4. chunk type declarations
//! 5. `dm` / `goal` aliases, initial goal, imaginal buffer
//! 6. initializers
//! 7. one `productionstring` per production
//! 8. `__main__` harness that runs the simulation
//!
//! Productions are written in pyactr's buffer notation: `=goal>` binds,
//! `?retrieval>` queries state, `+retrieval>` requests, `~goal>` clears.

pub mod error;
pub mod matches;
pub mod pattern;
pub mod script;
pub mod stmt;
pub mod value;
pub mod writer;

pub use error::{CodegenError, CodegenResult};
pub use script::{class_name, generate, ScriptOptions};
pub use writer::{KeyValueList, ScriptWriter};
