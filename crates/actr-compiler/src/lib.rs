//! ACT-R compiler: orchestrates the pyactr pipeline.
//!
//! ```text
//! Model + initial buffer text → chunk parser → pyactr codegen → .py file → python3 → output
//! ```
//!
//! [`PyActr`] is the entry point. A typical session:
//!
//! 1. [`Framework::initialize`] probes the interpreter and the `pyactr`
//!    package and creates the scratch directory,
//! 2. [`Framework::set_model`] accepts the model,
//! 3. [`Framework::run`] writes the script, runs it and returns a
//!    [`RunOutput`].

pub mod artifact;
pub mod config;
pub mod error;
pub mod filter;
pub mod framework;
pub mod initial;
pub mod probe;
pub mod process;
pub mod pyactr;

pub use artifact::RunOutput;
pub use config::FrameworkConfig;
pub use error::{CompilerError, Result};
pub use framework::Framework;
pub use initial::{parse_initial_buffers, InitialBuffers, ParsedInitialBuffers};
pub use probe::RuntimeIdentity;
pub use process::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use pyactr::PyActr;
