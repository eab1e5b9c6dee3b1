//! Target runtime seam.

use std::path::{Path, PathBuf};

use actr_types::model::Model;

use crate::artifact::RunOutput;
use crate::error::Result;
use crate::initial::InitialBuffers;
use crate::probe::RuntimeIdentity;

/// A runtime that can execute ACT-R models.
///
/// Call order is `initialize`, `set_model`, then any number of
/// `write_model` / `run` calls.
pub trait Framework {
    /// Short identifier, e.g. `"pyactr"`.
    fn name(&self) -> &str;

    /// Check the runtime is usable and prepare the scratch directory.
    fn initialize(&mut self) -> Result<RuntimeIdentity>;

    /// Accept the model to compile. Replaces any previous model.
    fn set_model(&mut self, model: Model) -> Result<()>;

    /// Generate the model's script into `dir` and return its path.
    fn write_model(&self, dir: &Path, initial_buffers: &InitialBuffers) -> Result<PathBuf>;

    /// Generate, execute and collect the output.
    fn run(&mut self, initial_buffers: &InitialBuffers) -> Result<RunOutput>;
}
