//! pyactr target.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use actr_codegen::{class_name, ScriptOptions};
use actr_types::model::{Model, Pattern};
use tracing::{debug, info, warn};

use crate::artifact::{remove_temp_file, sha256_hex, write_script, RunOutput};
use crate::config::FrameworkConfig;
use crate::error::{CompilerError, Result};
use crate::filter::strip_gui_warning;
use crate::framework::Framework;
use crate::initial::{parse_initial_buffers, InitialBuffers};
use crate::probe::{check_for_package, identify, RuntimeIdentity};
use crate::process::{CommandRunner, SystemCommandRunner};

const FRAMEWORK_NAME: &str = "pyactr";
const GOAL_BUFFER: &str = "goal";

/// Compiles models to pyactr scripts and runs them with Python.
pub struct PyActr<R: CommandRunner = SystemCommandRunner> {
    config: FrameworkConfig,
    runner: R,
    model: Option<Model>,
    class_name: String,
}

impl PyActr {
    pub fn new(config: FrameworkConfig) -> Self {
        Self::with_runner(config, SystemCommandRunner)
    }
}

impl<R: CommandRunner> PyActr<R> {
    pub fn with_runner(config: FrameworkConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            model: None,
            class_name: String::new(),
        }
    }

    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Python identifier of the current model object. Empty until a model
    /// is set.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Where `write_model` puts the script inside `dir`.
    pub fn script_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.py", self.class_name))
    }

    fn current_model(&self) -> Result<&Model> {
        self.model.as_ref().ok_or(CompilerError::ModelNotSet)
    }

    fn initial_goal(
        &self,
        model: &Model,
        initial_buffers: &InitialBuffers,
    ) -> Result<Option<Pattern>> {
        let mut parsed = parse_initial_buffers(model, initial_buffers)?;
        let goal = parsed.remove(GOAL_BUFFER);
        for buffer in parsed.keys() {
            warn!(%buffer, "pyactr only seeds the goal buffer; ignoring initial contents");
        }
        Ok(goal)
    }

    fn write(&self, path: &Path, initial_buffers: &InitialBuffers) -> Result<String> {
        let model = self.current_model()?;
        let goal = self.initial_goal(model, initial_buffers)?;
        let options = ScriptOptions::new().with_initial_goal(goal);
        let script = write_script(path, model, &options)?;
        debug!(path = %path.display(), bytes = script.len(), "wrote pyactr script");
        Ok(script)
    }
}

impl<R: CommandRunner> Framework for PyActr<R> {
    fn name(&self) -> &str {
        FRAMEWORK_NAME
    }

    fn initialize(&mut self) -> Result<RuntimeIdentity> {
        self.config.validate()?;
        let identity = identify(&self.runner, FRAMEWORK_NAME, &self.config.interpreter)?;
        check_for_package(&self.runner, &self.config.interpreter, &self.config.package)?;
        fs::create_dir_all(&self.config.tmp_path)?;
        Ok(identity)
    }

    fn set_model(&mut self, model: Model) -> Result<()> {
        if model.name.is_empty() {
            return Err(CompilerError::MissingModelName);
        }
        self.class_name = class_name(&model);
        info!(model = %model.name, class = %self.class_name, "model set");
        debug!(
            chunks = model.chunks.len(),
            productions = model.productions.len(),
            "model contents"
        );
        self.model = Some(model);
        Ok(())
    }

    fn write_model(&self, dir: &Path, initial_buffers: &InitialBuffers) -> Result<PathBuf> {
        let path = self.script_path(dir);
        self.write(&path, initial_buffers)?;
        Ok(path)
    }

    fn run(&mut self, initial_buffers: &InitialBuffers) -> Result<RunOutput> {
        let script_path = self.script_path(&self.config.tmp_path);
        let generated_code = self.write(&script_path, initial_buffers)?;

        let result = self
            .runner
            .run(&self.config.interpreter, &[OsStr::new(&script_path)]);

        if !self.config.keep_generated {
            if let Err(e) = remove_temp_file(&script_path) {
                warn!(
                    path = %script_path.display(),
                    error = %e,
                    "could not remove generated script"
                );
            }
        }

        let output = result?;
        if !output.success {
            warn!(code = ?output.code, "pyactr run failed");
            return Err(CompilerError::Execution {
                output: strip_gui_warning(&output.text),
            });
        }

        info!(code = ?output.code, bytes = output.text.len(), "pyactr run finished");
        Ok(RunOutput {
            output: output.text,
            script_sha256: sha256_hex(&generated_code),
            generated_code,
            script_path,
        })
    }
}
