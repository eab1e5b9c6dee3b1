//! Framework configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CompilerError, Result};

/// Settings for running models through pyactr.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Python interpreter used to run generated scripts.
    pub interpreter: String,
    /// Package that must be importable by the interpreter.
    pub package: String,
    /// Directory that receives generated scripts.
    pub tmp_path: PathBuf,
    /// Keep the generated script on disk after a run.
    pub keep_generated: bool,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            package: "pyactr".to_string(),
            tmp_path: PathBuf::from("tmp"),
            keep_generated: true,
        }
    }
}

impl FrameworkConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CompilerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            return Err(CompilerError::Config("interpreter must not be empty".into()));
        }
        if self.package.trim().is_empty() {
            return Err(CompilerError::Config("package must not be empty".into()));
        }
        Ok(())
    }
}
