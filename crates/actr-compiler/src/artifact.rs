//! Run results and the on-disk script artifact.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use actr_codegen::{generate, ScriptOptions};
use actr_types::model::Model;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    /// Everything the script printed, unfiltered.
    pub output: String,
    /// The generated script text.
    pub generated_code: String,
    /// Where the script was written.
    pub script_path: PathBuf,
    /// Lowercase hex SHA-256 of `generated_code`.
    pub script_sha256: String,
}

/// Generate the script for `model` and write it to `path`.
///
/// Returns the generated text. Nothing is written if generation fails.
pub fn write_script(path: &Path, model: &Model, options: &ScriptOptions) -> Result<String> {
    let script = generate(model, options)?;
    write_text(path, &script)?;
    Ok(script)
}

/// Write `script` to `path`. The file is closed on every return path.
pub fn write_text(path: &Path, script: &str) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(script.as_bytes())?;
    out.flush()
}

/// Remove `path` if it exists.
pub fn remove_temp_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

pub fn sha256_hex(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
