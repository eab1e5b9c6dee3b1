//! Pre-flight checks for the Python runtime.
//!
//! These run before anything is written; every failure is fatal.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CompilerError, Result};
use crate::process::CommandRunner;

/// Which interpreter will run generated scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeIdentity {
    pub path: PathBuf,
    pub version: String,
}

/// Locate `name` on `PATH`. A name containing a path separator is checked
/// as given.
pub fn check_for_executable(name: &str) -> Result<PathBuf> {
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return if is_executable(direct) {
            Ok(direct.to_path_buf())
        } else {
            Err(CompilerError::ExecutableNotFound(name.to_string()))
        };
    }

    let paths = env::var_os("PATH").unwrap_or_default();
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| CompilerError::ExecutableNotFound(name.to_string()))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Report the interpreter's location and `--version` output.
pub fn identify<R: CommandRunner>(
    runner: &R,
    framework: &str,
    exe: &str,
) -> Result<RuntimeIdentity> {
    let path = check_for_executable(exe)?;
    let output = runner.run(exe, &[OsStr::new("--version")])?;
    let identity = RuntimeIdentity {
        path,
        version: output.text.trim().to_string(),
    };
    info!(
        framework,
        version = %identity.version,
        path = %identity.path.display(),
        "using interpreter"
    );
    Ok(identity)
}

/// Check that `interpreter` can import `package`. A failure to launch the
/// interpreter is returned as the underlying I/O error.
pub fn check_for_package<R: CommandRunner>(
    runner: &R,
    interpreter: &str,
    package: &str,
) -> Result<()> {
    let import = format!("import {package}");
    let output = runner.run(interpreter, &[OsStr::new("-c"), OsStr::new(&import)])?;

    if !output.success {
        return Err(CompilerError::PackageNotFound {
            package: package.to_string(),
        });
    }
    debug!(package, "runtime package available");
    Ok(())
}
