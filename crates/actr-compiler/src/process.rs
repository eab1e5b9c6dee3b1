//! External process seam.
//!
//! Everything that launches a subprocess goes through [`CommandRunner`] so
//! tests can substitute canned output.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::process::{Command, Stdio};

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output and standard error, in the order they were written.
    pub text: String,
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

/// Runs a program to completion and captures its combined output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by [`std::process::Command`]. Blocks until
/// the child exits.
///
/// The child's standard output and error share one pipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<CommandOutput> {
        let (mut reader, writer) = io::pipe()?;

        // The command must be dropped before reading, or its copies of the
        // write end keep the pipe open.
        let mut child = {
            let mut command = Command::new(program);
            command
                .args(args)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            command.spawn()?
        };

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let status = child.wait()?;

        Ok(CommandOutput {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            success: status.success(),
            code: status.code(),
        })
    }
}
