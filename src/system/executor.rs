// src/system/executor.rs

use colored::Colorize;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Failure to start an external program.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The program is not on `PATH`.
    #[error("Command '{0}' was not found. Is it installed and on your PATH?")]
    NotFound(String),
    /// Spawning failed for another reason.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
}

/// Runs external programs (archive tools, initializer interpreters).
///
/// Implementations must run synchronously in `cwd` and report whether the
/// program exited with status zero. Failing to start the program is an error,
/// a non-zero exit is `Ok(false)`.
pub trait ToolRunner {
    /// Runs `program args...` in `cwd` and waits for it.
    fn run(&self, program: &str, args: &[OsString], cwd: &Path) -> Result<bool, ExecutionError>;
}

/// The real runner: spawns the program and inherits stdio so the user sees
/// tool and script output as it happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString], cwd: &Path) -> Result<bool, ExecutionError> {
        let clean_cwd = dunce::simplified(cwd);
        log::debug!(
            "Spawning '{}' in '{}'",
            render_command(program, args),
            clean_cwd.display()
        );

        let status = StdCommand::new(program)
            .args(args)
            .current_dir(clean_cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExecutionError::NotFound(program.to_string()),
                _ => ExecutionError::CommandFailed(render_command(program, args), e),
            })?;

        log::debug!("'{}' exited with {}", program, status);
        Ok(status.success())
    }
}

/// Formats a command line the way a user would type it, quoting arguments
/// that need it.
pub fn render_command(program: &str, args: &[OsString]) -> String {
    let parts: Vec<String> = std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
        .collect();
    shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
}

/// Prints the shell equivalent of a step the tool is about to perform.
pub fn echo(command_line: &str) {
    println!("{}", format!("$ {}", command_line).dimmed());
}
