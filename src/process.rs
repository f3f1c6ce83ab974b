#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, Result};
use colored::Colorize;

/// Framing line printed around command banners.
const BANNER: &str = " >>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>> ";

/// An external command: program, arguments, working directory and extra
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable to launch.
    program: OsString,
    /// Arguments, passed verbatim.
    args:    Vec<OsString>,
    /// Working directory of the child; inherits ours when `None`.
    cwd:     Option<PathBuf>,
    /// Variables added to the inherited environment.
    env:     Vec<(OsString, OsString)>,
}

impl CommandSpec {
    /// Starts a command for `program` with no arguments.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args:    Vec::new(),
            cwd:     None,
            env:     Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Runs the child inside `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Sets `key=value` in the child's environment.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Executable to launch.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, if set.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Value this command sets for `key`, if any.
    pub fn env_value(&self, key: &str) -> Option<&OsStr> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands.
///
/// `Ok(true)` means the command exited successfully, `Ok(false)` that it ran
/// and failed. `Err` is reserved for commands that could not be started.
pub trait CommandRunner {
    /// Runs `command` to completion.
    fn run(&mut self, command: &CommandSpec) -> Result<bool>;
}

/// Spawns real processes, one at a time, with their output streamed to the
/// console as it is produced.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandSpec) -> Result<bool> {
        print_banner(&command.to_string());

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = command.cwd() {
            cmd.current_dir(dir);
        }
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to spawn `{command}`"))?;

        if !status.success() {
            print_failure();
            tracing::debug!("`{command}` exited with {status}");
        }

        Ok(status.success())
    }
}

/// Prints `text` framed by banner lines.
pub fn print_banner(text: &str) {
    println!("{}", BANNER.yellow());
    println!("  {}", text.bold());
    println!("{}", BANNER.yellow());
}

/// Prints the failure banner shown after a command exits unsuccessfully.
pub fn print_failure() {
    println!("{}", BANNER.red());
    println!("{}", " FAILURE!!".red().bold());
    println!("{}", BANNER.red());
}
