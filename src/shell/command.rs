//! External tool execution.
//!
//! Every tool the pipeline shells out to (`tar`, `asar`, `apt`, `dpkg-deb`,
//! `npm`) goes through the [`ProcessRunner`] trait so components never touch
//! `std::process` directly.

use crate::error::{RepackError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::debug;

/// A single external tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute (looked up on PATH).
    pub program: String,

    /// Arguments, in order.
    pub args: Vec<String>,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Extra environment variables (merged with the inherited environment).
    pub env: BTreeMap<String, String>,

    /// Inherit stdio instead of capturing it (needed for `sudo` password prompts).
    pub inherit_stdio: bool,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            inherit_stdio: false,
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// Run in the given working directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Let the child use the parent's terminal.
    pub fn interactive(mut self) -> Self {
        self.inherit_stdio = true;
        self
    }

    /// The tool being run, looking through a leading `sudo`.
    pub fn tool(&self) -> &str {
        if self.program == "sudo" {
            self.args.first().map(String::as_str).unwrap_or("sudo")
        } else {
            &self.program
        }
    }

    /// Arguments passed to [`Invocation::tool`].
    pub fn tool_args(&self) -> &[String] {
        if self.program == "sudo" && !self.args.is_empty() {
            &self.args[1..]
        } else {
            &self.args
        }
    }

    /// Whether this invocation is wrapped in `sudo`.
    pub fn is_elevated(&self) -> bool {
        self.program == "sudo"
    }

    /// Human-readable command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of running an external tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (None if killed by signal or never started).
    pub exit_code: Option<i32>,

    /// Standard output (empty when stdio is inherited).
    pub stdout: String,

    /// Standard error (empty when stdio is inherited).
    pub stderr: String,
}

impl ProcessOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the tool exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability for running external tools.
pub trait ProcessRunner {
    /// Run the invocation and report its exit status and output.
    ///
    /// A nonzero exit is not an error at this level.
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;

    /// Run the invocation and fail with [`RepackError::ToolInvocation`] on a
    /// nonzero exit.
    fn run_checked(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let output = self.run(invocation)?;
        if output.success() {
            Ok(output)
        } else {
            Err(RepackError::ToolInvocation {
                command: invocation.command_line(),
                code: output.exit_code,
                stderr: output.stderr,
            })
        }
    }
}

/// Runs tools as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let start = Instant::now();
        debug!("Running: {}", invocation.command_line());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        let output = if invocation.inherit_stdio {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map(|status| ProcessOutput {
                    exit_code: status.code(),
                    ..Default::default()
                })
        } else {
            cmd.stdin(Stdio::null()).output().map(|output| ProcessOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        };

        let output = output.map_err(|e| RepackError::ToolInvocation {
            command: invocation.command_line(),
            code: None,
            stderr: e.to_string(),
        })?;

        debug!(
            "Finished in {:?} with exit code {:?}: {}",
            start.elapsed(),
            output.exit_code,
            invocation.program
        );

        Ok(output)
    }
}
