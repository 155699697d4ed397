//! Process execution layer.
//!
//! Every external command ansible-bench runs (venv creation, pip installs,
//! ansible-galaxy, ansible-playbook) goes through the [`ProcessRunner`] trait,
//! so the orchestration components can be exercised in tests with a fake
//! runner instead of spawning real processes.
//!
//! The production implementation, [`TokioRunner`], captures combined output
//! and enforces the failure policy: a non-zero exit logs the captured
//! stdout/stderr at error level exactly once, then raises
//! [`Error::ProcessFailed`] unchanged for the caller to propagate.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Description of a single external command invocation.
///
/// Ephemeral by design: built, handed to a [`ProcessRunner`], and dropped.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvocation {
    /// Program to execute (name resolved via PATH, or an absolute path)
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Working directory for the command
    pub cwd: Option<PathBuf>,
    /// Environment variable overrides
    pub env: HashMap<String, String>,
    /// Run with privilege escalation (prefixed with the configured method)
    pub escalate: bool,
}

impl ProcessInvocation {
    /// Create a new invocation for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Append a single argument.
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

    /// Set the working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Add an environment variable override.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Request privilege escalation for this invocation.
    pub fn escalated(mut self) -> Self {
        self.escalate = true;
        self
    }
}

impl fmt::Display for ProcessInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a completed process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code of the command (0 indicates success)
    pub exit_code: i32,
    /// Content written to standard output
    pub stdout: String,
    /// Content written to standard error
    pub stderr: String,
    /// Convenience flag: `true` if `exit_code == 0`
    pub success: bool,
}

impl ProcessOutput {
    /// Create a new successful process output.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: true,
        }
    }

    /// Create a new failed process output.
    pub fn failure(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Capability to run external commands and capture their output.
///
/// A runner resolves to `Ok` only for zero exit status; a non-zero exit must
/// surface as [`Error::ProcessFailed`] after logging the captured output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation to completion, blocking the caller until it exits.
    async fn run(&self, invocation: ProcessInvocation) -> Result<ProcessOutput>;
}

/// Production [`ProcessRunner`] backed by `tokio::process`.
#[derive(Debug, Clone)]
pub struct TokioRunner {
    /// Privilege escalation method used for escalated invocations
    become_method: String,
}

impl TokioRunner {
    /// Create a runner with the given escalation method (typically `sudo`).
    pub fn new(become_method: impl Into<String>) -> Self {
        Self {
            become_method: become_method.into(),
        }
    }

    /// Render the full command line, including the escalation prefix.
    fn command_line(&self, invocation: &ProcessInvocation) -> String {
        if invocation.escalate {
            format!("{} {}", self.become_method, invocation)
        } else {
            invocation.to_string()
        }
    }

    /// Build the command with working directory, env overrides, and stdio.
    fn build_command(&self, invocation: &ProcessInvocation) -> Command {
        let mut cmd = if invocation.escalate {
            let mut c = Command::new(&self.become_method);
            c.arg(&invocation.program);
            c.args(&invocation.args);
            c
        } else {
            let mut c = Command::new(&invocation.program);
            c.args(&invocation.args);
            c
        };

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        cmd
    }
}

impl Default for TokioRunner {
    fn default() -> Self {
        Self::new("sudo")
    }
}

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(&self, invocation: ProcessInvocation) -> Result<ProcessOutput> {
        let command = self.command_line(&invocation);
        debug!(command = %command, cwd = ?invocation.cwd, "running external command");

        let output = self.build_command(&invocation).output().await?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            error!("{}", stdout);
            error!("{}", stderr);
            return Err(Error::process_failed(command, exit_code, stdout, stderr));
        }

        Ok(ProcessOutput::success(stdout, stderr))
    }
}

/// Convenience for the shared-runner seam used across components.
pub type SharedRunner = std::sync::Arc<dyn ProcessRunner>;

/// Returns the conventional path of a tool inside a venv tree.
pub fn venv_tool_path(venv_root: &Path, tool: &str) -> PathBuf {
    venv_root.join("bin").join(tool)
}
