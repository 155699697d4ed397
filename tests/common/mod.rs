//! Shared test utilities for the ansible-bench test suite.
//!
//! Provides a scripted [`RecordingRunner`] so integration tests can drive the
//! provisioner, collection installer, and bench driver without spawning real
//! processes, and assert on every invocation that would have run.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::RecordingRunner;
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ansible_bench::error::{Error, Result};
use ansible_bench::process::{ProcessInvocation, ProcessOutput, ProcessRunner};

/// A [`ProcessRunner`] that records every invocation and replays scripted
/// results instead of spawning processes.
///
/// Results are consumed in FIFO order; once the script is exhausted every
/// further invocation succeeds with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<ProcessInvocation>>,
    script: Mutex<VecDeque<ScriptedResult>>,
}

enum ScriptedResult {
    Success(ProcessOutput),
    Failure { code: i32, stdout: String, stderr: String },
}

impl RecordingRunner {
    /// Create a runner with an empty script (every call succeeds, empty
    /// output).
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful result with the given stdout.
    pub fn push_success(&self, stdout: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedResult::Success(ProcessOutput::success(stdout, "")));
    }

    /// Queue a failure: the runner will log nothing and return
    /// [`Error::ProcessFailed`] for that invocation, like the production
    /// runner does after logging.
    pub fn push_failure(&self, code: i32, stdout: impl Into<String>, stderr: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedResult::Failure {
                code,
                stdout: stdout.into(),
                stderr: stderr.into(),
            });
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<ProcessInvocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The programs invoked, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|inv| inv.program.clone())
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: ProcessInvocation) -> Result<ProcessOutput> {
        let command = invocation.to_string();
        self.calls.lock().unwrap().push(invocation);

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedResult::Success(output)) => Ok(output),
            Some(ScriptedResult::Failure {
                code,
                stdout,
                stderr,
            }) => Err(Error::process_failed(command, code, stdout, stderr)),
            None => Ok(ProcessOutput::success("", "")),
        }
    }
}
