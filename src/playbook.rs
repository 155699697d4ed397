//! Playbook execution.
//!
//! Runs the benchmarked playbook with a provisioned venv's
//! `ansible-playbook` and hands the captured stdout to the timing extractor.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::PrivilegeEscalation;
use crate::error::Result;
use crate::process::{ProcessInvocation, SharedRunner};

/// Executes the fixed playbook inside provisioned environments.
pub struct PlaybookRunner {
    playbook_dir: PathBuf,
    playbook_file: String,
    escalation: PrivilegeEscalation,
    runner: SharedRunner,
}

impl PlaybookRunner {
    /// Create a runner for the playbook directory and filename.
    pub fn new(
        playbook_dir: impl Into<PathBuf>,
        playbook_file: impl Into<String>,
        escalation: PrivilegeEscalation,
        runner: SharedRunner,
    ) -> Self {
        Self {
            playbook_dir: playbook_dir.into(),
            playbook_file: playbook_file.into(),
            escalation,
            runner,
        }
    }

    /// Run the playbook with the given `ansible-playbook` executable and
    /// return its captured stdout.
    pub async fn run(&self, ansible_playbook: &Path) -> Result<String> {
        info!(playbook = %self.playbook_file, executable = %ansible_playbook.display(), "running playbook");

        let mut invocation = ProcessInvocation::new(ansible_playbook.display().to_string())
            .arg(&self.playbook_file)
            .with_cwd(&self.playbook_dir);
        if self.escalation.r#become {
            invocation = invocation.escalated();
        }

        let output = self.runner.run(invocation).await?;
        Ok(output.stdout)
    }
}
