//! The benchmark driver loop.
//!
//! Walks the version matrix strictly sequentially: for every (Python,
//! ansible-core) pair it provisions the venv, installs the shared collection
//! dependency if missing, runs the playbook, extracts the task timings, and
//! logs one sorted record. The first failure aborts the whole run.

use std::path::PathBuf;

use tracing::info;

use crate::collections::CollectionInstaller;
use crate::config::Config;
use crate::error::Result;
use crate::playbook::PlaybookRunner;
use crate::process::SharedRunner;
use crate::provision::Provisioner;
use crate::timing::{extract_timings, TimingRecord};

/// Directories a benchmark run operates on.
#[derive(Debug, Clone)]
pub struct BenchPaths {
    /// Base directory where venvs are created
    pub venv_dir: PathBuf,
    /// Directory containing the playbook
    pub playbook_dir: PathBuf,
    /// Shared collection install directory
    pub collections_dir: PathBuf,
}

/// Orchestrates one full matrix run.
pub struct BenchRunner {
    config: Config,
    provisioner: Provisioner,
    collections: CollectionInstaller,
    playbook: PlaybookRunner,
}

impl BenchRunner {
    /// Wire up the components over a shared process runner.
    pub fn new(paths: BenchPaths, config: Config, runner: SharedRunner) -> Self {
        let provisioner = Provisioner::new(
            &paths.venv_dir,
            config.pip.clone(),
            config.privilege_escalation.clone(),
            runner.clone(),
        );
        let collections = CollectionInstaller::new(
            &paths.collections_dir,
            &paths.playbook_dir,
            config.collection.name.clone(),
            runner.clone(),
        );
        let playbook = PlaybookRunner::new(
            &paths.playbook_dir,
            config.playbook.file.clone(),
            config.privilege_escalation.clone(),
            runner,
        );

        Self {
            config,
            provisioner,
            collections,
            playbook,
        }
    }

    /// Run every (Python, ansible-core) pair in matrix order.
    ///
    /// Nothing is retried and no pair is skipped: any process failure
    /// propagates out immediately, even on the last pair.
    pub async fn run_matrix(&self) -> Result<()> {
        self.config.matrix.validate()?;

        for (python_version, ansible_versions) in self.config.matrix.iter() {
            info!(python = %python_version, "using Python");

            for ansible_version in ansible_versions {
                let env = self.provisioner.ensure(python_version, ansible_version).await?;

                self.collections
                    .ensure_installed(&env.tool("ansible-galaxy"))
                    .await?;

                let output = self.playbook.run(&env.tool("ansible-playbook")).await?;

                let record = build_record(python_version, ansible_version, &output);
                info!(python = %python_version, ansible = %ansible_version, record = %record, "run complete");
            }
        }

        Ok(())
    }
}

/// Build the sorted result record for one run: the fixed version keys plus
/// one entry per extracted task timing, later duplicate names overwriting
/// earlier ones.
pub fn build_record(python_version: &str, ansible_version: &str, output: &str) -> TimingRecord {
    let mut record = TimingRecord::new(python_version, ansible_version);
    for (name, duration) in extract_timings(output) {
        record.insert(name, duration);
    }
    record
}
