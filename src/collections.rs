//! Shared collection dependency installation.
//!
//! The benchmarked playbook depends on one Galaxy collection. It is installed
//! once into a shared directory using the `ansible-galaxy` of whichever venv
//! was provisioned first; the directory's existence marks the install as done
//! and every later iteration skips it.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::process::{ProcessInvocation, SharedRunner};

/// Environment variable directing where the collection lands.
pub const ROLES_PATH_ENV: &str = "ANSIBLE_ROLES_PATH";

/// Installs the playbook's collection dependency into a shared directory.
pub struct CollectionInstaller {
    collections_dir: PathBuf,
    playbook_dir: PathBuf,
    collection: String,
    runner: SharedRunner,
}

impl CollectionInstaller {
    /// Create an installer targeting the shared collections directory.
    pub fn new(
        collections_dir: impl Into<PathBuf>,
        playbook_dir: impl Into<PathBuf>,
        collection: impl Into<String>,
        runner: SharedRunner,
    ) -> Self {
        Self {
            collections_dir: collections_dir.into(),
            playbook_dir: playbook_dir.into(),
            collection: collection.into(),
            runner,
        }
    }

    /// True once the shared collections directory exists.
    ///
    /// Directory existence is the only completion marker; a partially
    /// completed earlier install reads as done.
    pub fn is_installed(&self) -> bool {
        self.collections_dir.exists()
    }

    /// Install the collection via the given `ansible-galaxy`, unless the
    /// shared directory already exists.
    pub async fn ensure_installed(&self, galaxy: &Path) -> Result<()> {
        if self.is_installed() {
            debug!(collection = %self.collection, "collections directory present, skipping install");
            return Ok(());
        }

        info!(collection = %self.collection, dir = %self.collections_dir.display(), "installing collection");
        let invocation = ProcessInvocation::new(galaxy.display().to_string())
            .args(["collection", "install"])
            .arg(&self.collection)
            .with_cwd(&self.playbook_dir)
            .with_env(ROLES_PATH_ENV, self.collections_dir.display().to_string());
        self.runner.run(invocation).await?;

        Ok(())
    }
}
