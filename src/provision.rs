//! Virtual environment provisioning.
//!
//! Each (Python version, ansible-core version) pair gets its own venv under
//! the base directory, named deterministically so a re-run finds the
//! environment it created before. Provisioning is idempotent: when the venv
//! interpreter already exists nothing is invoked.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{PipConfig, PrivilegeEscalation};
use crate::error::Result;
use crate::process::{venv_tool_path, ProcessInvocation, SharedRunner};

/// Deterministic venv name for a version pair.
///
/// Injective over (python, ansible): both versions appear verbatim between
/// distinct literal markers, so two distinct pairs can never map to the same
/// name.
pub fn venv_name(python_version: &str, ansible_version: &str) -> String {
    format!("venv-p{python_version}-ansible{ansible_version}")
}

/// A provisioned environment: its name and the tools inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedEnv {
    /// Deterministic environment name
    pub name: String,
    /// Root directory of the venv
    pub root: PathBuf,
}

impl ProvisionedEnv {
    /// Path of the venv's Python interpreter.
    pub fn python(&self) -> PathBuf {
        self.tool("python")
    }

    /// Path of a tool in the venv's bin directory.
    pub fn tool(&self, name: &str) -> PathBuf {
        venv_tool_path(&self.root, name)
    }
}

/// Creates isolated environments with a pinned ansible-core installed.
pub struct Provisioner {
    venv_dir: PathBuf,
    pip: PipConfig,
    escalation: PrivilegeEscalation,
    runner: SharedRunner,
}

impl Provisioner {
    /// Create a provisioner rooted at the venv base directory.
    pub fn new(
        venv_dir: impl Into<PathBuf>,
        pip: PipConfig,
        escalation: PrivilegeEscalation,
        runner: SharedRunner,
    ) -> Self {
        Self {
            venv_dir: venv_dir.into(),
            pip,
            escalation,
            runner,
        }
    }

    /// Ensure the venv for the version pair exists with its pinned
    /// ansible-core release installed.
    ///
    /// Short-circuits without any process invocation when the venv
    /// interpreter is already present. On failure the half-created
    /// environment is left in place for inspection.
    pub async fn ensure(
        &self,
        python_version: &str,
        ansible_version: &str,
    ) -> Result<ProvisionedEnv> {
        let name = venv_name(python_version, ansible_version);
        let env = ProvisionedEnv {
            root: self.venv_dir.join(&name),
            name,
        };
        let python = env.python();

        if python.exists() {
            debug!(venv = %env.name, "venv already provisioned, skipping");
            return Ok(env);
        }

        info!(python = %python_version, venv = %env.name, "creating venv");
        self.runner
            .run(self.create_invocation(python_version, &env.name))
            .await?;

        info!(ansible = %ansible_version, venv = %env.name, "installing ansible-core");
        self.runner.run(self.bootstrap_invocation(&python)).await?;
        self.runner
            .run(self.install_invocation(&python, ansible_version))
            .await?;

        Ok(env)
    }

    fn create_invocation(&self, python_version: &str, name: &str) -> ProcessInvocation {
        let mut invocation = ProcessInvocation::new(format!("python{python_version}"))
            .args(["-m", "venv", name])
            .with_cwd(&self.venv_dir);
        if self.escalation.r#become {
            invocation = invocation.escalated();
        }
        invocation
    }

    fn bootstrap_invocation(&self, python: &Path) -> ProcessInvocation {
        ProcessInvocation::new(python.display().to_string())
            .args(["-m", "pip", "install", "-U"])
            .args(self.pip.bootstrap.iter().cloned())
            .with_cwd(&self.venv_dir)
    }

    fn install_invocation(&self, python: &Path, ansible_version: &str) -> ProcessInvocation {
        ProcessInvocation::new(python.display().to_string())
            .args(["-m", "pip", "install", "-U"])
            .arg(format!("ansible-core=={ansible_version}"))
            .with_cwd(&self.venv_dir)
    }
}
