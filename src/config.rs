//! Configuration for ansible-bench.
//!
//! Handles loading configuration from:
//! - Built-in defaults (the full upstream benchmark matrix)
//! - A TOML config file (`-c/--config`, `ANSIBLE_BENCH_CONFIG`, or
//!   `./ansible-bench.toml`)
//!
//! The config file can swap out the version matrix, the collection to
//! install, the playbook filename, the privilege escalation method, and the
//! pip bootstrap packages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::matrix::{default_matrix, VersionMatrix};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ANSIBLE_BENCH_CONFIG";

/// Config file discovered in the working directory when none is given.
pub const PROJECT_CONFIG: &str = "ansible-bench.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version matrix: Python version -> ansible-core versions
    pub matrix: VersionMatrix,

    /// Playbook settings
    pub playbook: PlaybookConfig,

    /// Collection dependency settings
    pub collection: CollectionConfig,

    /// Privilege escalation settings
    pub privilege_escalation: PrivilegeEscalation,

    /// Pip bootstrap settings
    pub pip: PipConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matrix: default_matrix(),
            playbook: PlaybookConfig::default(),
            collection: CollectionConfig::default(),
            privilege_escalation: PrivilegeEscalation::default(),
            pip: PipConfig::default(),
        }
    }
}

/// Playbook settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybookConfig {
    /// Playbook filename resolved inside the playbook directory
    pub file: String,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            file: "playbook.yaml".to_string(),
        }
    }
}

/// Collection dependency settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Collection installed once into the shared collections directory
    pub name: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "ansible.posix".to_string(),
        }
    }
}

/// Privilege escalation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivilegeEscalation {
    /// Escalate venv creation and playbook execution
    pub r#become: bool,

    /// Escalation method prefixed to escalated commands
    pub become_method: String,
}

impl Default for PrivilegeEscalation {
    fn default() -> Self {
        Self {
            r#become: true,
            become_method: "sudo".to_string(),
        }
    }
}

/// Pip bootstrap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipConfig {
    /// Packaging tools upgraded in every fresh venv before ansible-core
    pub bootstrap: Vec<String>,
}

impl Default for PipConfig {
    fn default() -> Self {
        Self {
            bootstrap: vec![
                "pip".to_string(),
                "setuptools".to_string(),
                "wheel".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path (CLI flag or `ANSIBLE_BENCH_CONFIG`) must exist and
    /// parse; a missing `./ansible-bench.toml` falls back to the defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = Self::explicit_path(config_path) {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(&path);
        }

        let project = PathBuf::from(PROJECT_CONFIG);
        if project.exists() {
            return Self::from_file(&project);
        }

        Ok(Self::default())
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)?;
        config.matrix.validate()?;
        Ok(config)
    }

    fn explicit_path(config_path: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = config_path {
            return Some(path.clone());
        }
        std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
    }
}
