//! # ansible-bench - Ansible release benchmarking
//!
//! ansible-bench measures how long a fixed playbook takes to run across a
//! matrix of Python interpreter versions and ansible-core releases. For each
//! (Python, ansible-core) pair it provisions an isolated venv with the pinned
//! release, installs a shared collection dependency once, executes the
//! playbook, scrapes per-task timings from the captured output, and logs one
//! sorted record per run.
//!
//! ## Core Concepts
//!
//! - **Version Matrix**: ordered mapping of interpreter version to the
//!   ansible-core releases to test on it
//! - **Environment**: a venv named deterministically after its version pair,
//!   created once and reused on re-runs
//! - **Timing Record**: the per-run result - version pair plus per-task
//!   durations, sorted by key
//! - **Process Runner**: the single seam through which all external commands
//!   (venv, pip, ansible-galaxy, ansible-playbook) are spawned
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use ansible_bench::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::default();
//!     let runner = Arc::new(TokioRunner::new("sudo"));
//!     let paths = BenchPaths {
//!         venv_dir: "/srv/venvs".into(),
//!         playbook_dir: "/srv/playbooks".into(),
//!         collections_dir: "/srv/collections".into(),
//!     };
//!
//!     BenchRunner::new(paths, config, runner).run_matrix().await
//! }
//! ```

pub mod bench;
pub mod cli;
pub mod collections;
pub mod config;
pub mod error;
pub mod matrix;
pub mod playbook;
pub mod process;
pub mod provision;
pub mod timing;

pub use bench::{build_record, BenchPaths, BenchRunner};
pub use config::Config;
pub use error::{Error, Result};
pub use matrix::{default_matrix, VersionMatrix};
pub use process::{ProcessInvocation, ProcessOutput, ProcessRunner, TokioRunner};
pub use provision::{venv_name, ProvisionedEnv, Provisioner};
pub use timing::{extract_timings, TimingRecord};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::bench::{BenchPaths, BenchRunner};
    pub use crate::collections::CollectionInstaller;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::matrix::VersionMatrix;
    pub use crate::playbook::PlaybookRunner;
    pub use crate::process::{ProcessRunner, TokioRunner};
    pub use crate::provision::Provisioner;
    pub use crate::timing::TimingRecord;
}
