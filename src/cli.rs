//! CLI for ansible-bench.
//!
//! Argument parsing for the benchmark driver: the three working directories
//! as positional arguments, an optional config file, and counted verbosity.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// ansible-bench - benchmark Ansible playbook runs across version matrices
///
/// Provisions one venv per (Python, ansible-core) pair, runs the playbook in
/// each, and logs a timing record per run.
#[derive(Parser, Debug, Clone)]
#[command(name = "ansible-bench")]
#[command(author = "Ansible-bench Contributors")]
#[command(version)]
#[command(about = "Benchmark Ansible playbook runs across Python and ansible-core versions", long_about = None)]
pub struct Cli {
    /// Base directory where virtual environments are created
    pub venv_dir: PathBuf,

    /// Directory containing the playbook to benchmark
    pub playbook_dir: PathBuf,

    /// Shared directory for the collection dependency install
    pub collections_dir: PathBuf,

    /// Path to a TOML configuration file (matrix, collection, playbook)
    #[arg(short = 'c', long, env = "ANSIBLE_BENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-2).
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(2)
    }
}
