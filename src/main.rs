//! ansible-bench - benchmark Ansible playbook runs across version matrices
//!
//! This is the main entry point for the ansible-bench CLI.

use std::sync::Arc;

use anyhow::Result;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ansible_bench::bench::{BenchPaths, BenchRunner};
use ansible_bench::cli::Cli;
use ansible_bench::config::Config;
use ansible_bench::process::TokioRunner;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbosity());

    if let Err(e) = run(&cli).await {
        error!("{e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Load configuration and drive the full matrix run.
async fn run(cli: &Cli) -> ansible_bench::Result<()> {
    let config = Config::load(cli.config.as_ref())?;

    let runner = Arc::new(TokioRunner::new(
        config.privilege_escalation.become_method.clone(),
    ));
    let paths = BenchPaths {
        venv_dir: cli.venv_dir.clone(),
        playbook_dir: cli.playbook_dir.clone(),
        collections_dir: cli.collections_dir.clone(),
    };

    BenchRunner::new(paths, config, runner).run_matrix().await
}

/// Initialize logging based on verbosity level
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(verbosity >= 2))
        .with(env_filter)
        .init();
}
