//! Integration tests for environment provisioning.
//!
//! Driven entirely through the recording fake runner: no venvs are created
//! and no pip ever runs.

mod common;

use std::sync::Arc;

use ansible_bench::config::{PipConfig, PrivilegeEscalation};
use ansible_bench::error::Error;
use ansible_bench::provision::{venv_name, Provisioner};
use common::RecordingRunner;
use pretty_assertions::assert_eq;

fn provisioner(venv_dir: &std::path::Path, runner: Arc<RecordingRunner>) -> Provisioner {
    Provisioner::new(
        venv_dir,
        PipConfig::default(),
        PrivilegeEscalation::default(),
        runner,
    )
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn test_names_are_deterministic() {
    assert_eq!(venv_name("3.11", "2.15.1"), "venv-p3.11-ansible2.15.1");
    assert_eq!(venv_name("3.11", "2.15.1"), venv_name("3.11", "2.15.1"));
}

#[test]
fn test_names_never_collide_across_distinct_pairs() {
    let pairs = [
        ("3.8", "2.12.0"),
        ("3.8", "2.12.1"),
        ("3.9", "2.12.0"),
        ("3.10", "2.15.1"),
        ("3.11", "2.15.1"),
    ];

    let mut seen = std::collections::HashSet::new();
    for (pv, av) in pairs {
        assert!(seen.insert(venv_name(pv, av)), "collision for ({pv}, {av})");
    }
}

// ============================================================================
// Provisioning Sequence
// ============================================================================

#[tokio::test]
async fn test_fresh_environment_runs_three_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::new();

    let env = provisioner(dir.path(), runner.clone())
        .ensure("3.9", "2.13.5")
        .await
        .unwrap();

    assert_eq!(env.name, "venv-p3.9-ansible2.13.5");
    assert_eq!(runner.call_count(), 3);

    let calls = runner.calls();
    // venv creation is escalated and runs in the base directory.
    assert_eq!(calls[0].program, "python3.9");
    assert_eq!(calls[0].args, ["-m", "venv", "venv-p3.9-ansible2.13.5"]);
    assert!(calls[0].escalate);
    assert_eq!(calls[0].cwd.as_deref(), Some(dir.path()));
    // pip bootstrap, then the pinned install, via the venv interpreter.
    let python = env.python().display().to_string();
    assert_eq!(calls[1].program, python);
    assert_eq!(
        calls[1].args,
        ["-m", "pip", "install", "-U", "pip", "setuptools", "wheel"]
    );
    assert_eq!(calls[2].program, python);
    assert_eq!(
        calls[2].args,
        ["-m", "pip", "install", "-U", "ansible-core==2.13.5"]
    );
}

#[tokio::test]
async fn test_existing_interpreter_short_circuits_with_zero_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join(venv_name("3.10", "2.14.2")).join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(bin.join("python"), "").unwrap();

    let runner = RecordingRunner::new();
    let env = provisioner(dir.path(), runner.clone())
        .ensure("3.10", "2.14.2")
        .await
        .unwrap();

    assert_eq!(runner.call_count(), 0);
    assert_eq!(env.python(), bin.join("python"));
}

#[tokio::test]
async fn test_rerun_after_provisioning_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::new();
    let provisioner = provisioner(dir.path(), runner.clone());

    provisioner.ensure("3.11", "2.15.0").await.unwrap();
    assert_eq!(runner.call_count(), 3);

    // The fake runner created no files, so the interpreter check still
    // reports absence and the sequence runs again in full.
    provisioner.ensure("3.11", "2.15.0").await.unwrap();
    assert_eq!(runner.call_count(), 6);

    // Once the interpreter exists, re-runs are free.
    let bin = dir.path().join(venv_name("3.11", "2.15.0")).join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(bin.join("python"), "").unwrap();
    provisioner.ensure("3.11", "2.15.0").await.unwrap();
    assert_eq!(runner.call_count(), 6);
}

// ============================================================================
// Failure Propagation
// ============================================================================

#[tokio::test]
async fn test_create_failure_aborts_before_pip_runs() {
    let dir = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::new();
    runner.push_failure(127, "", "python3.12: command not found");

    let err = provisioner(dir.path(), runner.clone())
        .ensure("3.12", "2.15.1")
        .await
        .unwrap_err();

    match err {
        Error::ProcessFailed { code, stderr, .. } => {
            assert_eq!(code, 127);
            assert!(stderr.contains("command not found"));
        }
        other => panic!("expected ProcessFailed, got {other:?}"),
    }
    assert_eq!(runner.call_count(), 1);
}

#[tokio::test]
async fn test_install_failure_propagates_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::new();
    runner.push_success("");
    runner.push_success("");
    runner.push_failure(1, "", "No matching distribution for ansible-core==9.9.9");

    let err = provisioner(dir.path(), runner.clone())
        .ensure("3.11", "9.9.9")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ProcessFailed { code: 1, .. }));
    assert_eq!(runner.call_count(), 3);
}
