//! Two-phase launch execution.
//!
//! `dispatch` hands a fully-built command string to the host shell and
//! returns as soon as the process has been handed off; `LaunchHandle::wait`
//! observes completion. "Dispatched" and "completed successfully" are
//! distinct outcomes and are reported separately.

use crate::error::LaunchError;
use log::info;
use std::process::Stdio;
use tokio::process::{Child, Command};

/// A launched process whose completion has not been observed yet.
pub struct LaunchHandle {
    command: String,
    child: Child,
}

/// Spawn `command` through the host shell.
///
/// Spawn failures (missing shell, resource limits) surface here; failures of
/// the launched program itself surface from [`LaunchHandle::wait`].
pub fn dispatch(command: &str) -> Result<LaunchHandle, LaunchError> {
    info!("Executing: {command}");

    let child = shell(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    Ok(LaunchHandle {
        command: command.to_string(),
        child,
    })
}

impl LaunchHandle {
    /// Command string this handle was spawned from.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Await completion. A non-zero exit maps to [`LaunchError::Failed`]
    /// carrying stderr, or the exit status when stderr was empty.
    pub async fn wait(self) -> Result<(), LaunchError> {
        let output = self.child.wait_with_output().await?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            output.status.to_string()
        } else {
            stderr.trim().to_string()
        };
        Err(LaunchError::Failed(detail))
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_exit_is_success() {
        let handle = dispatch("exit 0").unwrap();
        handle.wait().await.unwrap();
    }

    #[tokio::test]
    async fn nonzero_exit_surfaces_stderr() {
        let handle = dispatch("echo boom >&2; exit 3").unwrap();
        match handle.wait().await {
            Err(LaunchError::Failed(detail)) => assert!(detail.contains("boom")),
            other => panic!("expected launch failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_without_stderr_reports_status() {
        let handle = dispatch("exit 7").unwrap();
        match handle.wait().await {
            Err(LaunchError::Failed(detail)) => assert!(detail.contains('7')),
            other => panic!("expected launch failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn handle_remembers_its_command() {
        let handle = dispatch("exit 0").unwrap();
        assert_eq!(handle.command(), "exit 0");
        handle.wait().await.unwrap();
    }
}
