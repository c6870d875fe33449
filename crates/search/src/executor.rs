use crate::error::{Result, SearchError};
use async_trait::async_trait;
use smart_find_protocol::{ResultSet, SearchCommand};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Runs a [`SearchCommand`] against the filesystem and hands back its stdout.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn run(&self, command: &SearchCommand) -> Result<String>;
}

/// Executes commands as argv in `root`, without a shell.
///
/// stdin is closed and stderr discarded. A non-zero exit is not an error as long as the tool
/// ran: `rg` exits 1 when nothing matches and `fd`/`find` exit non-zero on unreadable entries
/// while still printing what they found.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    root: PathBuf,
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            root: root.into(),
            timeout,
        }
    }
}

#[async_trait]
impl SearchExecutor for ProcessExecutor {
    async fn run(&self, command: &SearchCommand) -> Result<String> {
        let failed = |reason: String| SearchError::Execution {
            command: command.to_shell_line(),
            reason,
        };

        let mut cmd = Command::new(command.program());
        cmd.args(command.arguments())
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| failed(format!("timed out after {}s", self.timeout.as_secs())))?
            .map_err(|err| failed(err.to_string()))?;

        if !output.status.success() {
            log::debug!("'{}' exited with {}", command, output.status);
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Run `command` and parse its stdout. Execution failures degrade to an empty set.
pub async fn collect_paths(executor: &dyn SearchExecutor, command: &SearchCommand) -> ResultSet {
    match executor.run(command).await {
        Ok(stdout) => ResultSet::from_stdout(&stdout),
        Err(err) => {
            log::warn!("{err}");
            ResultSet::new()
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use smart_find_protocol::SearchTool;
    use tempfile::tempdir;

    #[tokio::test]
    async fn runs_in_root_and_collects_stdout() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        let executor = ProcessExecutor::new(dir.path(), Duration::from_secs(10));
        let cmd = SearchCommand::from_argv(vec!["ls".to_string()]).unwrap();
        let paths = collect_paths(&executor, &cmd).await;
        assert_eq!(paths.as_slice(), &["a.txt"]);
    }

    #[tokio::test]
    async fn nonzero_exit_keeps_stdout() {
        let dir = tempdir().unwrap();
        let executor = ProcessExecutor::new(dir.path(), Duration::from_secs(10));
        let cmd = SearchCommand::from_argv(
            ["sh", "-c", "echo found.rs; exit 1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();
        let stdout = executor.run(&cmd).await.expect("ran");
        assert_eq!(stdout.trim(), "found.rs");
    }

    #[tokio::test]
    async fn missing_tool_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let executor = ProcessExecutor::new(dir.path(), Duration::from_secs(10));
        let cmd = SearchCommand::from_argv(vec!["smart-find-no-such-tool".to_string()]).unwrap();
        assert!(matches!(
            executor.run(&cmd).await,
            Err(SearchError::Execution { .. })
        ));
        assert!(collect_paths(&executor, &cmd).await.is_empty());
    }

    #[tokio::test]
    async fn find_with_explicit_print_skips_excluded_dirs() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        std::fs::write(dir.path().join("node_modules/pkg/a.md"), "x").unwrap();
        std::fs::write(dir.path().join("b.md"), "x").unwrap();
        let executor = ProcessExecutor::new(dir.path(), Duration::from_secs(10));
        let cmd = SearchCommand::new(SearchTool::Find)
            .args([".", "-name", "*.md", "-print"])
            .with_excludes();
        let paths = collect_paths(&executor, &cmd).await;
        assert_eq!(paths.as_slice(), &["./b.md"]);
    }

    #[tokio::test]
    async fn hung_tool_times_out() {
        let dir = tempdir().unwrap();
        let executor = ProcessExecutor::new(dir.path(), Duration::from_secs(1));
        let cmd = SearchCommand::new(SearchTool::Find).arg(".");
        // `find .` on an empty dir finishes immediately; only the sleep exercises the bound.
        assert!(executor.run(&cmd).await.is_ok());

        let sleeper = SearchCommand::from_argv(vec!["sleep".to_string(), "30".to_string()]).unwrap();
        let err = executor.run(&sleeper).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
