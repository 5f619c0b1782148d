//! Builder for git invocations.
//!
//! Every git call goes through [`GitCommand`] so timeouts, logging and error
//! mapping are handled in one place.
//!
//! ```rust,no_run
//! use components_cli::git::command_builder::GitCommand;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let output = GitCommand::new()
//!     .current_dir("/path/to/component")
//!     .args(["log", "--format=%H", "HEAD^..HEAD"])
//!     .execute()
//!     .await?;
//! println!("{}", output.stdout.trim());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::GIT_QUERY_TIMEOUT;
use crate::core::ComponentsError;

/// A git command under construction.
pub struct GitCommand {
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    timeout_duration: Option<Duration>,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            current_dir: None,
            timeout_duration: Some(GIT_QUERY_TIMEOUT),
        }
    }
}

/// Captured output of a successful git command.
#[derive(Debug, Clone)]
pub struct GitCommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GitCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir` (passed as `git -C <dir>`).
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Override the timeout; `None` waits indefinitely.
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Execute the command and capture its output.
    ///
    /// # Errors
    ///
    /// - [`ComponentsError::GitNotFound`] when no git binary is on `PATH`
    /// - [`ComponentsError::GitCommandError`] on a non-zero exit or timeout
    pub async fn execute(self) -> Result<GitCommandOutput> {
        let git = which::which("git").map_err(|_| ComponentsError::GitNotFound)?;

        let mut full_args = Vec::new();
        if let Some(ref dir) = self.current_dir {
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.iter().cloned());

        let operation = self.args.first().cloned().unwrap_or_else(|| "unknown".to_string());

        tracing::debug!(target: "git", "Executing command: git {}", full_args.join(" "));

        let mut cmd = Command::new(git);
        cmd.args(&full_args).stdout(Stdio::piped()).stderr(Stdio::piped());

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => result.context(format!("Failed to execute git {}", full_args.join(" ")))?,
                Err(_) => {
                    tracing::warn!(
                        target: "git",
                        "Command timed out after {} seconds: git {}",
                        duration.as_secs(),
                        full_args.join(" ")
                    );
                    return Err(ComponentsError::GitCommandError {
                        operation,
                        stderr: format!("Git command timed out after {} seconds", duration.as_secs()),
                    }
                    .into());
                }
            }
        } else {
            output_future.await.context(format!("Failed to execute git {}", full_args.join(" ")))?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(target: "git", "Command failed with exit code: {:?}", output.status.code());
            return Err(ComponentsError::GitCommandError {
                operation,
                stderr: if stderr.is_empty() {
                    stdout
                } else {
                    stderr
                },
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::trace!(target: "git", "{}", stdout.trim());
        }

        Ok(GitCommandOutput {
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_args() {
        let cmd = GitCommand::new().arg("log").args(["--format=%H", "HEAD^..HEAD"]).current_dir("/tmp");
        assert_eq!(cmd.args, vec!["log", "--format=%H", "HEAD^..HEAD"]);
        assert_eq!(cmd.current_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(cmd.timeout_duration, Some(GIT_QUERY_TIMEOUT));
    }

    #[test]
    fn test_without_timeout() {
        let cmd = GitCommand::new().with_timeout(None);
        assert!(cmd.timeout_duration.is_none());
    }
}
