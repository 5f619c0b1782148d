//! Git queries used by component tooling.
//!
//! Git is invoked as the system `git` binary through [`GitCommand`]; nothing
//! here modifies a repository.

pub mod command_builder;

pub use command_builder::{GitCommand, GitCommandOutput};

use anyhow::Result;
use std::path::Path;

/// Commit hash of `HEAD` for the repository containing `dir`.
///
/// Works on repositories with a single commit.
pub async fn head_commit(dir: &Path) -> Result<String> {
    let output = GitCommand::new()
        .current_dir(dir)
        .args(["log", "-1", "--format=%H", "HEAD"])
        .execute()
        .await?;
    Ok(output.stdout.trim().to_string())
}
