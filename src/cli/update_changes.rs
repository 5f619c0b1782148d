//! `components update-changes`: regenerate `CHANGES` from `changelog.yml`.

use anyhow::Result;
use clap::Args;

use super::dependencies::Dependencies;

#[derive(Args, Debug)]
pub struct UpdateChangesCommand {
    /// Show what would change without writing anything.
    #[arg(long)]
    pub pretend: bool,
}

impl UpdateChangesCommand {
    pub async fn execute(self, deps: &Dependencies) -> Result<()> {
        if deps.changelog().update_changes(self.pretend)?.is_none() {
            deps.output().warn("Both changelog.yml and CHANGES are required to update CHANGES.");
        }
        Ok(())
    }
}
