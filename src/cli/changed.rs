//! `components changed`: record a change log entry.
//!
//! When the component keeps a `changelog.yml`, the entry goes there and
//! `CHANGES` is regenerated from it. Otherwise the entry is added to
//! `CHANGES` directly.

use anyhow::Result;
use clap::Args;

use super::dependencies::Dependencies;

#[derive(Args, Debug)]
pub struct ChangedCommand {
    /// The change log entry, e.g. "[jan] Fix encoding of headers."
    pub entry: String,

    /// Show what would change without writing anything.
    #[arg(long)]
    pub pretend: bool,
}

impl ChangedCommand {
    pub async fn execute(self, deps: &Dependencies) -> Result<()> {
        let helper = deps.changelog();

        if helper.changelog_yml(&self.entry, self.pretend)?.is_some() {
            helper.update_changes(self.pretend)?;
        } else if helper.changes(&self.entry, self.pretend)?.is_none() {
            deps.output().warn(&format!(
                "No change log found in {}.",
                deps.directory().display()
            ));
        }

        Ok(())
    }
}
