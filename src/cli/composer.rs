//! `components composer`: write `composer.json` for a component.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use super::dependencies::Dependencies;
use crate::composer::BuildOptions;
use crate::constants::DESCRIPTOR_FILE;

#[derive(Args, Debug)]
pub struct ComposerCommand {
    /// Date for the `time` field (YYYY-MM-DD); defaults to today.
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
}

impl ComposerCommand {
    pub async fn execute(self, deps: &Dependencies) -> Result<()> {
        let mut options = deps.build_options();
        if let Some(date) = &self.date {
            options = BuildOptions::new(
                options.substitutes,
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{date}', expected YYYY-MM-DD"))?,
            );
        }

        let descriptor = deps.directory().join(DESCRIPTOR_FILE);
        tracing::debug!(target: "composer", "Generating composer.json from {}", descriptor.display());

        deps.composer().generate(&descriptor, &options)?;
        Ok(())
    }
}
