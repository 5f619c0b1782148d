//! Command-line interface for the components tool.
//!
//! # Commands
//!
//! - `composer` - write `composer.json` from the component's `.horde.yml`
//! - `changed` - record a change log entry
//! - `update-changes` - regenerate `CHANGES` from `changelog.yml`
//! - `fetch` - download the latest release archive of a remote component
//!
//! Global options (`--verbose`, `--quiet`, `--config`, `--path`) apply to
//! every command.
//!
//! ```bash
//! components composer
//! components --path framework/Util changed "[jan] Fix encoding of headers."
//! components update-changes --pretend
//! components fetch Horde_Util --destination dist/
//! ```

pub mod changed;
pub mod composer;
pub mod dependencies;
pub mod fetch;
pub mod update_changes;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ComponentsConfig;
use crate::core::ConsoleOutput;
use dependencies::Dependencies;
use std::sync::Arc;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter for the binary; `None` disables logging.
    pub log_level: Option<String>,
    /// Suppress status messages.
    pub quiet: bool,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "components", version, about = "Maintain Horde components", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors and warnings.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (default: $COMPONENTS_CONFIG, then
    /// ~/.components/config.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Component directory (default: current directory).
    #[arg(short, long, global = true, value_name = "DIR")]
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate composer.json from .horde.yml.
    Composer(composer::ComposerCommand),

    /// Add an entry to the change logs.
    Changed(changed::ChangedCommand),

    /// Rebuild CHANGES from changelog.yml.
    UpdateChanges(update_changes::UpdateChangesCommand),

    /// Download the latest release archive of a component.
    Fetch(fetch::FetchCommand),
}

impl Cli {
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Run the selected command with an externally built [`CliConfig`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let directory = match self.path {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let settings = ComponentsConfig::load_with_optional(config.config_path.clone()).await?;
        let deps = Dependencies::new(Arc::new(ConsoleOutput::new(config.quiet)), settings, directory);

        match self.command {
            Commands::Composer(cmd) => cmd.execute(&deps).await,
            Commands::Changed(cmd) => cmd.execute(&deps).await,
            Commands::UpdateChanges(cmd) => cmd.execute(&deps).await,
            Commands::Fetch(cmd) => cmd.execute(&deps).await,
        }
    }
}
