//! `components fetch`: download a release archive from a channel.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::dependencies::Dependencies;
use crate::constants::NATIVE_CHANNEL;
use crate::remote::{PearChannel, RequestOptions};

#[derive(Args, Debug)]
pub struct FetchCommand {
    /// Package name on the channel, e.g. Horde_Util.
    pub name: String,

    #[arg(long, default_value = NATIVE_CHANNEL)]
    pub channel: String,

    #[arg(long, default_value = "stable")]
    pub stability: String,

    /// Directory receiving the archive (default: component directory).
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Request timeout in seconds; overrides the configured value.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl FetchCommand {
    pub async fn execute(self, deps: &Dependencies) -> Result<()> {
        let options = match self.timeout {
            Some(seconds) => RequestOptions::with_timeout(Duration::from_secs(seconds)),
            None => deps.config().remote.request_options(),
        };

        let release = PearChannel::for_channel(&self.channel)
            .resolve(&self.name, &self.stability, options.timeout)
            .await?;
        let remote = deps.remote(&self.name, &self.stability, &self.channel, release);

        let destination = self.destination.unwrap_or_else(|| deps.directory().to_path_buf());
        let path = remote.place_archive(&destination, &options).await?;

        deps.output().ok(&format!(
            "Fetched {} {} to {}.",
            remote.name(),
            remote.version()?,
            path.display()
        ));
        Ok(())
    }
}
