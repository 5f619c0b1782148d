//! Components that only exist on a release channel.
//!
//! A [`RemoteComponent`] has no checkout: its version, download location and
//! dependencies come from a [`ReleaseSource`]. Lookups are made once and
//! cached. Operations that need local files fail with
//! [`ComponentsError::RemoteComponent`].

pub mod channel;

pub use channel::{PearChannel, ResolvedRelease};

use crate::constants::DOWNLOAD_TIMEOUT;
use crate::core::ComponentsError;
use crate::descriptor::Dependencies;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Release metadata for components published on a channel.
pub trait ReleaseSource: Send + Sync {
    /// Latest release of `name` at the given stability.
    fn latest_release(&self, name: &str, stability: &str) -> Result<String>;

    /// Download URI of the latest release of `name` at the given stability.
    fn latest_download_uri(&self, name: &str, stability: &str) -> Result<String>;

    /// Dependencies of `name` at `version`.
    fn dependencies(&self, name: &str, version: &str) -> Result<Dependencies>;
}

/// Per-request options for downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: DOWNLOAD_TIMEOUT,
        }
    }
}

impl RequestOptions {
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
        }
    }
}

/// A component known only through its release channel.
pub struct RemoteComponent<S: ReleaseSource> {
    name: String,
    stability: String,
    channel: String,
    source: S,
    client: reqwest::Client,
    version: OnceLock<String>,
    uri: OnceLock<String>,
}

impl<S: ReleaseSource> RemoteComponent<S> {
    pub fn new(
        name: impl Into<String>,
        stability: impl Into<String>,
        channel: impl Into<String>,
        source: S,
    ) -> Self {
        Self {
            name: name.into(),
            stability: stability.into(),
            channel: channel.into(),
            source,
            client: reqwest::Client::new(),
            version: OnceLock::new(),
            uri: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    #[must_use]
    pub fn stability(&self) -> &str {
        &self.stability
    }

    /// Latest release at the component's stability.
    pub fn version(&self) -> Result<&str> {
        if let Some(version) = self.version.get() {
            return Ok(version);
        }
        let version = self.source.latest_release(&self.name, &self.stability)?;
        tracing::debug!(target: "remote", "Latest {} release of {}: {}", self.stability, self.name, version);
        Ok(self.version.get_or_init(|| version))
    }

    /// Download URI of the latest release.
    pub fn download_uri(&self) -> Result<&str> {
        if let Some(uri) = self.uri.get() {
            return Ok(uri);
        }
        let uri = self.source.latest_download_uri(&self.name, &self.stability)?;
        Ok(self.uri.get_or_init(|| uri))
    }

    /// File name of the release archive, the last segment of the download
    /// URI.
    pub fn archive_name(&self) -> Result<String> {
        let uri = self.download_uri()?;
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        Ok(path.rsplit('/').next().unwrap_or(path).to_string())
    }

    pub fn dependencies(&self) -> Result<Dependencies> {
        let version = self.version()?;
        self.source.dependencies(&self.name, version)
    }

    /// Download the release archive into `destination`, creating it if
    /// needed. Returns the path of the stored archive.
    pub async fn place_archive(&self, destination: &Path, options: &RequestOptions) -> Result<PathBuf> {
        let uri = self.download_uri()?.to_string();
        let target = destination.join(self.archive_name()?);

        tokio::fs::create_dir_all(destination)
            .await
            .with_context(|| format!("Failed to create directory: {}", destination.display()))?;

        tracing::debug!(target: "remote", "Downloading {} to {}", uri, target.display());

        let network_error = |reason: String| ComponentsError::NetworkError {
            operation: format!("download {uri}"),
            reason,
        };

        let response = self
            .client
            .get(&uri)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(network_error(format!("HTTP {}", response.status())).into());
        }

        let body = response.bytes().await.map_err(|e| network_error(e.to_string()))?;
        tokio::fs::write(&target, &body)
            .await
            .with_context(|| format!("Failed to write archive: {}", target.display()))?;

        Ok(target)
    }

    /// Remote components have no checkout to require.
    pub fn require_local(&self) -> Result<()> {
        Err(ComponentsError::RemoteComponent {
            operation: "Requiring a local checkout".to_string(),
        }
        .into())
    }
}
