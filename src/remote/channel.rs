//! Release lookups against a PEAR channel's REST interface.
//!
//! A channel publishes the latest release per stability at
//! `<base>/rest/r/<package>/<stability>.txt` and serves archives from
//! `<base>/get/<Package>-<version>.tgz`.

use super::ReleaseSource;
use crate::core::ComponentsError;
use crate::descriptor::Dependencies;
use anyhow::Result;
use std::time::Duration;

/// REST client for one channel.
#[derive(Debug, Clone)]
pub struct PearChannel {
    base_url: String,
    client: reqwest::Client,
}

impl PearChannel {
    /// Channel served over HTTPS at its own host name.
    #[must_use]
    pub fn for_channel(channel: &str) -> Self {
        Self::new(format!("https://{channel}"))
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Look up the latest release of `name` and return it as a
    /// [`ReleaseSource`].
    pub async fn resolve(&self, name: &str, stability: &str, timeout: Duration) -> Result<ResolvedRelease> {
        let url = format!("{}/rest/r/{}/{}.txt", self.base_url, name.to_lowercase(), stability);
        tracing::debug!(target: "remote", "Querying {}", url);

        let network_error = |reason: String| ComponentsError::NetworkError {
            operation: format!("look up {name}"),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(network_error(format!("HTTP {} from {}", response.status(), url)).into());
        }

        let body = response.text().await.map_err(|e| network_error(e.to_string()))?;
        let version = body.trim().to_string();
        if version.is_empty() {
            return Err(network_error(format!("no {stability} release published")).into());
        }

        Ok(ResolvedRelease {
            uri: format!("{}/get/{}-{}.tgz", self.base_url, name, version),
            version,
        })
    }
}

/// A release already looked up on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub version: String,
    pub uri: String,
}

impl ReleaseSource for ResolvedRelease {
    fn latest_release(&self, _name: &str, _stability: &str) -> Result<String> {
        Ok(self.version.clone())
    }

    fn latest_download_uri(&self, _name: &str, _stability: &str) -> Result<String> {
        Ok(self.uri.clone())
    }

    /// Channel releases carry their dependencies in the archive's
    /// `package.xml`, which is not read here.
    fn dependencies(&self, _name: &str, _version: &str) -> Result<Dependencies> {
        Ok(Dependencies::default())
    }
}
