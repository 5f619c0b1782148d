//! User configuration for the components tool.
//!
//! The configuration lives at `~/.components/config.toml` (or
//! `%LOCALAPPDATA%\components\config.toml` on Windows). The location can be
//! overridden with `--config` or the `COMPONENTS_CONFIG` environment
//! variable. A missing file is not an error; defaults apply.
//!
//! ```toml
//! [composer.pear-substitutes."pear.php.net/Net_DNS2"]
//! name = "pear/net_dns2"
//! source = "Packagist"
//!
//! [remote]
//! timeout = 60
//! ```

use crate::composer::SubstitutionTable;
use crate::constants::DOWNLOAD_TIMEOUT;
use crate::core::ComponentsError;
use crate::remote::RequestOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV: &str = "COMPONENTS_CONFIG";

const fn default_timeout() -> u64 {
    DOWNLOAD_TIMEOUT.as_secs()
}

/// Settings for composer manifest generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// PEAR coordinates replaced by composer-native packages.
    #[serde(rename = "pear-substitutes", default, skip_serializing_if = "SubstitutionTable::is_empty")]
    pub pear_substitutes: SubstitutionTable,
}

/// Settings for remote component downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub const fn request_options(&self) -> RequestOptions {
        RequestOptions::with_timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentsConfig {
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl ComponentsConfig {
    /// Load from `path`, or from `COMPONENTS_CONFIG`, or from the default
    /// location, in that order. Defaults are returned when the chosen file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::resolve_path()?,
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!(target: "config", "No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(ComponentsError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        tracing::debug!(
            target: "config",
            "Loaded {} with {} substitution(s)",
            path.display(),
            config.composer.pear_substitutes.len()
        );
        Ok(config)
    }

    /// Configuration path from `COMPONENTS_CONFIG` or the default location.
    pub fn resolve_path() -> Result<PathBuf> {
        match std::env::var(CONFIG_ENV) {
            Ok(value) if !value.is_empty() => {
                let expanded = shellexpand::full(&value).map_err(|e| ComponentsError::ConfigError {
                    message: format!("Cannot expand {CONFIG_ENV}: {e}"),
                })?;
                Ok(PathBuf::from(expanded.as_ref()))
            }
            _ => Self::default_path(),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("components")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".components")
        };

        Ok(config_dir.join("config.toml"))
    }
}
