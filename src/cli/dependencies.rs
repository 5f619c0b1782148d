//! Explicit wiring of the helpers used by commands.
//!
//! Commands receive a [`Dependencies`] and ask it for the collaborators they
//! need. Every helper is built by constructor injection from the shared
//! output, the loaded configuration and the component directory.

use crate::changelog::ChangeLogHelper;
use crate::composer::{BuildOptions, ComposerHelper};
use crate::config::ComponentsConfig;
use crate::core::Output;
use crate::remote::{ReleaseSource, RemoteComponent};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Dependencies {
    output: Arc<dyn Output>,
    config: ComponentsConfig,
    directory: PathBuf,
}

impl Dependencies {
    pub fn new(output: Arc<dyn Output>, config: ComponentsConfig, directory: impl Into<PathBuf>) -> Self {
        Self {
            output,
            config,
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn output(&self) -> Arc<dyn Output> {
        Arc::clone(&self.output)
    }

    #[must_use]
    pub const fn config(&self) -> &ComponentsConfig {
        &self.config
    }

    /// Directory of the component being worked on.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn composer(&self) -> ComposerHelper {
        ComposerHelper::new(self.output())
    }

    /// Build options carrying the configured substitutions and today's
    /// date.
    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::today(self.config.composer.pear_substitutes.clone())
    }

    #[must_use]
    pub fn changelog(&self) -> ChangeLogHelper {
        ChangeLogHelper::new(self.output(), self.directory.clone())
    }

    pub fn remote<S: ReleaseSource>(
        &self,
        name: &str,
        stability: &str,
        channel: &str,
        source: S,
    ) -> RemoteComponent<S> {
        RemoteComponent::new(name, stability, channel, source)
    }
}
