//! Translation of component descriptors into `composer.json`.
//!
//! The translation itself is pure: [`ManifestBuilder::build`] turns a
//! [`PackageDescriptor`] into a [`ComposerManifest`] without touching the
//! file system. [`ComposerHelper`] adds the I/O around it: loading the
//! descriptor, writing the manifest next to it and reporting completion.
//!
//! # Routing overview
//!
//! | Declaration                         | Manifest key                  | Repository            |
//! |-------------------------------------|-------------------------------|-----------------------|
//! | `pear: pear.horde.org/Horde_Util`   | `horde/util`                  | vcs `github.com/horde/Util` |
//! | `pear: pear.horde.org/horde`        | `horde/base`                  | vcs `github.com/horde/base` |
//! | `pear: pecl.php.net/imagick`        | `ext-imagick`                 | none                  |
//! | `pear: pear.php.net/Net_DNS2`       | `pear-pear.php.net/Net_DNS2`  | pear `https://pear.php.net` |
//! | `ext: json`                         | `ext-json`                    | none                  |
//! | `php`                               | `php`                         | none                  |
//!
//! Substituted coordinates are replaced by their configured package and never
//! register a repository.

pub mod builder;
pub mod document;
pub mod registry;
pub mod router;
pub mod substitution;

pub use builder::{BuildOptions, ManifestBuilder};
pub use document::{ComposerManifest, Section};
pub use registry::{RepositoryEntry, RepositoryKind, RepositoryRegistry};
pub use router::{DependencyRouter, Route};
pub use substitution::{Substitute, SubstitutionSource, SubstitutionTable};

use crate::constants::COMPOSER_FILE;
use crate::core::Output;
use crate::descriptor::PackageDescriptor;
use crate::utils::fs::atomic_write;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes `composer.json` files for components.
pub struct ComposerHelper {
    output: Arc<dyn Output>,
}

impl ComposerHelper {
    pub fn new(output: Arc<dyn Output>) -> Self {
        Self {
            output,
        }
    }

    /// Load the descriptor at `descriptor_path` and write `composer.json`
    /// into the same directory.
    pub fn generate(&self, descriptor_path: &Path, options: &BuildOptions) -> Result<PathBuf> {
        let descriptor = PackageDescriptor::load(descriptor_path)?;
        let directory = descriptor_path.parent().unwrap_or_else(|| Path::new("."));
        self.generate_for(&descriptor, directory, options)
    }

    /// Build the manifest for `descriptor` and write it to
    /// `<directory>/composer.json`.
    ///
    /// Nothing is written when the build fails. On success the output
    /// receives exactly one completion message.
    pub fn generate_for(
        &self,
        descriptor: &PackageDescriptor,
        directory: &Path,
        options: &BuildOptions,
    ) -> Result<PathBuf> {
        let manifest = ManifestBuilder::new(options.clone()).build(descriptor)?;
        let json = manifest.to_json()?;

        let path = directory.join(COMPOSER_FILE);
        atomic_write(&path, json.as_bytes())?;

        tracing::info!(target: "composer", "Wrote {} for {}", path.display(), manifest.name);
        self.output.ok("Created composer.json file.");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComponentsError, RecordingOutput};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"
name: Util
full: Utility library
type: library
authors:
  - name: Jan Schneider
    email: jan@horde.org
    role: lead
version:
  release: 3.0.0-git
license:
  identifier: LGPL-2.1-only
dependencies:
  required:
    php: ^7
    pear:
      pear.horde.org/Horde_Exception: ^3
      pear.php.net/Mail: '*'
"#;

    fn options(substitutes: SubstitutionTable) -> BuildOptions {
        BuildOptions::new(substitutes, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
    }

    #[test]
    fn test_generate_writes_next_to_descriptor() {
        let temp = TempDir::new().unwrap();
        let descriptor_path = temp.path().join(".horde.yml");
        std::fs::write(&descriptor_path, DESCRIPTOR).unwrap();

        let output = Arc::new(RecordingOutput::new());
        let helper = ComposerHelper::new(output.clone());
        let path = helper.generate(&descriptor_path, &options(SubstitutionTable::new())).unwrap();

        assert_eq!(path, temp.path().join("composer.json"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["name"], "horde/util");
        assert_eq!(written["require"]["horde/exception"], "^3");
        assert_eq!(output.messages(), vec!["Created composer.json file."]);
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let descriptor_path = temp.path().join(".horde.yml");
        std::fs::write(&descriptor_path, DESCRIPTOR).unwrap();
        let substitutes = SubstitutionTable::new().with(
            "pear.php.net/Mail",
            Substitute {
                name: "pear/mail".to_string(),
                source: SubstitutionSource::Unsupported("Github".to_string()),
            },
        );

        let output = Arc::new(RecordingOutput::new());
        let helper = ComposerHelper::new(output.clone());
        let err = helper.generate(&descriptor_path, &options(substitutes)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ComponentsError>(),
            Some(ComponentsError::UnsupportedSubstitutionSource { .. })
        ));
        assert!(!temp.path().join("composer.json").exists());
        assert!(output.messages().is_empty());
    }
}
