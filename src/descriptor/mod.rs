//! Component descriptor (`.horde.yml`) loading and validation.
//!
//! The descriptor is decoded in two steps: serde reads the YAML into a
//! permissive [`RawDescriptor`] where every scalar is optional, then
//! [`PackageDescriptor::from_raw`] checks the fields the manifest cannot do
//! without and produces the validated descriptor the rest of the crate works
//! with.
//!
//! # Example
//!
//! ```yaml
//! id: Yaml
//! name: Yaml
//! full: YAML parsing and writing library
//! description: Long free-text description.
//! type: library
//! authors:
//!   - name: Jan Schneider
//!     user: jan
//!     email: jan@horde.org
//!     active: true
//!     role: lead
//! version:
//!   release: 3.0.0-git
//!   api: 3.0.0
//! license:
//!   identifier: LGPL-2.1-only
//! dependencies:
//!   required:
//!     php: ^7
//!     pear:
//!       pear.horde.org/Horde_Exception: ^3
//! ```

pub mod dependency;

pub use dependency::{
    Declaration, DependencyBlock, DependencyClass, Dependencies, DetailedVersionSpec, VersionSpec,
};

use crate::core::ComponentsError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Declared component type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    Library,
    Application,
    Component,
    Other(String),
}

impl From<String> for PackageType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "library" => Self::Library,
            "application" => Self::Application,
            "component" => Self::Component,
            _ => Self::Other(value),
        }
    }
}

impl From<PackageType> for String {
    fn from(value: PackageType) -> Self {
        match value {
            PackageType::Library => "library".to_string(),
            PackageType::Application => "application".to_string(),
            PackageType::Component => "component".to_string(),
            PackageType::Other(other) => other,
        }
    }
}

/// A component author. Extra descriptor keys such as `user` or `active` are
/// not carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// `version` section of the raw descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVersion {
    pub release: Option<String>,
    pub api: Option<String>,
}

/// `license` section of the raw descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLicense {
    pub identifier: Option<String>,
    pub uri: Option<String>,
}

/// The descriptor exactly as serde reads it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDescriptor {
    pub name: Option<String>,
    pub full: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub package_type: Option<PackageType>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub version: Option<RawVersion>,
    pub license: Option<RawLicense>,
    #[serde(default)]
    pub dependencies: Dependencies,
    pub autoload: Option<BTreeMap<String, serde_json::Value>>,
}

/// Validated component metadata, the single input of a manifest build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub description: String,
    pub license: String,
    pub package_type: PackageType,
    /// Release version, possibly with a `-git` style qualifier.
    pub version: String,
    pub authors: Vec<Author>,
    /// Explicit autoload block keyed by strategy name.
    pub autoload: Option<BTreeMap<String, serde_json::Value>>,
    pub required: DependencyBlock,
    pub optional: DependencyBlock,
}

impl PackageDescriptor {
    /// Validate a raw descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentsError::IncompleteDescriptor`] naming every missing
    /// field when `name`, `version.release` or `license.identifier` is absent
    /// or empty.
    pub fn from_raw(raw: RawDescriptor) -> Result<Self, ComponentsError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let name = present(raw.name);
        let version = present(raw.version.and_then(|v| v.release));
        let license = present(raw.license.and_then(|l| l.identifier));

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name".to_string());
        }
        if version.is_none() {
            missing.push("version.release".to_string());
        }
        if license.is_none() {
            missing.push("license.identifier".to_string());
        }

        match (name, version, license) {
            (Some(name), Some(version), Some(license)) => Ok(Self {
                name,
                description: raw.full.or(raw.description).unwrap_or_default(),
                license,
                package_type: raw
                    .package_type
                    .unwrap_or_else(|| PackageType::Other(String::new())),
                version,
                authors: raw.authors,
                autoload: raw.autoload,
                required: raw.dependencies.required,
                optional: raw.dependencies.optional,
            }),
            _ => Err(ComponentsError::IncompleteDescriptor {
                missing,
            }),
        }
    }

    /// Parse and validate descriptor YAML.
    ///
    /// `file` is only used in error messages.
    pub fn from_yaml(content: &str, file: &str) -> Result<Self, ComponentsError> {
        let raw: RawDescriptor =
            serde_yaml::from_str(content).map_err(|e| ComponentsError::DescriptorParseError {
                file: file.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Read and validate the descriptor at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ComponentsError::DescriptorNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read component descriptor: {}", path.display()))?;

        tracing::debug!(target: "descriptor", "Loaded descriptor {}", path.display());

        Ok(Self::from_yaml(&content, &path.display().to_string())?)
    }

    /// Release version with any `-qualifier` removed.
    #[must_use]
    pub fn release_version(&self) -> &str {
        truncate_version(&self.version)
    }
}

/// Cut a version string at its first hyphen: `5.1.0-git` becomes `5.1.0`.
#[must_use]
pub fn truncate_version(version: &str) -> &str {
    version.split('-').next().unwrap_or(version)
}
