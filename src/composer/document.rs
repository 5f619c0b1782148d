//! The generated `composer.json` document and its serialization.

use super::registry::RepositoryEntry;
use crate::core::ComponentsError;
use crate::descriptor::Author;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A manifest section: package name → version constraint.
pub type Section = BTreeMap<String, String>;

/// Composer manifest built from one component descriptor.
///
/// Field order here is the key order of the written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerManifest {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    pub homepage: String,
    pub license: String,
    pub authors: Vec<Author>,
    pub version: String,
    /// Build date, `YYYY-MM-DD`.
    pub time: String,
    pub repositories: Vec<RepositoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require: Option<Section>,
    #[serde(default)]
    pub suggest: Section,
    #[serde(default)]
    pub autoload: BTreeMap<String, serde_json::Value>,
}

impl ComposerManifest {
    /// Render as indented JSON with a trailing newline.
    ///
    /// serde_json never escapes `/`, so URLs and package names stay readable.
    pub fn to_json(&self) -> Result<String, ComponentsError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Constraint required for `key`, if any.
    #[must_use]
    pub fn required(&self, key: &str) -> Option<&str> {
        self.require.as_ref().and_then(|require| require.get(key)).map(String::as_str)
    }

    /// Constraint suggested for `key`, if any.
    #[must_use]
    pub fn suggested(&self, key: &str) -> Option<&str> {
        self.suggest.get(key).map(String::as_str)
    }
}
