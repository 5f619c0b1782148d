//! Forced replacements for legacy PEAR coordinates.
//!
//! Some PEAR packages have composer-native equivalents. The substitution
//! table maps a coordinate to the package that should be required instead:
//!
//! ```toml
//! [composer.pear-substitutes."pear.php.net/Net_DNS2"]
//! name = "pear/net_dns2"
//! source = "Packagist"
//! ```

use crate::constants::PACKAGIST_SOURCE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a replacement package is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubstitutionSource {
    Packagist,
    /// Any other source; rejected when routed.
    Unsupported(String),
}

impl From<String> for SubstitutionSource {
    fn from(value: String) -> Self {
        if value == PACKAGIST_SOURCE {
            Self::Packagist
        } else {
            Self::Unsupported(value)
        }
    }
}

impl From<SubstitutionSource> for String {
    fn from(value: SubstitutionSource) -> Self {
        match value {
            SubstitutionSource::Packagist => PACKAGIST_SOURCE.to_string(),
            SubstitutionSource::Unsupported(other) => other,
        }
    }
}

impl std::fmt::Display for SubstitutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Packagist => f.write_str(PACKAGIST_SOURCE),
            Self::Unsupported(other) => f.write_str(other),
        }
    }
}

/// Replacement target for one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitute {
    /// Composer package name written into the manifest.
    pub name: String,
    pub source: SubstitutionSource,
}

impl Substitute {
    #[must_use]
    pub fn packagist(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: SubstitutionSource::Packagist,
        }
    }
}

/// Coordinate → replacement lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, Substitute>,
}

impl SubstitutionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, coordinate: impl Into<String>, substitute: Substitute) -> Self {
        self.insert(coordinate, substitute);
        self
    }

    pub fn insert(&mut self, coordinate: impl Into<String>, substitute: Substitute) {
        self.entries.insert(coordinate.into(), substitute);
    }

    #[must_use]
    pub fn get(&self, coordinate: &str) -> Option<&Substitute> {
        self.entries.get(coordinate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_table() {
        let toml = r#"
["pear.php.net/Net_DNS2"]
name = "pear/net_dns2"
source = "Packagist"

["pear.php.net/Mail"]
name = "pear/mail"
source = "Github"
"#;
        let table: SubstitutionTable = toml::from_str(toml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("pear.php.net/Net_DNS2"), Some(&Substitute::packagist("pear/net_dns2")));
        assert_eq!(
            table.get("pear.php.net/Mail").map(|s| &s.source),
            Some(&SubstitutionSource::Unsupported("Github".to_string()))
        );
        assert!(table.get("pear.php.net/Other").is_none());
    }

    #[test]
    fn test_source_is_case_sensitive() {
        assert_eq!(
            SubstitutionSource::from("packagist".to_string()),
            SubstitutionSource::Unsupported("packagist".to_string())
        );
    }
}
