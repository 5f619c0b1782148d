//! Repository registry accumulated while routing dependencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Kind of package repository referenced from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    /// A PEAR channel served through composer's pear repository type.
    Pear,
    /// A version control repository.
    Vcs,
}

/// One repository the manifest needs.
///
/// Serialized as `{"type": ..., "url": ...}`; the key only identifies the
/// entry inside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    #[serde(skip)]
    pub key: String,
    #[serde(rename = "type")]
    pub kind: RepositoryKind,
    pub url: String,
}

impl RepositoryEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, kind: RepositoryKind, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            url: url.into(),
        }
    }
}

/// Unique repository entries keyed by repository key.
///
/// Lives for exactly one manifest build.
#[derive(Debug, Default)]
pub struct RepositoryRegistry {
    entries: BTreeMap<String, RepositoryEntry>,
}

impl RepositoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. Registering an existing key keeps the first entry.
    ///
    /// Keys are lowercased while URLs keep their case, so two coordinates
    /// differing only in case share a key; the later URL is dropped with a
    /// warning.
    pub fn register(&mut self, entry: RepositoryEntry) {
        match self.entries.entry(entry.key.clone()) {
            Entry::Vacant(slot) => {
                tracing::trace!(target: "composer", "Registering repository {} -> {}", entry.key, entry.url);
                slot.insert(entry);
            }
            Entry::Occupied(existing) => {
                let kept = existing.get();
                if kept != &entry {
                    tracing::warn!(
                        target: "composer",
                        "Repository {} already points to {}, ignoring {}",
                        entry.key,
                        kept.url,
                        entry.url
                    );
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RepositoryEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the registry into the manifest's repository list, ordered by key.
    #[must_use]
    pub fn finalize(self) -> Vec<RepositoryEntry> {
        self.entries.into_values().collect()
    }
}
