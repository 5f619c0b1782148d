//! Change log maintenance for a component checkout.
//!
//! A component keeps its history in two places:
//!
//! - `doc/changelog.yml` (or `docs/changelog.yml` in older layouts): a YAML
//!   mapping from version to release information, whose `notes` field holds
//!   one entry per line.
//! - `doc/CHANGES` (or `docs/CHANGES`): the human-readable rendering.
//!
//! [`ChangeLogHelper`] adds entries to either file and regenerates `CHANGES`
//! from `changelog.yml`. Every operation honours a `pretend` flag that only
//! reports what would happen.
//!
//! # CHANGES layout
//!
//! ```text
//! ------------
//! v3.0.0-git
//! ------------
//!
//! [jan] Newest entry.
//! [jan] Older entry that is long enough to be wrapped onto a second line,
//!       indented by six spaces.
//! ```

use crate::constants::{
    CHANGELOG_PATHS, CHANGES_INDENT, CHANGES_INSERT_LINE, CHANGES_PATHS, CHANGES_WRAP_WIDTH,
    DESCRIPTOR_FILE,
};
use crate::core::{ComponentsError, Output};
use crate::descriptor::RawDescriptor;
use crate::utils::{atomic_write, first_existing, wrap};
use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Base URL of the blob view used for change log links.
const CHANGES_LINK_BASE: &str = "https://github.com/horde/horde/blob/";

/// Maintains the change logs of one component directory.
pub struct ChangeLogHelper {
    output: Arc<dyn Output>,
    directory: PathBuf,
}

impl ChangeLogHelper {
    pub fn new(output: Arc<dyn Output>, directory: impl Into<PathBuf>) -> Self {
        Self {
            output,
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of `changelog.yml`, if the component has one.
    #[must_use]
    pub fn changelog_file(&self) -> Option<PathBuf> {
        first_existing(&self.directory, &CHANGELOG_PATHS)
    }

    /// Path of `CHANGES`, if the component has one.
    #[must_use]
    pub fn changes_file(&self) -> Option<PathBuf> {
        first_existing(&self.directory, &CHANGES_PATHS)
    }

    /// Add `entry` to `changelog.yml`.
    ///
    /// Returns the change log path, or `None` when the entry is empty or the
    /// component has no `changelog.yml`.
    pub fn changelog_yml(&self, entry: &str, pretend: bool) -> Result<Option<PathBuf>> {
        if entry.is_empty() {
            return Ok(None);
        }
        let Some(changelog) = self.changelog_file() else {
            return Ok(None);
        };

        if pretend {
            self.output.info(&format!("Would add change log entry to {} now.", changelog.display()));
        } else {
            let version = self.add_changelog(entry, &changelog)?;
            self.output.ok(&format!(
                "Added new note to version {} of {}.",
                version,
                changelog.display()
            ));
        }

        Ok(Some(changelog))
    }

    /// Prepend `entry` to the notes of the current release in `changelog`.
    ///
    /// Returns the release the note was added to.
    pub fn add_changelog(&self, entry: &str, changelog: &Path) -> Result<String> {
        let version = self.current_release()?;
        let mut log = read_changelog(changelog)?;

        let file = changelog.display().to_string();
        let info = find_version_mut(&mut log, &version)
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| ComponentsError::ChangelogVersionMissing {
                version: version.clone(),
                file: file.clone(),
            })?;

        let notes_key = Value::String("notes".to_string());
        let existing = info.get(&notes_key).and_then(Value::as_str).unwrap_or_default().trim();

        let mut notes = vec![entry];
        if !existing.is_empty() {
            notes.extend(existing.split('\n'));
        }
        let notes = format!("{}\n", notes.join("\n"));
        info.insert(notes_key, Value::String(notes));

        let content = serde_yaml::to_string(&log)
            .map_err(ComponentsError::from)
            .context("Failed to serialize changelog.yml")?;
        atomic_write(changelog, content.as_bytes())?;

        tracing::debug!(target: "changelog", "Added note to {} in {}", version, file);
        Ok(version)
    }

    /// Add `entry` to `CHANGES`.
    ///
    /// Returns the `CHANGES` path, or `None` when the component has none.
    pub fn changes(&self, entry: &str, pretend: bool) -> Result<Option<PathBuf>> {
        let Some(changes) = self.changes_file() else {
            return Ok(None);
        };

        if pretend {
            self.output.info(&format!("Would add change log entry to {} now.", changes.display()));
        } else {
            add_change(entry, &changes)?;
            self.output.ok(&format!("Added new note to {}.", changes.display()));
        }

        Ok(Some(changes))
    }

    /// Rewrite `CHANGES` from `changelog.yml`, starting at the current
    /// release.
    ///
    /// Returns the `CHANGES` path, or `None` unless both files exist.
    pub fn update_changes(&self, pretend: bool) -> Result<Option<PathBuf>> {
        let (Some(changelog), Some(changes)) = (self.changelog_file(), self.changes_file()) else {
            return Ok(None);
        };

        if pretend {
            self.output.info(&format!("Would update {} now.", changes.display()));
            return Ok(Some(changes));
        }

        let release = self.current_release()?;
        let log = read_changelog(&changelog)?;
        let rendered = render_changes(&log, &release).ok_or_else(|| {
            ComponentsError::ChangelogVersionMissing {
                version: release.clone(),
                file: changelog.display().to_string(),
            }
        })?;

        atomic_write(&changes, rendered.as_bytes())?;
        self.output.ok(&format!("Updated {}.", changes.display()));

        Ok(Some(changes))
    }

    /// Link to `CHANGES` at the current commit, or an empty string when the
    /// component has no `CHANGES`.
    ///
    /// `root` is the component's path inside the repository, e.g.
    /// `/framework/Util`.
    pub async fn changelog_link(&self, root: &str) -> Result<String> {
        let Some(changes) = self.changes_file() else {
            return Ok(String::new());
        };

        let commit = crate::git::head_commit(&self.directory).await?;
        let relative = changes.strip_prefix(&self.directory).unwrap_or(&changes);
        let relative = relative.to_string_lossy().replace('\\', "/");

        Ok(format!("{CHANGES_LINK_BASE}{commit}{root}/{relative}"))
    }

    fn current_release(&self) -> Result<String> {
        let path = self.directory.join(DESCRIPTOR_FILE);
        if !path.exists() {
            return Err(ComponentsError::DescriptorNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw: RawDescriptor =
            serde_yaml::from_str(&content).map_err(|e| ComponentsError::DescriptorParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        raw.version.and_then(|v| v.release).filter(|r| !r.is_empty()).ok_or_else(|| {
            ComponentsError::IncompleteDescriptor {
                missing: vec!["version.release".to_string()],
            }
            .into()
        })
    }
}

fn read_changelog(path: &Path) -> Result<Mapping> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let log: Mapping = serde_yaml::from_str(&content)
        .map_err(ComponentsError::from)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(log)
}

/// Version keys may be parsed as numbers (`2.0`), so compare their text.
fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn find_version_mut<'a>(log: &'a mut Mapping, version: &str) -> Option<&'a mut Value> {
    log.iter_mut().find(|(key, _)| key_text(key).as_deref() == Some(version)).map(|(_, info)| info)
}

/// Insert `entry` into the `CHANGES` file at `path`, wrapped, before the
/// fifth line. Files with fewer lines get the entry appended.
pub fn add_change(entry: &str, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entry = wrap(entry, CHANGES_WRAP_WIDTH, &format!("\n{CHANGES_INDENT}"));

    let mut updated = String::with_capacity(content.len() + entry.len() + 1);
    let mut inserted = false;
    for (counter, line) in content.split_inclusive('\n').enumerate() {
        if counter == CHANGES_INSERT_LINE {
            updated.push_str(&entry);
            updated.push('\n');
            inserted = true;
        }
        updated.push_str(line);
    }
    if !inserted {
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&entry);
        updated.push('\n');
    }

    atomic_write(path, updated.as_bytes())
}

/// Render `CHANGES` from a parsed change log, beginning at `release`.
///
/// Returns `None` when `release` is not in the log.
#[must_use]
pub fn render_changes(log: &Mapping, release: &str) -> Option<String> {
    let mut rendered = String::new();
    let mut started = false;

    for (key, info) in log {
        let Some(version) = key_text(key) else {
            continue;
        };
        if !started && version != release {
            continue;
        }

        let label = if started {
            rendered.push_str("\n\n");
            format!("v{version}")
        } else if version.ends_with("-git") {
            format!("v{version}")
        } else {
            format!("v{version}-git")
        };
        started = true;

        let dashes = "-".repeat(label.len());
        rendered.push_str(&format!("{dashes}\n{label}\n{dashes}\n"));

        let notes = info.get("notes").and_then(Value::as_str).unwrap_or_default();
        for note in notes.split('\n') {
            rendered.push('\n');
            rendered.push_str(&wrap(note, CHANGES_WRAP_WIDTH, &format!("\n{CHANGES_INDENT}")));
        }
    }

    started.then_some(rendered)
}
