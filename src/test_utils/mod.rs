//! Test utilities for the components tool.
//!
//! Provides logging setup and small fixtures for component directories:
//! a `.horde.yml` descriptor plus optional change logs.
//!
//! ```rust,no_run
//! use components_cli::test_utils::ComponentFixture;
//!
//! let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();
//! assert!(component.path().join(".horde.yml").exists());
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; without either, logging
/// stays off.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A throwaway component checkout.
pub struct ComponentFixture {
    temp: TempDir,
}

impl ComponentFixture {
    /// Library with native, extension and third-party PEAR dependencies.
    pub const LIBRARY: &'static str = r#"---
id: Util
name: Util
full: Utility library
description: Utility classes
type: library
authors:
  - name: Jan Schneider
    user: jan
    email: jan@horde.org
    active: true
    role: lead
version:
  release: 3.0.0-git
  api: 3.0.0
license:
  identifier: LGPL-2.1-only
  uri: http://www.horde.org/licenses/lgpl21
dependencies:
  required:
    php: ^7.4 || ^8
    pear:
      pear.horde.org/Horde_Exception: ^3
      pear.horde.org/horde: ^6
      pear.php.net/Net_DNS2: ^1.4
    ext:
      json: '*'
  optional:
    pear:
      pecl.php.net/intl: '*'
      pear.horde.org/Horde_Imap_Client:
        version: ^3
        providesextension: imap
"#;

    /// Application without dependencies.
    pub const APPLICATION: &'static str = r#"---
name: imp
full: Webmail application
type: application
authors: []
version:
  release: 7.0.0
license:
  identifier: GPL-2.0-only
"#;

    /// Change log whose first release matches [`Self::LIBRARY`].
    pub const CHANGELOG: &'static str = r#"---
3.0.0-git:
  api: 3.0.0
  notes: |
    [jan] Add Horde_Util::uriB64Encode().
2.5.0:
  api: 2.0.0
  notes: |
    [mms] Remove PHP 5.3 support.
"#;

    /// CHANGES matching [`Self::CHANGELOG`].
    pub const CHANGES: &'static str = "----------\nv3.0.0-git\n----------\n\n[jan] Add Horde_Util::uriB64Encode().\n";

    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn with_descriptor(self, content: &str) -> Result<Self> {
        self.write(".horde.yml", content)?;
        Ok(self)
    }

    /// Add `doc/changelog.yml` and `doc/CHANGES`.
    pub fn with_changelogs(self) -> Result<Self> {
        self.write("doc/changelog.yml", Self::CHANGELOG)?;
        self.write("doc/CHANGES", Self::CHANGES)?;
        Ok(self)
    }

    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.temp.path().join(relative))?)
    }
}
