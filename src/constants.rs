//! Global constants used throughout the components codebase.
//!
//! Registry hosts, file locations and timeouts that more than one module
//! depends on live here so routing rules and file layout stay in one place.

use std::time::Duration;

/// Vendor prefix used for every generated composer package name.
pub const VENDOR: &str = "horde";

/// PEAR channel hosting the vendor's own components.
pub const NATIVE_CHANNEL: &str = "pear.horde.org";

/// PEAR channel hosting PHP extensions.
pub const EXTENSION_CHANNEL: &str = "pecl.php.net";

/// Umbrella package name on the native channel.
///
/// The umbrella application lives in the `base` repository.
pub const UMBRELLA_PACKAGE: &str = "horde";

/// Slug used for the umbrella package.
pub const UMBRELLA_SLUG: &str = "base";

/// Prefix carried by vendor library package names on the native channel.
pub const LIBRARY_PREFIX: &str = "Horde_";

/// Base URL of the vendor's source control organisation.
pub const VCS_BASE_URL: &str = "https://github.com/horde";

/// Homepage written into every generated manifest.
pub const HOMEPAGE: &str = "https://www.horde.org";

/// Composer installer plugin every component with requirements depends on.
pub const INSTALLER_PLUGIN: &str = "horde/horde-installer-plugin";

/// The only substitution source kind that can be expressed in composer.json.
pub const PACKAGIST_SOURCE: &str = "Packagist";

/// Source directory used by the synthesized psr-0 autoload rule.
pub const DEFAULT_AUTOLOAD_ROOT: &str = "lib/";

/// Name of the component descriptor file.
pub const DESCRIPTOR_FILE: &str = ".horde.yml";

/// Name of the generated manifest file.
pub const COMPOSER_FILE: &str = "composer.json";

/// Change log locations, current layout first.
pub const CHANGELOG_PATHS: [&str; 2] = ["doc/changelog.yml", "docs/changelog.yml"];

/// CHANGES locations, current layout first.
pub const CHANGES_PATHS: [&str; 2] = ["doc/CHANGES", "docs/CHANGES"];

/// Column at which CHANGES entries are wrapped.
pub const CHANGES_WRAP_WIDTH: usize = 79;

/// Continuation indent for wrapped CHANGES entries.
pub const CHANGES_INDENT: &str = "      ";

/// Zero-based line index before which new CHANGES entries are inserted.
pub const CHANGES_INSERT_LINE: usize = 4;

/// Default timeout for downloading a remote component archive (60 seconds).
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for git queries (30 seconds).
pub const GIT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);
