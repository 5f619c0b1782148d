//! Components - lifecycle tooling for Horde components
//!
//! Horde components describe themselves in a `.horde.yml` descriptor that
//! still speaks PEAR: dependencies are channel-qualified coordinates such as
//! `pear.horde.org/Horde_Util`. This crate translates that descriptor into a
//! `composer.json` and maintains the component's change logs.
//!
//! # Modules
//!
//! - [`descriptor`] - the `.horde.yml` model and its validation
//! - [`composer`] - dependency routing, repository registry and manifest
//!   assembly
//! - [`changelog`] - `changelog.yml` and `CHANGES` maintenance
//! - [`remote`] - components known only through a release channel
//! - [`config`] - user configuration (`~/.components/config.toml`)
//! - [`git`] - read-only git queries
//! - [`cli`] - the `components` command line
//! - [`core`] - errors and user-facing output
//! - [`utils`] - file and text helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use components_cli::composer::{BuildOptions, ManifestBuilder, SubstitutionTable};
//! use components_cli::descriptor::PackageDescriptor;
//!
//! # fn example() -> anyhow::Result<()> {
//! let descriptor = PackageDescriptor::load(std::path::Path::new(".horde.yml"))?;
//! let manifest = ManifestBuilder::new(BuildOptions::today(SubstitutionTable::new())).build(&descriptor)?;
//! print!("{}", manifest.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod changelog;
pub mod cli;
pub mod composer;
pub mod config;
pub mod constants;
pub mod core;
pub mod descriptor;
pub mod git;
pub mod remote;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
