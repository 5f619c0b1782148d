//! Assembly of a [`ComposerManifest`] from a [`PackageDescriptor`].

use super::document::{ComposerManifest, Section};
use super::registry::RepositoryRegistry;
use super::router::DependencyRouter;
use super::substitution::SubstitutionTable;
use crate::constants::{DEFAULT_AUTOLOAD_ROOT, HOMEPAGE, INSTALLER_PLUGIN, LIBRARY_PREFIX, VENDOR};
use crate::core::ComponentsError;
use crate::descriptor::{DependencyBlock, PackageDescriptor, PackageType};
use chrono::NaiveDate;
use serde_json::json;
use std::collections::BTreeMap;

/// Autoload strategies passed through from an explicit descriptor block.
const AUTOLOAD_STRATEGIES: [&str; 2] = ["classmap", "psr-0"];

/// Per-build inputs besides the descriptor.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub substitutes: SubstitutionTable,
    /// Date written to `time`.
    pub date: NaiveDate,
}

impl BuildOptions {
    #[must_use]
    pub fn new(substitutes: SubstitutionTable, date: NaiveDate) -> Self {
        Self {
            substitutes,
            date,
        }
    }

    /// Options with today's local date.
    #[must_use]
    pub fn today(substitutes: SubstitutionTable) -> Self {
        Self::new(substitutes, chrono::Local::now().date_naive())
    }
}

/// Builds composer manifests.
///
/// Every call to [`build`](Self::build) uses a fresh repository registry, so
/// identical inputs always produce identical documents.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    options: BuildOptions,
}

impl ManifestBuilder {
    #[must_use]
    pub const fn new(options: BuildOptions) -> Self {
        Self {
            options,
        }
    }

    /// Translate `descriptor` into a manifest.
    ///
    /// # Errors
    ///
    /// Fails when any declaration cannot be routed, most notably with
    /// [`ComponentsError::UnsupportedSubstitutionSource`]. No document is
    /// returned in that case.
    pub fn build(&self, descriptor: &PackageDescriptor) -> Result<ComposerManifest, ComponentsError> {
        let mut registry = RepositoryRegistry::new();

        let require = if descriptor.required.is_empty() {
            None
        } else {
            let mut require = Section::new();
            require.insert(INSTALLER_PLUGIN.to_string(), "*".to_string());
            self.route_block(&descriptor.required, &mut require, &mut registry)?;
            Some(require)
        };

        let mut suggest = Section::new();
        self.route_block(&descriptor.optional, &mut suggest, &mut registry)?;

        tracing::debug!(
            target: "composer",
            "Routed {} required and {} optional dependencies into {} repositories",
            require.as_ref().map_or(0, BTreeMap::len),
            suggest.len(),
            registry.len()
        );

        Ok(ComposerManifest {
            name: format!("{VENDOR}/{}", descriptor.name.to_lowercase()),
            description: descriptor.description.clone(),
            package_type: composer_type(&descriptor.package_type).map(str::to_string),
            homepage: HOMEPAGE.to_string(),
            license: descriptor.license.clone(),
            authors: descriptor.authors.clone(),
            version: descriptor.release_version().to_string(),
            time: self.options.date.format("%Y-%m-%d").to_string(),
            repositories: registry.finalize(),
            require,
            suggest,
            autoload: autoload(descriptor),
        })
    }

    fn route_block(
        &self,
        block: &DependencyBlock,
        section: &mut Section,
        registry: &mut RepositoryRegistry,
    ) -> Result<(), ComponentsError> {
        let mut router = DependencyRouter::new(&self.options.substitutes, registry);
        for declaration in block.declarations() {
            let route = router.route(declaration.class, &declaration.name, &declaration.spec)?;
            // Later declarations overwrite earlier ones with the same key.
            section.insert(route.key, route.constraint);
        }
        Ok(())
    }
}

/// Composer package type for a component type.
#[must_use]
pub fn composer_type(package_type: &PackageType) -> Option<&'static str> {
    match package_type {
        PackageType::Library => Some("horde-library"),
        PackageType::Application | PackageType::Component => Some("horde-application"),
        PackageType::Other(_) => None,
    }
}

fn autoload(descriptor: &PackageDescriptor) -> BTreeMap<String, serde_json::Value> {
    match &descriptor.autoload {
        Some(explicit) if !explicit.is_empty() => explicit
            .iter()
            .filter(|(strategy, _)| AUTOLOAD_STRATEGIES.contains(&strategy.as_str()))
            .map(|(strategy, definition)| (strategy.clone(), definition.clone()))
            .collect(),
        _ => {
            let namespace = if descriptor.package_type == PackageType::Library {
                format!("{LIBRARY_PREFIX}{}", descriptor.name)
            } else {
                descriptor.name.clone()
            };
            let mut psr0 = serde_json::Map::new();
            psr0.insert(namespace, json!(DEFAULT_AUTOLOAD_ROOT));
            BTreeMap::from([("psr-0".to_string(), serde_json::Value::Object(psr0))])
        }
    }
}
