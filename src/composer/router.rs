//! Routing of single dependency declarations to manifest keys.
//!
//! Rules are applied in a fixed order and the first match wins:
//!
//! 1. An extension override in the version spec, or the `ext` class, yields
//!    `ext-<extension>`.
//! 2. The `php` class yields `php`.
//! 3. `pear` coordinates are checked against the substitution table, then the
//!    native channel (`pear.horde.org`), then the extension channel
//!    (`pecl.php.net`); anything else becomes a `pear-<channel>/<package>`
//!    requirement served from a pear repository.
//!
//! Repository entries produced by a route are registered in the shared
//! [`RepositoryRegistry`] before the route is returned.

use super::registry::{RepositoryEntry, RepositoryKind, RepositoryRegistry};
use super::substitution::{SubstitutionSource, SubstitutionTable};
use crate::constants::{
    EXTENSION_CHANNEL, LIBRARY_PREFIX, NATIVE_CHANNEL, UMBRELLA_PACKAGE, UMBRELLA_SLUG,
    VCS_BASE_URL, VENDOR,
};
use crate::core::ComponentsError;
use crate::descriptor::{DependencyClass, VersionSpec};

/// Result of routing one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Key under `require` or `suggest`.
    pub key: String,
    pub constraint: String,
    /// Repository the key is served from, already registered.
    pub repository: Option<RepositoryEntry>,
}

impl Route {
    fn bare(key: String, constraint: &str) -> Self {
        Self {
            key,
            constraint: constraint.to_string(),
            repository: None,
        }
    }
}

/// Routes declarations for one manifest build.
pub struct DependencyRouter<'a> {
    substitutes: &'a SubstitutionTable,
    registry: &'a mut RepositoryRegistry,
}

impl<'a> DependencyRouter<'a> {
    pub fn new(substitutes: &'a SubstitutionTable, registry: &'a mut RepositoryRegistry) -> Self {
        Self {
            substitutes,
            registry,
        }
    }

    /// Route a declaration of `class` named `name`.
    ///
    /// # Errors
    ///
    /// - [`ComponentsError::UnsupportedSubstitutionSource`] when the
    ///   coordinate's substitute is not published on Packagist; nothing is
    ///   registered in that case.
    /// - [`ComponentsError::InvalidCoordinate`] when a `pear` name has no
    ///   `/` separator.
    pub fn route(
        &mut self,
        class: DependencyClass,
        name: &str,
        spec: &VersionSpec,
    ) -> Result<Route, ComponentsError> {
        let constraint = spec.constraint();

        if let Some(extension) = spec.extension_override() {
            return Ok(Route::bare(format!("ext-{extension}"), constraint));
        }

        let route = match class {
            DependencyClass::Ext => Route::bare(format!("ext-{name}"), constraint),
            DependencyClass::Php => Route::bare("php".to_string(), constraint),
            DependencyClass::Pear => self.route_pear(name, constraint)?,
        };

        if let Some(repository) = &route.repository {
            self.registry.register(repository.clone());
        }

        tracing::trace!(target: "composer", "Routed {} {} -> {} = {}", class, name, route.key, route.constraint);
        Ok(route)
    }

    fn route_pear(&self, coordinate: &str, constraint: &str) -> Result<Route, ComponentsError> {
        if let Some(substitute) = self.substitutes.get(coordinate) {
            return match &substitute.source {
                SubstitutionSource::Packagist => Ok(Route::bare(substitute.name.clone(), constraint)),
                SubstitutionSource::Unsupported(source) => {
                    Err(ComponentsError::UnsupportedSubstitutionSource {
                        coordinate: coordinate.to_string(),
                        source_kind: source.clone(),
                    })
                }
            };
        }

        let (channel, package) =
            coordinate.split_once('/').filter(|(c, p)| !c.is_empty() && !p.is_empty()).ok_or_else(
                || ComponentsError::InvalidCoordinate {
                    coordinate: coordinate.to_string(),
                },
            )?;

        let route = match channel {
            NATIVE_CHANNEL => {
                let slug = native_slug(package);
                let key = format!("{VENDOR}/{}", slug.to_lowercase());
                let repository = RepositoryEntry::new(
                    key.clone(),
                    RepositoryKind::Vcs,
                    format!("{VCS_BASE_URL}/{slug}"),
                );
                Route {
                    key,
                    constraint: constraint.to_string(),
                    repository: Some(repository),
                }
            }
            EXTENSION_CHANNEL => Route::bare(format!("ext-{package}"), constraint),
            _ => Route {
                key: format!("pear-{channel}/{package}"),
                constraint: constraint.to_string(),
                repository: Some(RepositoryEntry::new(
                    format!("pear-{channel}"),
                    RepositoryKind::Pear,
                    format!("https://{channel}"),
                )),
            },
        };

        Ok(route)
    }
}

/// Repository slug for a package on the native channel.
///
/// `horde` lives in the `base` repository, `Horde_Foo` libraries in `Foo`,
/// applications under their own name.
#[must_use]
pub fn native_slug(package: &str) -> &str {
    if package == UMBRELLA_PACKAGE {
        UMBRELLA_SLUG
    } else {
        package.strip_prefix(LIBRARY_PREFIX).unwrap_or(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::substitution::Substitute;
    use crate::descriptor::DetailedVersionSpec;

    fn route(
        substitutes: &SubstitutionTable,
        registry: &mut RepositoryRegistry,
        class: DependencyClass,
        name: &str,
        spec: &VersionSpec,
    ) -> Result<Route, ComponentsError> {
        DependencyRouter::new(substitutes, registry).route(class, name, spec)
    }

    fn with_extension(version: Option<&str>, extension: &str) -> VersionSpec {
        VersionSpec::Detailed(DetailedVersionSpec {
            version: version.map(str::to_string),
            providesextension: Some(extension.to_string()),
        })
    }

    #[test]
    fn test_native_library_strips_prefix() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();
        let routed = route(
            &table,
            &mut registry,
            DependencyClass::Pear,
            "pear.horde.org/Horde_Yaml",
            &"2.0.0".into(),
        )
        .unwrap();

        assert_eq!(routed.key, "horde/yaml");
        assert_eq!(routed.constraint, "2.0.0");
        let entry = registry.get("horde/yaml").unwrap();
        assert_eq!(entry.kind, RepositoryKind::Vcs);
        assert_eq!(entry.url, "https://github.com/horde/Yaml");
    }

    #[test]
    fn test_umbrella_package_maps_to_base() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();
        let routed =
            route(&table, &mut registry, DependencyClass::Pear, "pear.horde.org/horde", &"^6".into())
                .unwrap();

        assert_eq!(routed.key, "horde/base");
        assert_eq!(registry.get("horde/base").unwrap().url, "https://github.com/horde/base");
    }

    #[test]
    fn test_native_application_keeps_name() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();
        let routed =
            route(&table, &mut registry, DependencyClass::Pear, "pear.horde.org/imp", &"*".into())
                .unwrap();

        assert_eq!(routed.key, "horde/imp");
        assert_eq!(registry.get("horde/imp").unwrap().url, "https://github.com/horde/imp");
    }

    #[test]
    fn test_extension_channel_registers_nothing() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();
        let routed =
            route(&table, &mut registry, DependencyClass::Pear, "pecl.php.net/json", &"*".into())
                .unwrap();

        assert_eq!(routed.key, "ext-json");
        assert_eq!(routed.constraint, "*");
        assert!(routed.repository.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_foreign_channel_uses_pear_repository() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();
        let routed = route(
            &table,
            &mut registry,
            DependencyClass::Pear,
            "pear.php.net/Net_DNS2",
            &"^1.4".into(),
        )
        .unwrap();

        assert_eq!(routed.key, "pear-pear.php.net/Net_DNS2");
        let entry = registry.get("pear-pear.php.net").unwrap();
        assert_eq!(entry.kind, RepositoryKind::Pear);
        assert_eq!(entry.url, "https://pear.php.net");
    }

    #[test]
    fn test_substitution_wins_over_native_channel() {
        let table = SubstitutionTable::new()
            .with("pear.horde.org/Horde_Yaml", Substitute::packagist("symfony/yaml"));
        let mut registry = RepositoryRegistry::new();
        let routed = route(
            &table,
            &mut registry,
            DependencyClass::Pear,
            "pear.horde.org/Horde_Yaml",
            &"^5".into(),
        )
        .unwrap();

        assert_eq!(routed.key, "symfony/yaml");
        assert_eq!(routed.constraint, "^5");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_substitution_keeps_unwrapped_constraint() {
        let table =
            SubstitutionTable::new().with("pear.php.net/Mail", Substitute::packagist("pear/mail"));
        let mut registry = RepositoryRegistry::new();
        let spec = VersionSpec::Detailed(DetailedVersionSpec {
            version: Some("^1.4".to_string()),
            providesextension: None,
        });
        let routed =
            route(&table, &mut registry, DependencyClass::Pear, "pear.php.net/Mail", &spec).unwrap();
        assert_eq!(routed.constraint, "^1.4");
    }

    #[test]
    fn test_unsupported_substitution_fails_without_side_effects() {
        let table = SubstitutionTable::new().with(
            "pear.php.net/Mail",
            Substitute {
                name: "pear/mail".to_string(),
                source: SubstitutionSource::Unsupported("Github".to_string()),
            },
        );
        let mut registry = RepositoryRegistry::new();
        let err = route(&table, &mut registry, DependencyClass::Pear, "pear.php.net/Mail", &"*".into())
            .unwrap_err();

        assert!(matches!(
            err,
            ComponentsError::UnsupportedSubstitutionSource { ref source_kind, .. } if source_kind == "Github"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_extension_override_beats_every_pear_rule() {
        let table = SubstitutionTable::new()
            .with("pear.horde.org/Horde_Imagick", Substitute::packagist("vendor/imagick"));
        let mut registry = RepositoryRegistry::new();
        let routed = route(
            &table,
            &mut registry,
            DependencyClass::Pear,
            "pear.horde.org/Horde_Imagick",
            &with_extension(None, "imagick"),
        )
        .unwrap();

        assert_eq!(routed.key, "ext-imagick");
        assert_eq!(routed.constraint, "*");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ext_and_php_classes() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();

        let ext = route(&table, &mut registry, DependencyClass::Ext, "gd", &"*".into()).unwrap();
        assert_eq!(ext.key, "ext-gd");

        let php = route(&table, &mut registry, DependencyClass::Php, "php", &"^7.4 || ^8".into())
            .unwrap();
        assert_eq!(php.key, "php");
        assert_eq!(php.constraint, "^7.4 || ^8");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_coordinate() {
        let table = SubstitutionTable::new();
        let mut registry = RepositoryRegistry::new();
        let err = route(&table, &mut registry, DependencyClass::Pear, "Horde_Util", &"*".into())
            .unwrap_err();
        assert!(matches!(err, ComponentsError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_native_slug() {
        assert_eq!(native_slug("horde"), "base");
        assert_eq!(native_slug("Horde_Util"), "Util");
        assert_eq!(native_slug("kronolith"), "kronolith");
    }
}
