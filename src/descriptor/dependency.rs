//! Dependency declarations as written in `.horde.yml`.
//!
//! A dependency block maps a dependency class to its declarations:
//!
//! ```yaml
//! dependencies:
//!   required:
//!     php: ^7.4
//!     pear:
//!       pear.horde.org/Horde_Util: ^3
//!       pecl.php.net/imagick:
//!         version: '*'
//!         providesextension: imagick
//!     ext:
//!       json: '*'
//! ```
//!
//! Unknown classes are ignored. Declarations keep the order they are
//! written in, across classes as well as within one class.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Registry class of a dependency declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyClass {
    /// `<channel>/<package>` coordinate in a PEAR registry.
    Pear,
    /// The PHP runtime itself.
    Php,
    /// A PHP extension, keyed by its extension name.
    Ext,
}

impl std::fmt::Display for DependencyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pear => write!(f, "pear"),
            Self::Php => write!(f, "php"),
            Self::Ext => write!(f, "ext"),
        }
    }
}

/// Version requirement attached to a declaration.
///
/// Either a bare constraint (`"^3"`) or a detailed object that may also name
/// the PHP extension the package provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionSpec {
    Constraint(String),
    Detailed(DetailedVersionSpec),
}

/// Object form of a [`VersionSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedVersionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Name of the PHP extension this package provides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providesextension: Option<String>,
}

impl VersionSpec {
    /// The constraint to write into the manifest, `*` when the object form
    /// leaves it out.
    #[must_use]
    pub fn constraint(&self) -> &str {
        match self {
            Self::Constraint(constraint) => constraint,
            Self::Detailed(detailed) => {
                detailed.version.as_deref().filter(|v| !v.is_empty()).unwrap_or("*")
            }
        }
    }

    /// The extension override, if one is set and non-empty.
    #[must_use]
    pub fn extension_override(&self) -> Option<&str> {
        match self {
            Self::Constraint(_) => None,
            Self::Detailed(detailed) => {
                detailed.providesextension.as_deref().filter(|ext| !ext.is_empty())
            }
        }
    }
}

impl From<&str> for VersionSpec {
    fn from(constraint: &str) -> Self {
        Self::Constraint(constraint.to_string())
    }
}

/// One declaration ready for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub class: DependencyClass,
    /// Coordinate for `pear`, extension name for `ext`, `php` for the runtime.
    pub name: String,
    pub spec: VersionSpec,
}

/// Declarations of one dependency block (`required` or `optional`), in the
/// order they are written.
///
/// Routing follows this order, so when two declarations map to the same
/// manifest key the one written later wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Mapping")]
pub struct DependencyBlock {
    declarations: Vec<Declaration>,
}

impl DependencyBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn push(&mut self, class: DependencyClass, name: impl Into<String>, spec: impl Into<VersionSpec>) {
        self.declarations.push(Declaration {
            class,
            name: name.into(),
            spec: spec.into(),
        });
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, class: DependencyClass, name: impl Into<String>, spec: impl Into<VersionSpec>) -> Self {
        self.push(class, name, spec);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// All declarations in written order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// The last spec declared for `name` in `class`.
    #[must_use]
    pub fn get(&self, class: DependencyClass, name: &str) -> Option<&VersionSpec> {
        self.declarations.iter().rev().find(|d| d.class == class && d.name == name).map(|d| &d.spec)
    }

    /// The PHP constraint, if declared.
    #[must_use]
    pub fn php(&self) -> Option<&str> {
        self.get(DependencyClass::Php, "php").map(VersionSpec::constraint)
    }
}

/// YAML scalars used as names or constraints may be parsed as numbers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl TryFrom<Mapping> for DependencyBlock {
    type Error = String;

    fn try_from(mapping: Mapping) -> Result<Self, Self::Error> {
        let mut block = Self::new();

        for (class, value) in mapping {
            let class = match class.as_str() {
                Some("pear") => DependencyClass::Pear,
                Some("ext") => DependencyClass::Ext,
                Some("php") => {
                    let constraint =
                        scalar_text(&value).ok_or("'php' must be a version constraint")?;
                    block.push(DependencyClass::Php, "php", VersionSpec::Constraint(constraint));
                    continue;
                }
                _ => continue,
            };

            let entries = match value {
                Value::Null => continue,
                Value::Mapping(entries) => entries,
                _ => return Err(format!("'{class}' dependencies must be a mapping")),
            };

            for (name, spec) in entries {
                let name = scalar_text(&name).ok_or_else(|| format!("invalid '{class}' dependency name"))?;
                let spec = match spec {
                    Value::Null => VersionSpec::from("*"),
                    Value::Number(n) => VersionSpec::Constraint(n.to_string()),
                    other => serde_yaml::from_value(other)
                        .map_err(|e| format!("invalid version for '{name}': {e}"))?,
                };
                block.push(class, name, spec);
            }
        }

        Ok(block)
    }
}

/// The `dependencies` section of a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Dependencies {
    #[serde(default)]
    pub required: DependencyBlock,

    #[serde(default)]
    pub optional: DependencyBlock,
}
