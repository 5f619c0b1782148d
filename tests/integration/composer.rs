use chrono::NaiveDate;
use components_cli::composer::{
    BuildOptions, ComposerHelper, ComposerManifest, ManifestBuilder, RepositoryKind, Substitute,
    SubstitutionSource, SubstitutionTable,
};
use components_cli::core::{ComponentsError, RecordingOutput};
use components_cli::descriptor::PackageDescriptor;
use components_cli::test_utils::{ComponentFixture, init_test_logging};
use std::sync::Arc;

fn options(substitutes: SubstitutionTable) -> BuildOptions {
    BuildOptions::new(substitutes, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
}

fn library() -> PackageDescriptor {
    PackageDescriptor::from_yaml(ComponentFixture::LIBRARY, ".horde.yml").unwrap()
}

fn build(substitutes: SubstitutionTable) -> ComposerManifest {
    ManifestBuilder::new(options(substitutes)).build(&library()).unwrap()
}

#[test]
fn test_identical_inputs_give_identical_bytes() {
    init_test_logging(None);
    let substitutes =
        SubstitutionTable::new().with("pear.php.net/Net_DNS2", Substitute::packagist("pear/net_dns2"));

    let first = build(substitutes.clone()).to_json().unwrap();
    let second = build(substitutes).to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_library_routing() {
    let manifest = build(SubstitutionTable::new());

    assert_eq!(manifest.name, "horde/util");
    assert_eq!(manifest.version, "3.0.0");
    assert_eq!(manifest.package_type.as_deref(), Some("horde-library"));
    assert_eq!(manifest.time, "2024-01-02");

    assert_eq!(manifest.required("horde/horde-installer-plugin"), Some("*"));
    assert_eq!(manifest.required("php"), Some("^7.4 || ^8"));
    assert_eq!(manifest.required("horde/exception"), Some("^3"));
    assert_eq!(manifest.required("horde/base"), Some("^6"));
    assert_eq!(manifest.required("pear-pear.php.net/Net_DNS2"), Some("^1.4"));
    assert_eq!(manifest.required("ext-json"), Some("*"));
    assert_eq!(manifest.require.as_ref().map(|r| r.len()), Some(6));

    assert_eq!(manifest.suggested("ext-intl"), Some("*"));
    assert_eq!(manifest.suggested("ext-imap"), Some("^3"));
    assert_eq!(manifest.suggest.len(), 2);
}

#[test]
fn test_registry_has_one_entry_per_repository() {
    let manifest = build(SubstitutionTable::new());
    let repositories: Vec<_> = manifest
        .repositories
        .iter()
        .map(|entry| (entry.key.as_str(), entry.kind, entry.url.as_str()))
        .collect();

    assert_eq!(
        repositories,
        vec![
            ("horde/base", RepositoryKind::Vcs, "https://github.com/horde/base"),
            ("horde/exception", RepositoryKind::Vcs, "https://github.com/horde/Exception"),
            ("pear-pear.php.net", RepositoryKind::Pear, "https://pear.php.net"),
        ]
    );
}

#[test]
fn test_substitution_replaces_pear_route() {
    let substitutes =
        SubstitutionTable::new().with("pear.php.net/Net_DNS2", Substitute::packagist("pear/net_dns2"));
    let manifest = build(substitutes);

    assert_eq!(manifest.required("pear/net_dns2"), Some("^1.4"));
    assert_eq!(manifest.required("pear-pear.php.net/Net_DNS2"), None);
    assert!(manifest.repositories.iter().all(|entry| entry.key != "pear-pear.php.net"));
}

#[test]
fn test_substitution_wins_over_native_vendor() {
    let substitutes = SubstitutionTable::new()
        .with("pear.horde.org/Horde_Exception", Substitute::packagist("acme/exception"));
    let manifest = build(substitutes);

    assert_eq!(manifest.required("acme/exception"), Some("^3"));
    assert_eq!(manifest.required("horde/exception"), None);
    assert!(manifest.repositories.iter().all(|entry| entry.key != "horde/exception"));
}

#[test]
fn test_application_document_layout() {
    let descriptor = PackageDescriptor::from_yaml(ComponentFixture::APPLICATION, ".horde.yml").unwrap();
    let json = ManifestBuilder::new(options(SubstitutionTable::new()))
        .build(&descriptor)
        .unwrap()
        .to_json()
        .unwrap();

    let expected = r#"{
  "name": "horde/imp",
  "description": "Webmail application",
  "type": "horde-application",
  "homepage": "https://www.horde.org",
  "license": "GPL-2.0-only",
  "authors": [],
  "version": "7.0.0",
  "time": "2024-01-02",
  "repositories": [],
  "suggest": {},
  "autoload": {
    "psr-0": {
      "imp": "lib/"
    }
  }
}
"#;
    assert_eq!(json, expected);
}

#[test]
fn test_helper_writes_composer_json() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();
    let output = Arc::new(RecordingOutput::new());

    let path = ComposerHelper::new(output.clone())
        .generate(&component.path().join(".horde.yml"), &options(SubstitutionTable::new()))
        .unwrap();

    assert_eq!(path, component.path().join("composer.json"));
    let written: ComposerManifest = serde_json::from_str(&component.read("composer.json").unwrap()).unwrap();
    assert_eq!(written.required("horde/exception"), Some("^3"));
    assert_eq!(output.messages(), vec!["Created composer.json file."]);
}

#[test]
fn test_unsupported_source_writes_nothing() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();
    let output = Arc::new(RecordingOutput::new());
    let substitutes = SubstitutionTable::new().with(
        "pear.php.net/Net_DNS2",
        Substitute {
            name: "pear/net_dns2".to_string(),
            source: SubstitutionSource::Unsupported("Github".to_string()),
        },
    );

    let err = ComposerHelper::new(output.clone())
        .generate(&component.path().join(".horde.yml"), &options(substitutes))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ComponentsError>(),
        Some(ComponentsError::UnsupportedSubstitutionSource { .. })
    ));
    assert!(!component.path().join("composer.json").exists());
    assert!(output.messages().is_empty());
}

#[test]
fn test_incomplete_descriptor_is_rejected() {
    let component = ComponentFixture::new()
        .unwrap()
        .with_descriptor("name: Util\nversion:\n  api: 1.0.0\n")
        .unwrap();

    let err = ComposerHelper::new(Arc::new(RecordingOutput::new()))
        .generate(&component.path().join(".horde.yml"), &options(SubstitutionTable::new()))
        .unwrap_err();

    match err.downcast_ref::<ComponentsError>() {
        Some(ComponentsError::IncompleteDescriptor { missing }) => {
            assert_eq!(missing, &vec!["version.release".to_string(), "license.identifier".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!component.path().join("composer.json").exists());
}
