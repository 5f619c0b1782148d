use assert_cmd::Command;
use components_cli::test_utils::ComponentFixture;
use predicates::prelude::*;

fn components(component: &ComponentFixture) -> Command {
    let mut cmd = Command::cargo_bin("components").unwrap();
    cmd.arg("--path")
        .arg(component.path())
        .arg("--config")
        .arg(component.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_composer_command_writes_manifest() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();
    component
        .write(
            "config.toml",
            "[composer.pear-substitutes.\"pear.php.net/Net_DNS2\"]\nname = \"pear/net_dns2\"\nsource = \"Packagist\"\n",
        )
        .unwrap();

    components(&component)
        .args(["composer", "--date", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created composer.json file."));

    let json = component.read("composer.json").unwrap();
    assert!(json.contains(r#""pear/net_dns2": "^1.4""#));
    assert!(json.contains(r#""time": "2024-01-02""#));
    assert!(json.contains("https://github.com/horde/Exception"));
    assert!(!json.contains("pear-pear.php.net"));
}

#[test]
fn test_composer_command_is_repeatable() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();

    components(&component).args(["composer", "--date", "2024-01-02"]).assert().success();
    let first = component.read("composer.json").unwrap();
    components(&component).args(["composer", "--date", "2024-01-02"]).assert().success();
    assert_eq!(component.read("composer.json").unwrap(), first);
}

#[test]
fn test_composer_command_unsupported_source_fails() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();
    component
        .write(
            "config.toml",
            "[composer.pear-substitutes.\"pear.php.net/Net_DNS2\"]\nname = \"pear/net_dns2\"\nsource = \"Github\"\n",
        )
        .unwrap();

    components(&component)
        .arg("composer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Github"));

    assert!(!component.path().join("composer.json").exists());
}

#[test]
fn test_composer_command_without_descriptor() {
    let component = ComponentFixture::new().unwrap();

    components(&component)
        .arg("composer")
        .assert()
        .failure()
        .stderr(predicate::str::contains(".horde.yml"));
}

#[test]
fn test_changed_command_updates_both_logs() {
    let component = ComponentFixture::new()
        .unwrap()
        .with_descriptor(ComponentFixture::LIBRARY)
        .unwrap()
        .with_changelogs()
        .unwrap();

    components(&component)
        .args(["changed", "[jan] Support PHP 8.3."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added new note to version 3.0.0-git"))
        .stdout(predicate::str::contains("Updated"));

    assert!(component.read("doc/changelog.yml").unwrap().contains("[jan] Support PHP 8.3."));
    assert!(component.read("doc/CHANGES").unwrap().contains("\n[jan] Support PHP 8.3.\n"));
}

#[test]
fn test_update_changes_pretend() {
    let component = ComponentFixture::new()
        .unwrap()
        .with_descriptor(ComponentFixture::LIBRARY)
        .unwrap()
        .with_changelogs()
        .unwrap();

    components(&component)
        .args(["update-changes", "--pretend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update"));

    assert_eq!(component.read("doc/CHANGES").unwrap(), ComponentFixture::CHANGES);
}

#[test]
fn test_quiet_suppresses_status() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();

    components(&component)
        .args(["--quiet", "composer"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
