use components_cli::changelog::ChangeLogHelper;
use components_cli::core::{ComponentsError, RecordingOutput};
use components_cli::test_utils::ComponentFixture;
use std::sync::Arc;

fn component() -> ComponentFixture {
    ComponentFixture::new()
        .unwrap()
        .with_descriptor(ComponentFixture::LIBRARY)
        .unwrap()
        .with_changelogs()
        .unwrap()
}

#[test]
fn test_entry_flows_from_changelog_yml_into_changes() {
    let component = component();
    let output = Arc::new(RecordingOutput::new());
    let helper = ChangeLogHelper::new(output.clone(), component.path());

    helper.changelog_yml("[jan] Fix PHP 8.2 deprecations.", false).unwrap();
    helper.update_changes(false).unwrap();

    let changes = component.read("doc/CHANGES").unwrap();
    let expected = "----------\nv3.0.0-git\n----------\n\
                    \n[jan] Fix PHP 8.2 deprecations.\
                    \n[jan] Add Horde_Util::uriB64Encode().\n\
                    \n\n------\nv2.5.0\n------\n\
                    \n[mms] Remove PHP 5.3 support.\n";
    assert_eq!(changes, expected);
    assert_eq!(output.messages().len(), 2);
}

#[test]
fn test_pretend_leaves_files_untouched() {
    let component = component();
    let output = Arc::new(RecordingOutput::new());
    let helper = ChangeLogHelper::new(output.clone(), component.path());

    helper.changelog_yml("[jan] Entry.", true).unwrap();
    helper.changes("[jan] Entry.", true).unwrap();
    helper.update_changes(true).unwrap();

    assert_eq!(component.read("doc/changelog.yml").unwrap(), ComponentFixture::CHANGELOG);
    assert_eq!(component.read("doc/CHANGES").unwrap(), ComponentFixture::CHANGES);
    assert_eq!(output.messages().len(), 3);
}

#[test]
fn test_missing_descriptor() {
    let component = ComponentFixture::new().unwrap().with_changelogs().unwrap();
    let helper = ChangeLogHelper::new(Arc::new(RecordingOutput::new()), component.path());

    let err = helper.changelog_yml("[jan] Entry.", false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ComponentsError>(),
        Some(ComponentsError::DescriptorNotFound { .. })
    ));
}

#[test]
fn test_component_without_change_logs() {
    let component = ComponentFixture::new().unwrap().with_descriptor(ComponentFixture::LIBRARY).unwrap();
    let helper = ChangeLogHelper::new(Arc::new(RecordingOutput::new()), component.path());

    assert!(helper.changelog_yml("[jan] Entry.", false).unwrap().is_none());
    assert!(helper.changes("[jan] Entry.", false).unwrap().is_none());
    assert!(helper.update_changes(false).unwrap().is_none());
}
