//! Round trips: dot-path strings in, variant strings out, and serde.

use permtree_groups::{
    Group, GroupBuilder, SubjectAbilities, permission_from_path, static_permission_from_path,
};
use permtree_nodes::{Effect, PermissionNode, StaticPermission};

use crate::common::document_groups;

#[test]
fn test_single_grant_renders_its_path() {
    for (positive, sign) in [(Effect::Allow, " "), (Effect::Deny, "-")] {
        let group = GroupBuilder::new("g")
            .with_permission("files.read.own", positive, Effect::Inactive)
            .build()
            .unwrap();
        assert_eq!(group.available_paths(), vec![format!("{sign}files.read.own")]);
    }
}

#[test]
fn test_single_wildcard_renders_its_path() {
    let group = GroupBuilder::new("g")
        .with_permission("files", Effect::Deny, Effect::Allow)
        .build()
        .unwrap();
    assert_eq!(group.available_paths(), vec!["-files", " files.*"]);
}

#[test]
fn test_permission_from_path_matches_builder() {
    let direct = permission_from_path(&["a", "b", "c"], Effect::Allow, Effect::Deny).unwrap();
    let built = GroupBuilder::new("g")
        .with_permission("a.b.c", Effect::Allow, Effect::Deny)
        .build()
        .unwrap();
    assert_eq!(built.permissions, vec![direct]);
}

#[test]
fn test_builder_collapses_shared_roots() {
    let built = GroupBuilder::new("g")
        .with_permission("files.read", Effect::Allow, Effect::Inactive)
        .with_permission("files.write", Effect::Deny, Effect::Inactive)
        .with_permission("audit", Effect::Allow, Effect::Inactive)
        .build()
        .unwrap();
    let roots: Vec<&str> = built.permissions.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(roots, vec!["files", "audit"]);
    assert_eq!(
        built.available_paths(),
        vec![" files.read", "-files.write", " audit"]
    );
}

#[test]
fn test_static_path_renders_params() {
    let tree = static_permission_from_path("docs.get", ["id"], ["format"]).unwrap();
    let leaf: &StaticPermission = &tree.nodes[0];
    assert_eq!(
        StaticPermission::variants("get", leaf),
        vec!["get.<id>.[format]"]
    );
}

#[test]
fn test_groups_survive_json() {
    let store = document_groups();
    let json = serde_json::to_string(store.groups()).unwrap();
    let back: Vec<Group> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, store.groups());

    let paths: Vec<String> = back.iter().flat_map(Group::available_paths).collect();
    let expected: Vec<String> = store
        .groups()
        .iter()
        .flat_map(Group::available_paths)
        .collect();
    assert_eq!(paths, expected);
}

#[test]
fn test_absent_and_inactive_overrides_stay_distinct() {
    let group = GroupBuilder::new("g")
        .with_permission("docs", Effect::Inactive, Effect::Allow)
        .with_permission("docs.purge", Effect::Deny, Effect::Inactive)
        .build()
        .unwrap();

    let json = serde_json::to_value(&group).unwrap();
    let overrides = &json["permissions"][0]["overrides"];
    assert_eq!(overrides, &serde_json::json!([{ "wildcard": "inactive" }]));

    let back: Group = serde_json::from_value(json).unwrap();
    assert_eq!(back.permissions[0].available_paths(), group.permissions[0].available_paths());
}

#[test]
fn test_subject_abilities_survive_json() {
    let mut subject = SubjectAbilities::new();
    subject.add_group("editors");
    subject
        .add_permission("docs.read", Effect::Allow, Effect::Inactive)
        .unwrap();

    let json = serde_json::to_string(&subject).unwrap();
    let back: SubjectAbilities = serde_json::from_str(&json).unwrap();
    assert_eq!(back, subject);
    assert_eq!(back.available_paths(), vec![" docs.read"]);
}
