//! Integration tests for group hierarchies held in stores.

use std::collections::VecDeque;

use permtree_groups::{Group, GroupBuilder, GroupStore, SubjectAbilities};
use permtree_nodes::{Effect, InfluenceOverride, resolved_wildcard};

use crate::common::{document_groups, document_statics, group};

/// The named group followed by all groups reachable through child links,
/// breadth first, each visited once.
fn reachable<'a>(store: &'a GroupStore, name: &str) -> Vec<&'a Group> {
    let mut result: Vec<&Group> = Vec::new();
    let mut queue = VecDeque::from([name.to_string()]);
    while let Some(current) = queue.pop_front() {
        if result.iter().any(|g| g.name == current) {
            continue;
        }
        if let Some(group) = store.get_group(&current) {
            queue.extend(group.child_groups.iter().cloned());
            result.push(group);
        }
    }
    result
}

#[test]
fn test_store_keeps_insertion_order_for_unique_groups() {
    let store = document_groups();
    let names: Vec<&str> = store.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["viewers", "editors", "admins"]);
}

#[test]
fn test_parent_links() {
    let store = document_groups();
    let viewers = store.get_group("viewers").unwrap();
    let parents: Vec<&str> = store
        .parent_groups(viewers)
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(parents, vec!["editors"]);

    let admins = store.get_group("admins").unwrap();
    assert!(store.parent_groups(admins).is_empty());
}

#[test]
fn test_effective_paths_through_hierarchy() {
    let store = document_groups();
    let paths: Vec<String> = reachable(&store, "admins")
        .iter()
        .flat_map(|g| g.available_paths())
        .collect();

    assert_eq!(
        paths,
        vec![
            " docs.*",
            "-docs.purge",
            " docs.write",
            " docs.read",
            " docs.list",
        ]
    );
}

#[test]
fn test_wildcard_arrives_as_override() {
    let store = document_groups();
    let admins = store.get_group("admins").unwrap();
    let docs = &admins.permissions[0];

    assert_eq!(docs.wildcard, Effect::Inactive);
    assert_eq!(docs.overrides, vec![InfluenceOverride::wildcard(Effect::Allow)]);
    assert_eq!(resolved_wildcard(docs), Effect::Allow);

    // Active-node search only looks at raw influence.
    assert!(store.active_permission("admins", "docs").unwrap().is_none());
    assert!(store.active_permission("admins", "docs.purge").unwrap().is_some());
}

#[test]
fn test_later_ancestor_chain_resets_wildcard() {
    let admins = GroupBuilder::new("admins")
        .with_permission("docs", Effect::Inactive, Effect::Allow)
        .with_permission("docs.purge", Effect::Deny, Effect::Inactive)
        .build()
        .unwrap();

    let docs = &admins.permissions[0];
    assert_eq!(docs.wildcard, Effect::Allow);
    assert_eq!(resolved_wildcard(docs), Effect::Inactive);
    assert_eq!(
        admins.available_paths(),
        vec![" docs.*", "!docs.*", "-docs.purge"]
    );
}

#[test]
fn test_redefining_a_group_merges_into_store() {
    let mut store = document_groups();
    store.add_groups([
        group("viewers", &[], &["docs.search"]),
        GroupBuilder::new("guests").build().unwrap(),
    ]);

    assert_eq!(store.count_groups(), 4);
    let names: Vec<&str> = store.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["viewers", "editors", "admins", "guests"]);

    let viewers = store.get_group("viewers").unwrap();
    assert_eq!(
        viewers.available_paths(),
        vec![" docs.read", " docs.list", " docs.search"]
    );
}

#[test]
fn test_cyclic_child_links_visit_each_group_once() {
    let mut store = GroupStore::new();
    store.add_groups([
        group("a", &["b"], &["x"]),
        group("b", &["c", "a"], &["y"]),
        group("c", &["a"], &["z"]),
    ]);
    let names: Vec<&str> = reachable(&store, "a")
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_subject_combines_groups_and_direct_grants() {
    let store = document_groups();
    let mut subject = SubjectAbilities::new();
    subject.add_group("editors");
    subject
        .add_permission("docs.purge", Effect::Allow, Effect::Inactive)
        .unwrap();

    let mut paths: Vec<String> = subject
        .groups
        .iter()
        .flat_map(|name| reachable(&store, name))
        .flat_map(|g| g.available_paths())
        .collect();
    paths.extend(subject.available_paths());

    assert_eq!(
        paths,
        vec![" docs.write", " docs.read", " docs.list", " docs.purge"]
    );
}

#[test]
fn test_static_lookup_for_granted_paths() {
    let store = document_groups();
    let statics = document_statics();

    for group in store.groups() {
        for path in group.available_paths() {
            let path = path.trim_start_matches([' ', '-', '!']);
            let path = path.strip_suffix(".*").unwrap_or(path);
            let lookup = statics.get_nested_permission_or_valid_path(path).unwrap();
            assert!(
                lookup.found().is_some() || lookup.valid_path() == Some("docs"),
                "unexpected lookup result for {path}: {lookup:?}"
            );
        }
    }
}
