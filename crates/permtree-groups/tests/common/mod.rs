//! Common fixtures for the groups integration tests.

use permtree_groups::{
    Group, GroupBuilder, GroupStore, StaticPermissionStore, static_permission_from_path,
};
use permtree_nodes::Effect;

/// Builds a group from plain grants and child names.
pub fn group(name: &str, children: &[&str], grants: &[&str]) -> Group {
    children
        .iter()
        .fold(GroupBuilder::new(name), |builder, child| {
            builder.with_child_group(*child)
        })
        .with_permissions(grants.iter().copied())
        .build()
        .expect("fixture group should build")
}

/// A small document-management hierarchy:
/// `admins` > `editors` > `viewers`.
pub fn document_groups() -> GroupStore {
    let mut store = GroupStore::new();
    store.add_groups([
        group("viewers", &[], &["docs.read", "docs.list"]),
        group("editors", &["viewers"], &["docs.write"]),
        GroupBuilder::new("admins")
            .with_child_group("editors")
            .with_permission("docs.purge", Effect::Deny, Effect::Inactive)
            .with_permission("docs", Effect::Inactive, Effect::Allow)
            .build()
            .expect("fixture group should build"),
    ]);
    store
}

/// Static permissions matching [`document_groups`].
pub fn document_statics() -> StaticPermissionStore {
    let mut store = StaticPermissionStore::new();
    store.add_permissions([
        static_permission_from_path("docs.read", ["id"], Vec::<String>::new())
            .expect("fixture path should parse"),
        static_permission_from_path("docs.list", Vec::<String>::new(), ["page", "size"])
            .expect("fixture path should parse"),
        static_permission_from_path("docs.write", ["id"], ["draft"])
            .expect("fixture path should parse"),
    ]);
    store
}
