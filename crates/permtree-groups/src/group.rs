//! Groups: named bundles of group permission trees.
//!
//! A group may list other groups as children. Two groups with the same
//! name are merged: the child-group names are unioned and the permission
//! trees go through the node merge engine.

use permtree_core::{Error, Result, merge_partitioned};
use permtree_nodes::{Effect, GroupPermission, Node, PermissionNode, find_active_node};
use serde::{Deserialize, Serialize};

/// A named group of permissions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name, the merge key.
    pub name: String,
    /// Root permission nodes.
    #[serde(default)]
    pub permissions: Vec<GroupPermission>,
    /// Names of child groups.
    #[serde(default)]
    pub child_groups: Vec<String>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if `name` is listed as a child group.
    pub fn has_child_group(&self, name: &str) -> bool {
        self.child_groups.iter().any(|child| child == name)
    }

    /// Every permission-path string of this group, root by root.
    pub fn available_paths(&self) -> Vec<String> {
        self.permissions
            .iter()
            .flat_map(PermissionNode::available_paths)
            .collect()
    }

    /// The node with influence on a dot-separated path, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `path` is empty or has an empty
    /// segment.
    pub fn active_permission(&self, path: &str) -> Result<Option<&GroupPermission>> {
        let keys = permtree_core::split_path(path)?;
        find_active_node(&keys, &self.permissions)
    }
}

/// Merge a list of groups, collapsing groups sharing a name.
///
/// Same ordering as the node merge: merged names first, then names that
/// occurred once.
pub fn merge_groups(groups: impl IntoIterator<Item = Group>) -> Vec<Group> {
    merge_partitioned(groups, |group| group.name.clone(), merge_two_groups)
}

/// Merge two groups.
///
/// The result takes `second`'s name. Child-group names are unioned in order
/// of first appearance; permissions are merged `first` then `second`.
pub fn merge_two_groups(first: Group, second: Group) -> Group {
    let mut child_groups: Vec<String> = Vec::new();
    for child in first.child_groups.into_iter().chain(second.child_groups) {
        if !child_groups.contains(&child) {
            child_groups.push(child);
        }
    }

    let permissions = GroupPermission::merge_all(
        first
            .permissions
            .into_iter()
            .chain(second.permissions)
            .collect(),
    );

    Group {
        name: second.name,
        permissions,
        child_groups,
    }
}

/// Build a single-branch permission tree from a key path.
///
/// Every ancestor is inactive; the leaf carries `positive` and `wildcard`.
/// A one-segment path yields a root carrying the influence.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` is empty or contains an
/// empty key.
pub fn permission_from_path<S: AsRef<str>>(
    path: &[S],
    positive: Effect,
    wildcard: Effect,
) -> Result<GroupPermission> {
    chain_from_path(
        path,
        |key| {
            GroupPermission::new(key)
                .with_positive(positive)
                .with_wildcard(wildcard)
        },
        |key| GroupPermission::new(key),
    )
}

/// Build a single-branch tree: `leaf` creates the last node, `ancestor`
/// every node above it.
pub(crate) fn chain_from_path<T, S>(
    path: &[S],
    leaf: impl FnOnce(&str) -> T,
    ancestor: impl Fn(&str) -> T,
) -> Result<T>
where
    T: Node,
    S: AsRef<str>,
{
    let (last, ancestors) = path
        .split_last()
        .ok_or_else(|| Error::invalid_argument("Path should contain at least 1 fragment"))?;
    if path.iter().any(|key| key.as_ref().is_empty()) {
        return Err(Error::invalid_argument(format!(
            "Path '{}' contains an empty fragment",
            path.iter().map(|key| key.as_ref()).collect::<Vec<_>>().join(".")
        )));
    }

    let mut node = leaf(last.as_ref());
    for key in ancestors.iter().rev() {
        let mut parent = ancestor(key.as_ref());
        parent.nodes_mut().push(node);
        node = parent;
    }
    Ok(node)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use permtree_nodes::{InfluenceOverride, resolved_positive};

    fn group_with(name: &str, path: &[&str], positive: Effect) -> Group {
        Group {
            name: name.to_string(),
            permissions: vec![permission_from_path(path, positive, Effect::Inactive).unwrap()],
            child_groups: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // permission_from_path
    // -------------------------------------------------------------------------

    #[test]
    fn test_permission_from_path_builds_chain() {
        let node = permission_from_path(&["files", "read"], Effect::Allow, Effect::Deny).unwrap();
        assert_eq!(node.key, "files");
        assert_eq!(node.positive, Effect::Inactive);
        assert_eq!(node.nodes.len(), 1);

        let leaf = &node.nodes[0];
        assert_eq!(leaf.key, "read");
        assert_eq!(leaf.positive, Effect::Allow);
        assert_eq!(leaf.wildcard, Effect::Deny);
        assert!(leaf.nodes.is_empty());
    }

    #[test]
    fn test_permission_from_path_single_segment() {
        let node = permission_from_path(&["files"], Effect::Allow, Effect::Inactive).unwrap();
        assert_eq!(node.positive, Effect::Allow);
        assert!(node.nodes.is_empty());
    }

    #[test]
    fn test_permission_from_path_empty() {
        let err = permission_from_path::<&str>(&[], Effect::Allow, Effect::Inactive).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_permission_from_path_empty_key() {
        let err =
            permission_from_path(&["files", ""], Effect::Allow, Effect::Inactive).unwrap_err();
        assert!(err.to_string().contains("files."));
    }

    // -------------------------------------------------------------------------
    // Merging
    // -------------------------------------------------------------------------

    #[test]
    fn test_merge_two_groups_unions_children() {
        let mut first = Group::new("staff");
        first.child_groups = vec!["a".into(), "b".into()];
        let mut second = Group::new("staff");
        second.child_groups = vec!["b".into(), "c".into()];

        let merged = merge_two_groups(first, second);
        assert_eq!(merged.name, "staff");
        assert_eq!(merged.child_groups, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_two_groups_merges_permissions() {
        let merged = merge_two_groups(
            group_with("staff", &["files", "read"], Effect::Allow),
            group_with("staff", &["files", "read"], Effect::Deny),
        );
        assert_eq!(merged.permissions.len(), 1);

        let read = &merged.permissions[0].nodes[0];
        assert_eq!(read.overrides, vec![InfluenceOverride::positive(Effect::Deny)]);
        assert_eq!(resolved_positive(read), Effect::Deny);
    }

    #[test]
    fn test_merge_groups_ordering() {
        let merged = merge_groups(vec![
            Group::new("guests"),
            Group::new("staff"),
            Group::new("staff"),
            Group::new("admins"),
        ]);
        let names: Vec<&str> = merged.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["staff", "guests", "admins"]);
    }

    #[test]
    fn test_merge_groups_empty() {
        assert!(merge_groups(Vec::new()).is_empty());
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[test]
    fn test_group_available_paths() {
        let mut group = group_with("staff", &["files", "read"], Effect::Allow);
        group
            .permissions
            .push(permission_from_path(&["users"], Effect::Deny, Effect::Inactive).unwrap());
        assert_eq!(group.available_paths(), vec![" files.read", "-users"]);
    }

    #[test]
    fn test_group_active_permission() {
        let group = group_with("staff", &["files", "read"], Effect::Allow);
        let node = group.active_permission("files.read").unwrap().unwrap();
        assert_eq!(node.key, "read");
        assert!(group.active_permission("files").unwrap().is_none());
        assert!(group.active_permission("").is_err());
    }

    #[test]
    fn test_group_serde_defaults() {
        let group: Group = serde_json::from_str(r#"{ "name": "staff" }"#).unwrap();
        assert_eq!(group, Group::new("staff"));
    }
}
