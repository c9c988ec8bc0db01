//! Single-owner stores that keep their contents merged.
//!
//! Every write merges the stored values with the new ones and replaces the
//! stored list wholesale. Reads borrow from the store.

use crate::group::{Group, merge_groups};
use permtree_core::{Result, split_path};
use permtree_nodes::{
    GroupPermission, NestedLookup, PermissionNode, StaticPermission, find_active_node,
    find_nested_node, find_nested_node_or_valid_path, find_node_by_key, includes_nested_node,
    includes_node_by_key,
};

// ============================================================================
// GroupStore
// ============================================================================

/// Holds a merged list of groups.
#[derive(Clone, Debug, Default)]
pub struct GroupStore {
    groups: Vec<Group>,
}

impl GroupStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a group called `name` is stored.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.iter().any(|group| group.name == name)
    }

    /// Merges `groups` into the store.
    pub fn add_groups(&mut self, groups: impl IntoIterator<Item = Group>) {
        let stored = std::mem::take(&mut self.groups);
        let before = stored.len();
        self.groups = merge_groups(stored.into_iter().chain(groups));
        log::debug!("Group store: {before} -> {} groups", self.groups.len());
    }

    /// The group called `name`, if stored.
    pub fn get_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// All stored groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of stored groups.
    pub fn count_groups(&self) -> usize {
        self.groups.len()
    }

    /// Stored groups that list `child` as a child group.
    pub fn parent_groups(&self, child: &Group) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|group| group.has_child_group(&child.name))
            .collect()
    }

    /// The node with influence on `path` inside the group called `name`.
    ///
    /// Returns `Ok(None)` when the group is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn active_permission(&self, name: &str, path: &str) -> Result<Option<&GroupPermission>> {
        let keys = split_path(path)?;
        match self.get_group(name) {
            Some(group) => find_active_node(&keys, &group.permissions),
            None => Ok(None),
        }
    }
}

// ============================================================================
// StaticPermissionStore
// ============================================================================

/// Holds a merged list of static permission trees.
#[derive(Clone, Debug, Default)]
pub struct StaticPermissionStore {
    permissions: Vec<StaticPermission>,
}

impl StaticPermissionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `permissions` into the store.
    pub fn add_permissions(&mut self, permissions: impl IntoIterator<Item = StaticPermission>) {
        let mut merged = std::mem::take(&mut self.permissions);
        let before = merged.len();
        merged.extend(permissions);
        self.permissions = StaticPermission::merge_all(merged);
        log::debug!(
            "Static permission store: {before} -> {} roots",
            self.permissions.len()
        );
    }

    /// Returns `true` if a root called `key` is stored.
    pub fn has_permission_by_key(&self, key: &str) -> bool {
        includes_node_by_key(key, &self.permissions)
    }

    /// Returns `true` if the dot-separated `path` exists.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn has_nested_permission(&self, path: &str) -> Result<bool> {
        includes_nested_node(&split_path(path)?, &self.permissions)
    }

    /// The root called `key`, if stored.
    pub fn get_permission_by_key(&self, key: &str) -> Option<&StaticPermission> {
        find_node_by_key(key, &self.permissions)
    }

    /// The node at `path`, or the longest valid prefix of it.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn get_nested_permission_or_valid_path(
        &self,
        path: &str,
    ) -> Result<NestedLookup<'_, StaticPermission>> {
        find_nested_node_or_valid_path(&split_path(path)?, &self.permissions)
    }

    /// The node at `path`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn get_nested_permission(&self, path: &str) -> Result<Option<&StaticPermission>> {
        find_nested_node(&split_path(path)?, &self.permissions)
    }

    /// All stored roots.
    pub fn permissions(&self) -> &[StaticPermission] {
        &self.permissions
    }

    /// Number of stored roots.
    pub fn count_permissions(&self) -> usize {
        self.permissions.len()
    }

    /// Every available path of every stored root.
    pub fn available_paths(&self) -> Vec<String> {
        self.permissions
            .iter()
            .flat_map(PermissionNode::available_paths)
            .collect()
    }
}
