//! Abilities of a single subject: group memberships plus direct grants.

use crate::group::chain_from_path;
use permtree_core::{Result, split_path};
use permtree_nodes::{Argument, Effect, PermissionNode, SubjectPermission, find_active_node};
use serde::{Deserialize, Serialize};

/// What a subject may do: the groups it belongs to and the permissions
/// granted to it directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAbilities {
    /// Names of the groups the subject belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Directly granted permission trees, kept merged.
    #[serde(default)]
    pub permissions: Vec<SubjectPermission>,
}

impl SubjectAbilities {
    /// Creates abilities with no groups and no permissions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group membership. Returns `false` if already a member.
    pub fn add_group(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.is_member_of(&name) {
            return false;
        }
        self.groups.push(name);
        true
    }

    /// Returns `true` if the subject belongs to `name`.
    pub fn is_member_of(&self, name: &str) -> bool {
        self.groups.iter().any(|group| group == name)
    }

    /// Grants or denies a dot-separated path and re-merges the permissions.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn add_permission(&mut self, path: &str, positive: Effect, wildcard: Effect) -> Result<()> {
        let keys = split_path(path)?;
        self.push_merged(subject_permission_from_path(&keys, positive, wildcard)?);
        Ok(())
    }

    /// Attaches an argument to a dot-separated path and re-merges.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn add_argument(&mut self, path: &str, argument: Argument) -> Result<()> {
        let keys = split_path(path)?;
        let tree = chain_from_path(
            &keys,
            |key| SubjectPermission::new(key).with_argument(argument),
            |key| SubjectPermission::new(key),
        )?;
        self.push_merged(tree);
        Ok(())
    }

    /// The directly granted node with influence on a dot-separated path.
    ///
    /// # Errors
    ///
    /// Returns [`permtree_core::Error::InvalidArgument`] for a malformed path.
    pub fn active_permission(&self, path: &str) -> Result<Option<&SubjectPermission>> {
        let keys = split_path(path)?;
        find_active_node(&keys, &self.permissions)
    }

    /// Every permission-path string granted directly, root by root.
    pub fn available_paths(&self) -> Vec<String> {
        self.permissions
            .iter()
            .flat_map(PermissionNode::available_paths)
            .collect()
    }

    fn push_merged(&mut self, tree: SubjectPermission) {
        let mut permissions = std::mem::take(&mut self.permissions);
        permissions.push(tree);
        self.permissions = SubjectPermission::merge_all(permissions);
    }
}

/// Build a single-branch subject permission tree from a key path.
///
/// # Errors
///
/// Returns [`permtree_core::Error::InvalidArgument`] if `path` is empty or
/// contains an empty key.
pub fn subject_permission_from_path<S: AsRef<str>>(
    path: &[S],
    positive: Effect,
    wildcard: Effect,
) -> Result<SubjectPermission> {
    chain_from_path(
        path,
        |key| {
            SubjectPermission::new(key)
                .with_positive(positive)
                .with_wildcard(wildcard)
        },
        |key| SubjectPermission::new(key),
    )
}
