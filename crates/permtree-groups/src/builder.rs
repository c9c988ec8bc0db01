//! Fluent builders for groups and static permissions.
//!
//! Builders consume `self` on every `with_*` call and are finished with
//! `build()`. A [`GroupBuilder`] records its permission writes and replays
//! them through the group merge policy in insertion order when built, so the
//! resulting override stacks match a sequence of individual merges.

use crate::group::{Group, chain_from_path, permission_from_path};
use permtree_core::{Error, Result, split_path};
use permtree_nodes::{Argument, Effect, GroupPermission, PermissionNode, StaticPermission};
use serde_json::{Map, Value};

// ============================================================================
// GroupBuilder
// ============================================================================

#[derive(Clone, Debug)]
enum PermissionWrite {
    Influence {
        path: String,
        positive: Effect,
        wildcard: Effect,
    },
    Argument {
        path: String,
        argument: Argument,
    },
}

/// Builder for [`Group`].
#[derive(Clone, Debug)]
pub struct GroupBuilder {
    name: String,
    writes: Vec<PermissionWrite>,
    child_groups: Vec<String>,
}

impl GroupBuilder {
    /// Creates a builder for a group called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            writes: Vec::new(),
            child_groups: Vec::new(),
        }
    }

    /// Name of the group being built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a dot-separated permission whose leaf carries `positive` and
    /// `wildcard`.
    pub fn with_permission(
        mut self,
        path: impl Into<String>,
        positive: Effect,
        wildcard: Effect,
    ) -> Self {
        self.writes.push(PermissionWrite::Influence {
            path: path.into(),
            positive,
            wildcard,
        });
        self
    }

    /// Adds several permissions, each granted without a wildcard.
    pub fn with_permissions<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().fold(self, |builder, path| {
            builder.with_permission(path, Effect::Allow, Effect::Inactive)
        })
    }

    /// Adds an argument on a dot-separated permission. Every node on the
    /// path, the leaf included, is otherwise inactive.
    pub fn with_argument(
        mut self,
        path: impl Into<String>,
        positive: bool,
        value: Map<String, Value>,
    ) -> Self {
        self.writes.push(PermissionWrite::Argument {
            path: path.into(),
            argument: Argument::new(positive, value),
        });
        self
    }

    /// Lists `name` as a child group (no duplicates).
    pub fn with_child_group(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.child_groups.contains(&name) {
            self.child_groups.push(name);
        }
        self
    }

    /// Registers this group as a child of `parent`.
    pub fn add_to_parent(self, parent: &mut Group) -> Self {
        if !parent.has_child_group(&self.name) {
            parent.child_groups.push(self.name.clone());
        }
        self
    }

    /// Registers this group as a child of every group in `parents`.
    pub fn add_to_parents(self, parents: &mut [Group]) -> Self {
        parents
            .iter_mut()
            .fold(self, |builder, parent| builder.add_to_parent(parent))
    }

    /// Builds the group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty or any
    /// recorded permission path is malformed.
    pub fn build(self) -> Result<Group> {
        if self.name.is_empty() {
            return Err(Error::invalid_argument("Group name must not be empty"));
        }

        let mut permissions: Vec<GroupPermission> = Vec::new();
        for write in &self.writes {
            let tree = match write {
                PermissionWrite::Influence {
                    path,
                    positive,
                    wildcard,
                } => permission_from_path(&split_path(path)?, *positive, *wildcard)?,
                PermissionWrite::Argument { path, argument } => chain_from_path(
                    &split_path(path)?,
                    |key| GroupPermission::new(key).with_argument(argument.clone()),
                    |key| GroupPermission::new(key),
                )?,
            };
            permissions.push(tree);
            permissions = GroupPermission::merge_all(permissions);
        }

        log::debug!(
            "Built group '{}' ({} writes, {} roots, {} child groups)",
            self.name,
            self.writes.len(),
            permissions.len(),
            self.child_groups.len()
        );

        Ok(Group {
            name: self.name,
            permissions,
            child_groups: self.child_groups,
        })
    }
}

// ============================================================================
// StaticPermissionBuilder
// ============================================================================

/// Builder for [`StaticPermission`].
#[derive(Clone, Debug, Default)]
pub struct StaticPermissionBuilder {
    permission: StaticPermission,
}

impl StaticPermissionBuilder {
    /// Creates a builder for a parameterless node called `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            permission: StaticPermission::new(key),
        }
    }

    /// Shortcut for a bare node without a builder.
    pub fn from_key(key: impl Into<String>) -> StaticPermission {
        StaticPermission::new(key)
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: StaticPermission) -> Self {
        self.permission.nodes.push(child);
        self
    }

    /// Appends several child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = StaticPermission>) -> Self {
        self.permission.nodes.extend(children);
        self
    }

    /// Declares a required parameter (first occurrence kept).
    pub fn with_required_param(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.permission.required_params, name.into());
        self
    }

    /// Declares several required parameters.
    pub fn with_required_params<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.with_required_param(name))
    }

    /// Declares an optional parameter (first occurrence kept).
    pub fn with_optional_param(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.permission.optional_params, name.into());
        self
    }

    /// Declares several optional parameters.
    pub fn with_optional_params<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.with_optional_param(name))
    }

    /// Appends a snapshot of the node built so far to `parent`'s children.
    ///
    /// Later calls on this builder do not affect the attached copy.
    pub fn attach_to(self, parent: &mut StaticPermission) -> Self {
        parent.nodes.push(self.permission.clone());
        self
    }

    /// Builds the node.
    pub fn build(self) -> StaticPermission {
        log::debug!(
            "Built static permission '{}' ({} children)",
            self.permission.key,
            self.permission.nodes.len()
        );
        self.permission
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

/// Build a single-branch static permission tree from a dot-separated path.
/// The leaf declares `required` and `optional` parameters.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a malformed path.
pub fn static_permission_from_path<R, O>(
    path: &str,
    required: R,
    optional: O,
) -> Result<StaticPermission>
where
    R: IntoIterator,
    R::Item: Into<String>,
    O: IntoIterator,
    O::Item: Into<String>,
{
    let keys = split_path(path)?;
    chain_from_path(
        &keys,
        |key| {
            StaticPermissionBuilder::new(key)
                .with_required_params(required)
                .with_optional_params(optional)
                .build()
        },
        |key| StaticPermission::new(key),
    )
}
