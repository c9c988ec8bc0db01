//! # permtree-nodes
//!
//! Generic algorithms over ordered trees of keyed nodes, and the three
//! permission node variants built on them:
//!
//! - [`node`]: the [`Node`] shape, key/path lookups and sorting
//! - [`merge`]: the merge engine and the per-variant combine policies
//! - [`influence`]: tri-state influence, override stacks and resolution
//! - [`variants`]: depth-first enumeration of permission-path strings
//! - [`permission`]: [`GroupPermission`], [`SubjectPermission`] and
//!   [`StaticPermission`]
//!
//! Every algorithm here is pure: operands are read, new trees are returned.
//! The only in-place operations are [`sort_nodes`] and [`sort_node`].

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod influence;
pub mod merge;
pub mod node;
pub mod permission;
pub mod variants;

mod proptests;

pub use influence::{
    Effect, InfluenceNode, InfluenceOverride, compute_override, find_active_node,
    resolved_positive, resolved_wildcard, sign,
};
pub use merge::{merge_influence_fields, merge_nodes, merge_static_fields, merge_two_nodes};
pub use node::{
    NestedLookup, Node, find_nested_node, find_nested_node_or_valid_path, find_node_by_key,
    includes_nested_node, includes_node_by_key, sort_node, sort_nodes,
};
pub use permission::{
    Argument, GroupPermission, PermissionNode, StaticPermission, SubjectPermission,
};
pub use variants::{form_available_paths, influence_variants, static_variants};

pub use permtree_core::{Error, Result};
