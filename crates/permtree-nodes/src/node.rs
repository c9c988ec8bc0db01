//! The node shape and structural lookups.
//!
//! A node is a key plus an ordered list of children. Sibling order is
//! meaningful: it drives traversal order and override precedence.

use permtree_core::{Error, Result};

/// A keyed element of an ordered tree.
///
/// Implementors own their children outright; there are no back references.
pub trait Node: Sized {
    /// Node key, unique among siblings once a merge has completed.
    fn key(&self) -> &str;

    /// Replace the node key.
    fn set_key(&mut self, key: String);

    /// Child nodes in stored order.
    fn nodes(&self) -> &[Self];

    /// Mutable access to the child list.
    fn nodes_mut(&mut self) -> &mut Vec<Self>;
}

/// Outcome of [`find_nested_node_or_valid_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedLookup<'a, T> {
    /// Every key on the path matched.
    Found(&'a T),
    /// The longest dot-joined prefix of the path that exists.
    /// Empty when not even the first key matched.
    ValidPath(String),
}

impl<'a, T> NestedLookup<'a, T> {
    /// The matched node, if the whole path exists.
    pub fn found(&self) -> Option<&'a T> {
        match self {
            NestedLookup::Found(node) => Some(node),
            NestedLookup::ValidPath(_) => None,
        }
    }

    /// The valid prefix, if the path does not fully exist.
    pub fn valid_path(&self) -> Option<&str> {
        match self {
            NestedLookup::Found(_) => None,
            NestedLookup::ValidPath(path) => Some(path),
        }
    }
}

pub(crate) fn empty_path_error() -> Error {
    Error::invalid_argument("Path should contain at least 1 fragment")
}

/// Find a node among `nodes` by key (first match wins).
pub fn find_node_by_key<'a, T: Node>(key: &str, nodes: &'a [T]) -> Option<&'a T> {
    nodes.iter().find(|node| node.key() == key)
}

/// Check if `nodes` contains a node with `key`.
pub fn includes_node_by_key<T: Node>(key: &str, nodes: &[T]) -> bool {
    nodes.iter().any(|node| node.key() == key)
}

/// Find a nested node by key path, or report how far the path is valid.
///
/// The first key is matched against `nodes`, each following key against the
/// children of the previous match.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` is empty.
pub fn find_nested_node_or_valid_path<'a, T, S>(
    path: &[S],
    nodes: &'a [T],
) -> Result<NestedLookup<'a, T>>
where
    T: Node,
    S: AsRef<str>,
{
    let (first, rest) = path.split_first().ok_or_else(empty_path_error)?;

    let Some(mut node) = find_node_by_key(first.as_ref(), nodes) else {
        return Ok(NestedLookup::ValidPath(String::new()));
    };

    let mut valid_path = vec![first.as_ref()];
    for key in rest {
        match find_node_by_key(key.as_ref(), node.nodes()) {
            Some(child) => {
                node = child;
                valid_path.push(key.as_ref());
            }
            None => return Ok(NestedLookup::ValidPath(valid_path.join("."))),
        }
    }

    Ok(NestedLookup::Found(node))
}

/// Find a nested node by key path.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` is empty.
pub fn find_nested_node<'a, T, S>(path: &[S], nodes: &'a [T]) -> Result<Option<&'a T>>
where
    T: Node,
    S: AsRef<str>,
{
    Ok(find_nested_node_or_valid_path(path, nodes)?.found())
}

/// Check if a nested node exists on the key path.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` is empty.
pub fn includes_nested_node<T, S>(path: &[S], nodes: &[T]) -> Result<bool>
where
    T: Node,
    S: AsRef<str>,
{
    Ok(find_nested_node(path, nodes)?.is_some())
}

/// Sort `nodes` and all their descendants by key, in place.
///
/// Only meant for canonicalizing output; call it on owned copies.
pub fn sort_nodes<T: Node>(nodes: &mut [T]) {
    nodes.sort_by(|a, b| a.key().cmp(b.key()));
    for node in nodes.iter_mut() {
        sort_node(node);
    }
}

/// Sort the descendants of `node` by key, in place.
pub fn sort_node<T: Node>(node: &mut T) {
    sort_nodes(node.nodes_mut());
}
