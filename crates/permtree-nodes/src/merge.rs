//! The node merge engine.
//!
//! [`merge_nodes`] collapses siblings sharing a key, recursively. Type
//! specific fields are combined by a pluggable `combine(first, second)`
//! function; the engine itself owns the key and the children:
//!
//! 1. `combine` receives both operands with their children detached.
//! 2. The result's key is overwritten with the second operand's key.
//! 3. The result's children are `merge_nodes` over the first operand's
//!    children followed by the second's.
//!
//! Output order at every level: merged keys first, in the order each key
//! was first seen, then keys that occurred once, in their original order.

use crate::influence::{InfluenceNode, compute_override};
use crate::node::Node;
use crate::permission::StaticPermission;
use permtree_core::merge_partitioned;

/// Merge a list of nodes, collapsing duplicate keys with `combine`.
///
/// Duplicates are folded left to right. See the module docs for the output
/// ordering.
pub fn merge_nodes<T, F>(combine: &F, nodes: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Node,
    F: Fn(&T, &T) -> T,
{
    merge_partitioned(
        nodes,
        |node| node.key().to_owned(),
        |first, second| merge_two_nodes(first, second, combine),
    )
}

/// Merge two same-key nodes.
///
/// The result always carries `second`'s key; its children are the merge of
/// both operands' children.
pub fn merge_two_nodes<T, F>(mut first: T, mut second: T, combine: &F) -> T
where
    T: Node,
    F: Fn(&T, &T) -> T,
{
    let first_children = std::mem::take(first.nodes_mut());
    let second_children = std::mem::take(second.nodes_mut());

    let mut merged = combine(&first, &second);
    merged.set_key(second.key().to_owned());
    *merged.nodes_mut() = merge_nodes(combine, first_children.into_iter().chain(second_children));
    merged
}

/// Combine policy for influence-bearing nodes.
///
/// Starts from a copy of `first`, appends the override that moves `first`'s
/// resolved influence to `second`'s raw influence (if any), then appends all
/// of `second`'s arguments. Arguments are never deduplicated, so merging a
/// node with itself grows its argument list.
pub fn merge_influence_fields<T>(first: &T, second: &T) -> T
where
    T: InfluenceNode + Clone,
{
    let mut merged = first.clone();

    if let Some(patch) = compute_override(first, second) {
        log::trace!("Recording override {patch:?} on '{}'", first.key());
        merged.overrides_mut().push(patch);
    }
    merged
        .arguments_mut()
        .extend(second.arguments().iter().cloned());

    merged
}

/// Combine policy for static permissions.
///
/// `first` is discarded; `second`'s parameter lists replace it entirely.
pub fn merge_static_fields(_first: &StaticPermission, second: &StaticPermission) -> StaticPermission {
    StaticPermission {
        key: String::new(),
        nodes: Vec::new(),
        required_params: second.required_params.clone(),
        optional_params: second.optional_params.clone(),
    }
}
