//! Variant enumeration.
//!
//! A variant is one rendered permission-path string, e.g. ` files.read`,
//! `-files.*` or `files.get.<id>.[format]`. [`form_available_paths`] walks a
//! tree depth first (node before children, children in stored order) and
//! asks a per-variant formatter for the strings of each node.

use crate::influence::{InfluenceNode, sign};
use crate::node::Node;
use crate::permission::StaticPermission;

/// Suffix rendered for a node's wildcard.
const WILDCARD_SUFFIX: &str = ".*";

/// Prefix rendered for an override forcing a field inactive.
const INACTIVE_MARK: &str = "!";

/// Form every available path of `node` and its descendants.
///
/// `format_variant(prefix, node)` receives the node's full dot path (the
/// root's prefix is its bare key) and returns that node's own variants.
pub fn form_available_paths<T, F>(format_variant: &F, node: &T) -> Vec<String>
where
    T: Node,
    F: Fn(&str, &T) -> Vec<String>,
{
    let mut result = Vec::new();
    collect_paths("", format_variant, node, &mut result);
    result
}

fn collect_paths<T, F>(prefix: &str, format_variant: &F, node: &T, result: &mut Vec<String>)
where
    T: Node,
    F: Fn(&str, &T) -> Vec<String>,
{
    let prefix = if prefix.is_empty() {
        node.key().to_owned()
    } else {
        format!("{prefix}.{}", node.key())
    };
    result.extend(format_variant(&prefix, node));

    for nested in node.nodes() {
        collect_paths(&prefix, format_variant, nested, result);
    }
}

/// Variants of a group or subject permission node.
///
/// In order: one per argument, the raw positive state, the raw wildcard
/// state, then every override entry in stored order (`!` marks a field the
/// override forces inactive).
pub fn influence_variants<T: InfluenceNode>(prefix: &str, node: &T) -> Vec<String> {
    let mut result = Vec::new();

    for argument in node.arguments() {
        result.push(format!(
            "{}{prefix}.{}",
            sign(argument.positive),
            argument.joined_value()
        ));
    }

    if let Some(sign) = node.positive().sign() {
        result.push(format!("{sign}{prefix}"));
    }
    if let Some(sign) = node.wildcard().sign() {
        result.push(format!("{sign}{prefix}{WILDCARD_SUFFIX}"));
    }

    for patch in node.overrides() {
        if let Some(positive) = patch.positive {
            let mark = positive.sign().unwrap_or(INACTIVE_MARK);
            result.push(format!("{mark}{prefix}"));
        }
        if let Some(wildcard) = patch.wildcard {
            let mark = wildcard.sign().unwrap_or(INACTIVE_MARK);
            result.push(format!("{mark}{prefix}{WILDCARD_SUFFIX}"));
        }
    }

    result
}

/// The single variant of a static permission node: the prefix followed by
/// `<required>` then `[optional]` parameters.
pub fn static_variants(prefix: &str, node: &StaticPermission) -> Vec<String> {
    let params: Vec<String> = node
        .required_params
        .iter()
        .map(|name| format!("<{name}>"))
        .chain(node.optional_params.iter().map(|name| format!("[{name}]")))
        .collect();

    if params.is_empty() {
        vec![prefix.to_owned()]
    } else {
        vec![format!("{prefix}.{}", params.join("."))]
    }
}
