//! Command handlers.
//!
//! Every handler returns the lines to print so the binary stays a thin
//! shell around them.

use crate::cli::Command;
use crate::config::PermtreeConfig;
use permtree_core::{Error, Result};
use permtree_groups::{Group, assemble_scheme_value};
use permtree_nodes::{
    NestedLookup, PermissionNode, StaticPermission, resolved_positive, resolved_wildcard,
    sort_nodes,
};

/// Dispatch a parsed command.
///
/// # Errors
///
/// Propagates the handler's error.
pub fn run(config: &PermtreeConfig, command: &Command) -> Result<Vec<String>> {
    match command {
        Command::Variants { group, sorted } => cmd_variants(config, group.as_deref(), *sorted),
        Command::Statics { sorted } => cmd_statics(config, *sorted),
        Command::Lookup { path } => cmd_lookup(config, path),
        Command::Active { group, path } => cmd_active(config, group, path),
        Command::Scheme { prefix, json } => cmd_scheme(prefix, json),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Variants of every merged group (or one), each under a `[name]` header.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an unknown group or a malformed
/// path in the definition file.
pub fn cmd_variants(
    config: &PermtreeConfig,
    group: Option<&str>,
    sorted: bool,
) -> Result<Vec<String>> {
    let store = config.build_groups()?;
    let selected: Vec<&Group> = match group {
        Some(name) => vec![
            store
                .get_group(name)
                .ok_or_else(|| Error::invalid_argument(format!("Unknown group '{name}'")))?,
        ],
        None => store.groups().iter().collect(),
    };

    let mut lines = Vec::new();
    for group in selected {
        lines.push(format!("[{}]", group.name));
        lines.extend(render(group.permissions.clone(), sorted));
    }
    Ok(lines)
}

/// Variants of all static permissions.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a malformed path in the
/// definition file.
pub fn cmd_statics(config: &PermtreeConfig, sorted: bool) -> Result<Vec<String>> {
    let store = config.build_statics()?;
    Ok(render(store.permissions().to_vec(), sorted))
}

/// Nested static lookup: the node's variant, or the longest valid prefix.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a malformed path.
pub fn cmd_lookup(config: &PermtreeConfig, path: &str) -> Result<Vec<String>> {
    let store = config.build_statics()?;
    let line = match store.get_nested_permission_or_valid_path(path)? {
        NestedLookup::Found(node) => {
            let variants = StaticPermission::variants(path, node).join(", ");
            format!("found: {variants}")
        }
        NestedLookup::ValidPath(valid) if valid.is_empty() => "not found".to_string(),
        NestedLookup::ValidPath(valid) => format!("not found; valid up to: {valid}"),
    };
    Ok(vec![line])
}

/// Active-node search inside one group.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an unknown group or a malformed
/// path.
pub fn cmd_active(config: &PermtreeConfig, group: &str, path: &str) -> Result<Vec<String>> {
    let store = config.build_groups()?;
    if !store.has_group(group) {
        return Err(Error::invalid_argument(format!("Unknown group '{group}'")));
    }

    let lines = match store.active_permission(group, path)? {
        Some(node) => vec![
            format!("node: {}", node.key),
            format!("positive: {}", resolved_positive(node)),
            format!("wildcard: {}", resolved_wildcard(node)),
        ],
        None => vec![format!("no active node for '{path}' in '{group}'")],
    };
    Ok(lines)
}

/// Assemble a naming scheme and pretty-print it.
///
/// # Errors
///
/// Returns [`Error::Serialization`] for invalid JSON and
/// [`Error::UnsupportedScheme`] for values the scheme cannot hold.
pub fn cmd_scheme(prefix: &str, json: &str) -> Result<Vec<String>> {
    let scheme = assemble_scheme_value(prefix, serde_json::from_str(json)?)?;
    Ok(vec![serde_json::to_string_pretty(&scheme)?])
}

fn render<T: PermissionNode>(mut roots: Vec<T>, sorted: bool) -> Vec<String> {
    if sorted {
        sort_nodes(&mut roots);
    }
    roots.iter().flat_map(PermissionNode::available_paths).collect()
}
