//! Permission node variants.
//!
//! [`GroupPermission`] and [`SubjectPermission`] are structurally identical
//! influence-bearing nodes; they stay distinct types because they are merged
//! and stored in different contexts. [`StaticPermission`] declares the
//! parameter shape of a path and carries no influence.

use crate::influence::{Effect, InfluenceNode, InfluenceOverride};
use crate::merge::{merge_influence_fields, merge_nodes, merge_static_fields};
use crate::node::Node;
use crate::variants::{form_available_paths, influence_variants, static_variants};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// PermissionNode
// ============================================================================

/// Ties a node variant to its combine policy and its variant formatter.
pub trait PermissionNode: Node + Clone {
    /// Combine the non-structural fields of two same-key nodes.
    fn merge_fields(first: &Self, second: &Self) -> Self;

    /// Permission-path strings for this node alone, given its full prefix.
    fn variants(prefix: &str, node: &Self) -> Vec<String>;

    /// Merge a sibling list with this variant's combine policy.
    fn merge_all(nodes: Vec<Self>) -> Vec<Self> {
        merge_nodes(&Self::merge_fields, nodes)
    }

    /// Every permission-path string of this tree, depth first.
    fn available_paths(&self) -> Vec<String> {
        form_available_paths(&Self::variants, self)
    }
}

// ============================================================================
// Argument
// ============================================================================

/// A concrete parameterized grant or deny, e.g. `files.read.docA`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Whether the argument grants (`true`) or denies (`false`).
    pub positive: bool,
    /// Ordered parameter values.
    pub value: Map<String, Value>,
}

impl Argument {
    /// Creates a new argument.
    pub fn new(positive: bool, value: Map<String, Value>) -> Self {
        Self { positive, value }
    }

    /// Creates an argument from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(positive: bool, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let value = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { positive, value }
    }

    /// Parameter values joined with `.`.
    ///
    /// Strings are rendered bare, `null` as an empty segment and arrays as
    /// their rendered elements joined with `,`. Objects fall back to JSON.
    pub fn joined_value(&self) -> String {
        self.value
            .values()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

// ============================================================================
// GroupPermission / SubjectPermission
// ============================================================================

macro_rules! influence_permission {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            /// Node key.
            pub key: String,
            /// Child permissions.
            #[serde(default)]
            pub nodes: Vec<$name>,
            /// Raw positive state.
            #[serde(default)]
            pub positive: Effect,
            /// Raw wildcard state.
            #[serde(default)]
            pub wildcard: Effect,
            /// Override stack appended by merges.
            #[serde(default)]
            pub overrides: Vec<InfluenceOverride>,
            /// Concrete parameterized grants.
            #[serde(default)]
            pub arguments: Vec<Argument>,
        }

        impl $name {
            /// Creates an inactive node with no children.
            pub fn new(key: impl Into<String>) -> Self {
                Self {
                    key: key.into(),
                    nodes: Vec::new(),
                    positive: Effect::Inactive,
                    wildcard: Effect::Inactive,
                    overrides: Vec::new(),
                    arguments: Vec::new(),
                }
            }

            /// Sets the positive state.
            pub fn with_positive(mut self, positive: Effect) -> Self {
                self.positive = positive;
                self
            }

            /// Sets the wildcard state.
            pub fn with_wildcard(mut self, wildcard: Effect) -> Self {
                self.wildcard = wildcard;
                self
            }

            /// Appends a child node.
            pub fn with_child(mut self, child: $name) -> Self {
                self.nodes.push(child);
                self
            }

            /// Appends an argument.
            pub fn with_argument(mut self, argument: Argument) -> Self {
                self.arguments.push(argument);
                self
            }

            /// Replaces the override stack.
            pub fn with_overrides(mut self, overrides: Vec<InfluenceOverride>) -> Self {
                self.overrides = overrides;
                self
            }
        }

        impl Node for $name {
            fn key(&self) -> &str {
                &self.key
            }

            fn set_key(&mut self, key: String) {
                self.key = key;
            }

            fn nodes(&self) -> &[Self] {
                &self.nodes
            }

            fn nodes_mut(&mut self) -> &mut Vec<Self> {
                &mut self.nodes
            }
        }

        impl InfluenceNode for $name {
            fn positive(&self) -> Effect {
                self.positive
            }

            fn wildcard(&self) -> Effect {
                self.wildcard
            }

            fn overrides(&self) -> &[InfluenceOverride] {
                &self.overrides
            }

            fn overrides_mut(&mut self) -> &mut Vec<InfluenceOverride> {
                &mut self.overrides
            }

            fn arguments(&self) -> &[Argument] {
                &self.arguments
            }

            fn arguments_mut(&mut self) -> &mut Vec<Argument> {
                &mut self.arguments
            }
        }

        impl PermissionNode for $name {
            fn merge_fields(first: &Self, second: &Self) -> Self {
                merge_influence_fields(first, second)
            }

            fn variants(prefix: &str, node: &Self) -> Vec<String> {
                influence_variants(prefix, node)
            }
        }
    };
}

influence_permission!(
    /// Permission node of a group.
    GroupPermission
);

influence_permission!(
    /// Permission node granted directly to a subject.
    SubjectPermission
);

// ============================================================================
// StaticPermission
// ============================================================================

/// Declares the parameter shape of an available path (`files.get.<id>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPermission {
    /// Node key.
    pub key: String,
    /// Child permissions.
    #[serde(default)]
    pub nodes: Vec<StaticPermission>,
    /// Required parameter names, rendered as `<name>`.
    #[serde(default)]
    pub required_params: Vec<String>,
    /// Optional parameter names, rendered as `[name]`.
    #[serde(default)]
    pub optional_params: Vec<String>,
}

impl StaticPermission {
    /// Creates a parameterless node with no children.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: StaticPermission) -> Self {
        self.nodes.push(child);
        self
    }

    /// Replaces the required parameter names, keeping the first occurrence
    /// of each.
    pub fn with_required_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_params = unique_names(names);
        self
    }

    /// Replaces the optional parameter names, keeping the first occurrence
    /// of each.
    pub fn with_optional_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_params = unique_names(names);
        self
    }
}

fn unique_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut unique: Vec<String> = Vec::new();
    for name in names.into_iter().map(Into::into) {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}

impl Node for StaticPermission {
    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }

    fn nodes(&self) -> &[Self] {
        &self.nodes
    }

    fn nodes_mut(&mut self) -> &mut Vec<Self> {
        &mut self.nodes
    }
}

impl PermissionNode for StaticPermission {
    fn merge_fields(first: &Self, second: &Self) -> Self {
        merge_static_fields(first, second)
    }

    fn variants(prefix: &str, node: &Self) -> Vec<String> {
        static_variants(prefix, node)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_argument_joined_value_keeps_order() {
        let argument = Argument::from_pairs(true, [("zone", "eu"), ("doc", "handbook")]);
        assert_eq!(argument.joined_value(), "eu.handbook");
    }

    #[test]
    fn test_argument_joined_value_renders_scalars() {
        let argument = Argument::from_pairs(
            false,
            [("id", json!(42)), ("flag", json!(true)), ("none", Value::Null)],
        );
        assert_eq!(argument.joined_value(), "42.true.");
    }

    #[test]
    fn test_argument_joined_value_renders_arrays_comma_separated() {
        let argument = Argument::from_pairs(
            true,
            [
                ("ids", json!([1, 2])),
                ("tags", json!(["a", null, ["b", "c"]])),
                ("empty", json!([])),
                ("meta", json!({ "k": 1 })),
            ],
        );
        assert_eq!(argument.joined_value(), "1,2.a,,b,c..{\"k\":1}");
    }

    #[test]
    fn test_group_permission_defaults_to_inactive() {
        let node = GroupPermission::new("files");
        assert_eq!(node.positive, Effect::Inactive);
        assert_eq!(node.wildcard, Effect::Inactive);
        assert!(!node.has_concrete_influence());
    }

    #[test]
    fn test_group_permission_deserializes_sparse() {
        let node: GroupPermission =
            serde_json::from_value(json!({ "key": "files", "positive": "allow" })).unwrap();
        assert_eq!(node.positive, Effect::Allow);
        assert_eq!(node.wildcard, Effect::Inactive);
        assert!(node.nodes.is_empty());
    }

    #[test]
    fn test_subject_permission_serialization() {
        let node = SubjectPermission::new("files")
            .with_wildcard(Effect::Deny)
            .with_overrides(vec![InfluenceOverride::wildcard(Effect::Inactive)]);
        let json = serde_json::to_string(&node).unwrap();
        let back: SubjectPermission = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn test_static_permission_builders() {
        let node = StaticPermission::new("get")
            .with_required_params(["id"])
            .with_optional_params(["format"]);
        assert_eq!(node.required_params, vec!["id"]);
        assert_eq!(node.optional_params, vec!["format"]);
    }

    #[test]
    fn test_static_permission_params_keep_first_occurrence() {
        let node = StaticPermission::new("get")
            .with_required_params(["id", "rev", "id"])
            .with_optional_params(["format", "format"]);
        assert_eq!(node.required_params, vec!["id", "rev"]);
        assert_eq!(node.optional_params, vec!["format"]);
        assert_eq!(StaticPermission::variants("get", &node), vec!["get.<id>.<rev>.[format]"]);
    }

    #[test]
    fn test_permission_node_available_paths() {
        let node = StaticPermission::new("files")
            .with_child(StaticPermission::new("get").with_required_params(["id"]));
        assert_eq!(node.available_paths(), vec!["files", "files.get.<id>"]);
    }
}
