//! Tri-state influence and override resolution.
//!
//! Influence-bearing nodes carry a `positive` and a `wildcard` [`Effect`],
//! plus an ordered stack of [`InfluenceOverride`] patches appended during
//! merges. The *resolved* value of a field is the one set by the last
//! override that mentions it, falling back to the node's own value.
//!
//! An override field that is absent (`None`) leaves the field untouched; a
//! field that is present with [`Effect::Inactive`] forces it inactive. The
//! two must never be conflated.

use crate::node::{Node, empty_path_error, find_node_by_key};
use crate::permission::Argument;
use permtree_core::Result;
use serde::{Deserialize, Serialize};

// ============================================================================
// Effect
// ============================================================================

/// Grant state of a permission field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// The permission is granted.
    Allow,
    /// The permission is denied.
    Deny,
    /// No opinion here; defer to descendants and overrides.
    #[default]
    Inactive,
}

impl Effect {
    /// Returns `true` for [`Effect::Allow`] and [`Effect::Deny`].
    pub fn is_active(self) -> bool {
        !matches!(self, Effect::Inactive)
    }

    /// Positiveness of an active effect, `None` when inactive.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Effect::Allow => Some(true),
            Effect::Deny => Some(false),
            Effect::Inactive => None,
        }
    }

    /// Rendering sign of an active effect, `None` when inactive.
    pub fn sign(self) -> Option<&'static str> {
        self.as_bool().map(sign)
    }

    /// Returns the effect name as a string.
    pub fn name(self) -> &'static str {
        match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
            Effect::Inactive => "inactive",
        }
    }
}

impl From<bool> for Effect {
    fn from(positive: bool) -> Self {
        if positive { Effect::Allow } else { Effect::Deny }
    }
}

impl From<Option<bool>> for Effect {
    fn from(positive: Option<bool>) -> Self {
        positive.map_or(Effect::Inactive, Effect::from)
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rendering sign of a positiveness flag: a blank for positive, `-` for
/// negative.
pub fn sign(positive: bool) -> &'static str {
    if positive { " " } else { "-" }
}

// ============================================================================
// InfluenceOverride
// ============================================================================

/// A sparse patch to a node's effective influence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfluenceOverride {
    /// New positive state; `None` leaves it untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive: Option<Effect>,
    /// New wildcard state; `None` leaves it untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<Effect>,
}

impl InfluenceOverride {
    /// Creates an override touching only `positive`.
    pub fn positive(effect: Effect) -> Self {
        Self {
            positive: Some(effect),
            wildcard: None,
        }
    }

    /// Creates an override touching only `wildcard`.
    pub fn wildcard(effect: Effect) -> Self {
        Self {
            positive: None,
            wildcard: Some(effect),
        }
    }

    /// Returns `true` if neither field is present.
    pub fn is_empty(&self) -> bool {
        self.positive.is_none() && self.wildcard.is_none()
    }
}

// ============================================================================
// InfluenceNode
// ============================================================================

/// A node carrying influence, an override stack and arguments.
pub trait InfluenceNode: Node {
    /// Raw positive state.
    fn positive(&self) -> Effect;

    /// Raw wildcard state.
    fn wildcard(&self) -> Effect;

    /// Override stack in stored order.
    fn overrides(&self) -> &[InfluenceOverride];

    /// Mutable access to the override stack.
    fn overrides_mut(&mut self) -> &mut Vec<InfluenceOverride>;

    /// Concrete parameterized grants in stored order.
    fn arguments(&self) -> &[Argument];

    /// Mutable access to the arguments.
    fn arguments_mut(&mut self) -> &mut Vec<Argument>;

    /// Returns `true` if the raw `positive` or `wildcard` is active.
    fn has_concrete_influence(&self) -> bool {
        self.positive().is_active() || self.wildcard().is_active()
    }
}

/// Resolved positive state: the last override with `positive` present wins,
/// otherwise the node's own value.
pub fn resolved_positive<T: InfluenceNode>(node: &T) -> Effect {
    node.overrides()
        .iter()
        .rev()
        .find_map(|o| o.positive)
        .unwrap_or_else(|| node.positive())
}

/// Resolved wildcard state: the last override with `wildcard` present wins,
/// otherwise the node's own value.
pub fn resolved_wildcard<T: InfluenceNode>(node: &T) -> Effect {
    node.overrides()
        .iter()
        .rev()
        .find_map(|o| o.wildcard)
        .unwrap_or_else(|| node.wildcard())
}

/// Compute the override that brings `main`'s resolved influence to
/// `target`'s raw influence.
///
/// Returns `None` when nothing differs. `target`'s own overrides are ignored.
pub fn compute_override<T: InfluenceNode>(main: &T, target: &T) -> Option<InfluenceOverride> {
    let mut patch = InfluenceOverride::default();

    if resolved_positive(main) != target.positive() {
        patch.positive = Some(target.positive());
    }
    if resolved_wildcard(main) != target.wildcard() {
        patch.wildcard = Some(target.wildcard());
    }

    if patch.is_empty() { None } else { Some(patch) }
}

/// Find the node with influence on a key path.
///
/// The first key is matched against `nodes` front to back; every following
/// key is matched against the current node's children back to front, so the
/// last-added child wins. The addressed node only counts if its raw
/// `positive` or `wildcard` is active.
///
/// # Errors
///
/// Returns [`permtree_core::Error::InvalidArgument`] if `path` is empty.
pub fn find_active_node<'a, T, S>(path: &[S], nodes: &'a [T]) -> Result<Option<&'a T>>
where
    T: InfluenceNode,
    S: AsRef<str>,
{
    let (first, rest) = path.split_first().ok_or_else(empty_path_error)?;

    let Some(mut node) = find_node_by_key(first.as_ref(), nodes) else {
        return Ok(None);
    };

    for key in rest {
        let key = key.as_ref();
        match node.nodes().iter().rev().find(|child| child.key() == key) {
            Some(child) => node = child,
            None => return Ok(None),
        }
    }

    Ok(node.has_concrete_influence().then_some(node))
}
