//! Definition file: groups and static permissions declared in TOML.
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [[groups]]
//! name = "editors"
//! children = ["viewers"]
//! grants = ["docs.read", "docs.write"]
//!
//! [[groups.permissions]]
//! path = "docs.delete"
//! positive = "deny"
//!
//! [[statics]]
//! path = "docs.get"
//! required = ["id"]
//! ```
//!
//! A path ending in `.*` addresses the wildcard of the node before it.

use permtree_core::{Error, Result};
use permtree_groups::{GroupBuilder, GroupStore, StaticPermissionStore, static_permission_from_path};
use permtree_nodes::Effect;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Environment variable naming the definition file.
pub const CONFIG_ENV: &str = "PERMTREE_CONFIG";

/// Definition file used when neither `--config` nor [`CONFIG_ENV`] is set.
pub const DEFAULT_CONFIG_FILE: &str = "permtree.toml";

const WILDCARD_SUFFIX: &str = ".*";

/// Contents of a definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermtreeConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Group definitions; repeated names are merged in file order.
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    /// Static permission definitions.
    #[serde(default)]
    pub statics: Vec<StaticEntry>,
}

/// `[logging]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    crate::logging::DEFAULT_LEVEL.to_string()
}

/// One `[[groups]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    /// Group name.
    pub name: String,
    /// Child group names.
    #[serde(default)]
    pub children: Vec<String>,
    /// Paths granted without a wildcard (`docs.*` grants the wildcard).
    #[serde(default)]
    pub grants: Vec<String>,
    /// Paths with explicit influence.
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,
    /// Parameterized grants.
    #[serde(default)]
    pub arguments: Vec<ArgumentEntry>,
}

/// One `[[groups.permissions]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionEntry {
    /// Dot-separated path, optionally ending in `.*`.
    pub path: String,
    /// Positive state of the leaf.
    #[serde(default = "default_positive")]
    pub positive: Effect,
    /// Wildcard state of the leaf.
    #[serde(default)]
    pub wildcard: Option<Effect>,
}

fn default_positive() -> Effect {
    Effect::Allow
}

impl PermissionEntry {
    /// The addressed path with the leaf's positive and wildcard states.
    ///
    /// For a `.*` path the entry's `positive` applies to the wildcard and
    /// the positive state stays inactive.
    pub fn influence(&self) -> (&str, Effect, Effect) {
        match self.path.strip_suffix(WILDCARD_SUFFIX) {
            Some(path) => {
                if let Some(wildcard) = self.wildcard {
                    log::warn!(
                        "Permission '{}' already addresses the wildcard; ignoring wildcard = \"{wildcard}\"",
                        self.path
                    );
                }
                (path, Effect::Inactive, self.positive)
            }
            None => (
                &self.path,
                self.positive,
                self.wildcard.unwrap_or(Effect::Inactive),
            ),
        }
    }
}

/// One `[[groups.arguments]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentEntry {
    /// Dot-separated path the argument hangs off.
    pub path: String,
    /// Grant (`true`) or deny (`false`).
    #[serde(default = "default_true")]
    pub positive: bool,
    /// Ordered parameter values.
    #[serde(default)]
    pub value: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

/// One `[[statics]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticEntry {
    /// Dot-separated path.
    pub path: String,
    /// Required parameter names of the leaf.
    #[serde(default)]
    pub required: Vec<String>,
    /// Optional parameter names of the leaf.
    #[serde(default)]
    pub optional: Vec<String>,
}

impl PermtreeConfig {
    /// The definition file to read: `explicit` if given, otherwise
    /// [`DEFAULT_CONFIG_FILE`] in the working directory.
    ///
    /// The CLI reads [`CONFIG_ENV`] into `explicit` before calling this.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf)
    }

    /// Load and validate a definition file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, [`Error::Toml`] if
    /// it does not parse and [`Error::Config`] if it fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded {} ({} groups, {} statics)",
            path.display(),
            config.groups.len(),
            config.statics.len()
        );
        Ok(config)
    }

    /// Parse and validate definition-file contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] for malformed TOML or unknown fields and
    /// [`Error::Config`] for an unnamed group.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(index) = self.groups.iter().position(|g| g.name.is_empty()) {
            return Err(Error::config(format!(
                "groups[{index}] has an empty name"
            )));
        }
        Ok(())
    }

    /// Build every group and merge them into a store.
    ///
    /// Within a group, writes are applied as grants, then permissions, then
    /// arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed path.
    pub fn build_groups(&self) -> Result<GroupStore> {
        let groups = self
            .groups
            .iter()
            .map(GroupEntry::build)
            .collect::<Result<Vec<_>>>()?;

        let mut store = GroupStore::new();
        store.add_groups(groups);
        Ok(store)
    }

    /// Build every static permission and merge them into a store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed path.
    pub fn build_statics(&self) -> Result<StaticPermissionStore> {
        let statics = self
            .statics
            .iter()
            .map(|entry| {
                static_permission_from_path(&entry.path, &entry.required, &entry.optional)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut store = StaticPermissionStore::new();
        store.add_permissions(statics);
        Ok(store)
    }
}

impl GroupEntry {
    fn build(&self) -> Result<permtree_groups::Group> {
        let mut builder = self
            .children
            .iter()
            .fold(GroupBuilder::new(&self.name), |builder, child| {
                builder.with_child_group(child)
            });

        for grant in &self.grants {
            builder = match grant.strip_suffix(WILDCARD_SUFFIX) {
                Some(path) => builder.with_permission(path, Effect::Inactive, Effect::Allow),
                None => builder.with_permission(grant, Effect::Allow, Effect::Inactive),
            };
        }
        for permission in &self.permissions {
            let (path, positive, wildcard) = permission.influence();
            builder = builder.with_permission(path, positive, wildcard);
        }
        for argument in &self.arguments {
            builder =
                builder.with_argument(&argument.path, argument.positive, argument.value.clone());
        }

        builder.build()
    }
}
