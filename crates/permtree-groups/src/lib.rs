//! # permtree-groups
//!
//! Composition layer over the permtree merge engine:
//!
//! - [`group`]: named bundles of permission trees and their merging
//! - [`subject`]: groups and direct permissions of a single subject
//! - [`builder`]: fluent construction of groups and static permissions
//! - [`store`]: single-owner containers that merge on every write
//! - [`scheme`]: naming-scheme objects resolved to permission paths

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod group;
pub mod scheme;
pub mod store;
pub mod subject;

mod proptests;

pub use builder::{GroupBuilder, StaticPermissionBuilder, static_permission_from_path};
pub use group::{Group, merge_groups, merge_two_groups, permission_from_path};
pub use scheme::{PATH_PROPERTY, assemble_scheme, assemble_scheme_value};
pub use store::{GroupStore, StaticPermissionStore};
pub use subject::{SubjectAbilities, subject_permission_from_path};

pub use permtree_core::{Error, Result};
