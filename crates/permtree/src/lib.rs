//! permtree umbrella crate.
//!
//! This crate re-exports all permtree components for convenience.
//! The `groups` feature (on by default) adds group composition.

#![doc = include_str!("../README.md")]

pub use permtree_core as core;
pub use permtree_nodes as nodes;

#[cfg(feature = "groups")]
pub use permtree_groups as groups;

pub use permtree_core::{Error, Result};
