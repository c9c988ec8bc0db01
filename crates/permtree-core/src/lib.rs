//! permtree Core: shared errors and utilities.
//!
//! This crate provides the foundational pieces used across all permtree crates.
//! It has no internal permtree dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Duplicate partitioning and key/path helpers

#![doc = include_str!("../README.md")]

pub mod error;
pub mod util;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::collections::{Partition, merge_partitioned, partition_by_key};
pub use util::keys::{PATH_SEPARATOR, kebab_case, split_path};
