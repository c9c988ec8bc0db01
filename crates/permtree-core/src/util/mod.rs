//! Utility modules shared by the merge engines and the builders.
//!
//! # Modules
//!
//! - [`collections`]: Order-preserving duplicate partitioning and folding
//! - [`keys`]: Dot-path splitting and key normalization

pub mod collections;
pub mod keys;
