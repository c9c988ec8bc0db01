//! Integration test suite for permtree groups.
//!
//! Exercises the builders, the stores and group merging together, from
//! dot-path strings down to rendered variants.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
mod integration;
