//! Property-based tests for group merging.
