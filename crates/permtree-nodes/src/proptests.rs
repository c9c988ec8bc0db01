//! Property-based tests for the merge engine and override resolution.
