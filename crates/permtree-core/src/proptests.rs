//! Property-based tests for duplicate partitioning and path splitting.
