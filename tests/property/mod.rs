//! Property-based tests for loom engine invariants

mod invariants;
