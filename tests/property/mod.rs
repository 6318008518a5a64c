//! Property-based tests for step numbering and payload invariants
