//! Binding module tests
//!
//! Contains test suites for the trie compiler's conflict resolution and
//! the key-press resolver state machine. Sequence-grammar tests live
//! inline in `sequence.rs`.

#[cfg(test)]
mod resolver_tests;
