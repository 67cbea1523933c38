// Copyright 2026 the anchorwm authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/bindings/mod.rs
//!
//! Key-binding compilation and runtime resolution
//!
//! Three layers, compile-time to run-time:
//! - `sequence`: the `"Ctrl+Shift+U, Alt+M"` string grammar
//! - `trie`: the prefix trie reconciling all parsed sequences
//! - `resolver`: the state machine matching live key events against it

pub mod resolver;
pub mod sequence;
pub mod trie;

pub use resolver::{KeyPressResolver, KeyboardCapture, Resolution};
pub use sequence::{parse_sequence, BindingError};
pub use trie::{KeyTrie, NodeId, TrieNode};

#[cfg(test)]
mod tests;
