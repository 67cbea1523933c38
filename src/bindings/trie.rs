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

//! src/bindings/trie.rs
//!
//! Multi-keystroke binding trie
//!
//! Every node is one position in the chord automaton: "this much of a
//! sequence has been typed" plus, optionally, "the command to run if the
//! user stops here". Nodes live in a single arena owned by [`KeyTrie`] and
//! are addressed by [`NodeId`]; the resolver keeps the id of its current
//! node and is reset wholesale when a new trie is swapped in, so there are
//! no back-pointers to invalidate.
//!
//! Insertion resolves conflicting binding specifications deterministically:
//! a binding cannot be both a complete command and a strict prefix of
//! another, and longer sequences already registered win over a new shorter
//! one. Each resolution is reported through `log::warn!` and never fails
//! the batch.

use crate::core::types::{BindingSequence, ChordCombo, Command, KeySym, Modifiers};

/// Index of a trie node within its owning [`KeyTrie`] arena.
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// One position in the chord automaton.
#[derive(Clone, Debug)]
pub struct TrieNode {
    pub keysym: KeySym,
    /// Modifiers this chord itself requires.
    pub required: Modifiers,
    /// Union of the required masks of all strict ancestors. Used by the
    /// resolver to tolerate still-held earlier modifiers without accepting
    /// unrelated extra ones.
    pub inherited: Modifiers,
    pub command: Option<Command>,
    children: Vec<NodeId>,
}

/// Arena-backed prefix trie over chord sequences.
#[derive(Clone, Debug)]
pub struct KeyTrie {
    nodes: Vec<TrieNode>,
}

impl Default for KeyTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTrie {
    pub fn new() -> Self {
        Self {
            // Synthetic root; its keysym and masks are never consulted.
            nodes: vec![TrieNode {
                keysym: KeySym::new(""),
                required: Modifiers::empty(),
                inherited: Modifiers::empty(),
                command: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Number of distinct first chords registered.
    pub fn root_entries(&self) -> usize {
        self.nodes[ROOT].children.len()
    }

    /// Exact `(key symbol, modifier mask)` lookup under the root, used for
    /// the resolver's IDLE state.
    pub fn lookup_root(&self, keysym: &KeySym, modifiers: Modifiers) -> Option<NodeId> {
        self.find_child(ROOT, keysym, modifiers)
    }

    fn find_child(&self, parent: NodeId, keysym: &KeySym, required: Modifiers) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes[id].keysym == *keysym && self.nodes[id].required == required)
    }

    /// Insert one `(sequence, command)` pair, resolving conflicts.
    ///
    /// Descends the trie one chord at a time, reusing an existing child
    /// with the same `(key symbol, required mask)` or creating one with the
    /// inherited mask accumulated so far. Conflict rules, each reported
    /// with a warning:
    ///
    /// - an empty sequence is skipped
    /// - a command on a node the new, longer sequence passes through is
    ///   dropped
    /// - if the terminal node already has children, the new shorter binding
    ///   is rejected and the existing longer ones stand
    /// - a command already on the exact terminal node is overwritten
    pub fn insert(&mut self, sequence: &BindingSequence, command: Command) {
        if sequence.combos.is_empty() {
            log::warn!("empty binding sequence for '{}' skipped", command);
            return;
        }

        let mut current = ROOT;
        let mut inherited = Modifiers::empty();
        let last = sequence.combos.len() - 1;

        for (depth, combo) in sequence.combos.iter().enumerate() {
            let child = match self.find_child(current, &combo.keysym, combo.modifiers) {
                Some(id) => id,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(TrieNode {
                        keysym: combo.keysym.clone(),
                        required: combo.modifiers,
                        inherited,
                        command: None,
                        children: Vec::new(),
                    });
                    self.nodes[current].children.push(id);
                    id
                }
            };

            if depth < last {
                if let Some(dropped) = self.nodes[child].command.take() {
                    log::warn!(
                        "binding '{}' for '{}' continues through a prefix bound to '{}'; \
                         dropping the shorter binding",
                        sequence,
                        command,
                        dropped
                    );
                }
            } else {
                if !self.nodes[child].children.is_empty() {
                    log::warn!(
                        "binding '{}' for '{}' rejected: longer sequences through this \
                         prefix already exist",
                        sequence,
                        command
                    );
                    return;
                }
                if let Some(previous) = &self.nodes[child].command {
                    log::warn!(
                        "binding '{}' rebound from '{}' to '{}'",
                        sequence,
                        previous,
                        command
                    );
                }
                self.nodes[child].command = Some(command);
                return;
            }

            inherited |= combo.modifiers;
            current = child;
        }
    }

    /// All registered bindings as `(sequence, command)` pairs, in trie
    /// order. Used for diagnostics and the CLI listing.
    pub fn bindings(&self) -> Vec<(BindingSequence, Command)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect(ROOT, &mut path, &mut out);
        out
    }

    fn collect(
        &self,
        id: NodeId,
        path: &mut Vec<ChordCombo>,
        out: &mut Vec<(BindingSequence, Command)>,
    ) {
        if id != ROOT {
            let node = &self.nodes[id];
            path.push(ChordCombo {
                modifiers: node.required,
                keysym: node.keysym.clone(),
            });
            if let Some(command) = &node.command {
                out.push((BindingSequence { combos: path.clone() }, command.clone()));
            }
        }
        for &child in &self.nodes[id].children {
            self.collect(child, path, out);
        }
        if id != ROOT {
            path.pop();
        }
    }
}
