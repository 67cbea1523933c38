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

//! src/bindings/resolver.rs
//!
//! Runtime key-press resolver
//!
//! A small synchronous state machine matching raw `(key symbol, modifier
//! mask)` events against the compiled trie. Two states: IDLE, and
//! AWAITING_CONTINUATION bound to the trie node reached so far.
//!
//! While a multi-keystroke sequence is in progress the resolver holds
//! exclusive keyboard capture through the [`KeyboardCapture`] collaborator,
//! so subsequent keystrokes are steered here instead of to the focused
//! window. Capture is acquired at most once on entering
//! AWAITING_CONTINUATION and released exactly once on every way back to
//! IDLE, including [`KeyPressResolver::reset`] at a configuration reload.

use crate::bindings::trie::{KeyTrie, NodeId};
use crate::core::types::{Command, KeyEvent, KeySym};

/// Exclusive-keyboard-capture collaborator.
///
/// The display-server side of a grab. The resolver guarantees the calls
/// come in strictly alternating acquire/release pairs.
pub trait KeyboardCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// No-op capture, for hosts (and tests) that do not grab the keyboard.
impl KeyboardCapture for () {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Outcome of feeding one key event to the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No binding starts with this event; the press belongs to the window.
    Unbound,
    /// A sequence completed; hand the command to the dispatch collaborator.
    Dispatched(Command),
    /// The event extended an in-progress sequence; more keystrokes needed.
    Pending,
    /// An in-progress sequence was abandoned, by the abort key or by a
    /// keystroke no child matches.
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    /// Index of the non-terminal trie node reached so far.
    Awaiting(NodeId),
}

/// The multi-keystroke matching state machine.
pub struct KeyPressResolver {
    state: State,
    capture_held: bool,
    abort_key: KeySym,
}

impl KeyPressResolver {
    pub fn new(abort_key: KeySym) -> Self {
        Self {
            state: State::Idle,
            capture_held: false,
            abort_key,
        }
    }

    pub fn capture_held(&self) -> bool {
        self.capture_held
    }

    /// True while a multi-keystroke sequence is in progress.
    pub fn awaiting_continuation(&self) -> bool {
        matches!(self.state, State::Awaiting(_))
    }

    /// Return to IDLE, releasing capture if held. Called by the host when
    /// it swaps in a freshly compiled trie; the stored node id would
    /// otherwise dangle into the discarded one.
    pub fn reset<C: KeyboardCapture>(&mut self, capture: &mut C) {
        self.state = State::Idle;
        self.release(capture);
    }

    /// Match one raw key event against the trie.
    pub fn handle_key<C: KeyboardCapture>(
        &mut self,
        trie: &KeyTrie,
        event: &KeyEvent,
        capture: &mut C,
    ) -> Resolution {
        match self.state {
            State::Idle => self.handle_idle(trie, event, capture),
            State::Awaiting(current) => self.handle_awaiting(trie, event, current, capture),
        }
    }

    fn handle_idle<C: KeyboardCapture>(
        &mut self,
        trie: &KeyTrie,
        event: &KeyEvent,
        capture: &mut C,
    ) -> Resolution {
        let id = match trie.lookup_root(&event.keysym, event.modifiers) {
            Some(id) => id,
            None => {
                log::debug!("unbound key press: {}+{}", event.modifiers, event.keysym);
                return Resolution::Unbound;
            }
        };

        if !trie.children(id).is_empty() {
            self.state = State::Awaiting(id);
            self.acquire(capture);
            return Resolution::Pending;
        }
        match trie.node(id).command.clone() {
            Some(command) => Resolution::Dispatched(command),
            None => Resolution::Unbound,
        }
    }

    fn handle_awaiting<C: KeyboardCapture>(
        &mut self,
        trie: &KeyTrie,
        event: &KeyEvent,
        current: NodeId,
        capture: &mut C,
    ) -> Resolution {
        if event.keysym == self.abort_key {
            self.state = State::Idle;
            self.release(capture);
            return Resolution::Aborted;
        }

        // Required modifiers must all be held; anything beyond the required
        // and inherited masks disqualifies the child.
        let next = trie.children(current).iter().copied().find(|&id| {
            let node = trie.node(id);
            node.keysym == event.keysym
                && event.modifiers.contains(node.required)
                && (event.modifiers & !(node.required | node.inherited)).is_empty()
        });

        let id = match next {
            Some(id) => id,
            None => {
                log::debug!(
                    "sequence aborted by unmatched key press: {}+{}",
                    event.modifiers,
                    event.keysym
                );
                self.state = State::Idle;
                self.release(capture);
                return Resolution::Aborted;
            }
        };

        if !trie.children(id).is_empty() {
            self.state = State::Awaiting(id);
            return Resolution::Pending;
        }

        self.state = State::Idle;
        self.release(capture);
        match trie.node(id).command.clone() {
            Some(command) => Resolution::Dispatched(command),
            None => Resolution::Aborted,
        }
    }

    fn acquire<C: KeyboardCapture>(&mut self, capture: &mut C) {
        if !self.capture_held {
            capture.acquire();
            self.capture_held = true;
        }
    }

    fn release<C: KeyboardCapture>(&mut self, capture: &mut C) {
        if self.capture_held {
            capture.release();
            self.capture_held = false;
        }
    }
}
