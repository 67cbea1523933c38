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

//! anchorwm configuration and input-dispatch core
//!
//! The compilation and dispatch heart of an anchor-based tiling window
//! manager: a small textual configuration language is compiled into
//! runtime-queryable structures, and live keyboard input is resolved
//! against a multi-keystroke command trie.
//!
//! # Architecture
//!
//! Compile time flows one way: text → tokens → parse tree → {binding trie,
//! window classifier}. Run time flows one way too: raw key event →
//! resolver → dispatched command (or further wait).
//!
//! - **`core`:** shared value types (modifier masks, key symbols, chords,
//!   the command vocabulary)
//! - **`config`:** tokenizer, parse-tree builder, and the loader producing
//!   one compiled [`Config`](config::Config)
//! - **`bindings`:** sequence grammar, binding trie, and the key-press
//!   resolver state machine
//! - **`criteria`:** window-criteria matching and rule-driven
//!   classification
//!
//! Everything is single-threaded and synchronous. A reload compiles a
//! whole replacement `Config` off to the side; on success the host swaps
//! the value and resets the resolver, so a half-built trie is never
//! observable.
//!
//! # Examples
//!
//! ## Compiling a configuration
//!
//! ```
//! use anchorwm::config::Config;
//!
//! let config = Config::compile(
//!     "bind 'Ctrl+U, C' close_window\n\
//!      bind Mod1+Return exec xterm\n",
//! )?;
//! assert_eq!(config.trie.bindings().len(), 2);
//! # Ok::<(), anchorwm::config::ConfigError>(())
//! ```
//!
//! ## Resolving key presses
//!
//! ```
//! use anchorwm::bindings::{KeyPressResolver, Resolution};
//! use anchorwm::config::Config;
//! use anchorwm::core::{KeyEvent, Modifiers};
//!
//! let config = Config::compile("bind 'Ctrl+U, C' close_window\n")?;
//! let mut resolver = KeyPressResolver::new(config.abort_key.clone());
//!
//! let first = resolver.handle_key(
//!     &config.trie,
//!     &KeyEvent::new("u", Modifiers::CONTROL),
//!     &mut (),
//! );
//! assert_eq!(first, Resolution::Pending);
//!
//! let second = resolver.handle_key(
//!     &config.trie,
//!     &KeyEvent::new("c", Modifiers::empty()),
//!     &mut (),
//! );
//! assert!(matches!(second, Resolution::Dispatched(_)));
//! # Ok::<(), anchorwm::config::ConfigError>(())
//! ```

pub mod bindings;
pub mod config;
pub mod core;
pub mod criteria;

// Re-export commonly used types for convenience
pub use self::bindings::{KeyPressResolver, KeyTrie, Resolution};
pub use self::config::Config;
pub use self::core::{Command, CommandKind, KeyEvent, KeySym, Modifiers};
pub use self::criteria::{WindowClassifier, WindowConfigSet, WindowProperties};
