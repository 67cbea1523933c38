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

//! src/config/loader.rs
//!
//! Compiled configuration and the parse-tree walk that builds it
//!
//! [`Config::compile`] is the reload boundary: it tokenizes, builds the
//! parse tree, and walks it into a fully built trie and classifier, all
//! off to the side. A fatal parse error leaves the caller's previous
//! `Config` untouched; per-statement problems (bad bindings, bad criteria,
//! unknown keywords) are warnings and never fail the load.
//!
//! Statement vocabulary:
//!
//! ```text
//! abort_key escape
//! bind 'Ctrl+U, C' close_window
//! bind Mod1+Return exec 'xterm -rv'
//! window {
//!   match {
//!     app_class /XTerm|URxvt/
//!     name tmux
//!   }
//!   config default {
//!     width 80
//!     height 24
//!   }
//! }
//! ```
//!
//! Each `match` block of a `window` rule is one AND criteria set; several
//! blocks are OR alternatives; no block at all matches every window.

use crate::bindings::sequence::parse_sequence;
use crate::bindings::trie::KeyTrie;
use crate::config::error::ConfigError;
use crate::config::tokenizer::Tokenizer;
use crate::config::tree::{build_tree, ParseNode};
use crate::core::types::{Command, CommandKind, KeySym};
use crate::criteria::classifier::{ClassifierRule, WindowClassifier, WindowConfig};
use crate::criteria::matcher::{PropertySelector, WindowCriteriaSet, WindowCriterion};

const DEFAULT_ABORT_KEY: &str = "escape";

/// One fully compiled configuration: the binding trie, the window
/// classifier, and the resolver's abort key. Replaced as a single unit on
/// reload.
#[derive(Clone, Debug)]
pub struct Config {
    pub trie: KeyTrie,
    pub classifier: WindowClassifier,
    pub abort_key: KeySym,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trie: KeyTrie::new(),
            classifier: WindowClassifier::default(),
            abort_key: KeySym::new(DEFAULT_ABORT_KEY),
        }
    }
}

impl Config {
    /// Compile a configuration source into a fresh `Config`.
    pub fn compile(source: &str) -> Result<Self, ConfigError> {
        let mut tokenizer = Tokenizer::new(source);
        let root = build_tree(&mut tokenizer)?;

        let mut config = Config::default();
        for statement in &root.children {
            config.load_statement(statement);
        }
        Ok(config)
    }

    fn load_statement(&mut self, node: &ParseNode) {
        match node.keyword() {
            Some("bind") => self.load_bind(node),
            Some("abort_key") => self.load_abort_key(node),
            Some("window") => self.load_window_rule(node),
            Some(other) => log::warn!("unknown statement '{other}' skipped"),
            None => {}
        }
    }

    fn load_abort_key(&mut self, node: &ParseNode) {
        match node.tokens.as_slice() {
            [_, key] => self.abort_key = KeySym::new(key),
            _ => log::warn!("abort_key expects exactly one key name"),
        }
    }

    /// `bind <sequence> <command> [args...]`
    fn load_bind(&mut self, node: &ParseNode) {
        let (sequence_text, name, args) = match node.tokens.as_slice() {
            [_, sequence, name, args @ ..] => (sequence, name, args),
            _ => {
                log::warn!("bind expects a sequence and a command; statement skipped");
                return;
            }
        };

        let sequence = match parse_sequence(sequence_text) {
            Ok(sequence) => sequence,
            Err(err) => {
                log::warn!("bad binding '{sequence_text}' for '{name}': {err}; skipped");
                return;
            }
        };

        let kind = CommandKind::from_name(name);
        if kind == CommandKind::Unknown {
            log::warn!("unknown command '{name}' in binding '{sequence_text}'");
        }
        if args.len() != kind.arity() {
            log::warn!(
                "command '{}' expects {} argument(s), got {}; binding '{}' skipped",
                kind,
                kind.arity(),
                args.len(),
                sequence_text
            );
            return;
        }

        self.trie.insert(&sequence, Command::new(kind, args.to_vec()));
    }

    /// `window { match {...}* config <name> {...}* }`
    fn load_window_rule(&mut self, node: &ParseNode) {
        let mut rule = ClassifierRule::default();
        for child in &node.children {
            match child.keyword() {
                Some("match") => rule.criteria.push(load_criteria_set(child)),
                Some("config") => {
                    if let Some(config) = load_window_config(child) {
                        rule.configs.push(config);
                    }
                }
                Some(other) => log::warn!("unknown window statement '{other}' skipped"),
                None => {}
            }
        }
        self.classifier.add_rule(rule);
    }
}

/// One `match` block: each child statement is `<selector> <pattern>`.
fn load_criteria_set(node: &ParseNode) -> WindowCriteriaSet {
    let mut set = WindowCriteriaSet::default();
    for child in &node.children {
        let (keyword, pattern) = match child.tokens.as_slice() {
            [keyword, pattern] => (keyword, pattern),
            _ => {
                log::warn!("criterion expects '<selector> <pattern>'; skipped");
                continue;
            }
        };
        let selector = match PropertySelector::from_keyword(keyword) {
            Some(selector) => selector,
            None => {
                log::warn!("unknown property selector '{keyword}'; criterion skipped");
                continue;
            }
        };
        match WindowCriterion::new(selector, pattern) {
            Ok(criterion) => set.push(criterion),
            Err(err) => log::warn!("bad criterion '{keyword} {pattern}': {err}; skipped"),
        }
    }
    set
}

/// One `config <name>` block with `width`/`height` child statements.
fn load_window_config(node: &ParseNode) -> Option<WindowConfig> {
    let name = match node.tokens.as_slice() {
        [_, name] => name,
        _ => {
            log::warn!("config expects exactly one name; block skipped");
            return None;
        }
    };

    let mut config = WindowConfig::new(name);
    for child in &node.children {
        match child.tokens.as_slice() {
            [keyword, value] if keyword == "width" => config.width = parse_dimension(value),
            [keyword, value] if keyword == "height" => config.height = parse_dimension(value),
            _ => log::warn!("unknown config field in '{name}' skipped"),
        }
    }
    Some(config)
}

fn parse_dimension(value: &str) -> Option<u32> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("invalid dimension '{value}' skipped");
            None
        }
    }
}
