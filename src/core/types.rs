//! src/core/types.rs
//!
//! Core type definitions for key input and command dispatch
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifiers`: keyboard modifier bitmask (Shift, Control, Mod1)
//! - `KeySym`: a normalised (lowercased) key symbol name
//! - `KeyEvent`: one raw key press as delivered by the input collaborator
//! - `ChordCombo` / `BindingSequence`: one keystroke, and an ordered list of
//!   keystrokes forming a multi-keystroke binding
//! - `CommandKind` / `Command`: the window-manager command vocabulary
//!
//! All bitmask arithmetic in the trie and resolver happens on `Modifiers`;
//! names are resolved to masks exactly once, during sequence parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

bitflags::bitflags! {
    /// Keyboard modifier bitmask.
    ///
    /// The bit values match the X11 state-mask layout so that a raw event
    /// mask from the input collaborator can be wrapped without translation.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u32 {
        const SHIFT   = 1 << 0;
        const CONTROL = 1 << 2;
        const MOD1    = 1 << 3;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, flag) in [
            ("Shift", Modifiers::SHIFT),
            ("Control", Modifiers::CONTROL),
            ("Mod1", Modifiers::MOD1),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, "+")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Resolve a modifier name from the binding grammar to its mask bit.
///
/// The table is case-sensitive: `Shift`, `Control`/`Ctrl`, `Mod1`/`Alt`.
/// Returns `None` for anything else; the sequence parser turns that into
/// a per-binding error naming the offending token.
pub fn modifier_from_name(name: &str) -> Option<Modifiers> {
    match name {
        "Shift" => Some(Modifiers::SHIFT),
        "Control" | "Ctrl" => Some(Modifiers::CONTROL),
        "Mod1" | "Alt" => Some(Modifiers::MOD1),
        _ => None,
    }
}

/// A normalised key symbol name.
///
/// Key names in the binding grammar are case-insensitive; they are lowercased
/// here, once, so that every later comparison (trie lookup, abort-key check)
/// is a plain equality test. The display-server collaborator is expected to
/// hand the resolver pre-lowercased symbol names as well.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySym(String);

impl KeySym {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeySym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raw key press: symbol plus the modifier mask held with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub keysym: KeySym,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(keysym: &str, modifiers: Modifiers) -> Self {
        Self {
            keysym: KeySym::new(keysym),
            modifiers,
        }
    }
}

/// One keystroke within a binding sequence: a key plus its required modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChordCombo {
    pub modifiers: Modifiers,
    pub keysym: KeySym,
}

impl fmt::Display for ChordCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.keysym)
        } else {
            write!(f, "{}+{}", self.modifiers, self.keysym)
        }
    }
}

/// An ordered list of chords that together trigger one command.
///
/// The sequence parser guarantees at least one combo; the trie compiler
/// rejects an empty sequence before insertion as a second line of defence.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BindingSequence {
    pub combos: Vec<ChordCombo>,
}

impl fmt::Display for BindingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, combo) in self.combos.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{combo}")?;
        }
        Ok(())
    }
}

/// The window-manager command vocabulary.
///
/// `Unknown` is a sentinel for names the loader does not recognise; it is
/// installed (with a warning) rather than failing the batch, so a config
/// written for a newer build still mostly works on an older one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    CloseWindow,
    CreateAnchor,
    Exec,
    SwitchAnchor,
    SwitchWindow,
    Unknown,
}

impl CommandKind {
    /// Resolve a command name from the config. Unrecognised names map to
    /// the `Unknown` sentinel rather than an error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "close_window" => CommandKind::CloseWindow,
            "create_anchor" => CommandKind::CreateAnchor,
            "exec" => CommandKind::Exec,
            "switch_anchor" => CommandKind::SwitchAnchor,
            "switch_window" => CommandKind::SwitchWindow,
            _ => CommandKind::Unknown,
        }
    }

    /// Required argument count for each command.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::CloseWindow | CommandKind::CreateAnchor | CommandKind::Unknown => 0,
            CommandKind::Exec | CommandKind::SwitchAnchor | CommandKind::SwitchWindow => 1,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::CloseWindow => write!(f, "close_window"),
            CommandKind::CreateAnchor => write!(f, "create_anchor"),
            CommandKind::Exec => write!(f, "exec"),
            CommandKind::SwitchAnchor => write!(f, "switch_anchor"),
            CommandKind::SwitchWindow => write!(f, "switch_window"),
            CommandKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A complete command: type plus its argument list.
///
/// Commands are opaque to the trie and resolver; they are stored at terminal
/// trie nodes and handed to the dispatch collaborator on a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(kind: CommandKind, args: Vec<String>) -> Self {
        Self { kind, args }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
