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

//! src/bindings/sequence.rs
//!
//! Key-binding sequence grammar
//!
//! Parses compact binding strings such as `"Ctrl+Shift+U, Alt+M"` into a
//! [`BindingSequence`]: chords separated by commas, each chord zero or more
//! `modifier+` groups followed by exactly one key name.
//!
//! nom handles the shape of the grammar; name resolution happens afterwards
//! so that errors can name the offending modifier. Modifier names are
//! matched case-sensitively against the fixed table (`Shift`,
//! `Control`/`Ctrl`, `Mod1`/`Alt`); key names are case-insensitive and
//! lowercased into a [`KeySym`].

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    multi::separated_list1,
    sequence::delimited,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::types::{modifier_from_name, BindingSequence, ChordCombo, KeySym, Modifiers};

/// Per-binding parse failures. These never abort a whole load; the
/// offending binding is reported and skipped.
#[derive(Debug, Error, PartialEq)]
pub enum BindingError {
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("expected a key name at '{0}'")]
    MissingKey(String),

    #[error("empty binding sequence")]
    EmptySequence,
}

/// One modifier or key name: alphanumerics and underscores.
fn name_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// One chord as raw name tokens: `name (+ name)*`, whitespace-tolerant.
fn chord_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('+'), delimited(space0, name_token, space0)).parse(input)
}

/// Parse a full binding string into an ordered list of chord combos.
pub fn parse_sequence(input: &str) -> Result<BindingSequence, BindingError> {
    if input.trim().is_empty() {
        return Err(BindingError::EmptySequence);
    }

    let (rest, chords) = separated_list1(char(','), chord_tokens)
        .parse(input)
        .map_err(|err| match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                BindingError::MissingKey(e.input.to_string())
            }
            nom::Err::Incomplete(_) => BindingError::MissingKey(String::new()),
        })?;
    if !rest.is_empty() {
        // Leftover input means a chord ended without a key name, e.g. a
        // trailing "+" or ",".
        return Err(BindingError::MissingKey(rest.to_string()));
    }

    let mut combos = Vec::with_capacity(chords.len());
    for chord in chords {
        combos.push(resolve_chord(&chord)?);
    }
    Ok(BindingSequence { combos })
}

/// Resolve one chord's name tokens: every token but the last must be a
/// known modifier, the last is the key.
fn resolve_chord(tokens: &[&str]) -> Result<ChordCombo, BindingError> {
    let (&key, modifier_names) = match tokens.split_last() {
        Some(split) => split,
        None => return Err(BindingError::EmptySequence),
    };

    let mut modifiers = Modifiers::empty();
    for &name in modifier_names {
        match modifier_from_name(name) {
            Some(modifier) => modifiers |= modifier,
            None => return Err(BindingError::UnknownModifier(name.to_string())),
        }
    }

    Ok(ChordCombo {
        modifiers,
        keysym: KeySym::new(key),
    })
}
