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

//! src/config/tokenizer.rs
//!
//! Character-level tokenizer for the configuration language
//!
//! Converts a source string into a lazy sequence of typed tokens. The
//! grammar, in priority order:
//!
//! - whitespace outside quotes terminates a pending token and is otherwise
//!   discarded; a newline is additionally emitted as its own token, after
//!   the pending token if there is one
//! - `'...'` and `"..."` toggle quote mode; the two kinds do not nest
//!   inside each other; a quote still open at its newline or at end of
//!   input is a fatal error reported on the line the quote opened
//! - `\` escapes one character (`f n r t v` map to control characters,
//!   anything else passes through literally, an escaped newline is
//!   swallowed entirely)
//! - `#` outside quotes discards the rest of the line
//! - `{`, `}` and `.` are self-delimiting structural tokens when bare;
//!   quoting or escaping them produces an ordinary literal instead
//!
//! A single token may not exceed [`MAX_TOKEN_LEN`] bytes.

use std::iter::Peekable;
use std::str::Chars;

use crate::config::error::ConfigError;

/// Absolute ceiling on the byte length of one token.
pub const MAX_TOKEN_LEN: usize = 1024;

/// Lexical category of one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare word or anything that involved quoting/escaping.
    Literal,
    /// Statement terminator.
    Newline,
    /// `{`: opens a nested block.
    LBrace,
    /// `}`: closes the innermost block.
    RBrace,
    /// `.`: concatenation between two literals on one statement.
    Period,
}

/// One lexical unit with the line it was completed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

/// Streaming tokenizer over a configuration source.
///
/// `next_token` yields one token per call; `Ok(None)` is the well-formed
/// end of input, `Err` a malformed-input abort.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Structural character or newline seen while a token was still being
    /// assembled; re-delivered on the next call.
    pushback: Option<char>,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            pushback: None,
            line: 1,
        }
    }

    /// Line number of the most recently delivered character, 1-based.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_char(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.chars.next())
    }

    /// Produce the next token, `None` at a well-formed end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, ConfigError> {
        let mut text = String::new();
        let mut started = false;
        // A token that involved any quoting or escaping stays a Literal
        // even if its text happens to spell a structural character.
        let mut tainted = false;
        let mut quote: Option<char> = None;
        let mut quote_line = 0;

        loop {
            let c = match self.next_char() {
                Some(c) => c,
                None => {
                    if quote.is_some() {
                        return Err(ConfigError::UnterminatedQuote { line: quote_line });
                    }
                    if started {
                        return Ok(Some(self.finish(text, tainted)));
                    }
                    return Ok(None);
                }
            };

            if let Some(q) = quote {
                match c {
                    _ if c == q => quote = None,
                    '\n' => return Err(ConfigError::UnterminatedQuote { line: quote_line }),
                    '\\' => {
                        self.consume_escape(&mut text)?;
                    }
                    _ => self.push_char(&mut text, c)?,
                }
                continue;
            }

            match c {
                '\n' => {
                    if started {
                        self.pushback = Some('\n');
                        return Ok(Some(self.finish(text, tainted)));
                    }
                    let token = Token {
                        kind: TokenKind::Newline,
                        text: String::new(),
                        line: self.line,
                    };
                    self.line += 1;
                    return Ok(Some(token));
                }
                _ if c.is_whitespace() => {
                    if started {
                        return Ok(Some(self.finish(text, tainted)));
                    }
                }
                '\'' | '"' => {
                    quote = Some(c);
                    quote_line = self.line;
                    started = true;
                    tainted = true;
                }
                '\\' => {
                    // A swallowed escaped newline contributes nothing and
                    // must not open an empty token on its own.
                    if self.consume_escape(&mut text)? {
                        started = true;
                        tainted = true;
                    }
                }
                '#' => {
                    // Comment runs to the newline, which is not consumed.
                    while let Some(&next) = self.chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                    if started {
                        return Ok(Some(self.finish(text, tainted)));
                    }
                }
                '{' | '}' | '.' => {
                    if started {
                        self.pushback = Some(c);
                        return Ok(Some(self.finish(text, tainted)));
                    }
                    let kind = match c {
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        _ => TokenKind::Period,
                    };
                    return Ok(Some(Token {
                        kind,
                        text: c.to_string(),
                        line: self.line,
                    }));
                }
                _ => {
                    started = true;
                    self.push_char(&mut text, c)?;
                }
            }
        }
    }

    /// Handle the character following a `\`, inside or outside quotes.
    /// Returns whether anything was added to the token.
    fn consume_escape(&mut self, text: &mut String) -> Result<bool, ConfigError> {
        match self.next_char() {
            // A trailing backslash at end of input is discarded.
            None => Ok(false),
            // Escaped newline: swallowed, neither ends the token nor
            // produces a newline token.
            Some('\n') => {
                self.line += 1;
                Ok(false)
            }
            Some(c) => {
                let resolved = match c {
                    'f' => '\x0c',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'v' => '\x0b',
                    other => other,
                };
                self.push_char(text, resolved)?;
                Ok(true)
            }
        }
    }

    fn push_char(&mut self, text: &mut String, c: char) -> Result<(), ConfigError> {
        if text.len() + c.len_utf8() > MAX_TOKEN_LEN {
            return Err(ConfigError::TokenTooLong {
                line: self.line,
                limit: MAX_TOKEN_LEN,
            });
        }
        text.push(c);
        Ok(())
    }

    fn finish(&self, text: String, tainted: bool) -> Token {
        // Structural characters only ever reach here via quoting or
        // escaping, which forces Literal, so no content check is needed.
        debug_assert!(tainted || !matches!(text.as_str(), "{" | "}" | "."));
        Token {
            kind: TokenKind::Literal,
            text,
            line: self.line,
        }
    }
}
