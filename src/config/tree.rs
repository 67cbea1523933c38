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

//! src/config/tree.rs
//!
//! Generic parse-tree builder
//!
//! Consumes the token stream and produces one ordered tree mirroring brace
//! nesting and `.` concatenation. One `ParseNode` is one statement: the
//! tokens on its line plus, if a `{` followed, the statements of its block
//! as children.
//!
//! Unbalanced braces and a concatenation left open at end of input are
//! fatal errors here, not silent corruption.

use crate::config::error::ConfigError;
use crate::config::tokenizer::{TokenKind, Tokenizer};

/// One configuration statement and its nested block.
///
/// Only the tree root has zero tokens; every other node is created by its
/// first token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseNode {
    pub tokens: Vec<String>,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// First token of the statement, the statement keyword.
    pub fn keyword(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}

/// Build the parse tree for an entire token stream.
///
/// Maintains an explicit stack of container nodes, rooted at a synthetic
/// token-less node. A newline closes the statement under assembly (unless a
/// concatenation is pending), `{` turns that statement into the container
/// for what follows, `}` closes the innermost container.
pub fn build_tree(tokenizer: &mut Tokenizer) -> Result<ParseNode, ConfigError> {
    let mut stack: Vec<ParseNode> = vec![ParseNode::default()];
    let mut current: Option<ParseNode> = None;
    let mut concat_pending = false;
    let mut line = 1;

    while let Some(token) = tokenizer.next_token()? {
        line = token.line;
        match token.kind {
            TokenKind::Newline => {
                if concat_pending {
                    // Statement continues on the next line.
                    continue;
                }
                if let Some(node) = current.take() {
                    top(&mut stack).children.push(node);
                }
            }
            TokenKind::LBrace => {
                let node = current
                    .take()
                    .ok_or(ConfigError::BraceWithoutStatement { line })?;
                stack.push(node);
            }
            TokenKind::RBrace => {
                if let Some(node) = current.take() {
                    top(&mut stack).children.push(node);
                }
                if stack.len() == 1 {
                    return Err(ConfigError::UnbalancedBrace { line });
                }
                let closed = stack.pop().unwrap_or_default();
                top(&mut stack).children.push(closed);
            }
            TokenKind::Period => {
                let has_token = current.as_ref().is_some_and(|n| !n.tokens.is_empty());
                if !concat_pending && has_token {
                    concat_pending = true;
                } else {
                    append(&mut current, &mut concat_pending, token.text);
                }
            }
            TokenKind::Literal => {
                append(&mut current, &mut concat_pending, token.text);
            }
        }
    }

    if concat_pending {
        return Err(ConfigError::DanglingConcat { line });
    }
    if let Some(node) = current.take() {
        top(&mut stack).children.push(node);
    }
    if stack.len() > 1 {
        return Err(ConfigError::UnclosedBrace {
            line,
            open: stack.len() - 1,
        });
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Top of the container stack. The stack always holds at least the root.
fn top(stack: &mut [ParseNode]) -> &mut ParseNode {
    let last = stack.len() - 1;
    &mut stack[last]
}

/// Append a token to the statement under assembly, creating it if needed.
/// A pending concatenation glues the text onto the last token instead.
fn append(current: &mut Option<ParseNode>, concat_pending: &mut bool, text: String) {
    let node = current.get_or_insert_with(ParseNode::default);
    if *concat_pending {
        *concat_pending = false;
        match node.tokens.last_mut() {
            Some(last) => last.push_str(&text),
            None => node.tokens.push(text),
        }
    } else {
        node.tokens.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<ParseNode, ConfigError> {
        build_tree(&mut Tokenizer::new(source))
    }

    #[test]
    fn test_flat_statements() {
        let root = parse("foo bar\nbaz\n").unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].tokens, vec!["foo", "bar"]);
        assert_eq!(root.children[1].tokens, vec!["baz"]);
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_concatenation() {
        let root = parse("foo.bar\n").unwrap();
        assert_eq!(root.children[0].tokens, vec!["foobar"]);
    }

    #[test]
    fn test_concatenation_with_whitespace() {
        let root = parse("foo . bar\n").unwrap();
        assert_eq!(root.children[0].tokens, vec!["foobar"]);
    }

    #[test]
    fn test_concatenation_spans_newline() {
        let root = parse("foo .\nbar\n").unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tokens, vec!["foobar"]);
    }

    #[test]
    fn test_concatenation_of_quoted_parts() {
        let root = parse("exec 'xterm ' . '-rv'\n").unwrap();
        assert_eq!(root.children[0].tokens, vec!["exec", "xterm -rv"]);
    }

    #[test]
    fn test_leading_period_is_a_token() {
        let root = parse(". foo\n").unwrap();
        assert_eq!(root.children[0].tokens, vec![".", "foo"]);
    }

    #[test]
    fn test_nested_blocks() {
        let root = parse("window {\n  match {\n    name term\n  }\n}\n").unwrap();
        assert_eq!(root.children.len(), 1);
        let window = &root.children[0];
        assert_eq!(window.keyword(), Some("window"));
        assert_eq!(window.children.len(), 1);
        let match_node = &window.children[0];
        assert_eq!(match_node.keyword(), Some("match"));
        assert_eq!(match_node.children[0].tokens, vec!["name", "term"]);
    }

    #[test]
    fn test_block_on_one_line() {
        let root = parse("outer { inner }\n").unwrap();
        let outer = &root.children[0];
        assert_eq!(outer.tokens, vec!["outer"]);
        assert_eq!(outer.children[0].tokens, vec!["inner"]);
    }

    #[test]
    fn test_statement_after_block() {
        let root = parse("a {\nb\n}\nc\n").unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].tokens, vec!["a"]);
        assert_eq!(root.children[1].tokens, vec!["c"]);
    }

    #[test]
    fn test_unbalanced_closing_brace_is_fatal() {
        assert_eq!(parse("}\n"), Err(ConfigError::UnbalancedBrace { line: 1 }));
    }

    #[test]
    fn test_unclosed_brace_is_fatal() {
        assert_eq!(
            parse("a {\nb\n"),
            Err(ConfigError::UnclosedBrace { line: 2, open: 1 })
        );
    }

    #[test]
    fn test_brace_without_statement_is_fatal() {
        assert_eq!(
            parse("{\n}\n"),
            Err(ConfigError::BraceWithoutStatement { line: 1 })
        );
    }

    #[test]
    fn test_dangling_concatenation_is_fatal() {
        assert_eq!(parse("foo ."), Err(ConfigError::DanglingConcat { line: 1 }));
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let root = parse("").unwrap();
        assert!(root.tokens.is_empty());
        assert!(root.children.is_empty());
    }
}
