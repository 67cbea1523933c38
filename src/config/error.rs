use thiserror::Error;

/// Fatal errors raised while compiling a configuration.
///
/// Any of these aborts the whole load; the caller keeps the previously
/// compiled configuration in place rather than installing a partial one.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A quoted string was still open at the end of its line or of the input.
    /// The line number is the one the quote opened on.
    #[error("line {line}: unterminated quoted string")]
    UnterminatedQuote { line: usize },

    /// A single token exceeded the length ceiling.
    #[error("line {line}: token exceeds {limit} bytes")]
    TokenTooLong { line: usize, limit: usize },

    /// A `}` appeared with no open block to close.
    #[error("line {line}: unbalanced '}}'")]
    UnbalancedBrace { line: usize },

    /// End of input was reached with one or more blocks still open.
    #[error("line {line}: {open} unclosed '{{'")]
    UnclosedBrace { line: usize, open: usize },

    /// A `{` appeared at the start of a statement, with nothing to attach
    /// the block to.
    #[error("line {line}: '{{' without a preceding statement")]
    BraceWithoutStatement { line: usize },

    /// The input ended in the middle of a `.` concatenation.
    #[error("line {line}: input ends in the middle of a '.' concatenation")]
    DanglingConcat { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_line_numbers() {
        let err = ConfigError::UnterminatedQuote { line: 7 };
        assert_eq!(err.to_string(), "line 7: unterminated quoted string");

        let err = ConfigError::TokenTooLong { line: 3, limit: 1024 };
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("1024"));
    }
}
