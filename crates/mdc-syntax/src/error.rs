//! Syntax error types.

/// Failure of one of the fragment scanners.
///
/// Matchers turn these into a declined match; only the shorthand block
/// escalates [`InvalidBlockParams`](Self::InvalidBlockParams) to a hard error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The scanner was pointed at something other than its opening delimiter.
    #[error("expected `{expected}` at offset {index}")]
    NotABracket {
        /// Delimiter the scanner expected.
        expected: char,
        /// Offset that was inspected.
        index: usize,
    },
    /// No unescaped `]` before the end of input.
    #[error("unterminated `[` at offset {index}")]
    UnterminatedBracket {
        /// Offset of the opening bracket.
        index: usize,
    },
    /// No `}` (or closing quote) before the end of input.
    #[error("unterminated `{{` at offset {index}")]
    UnterminatedProps {
        /// Offset of the opening brace.
        index: usize,
    },
    /// The fragment has no leading identifier.
    #[error("invalid block params: `{0}`")]
    InvalidBlockParams(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SyntaxError::NotABracket {
                expected: '[',
                index: 3
            }
            .to_string(),
            "expected `[` at offset 3"
        );
        assert_eq!(
            SyntaxError::UnterminatedProps { index: 0 }.to_string(),
            "unterminated `{` at offset 0"
        );
        assert_eq!(
            SyntaxError::InvalidBlockParams("1abc".to_owned()).to_string(),
            "invalid block params: `1abc`"
        );
    }
}
