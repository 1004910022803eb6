//! Flat `[...]` content extraction.

use crate::SyntaxError;

/// Content captured between square brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket<'a> {
    /// Raw text between the brackets; escapes are kept verbatim.
    pub content: &'a str,
    /// Offset just past the closing `]`.
    pub end_index: usize,
}

/// Scan the bracket starting at `start`.
///
/// The scan is flat: a nested `[` is ordinary text and the first unescaped
/// `]` ends it. A backslash always consumes the character after it.
///
/// # Example
///
/// ```
/// use mdc_syntax::parse_bracket_content;
///
/// let bracket = parse_bracket_content("prefix[content]suffix", 6).unwrap();
/// assert_eq!(bracket.content, "content");
/// assert_eq!(bracket.end_index, 15);
/// ```
pub fn parse_bracket_content(src: &str, start: usize) -> Result<Bracket<'_>, SyntaxError> {
    let bytes = src.as_bytes();
    if bytes.get(start) != Some(&b'[') {
        return Err(SyntaxError::NotABracket {
            expected: '[',
            index: start,
        });
    }

    let mut index = start + 1;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' if index + 1 < bytes.len() => index += 2,
            b']' => {
                return Ok(Bracket {
                    content: &src[start + 1..index],
                    end_index: index + 1,
                });
            }
            _ => index += 1,
        }
    }

    Err(SyntaxError::UnterminatedBracket { index: start })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str, start: usize) -> Option<(&str, usize)> {
        parse_bracket_content(src, start)
            .ok()
            .map(|b| (b.content, b.end_index))
    }

    #[test]
    fn test_simple_content() {
        assert_eq!(scan("[hello]", 0), Some(("hello", 7)));
    }

    #[test]
    fn test_escaped_closing_bracket() {
        assert_eq!(
            scan(r"[hello \] world]", 0),
            Some((r"hello \] world", 16))
        );
    }

    #[test]
    fn test_escaped_backslash_then_bracket() {
        assert_eq!(scan(r"[a\\]b]", 0), Some((r"a\\", 5)));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            parse_bracket_content("[hello", 0),
            Err(SyntaxError::UnterminatedBracket { index: 0 })
        );
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(scan("[]", 0), Some(("", 2)));
    }

    #[test]
    fn test_offset_start() {
        assert_eq!(scan("prefix[content]suffix", 6), Some(("content", 15)));
    }

    #[test]
    fn test_not_a_bracket() {
        assert_eq!(
            parse_bracket_content("hello", 0),
            Err(SyntaxError::NotABracket {
                expected: '[',
                index: 0
            })
        );
        assert!(parse_bracket_content("[x]", 5).is_err());
    }

    #[test]
    fn test_flat_no_nesting() {
        assert_eq!(scan("[a [b] c]", 0), Some(("a [b", 6)));
    }

    #[test]
    fn test_trailing_backslash() {
        assert!(parse_bracket_content("[abc\\", 0).is_err());
    }
}
