//! Brace-delimited attribute fragments: `{#id .class key="value" flag}`.

use crate::SyntaxError;

/// Attribute key produced by `#id`.
pub const ID_KEY: &str = "id";
/// Attribute key produced by `.class`.
pub const CLASS_KEY: &str = "class";

/// Attributes captured from a `{...}` fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    /// Key/value pairs in source order. Keys may repeat.
    pub props: Vec<(String, String)>,
    /// Offset just past the closing `}`.
    pub index: usize,
}

/// Scan the props fragment starting at `start`.
///
/// Entries are separated by whitespace:
/// - `#x` becomes `("id", "x")` and `.x` becomes `("class", "x")`; both can
///   be chained without spaces (`.a.b#c`)
/// - `key="v"`, `key='v'` and `key=v` become `(key, v)`; a backslash escapes
///   the next character inside quotes
/// - a bare `key` becomes `(key, "true")`
///
/// Characters that can't start an entry are skipped.
///
/// # Example
///
/// ```
/// use mdc_syntax::search_props;
///
/// let props = search_props(r#"{#main .a.b lang="en" open}"#, 0).unwrap();
/// assert_eq!(props.props[0], ("id".to_owned(), "main".to_owned()));
/// assert_eq!(props.props.len(), 5);
/// ```
pub fn search_props(src: &str, start: usize) -> Result<Props, SyntaxError> {
    if src.as_bytes().get(start) != Some(&b'{') {
        return Err(SyntaxError::NotABracket {
            expected: '{',
            index: start,
        });
    }

    let unterminated = SyntaxError::UnterminatedProps { index: start };
    let mut props = Vec::new();
    let mut rest = &src[start + 1..];

    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            return Err(unterminated);
        };

        match first {
            '}' => {
                return Ok(Props {
                    props,
                    index: src.len() - rest.len() + 1,
                });
            }
            '#' | '.' => {
                let end = rest[1..]
                    .find(|c: char| c.is_whitespace() || matches!(c, '.' | '#' | '}'))
                    .map_or(rest.len(), |i| i + 1);
                let value = &rest[1..end];
                if !value.is_empty() {
                    let key = if first == '#' { ID_KEY } else { CLASS_KEY };
                    props.push((key.to_owned(), value.to_owned()));
                }
                rest = &rest[end..];
            }
            c if is_key_start(c) => {
                let (key, value, after) = parse_entry(rest).ok_or_else(|| unterminated.clone())?;
                props.push((key.to_owned(), value));
                rest = after;
            }
            c => rest = &rest[c.len_utf8()..],
        }
    }
}

fn is_key_start(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '@' | '$')
}

/// Parse `key`, `key=value` or `key="value"`.
///
/// Returns `None` when a quoted value runs past the end of input.
fn parse_entry(s: &str) -> Option<(&str, String, &str)> {
    let key_end = s
        .find(|c: char| c.is_whitespace() || matches!(c, '=' | '}'))
        .unwrap_or(s.len());
    let key = &s[..key_end];

    let Some(after_eq) = s[key_end..].strip_prefix('=') else {
        return Some((key, "true".to_owned(), &s[key_end..]));
    };

    match after_eq.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let (value, rest) = parse_quoted(&after_eq[1..], quote)?;
            Some((key, value, rest))
        }
        _ => {
            let end = after_eq
                .find(|c: char| c.is_whitespace() || c == '}')
                .unwrap_or(after_eq.len());
            Some((key, after_eq[..end].to_owned(), &after_eq[end..]))
        }
    }
}

/// Read up to the closing `quote`, resolving backslash escapes.
fn parse_quoted(s: &str, quote: char) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            c if c == quote => return Some((value, &s[i + 1..])),
            c => value.push(c),
        }
    }
    None
}
