//! `name [content] {props} remainder` fragments.

use std::sync::LazyLock;

use regex::Regex;

use crate::{SyntaxError, parse_bracket_content, search_props};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z$][$A-Za-z0-9_.\-]*").unwrap());

/// A block name plus its optional content and props.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockParams {
    /// Kebab-cased component name.
    pub name: String,
    /// Raw text of the `[...]` fragment.
    pub content: Option<String>,
    /// Pairs from the `{...}` fragment, in source order.
    pub props: Option<Vec<(String, String)>>,
    /// Text that didn't reduce to content or props.
    pub remaining: Option<String>,
}

impl BlockParams {
    /// Props as a slice, empty when none were given.
    #[must_use]
    pub fn props(&self) -> &[(String, String)] {
        self.props.as_deref().unwrap_or_default()
    }
}

/// Parse the text after a block marker.
///
/// Leftover text is never dropped: anything that isn't a `[...]` followed by
/// a `{...}` ends up in [`BlockParams::remaining`], including a props
/// fragment that fails to scan.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidBlockParams`] when the trimmed input is
/// empty or doesn't start with an identifier.
///
/// # Example
///
/// ```
/// use mdc_syntax::parse_block_params;
///
/// let params = parse_block_params(" MyAlert[Heads up]{.warn} ").unwrap();
/// assert_eq!(params.name, "my-alert");
/// assert_eq!(params.content.as_deref(), Some("Heads up"));
/// assert!(params.remaining.is_none());
/// ```
pub fn parse_block_params(input: &str) -> Result<BlockParams, SyntaxError> {
    let input = input.trim();
    let Some(name) = NAME_RE.find(input) else {
        return Err(SyntaxError::InvalidBlockParams(input.to_owned()));
    };

    let mut params = BlockParams {
        name: kebab_case(name.as_str()),
        ..BlockParams::default()
    };
    let mut rest = input[name.end()..].trim();

    if rest.starts_with('[')
        && let Ok(bracket) = parse_bracket_content(rest, 0)
    {
        params.content = Some(bracket.content.to_owned());
        rest = rest[bracket.end_index..].trim();
    }

    if rest.starts_with('{') {
        match search_props(rest, 0) {
            Ok(props) => {
                params.props = Some(props.props);
                rest = rest[props.index..].trim();
            }
            Err(err) => {
                tracing::trace!(error = %err, "props fragment did not scan");
            }
        }
    }

    if !rest.is_empty() {
        params.remaining = Some(rest.to_owned());
    }

    Ok(params)
}

/// Convert an identifier to kebab-case.
///
/// Words break at `-`, `_`, `.`, `/` and whitespace, at a lower-to-upper
/// case change, and before the last capital of an upper-case run that is
/// followed by lower case. Digits don't break a word by themselves, but a
/// capital after them still starts one (`h1Title` becomes `h1-title`).
///
/// # Example
///
/// ```
/// use mdc_syntax::kebab_case;
///
/// assert_eq!(kebab_case("XMLHttpRequest"), "xml-http-request");
/// assert_eq!(kebab_case("prose_h1"), "prose-h1");
/// ```
#[must_use]
pub fn kebab_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_upper: Option<bool> = None;

    for c in input.chars() {
        if matches!(c, '-' | '_' | '.' | '/') || c.is_whitespace() {
            push_word(&mut words, &mut current);
            prev_upper = None;
            continue;
        }

        let upper = if c.is_ascii_digit() {
            None
        } else {
            Some(c.is_uppercase())
        };

        match (prev_upper, upper) {
            (Some(false), Some(true)) => push_word(&mut words, &mut current),
            (Some(true), Some(false)) if current.chars().count() > 1 => {
                if let Some(last) = current.pop() {
                    push_word(&mut words, &mut current);
                    current.push(last);
                }
            }
            _ => {}
        }

        current.push(c);
        prev_upper = upper;
    }

    push_word(&mut words, &mut current);
    words
}

fn push_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_only() {
        let params = parse_block_params("alert").unwrap();
        assert_eq!(
            params,
            BlockParams {
                name: "alert".to_owned(),
                ..BlockParams::default()
            }
        );
    }

    #[test]
    fn test_content_and_props() {
        let params = parse_block_params(r"card [Hello \] there] {.big #c1}").unwrap();
        assert_eq!(params.name, "card");
        assert_eq!(params.content.as_deref(), Some(r"Hello \] there"));
        assert_eq!(
            params.props(),
            &[
                ("class".to_owned(), "big".to_owned()),
                ("id".to_owned(), "c1".to_owned())
            ]
        );
        assert_eq!(params.remaining, None);
    }

    #[test]
    fn test_trailing_text_is_remaining() {
        let params = parse_block_params("alert{.x} and more").unwrap();
        assert_eq!(params.props().len(), 1);
        assert_eq!(params.remaining.as_deref(), Some("and more"));

        let params = parse_block_params("smile: is great").unwrap();
        assert_eq!(params.name, "smile");
        assert_eq!(params.remaining.as_deref(), Some(": is great"));
    }

    #[test]
    fn test_unterminated_fragments_are_remaining() {
        let params = parse_block_params("alert[open").unwrap();
        assert_eq!(params.content, None);
        assert_eq!(params.remaining.as_deref(), Some("[open"));

        let params = parse_block_params("alert{.x").unwrap();
        assert_eq!(params.props, None);
        assert_eq!(params.remaining.as_deref(), Some("{.x"));
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            parse_block_params("   "),
            Err(SyntaxError::InvalidBlockParams(String::new()))
        );
        assert!(matches!(
            parse_block_params("1abc"),
            Err(SyntaxError::InvalidBlockParams(s)) if s == "1abc"
        ));
        assert!(parse_block_params("_x").is_err());
    }

    #[test]
    fn test_name_is_kebab_cased() {
        assert_eq!(parse_block_params("MyComponent").unwrap().name, "my-component");
        assert_eq!(parse_block_params("my_comp.part").unwrap().name, "my-comp-part");
        assert_eq!(parse_block_params("$special").unwrap().name, "$special");
    }

    #[test]
    fn test_normalized_input_has_no_remaining() {
        for input in ["alert", "my-alert[x]", "my-alert{.a}", "my-alert[x]{#b c=1}"] {
            let params = parse_block_params(input).unwrap();
            assert_eq!(params.remaining, None, "{input}");
        }
    }

    #[test]
    fn test_kebab_case_words() {
        assert_eq!(kebab_case("fooBar"), "foo-bar");
        assert_eq!(kebab_case("FooBar"), "foo-bar");
        assert_eq!(kebab_case("UButton"), "u-button");
        assert_eq!(kebab_case("XMLHttpRequest"), "xml-http-request");
        assert_eq!(kebab_case("foo_bar baz/qux.quux"), "foo-bar-baz-qux-quux");
        assert_eq!(kebab_case("h1Title"), "h1-title");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
        assert_eq!(kebab_case("ALLCAPS"), "allcaps");
    }
}
