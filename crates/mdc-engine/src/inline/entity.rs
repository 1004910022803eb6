//! Character references: `&amp;`, `&#123;`, `&#x1F600;`.

use std::sync::LazyLock;

use regex::Regex;

use super::{InlineRule, InlineState};
use crate::Error;

static NAMED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^&([A-Za-z][A-Za-z0-9]{1,31});").unwrap());

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^&#(?:[xX]([0-9A-Fa-f]{1,6})|([0-9]{1,7}));").unwrap());

/// Named references the tokenizer decodes.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{A0}'),
    ("copy", '\u{A9}'),
    ("reg", '\u{AE}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
];

pub struct Entity;

impl InlineRule for Entity {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        if state.byte_at(start) != Some(b'&') {
            return Ok(false);
        }

        let rest = &state.src[start..state.pos_max];
        let decoded = decode_numeric(rest).or_else(|| decode_named(rest));

        match decoded {
            Some((c, len)) => {
                if !silent {
                    state.pending.push(c);
                }
                state.pos += len;
            }
            None => {
                if !silent {
                    state.pending.push('&');
                }
                state.pos += 1;
            }
        }
        Ok(true)
    }
}

fn decode_numeric(rest: &str) -> Option<(char, usize)> {
    let caps = NUMERIC_RE.captures(rest)?;
    let code = match (caps.get(1), caps.get(2)) {
        (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok()?,
        (None, Some(dec)) => dec.as_str().parse().ok()?,
        (None, None) => return None,
    };
    let c = match code {
        0 => '\u{FFFD}',
        code => char::from_u32(code).unwrap_or('\u{FFFD}'),
    };
    Some((c, caps[0].len()))
}

fn decode_named(rest: &str) -> Option<(char, usize)> {
    let caps = NAMED_RE.captures(rest)?;
    let name = &caps[1];
    NAMED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, c)| (c, caps[0].len()))
}

#[cfg(test)]
mod tests {
    use crate::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn text(src: &str) -> String {
        let md = MarkdownParser::new();
        let mut out = Vec::new();
        md.inline.parse(src, &md, &mut out).unwrap();
        out.into_iter().map(|t| t.content).collect()
    }

    #[test]
    fn test_named_references() {
        assert_eq!(text("a &amp; b &lt;c&gt;"), "a & b <c>");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(text("&#65;&#x42;&#0;"), "AB\u{FFFD}");
    }

    #[test]
    fn test_unknown_reference_is_literal() {
        assert_eq!(text("&bogus; & x"), "&bogus; & x");
    }
}
