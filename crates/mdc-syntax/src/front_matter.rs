//! YAML front matter at the top of a container.
//!
//! ```text
//! ::card
//! ---
//! title: Hello
//! class: [wide, dark]
//! ---
//! Body
//! ::
//! ```
//!
//! Top-level keys become attributes of the innermost open container.

use mdc_engine::{BlockRule, BlockState, CLASS_ATTR, Error, ParentType};
use serde_yaml::Value;

use crate::rules;
use crate::stack::ContainerStack;

const DELIMITER: &str = "---";

/// Why a front matter body could not be attached.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The body isn't valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The body is a scalar or a sequence.
    #[error("front matter must be a mapping")]
    NotAMapping,
    /// A value has no JSON form, e.g. a map with non-string keys.
    #[error("value can't be stringified: {0}")]
    Json(#[from] serde_json::Error),
}

/// Block rule that merges front matter into the enclosing container.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontMatterRule;

impl BlockRule for FrontMatterRule {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        if state.parent != ParentType::Other(rules::CONTAINER) {
            return Ok(false);
        }
        let Some(frame) = ContainerStack::innermost(state) else {
            return Ok(false);
        };
        // Only the first block of the container.
        if state.tokens.len() != frame.token_index + 1 {
            return Ok(false);
        }
        if !is_delimiter(state.line_text(start_line)) {
            return Ok(false);
        }

        let Some(close) =
            (start_line + 1..end_line).find(|&line| is_delimiter(state.line_text(line)))
        else {
            return Ok(false);
        };

        let body = state.get_lines(start_line + 1, close, state.blk_indent, false);
        let attrs = match parse_front_matter(&body) {
            Ok(attrs) => attrs,
            Err(err) => {
                tracing::warn!(line = start_line, error = %err, "ignoring front matter");
                return Ok(false);
            }
        };

        if silent {
            return Ok(true);
        }

        state.tokens[frame.token_index].attrs.merge_all(&attrs);
        state.line = close + 1;
        Ok(true)
    }
}

fn is_delimiter(text: &str) -> bool {
    text.trim_end() == DELIMITER
}

/// Decode a front matter body into attribute pairs.
///
/// String values are kept as they are and other values become JSON text.
/// A `class` sequence is joined with spaces. An empty body yields no pairs.
///
/// # Errors
///
/// Fails when the body isn't valid YAML, isn't a mapping, or holds a value
/// that has no JSON form.
pub fn parse_front_matter(body: &str) -> Result<Vec<(String, String)>, FrontMatterError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mapping = match serde_yaml::from_str::<Value>(body)? {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    mapping
        .iter()
        .map(|(key, value)| -> Result<_, FrontMatterError> {
            let key = stringify(key)?;
            let value = match value {
                Value::Sequence(items) if key == CLASS_ATTR => items
                    .iter()
                    .map(stringify)
                    .collect::<Result<Vec<_>, _>>()?
                    .join(" "),
                value => stringify(value)?,
            };
            Ok((key, value))
        })
        .collect()
}

fn stringify(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::tests::parse;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_owned(), v.to_owned())
    }

    #[test]
    fn test_scalars_and_structures() {
        let body = "title: Hello\ncount: 3\nopen: true\ntags: [a, b]\nmeta:\n  x: 1\n";
        let attrs = parse_front_matter(body).unwrap();
        assert_eq!(
            attrs,
            vec![
                pair("title", "Hello"),
                pair("count", "3"),
                pair("open", "true"),
                pair("tags", r#"["a","b"]"#),
                pair("meta", r#"{"x":1}"#),
            ]
        );
    }

    #[test]
    fn test_class_sequence_is_joined() {
        let attrs = parse_front_matter("class: [wide, dark]\n").unwrap();
        assert_eq!(attrs, vec![pair("class", "wide dark")]);
    }

    #[test]
    fn test_empty_and_invalid_bodies() {
        assert!(parse_front_matter("").unwrap().is_empty());
        assert!(parse_front_matter("~\n").unwrap().is_empty());
        assert!(matches!(
            parse_front_matter("- a\n- b\n"),
            Err(FrontMatterError::NotAMapping)
        ));
        assert!(matches!(
            parse_front_matter("a: [unclosed\n"),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_attaches_to_container() {
        let src = "::card{.base}\n---\ntitle: Hi\nclass: [wide, base]\n---\nBody\n::\n";
        let tokens = parse(src);
        let attrs: Vec<_> = tokens[0].attrs.iter().collect();
        assert_eq!(attrs, vec![("class", "base wide"), ("title", "Hi")]);
        assert_eq!(tokens[1].kind, "paragraph_open");
        assert_eq!(tokens[2].content, "Body");
    }

    #[test]
    fn test_attaches_to_innermost_container() {
        let tokens = parse(":::outer\n::inner\n---\nx: 1\n---\n::\n:::\n");
        assert_eq!(tokens[0].attrs.get("x"), None);
        assert_eq!(tokens[1].tag, "inner");
        assert_eq!(tokens[1].attrs.get("x"), Some("1"));
    }

    #[test]
    fn test_outside_container_is_a_rule() {
        let tokens = parse("---\ntitle: x\n---\n");
        assert_eq!(tokens[0].kind, "hr");
    }

    #[test]
    fn test_unclosed_delimiter_declines() {
        let tokens = parse("::card\n---\ntitle: x\n::\n");
        assert!(tokens[0].attrs.is_empty());
        assert_eq!(tokens[1].kind, "hr");
    }

    #[test]
    fn test_only_first_block() {
        let tokens = parse("::card\nintro\n\n---\nx: 1\n---\n::\n");
        assert!(tokens[0].attrs.is_empty());
        assert!(tokens.iter().any(|t| t.kind == "hr"));
    }

    #[test]
    fn test_slot_body_is_not_front_matter() {
        let tokens = parse("::card\n#header\n---\nx: 1\n---\n::\n");
        assert!(tokens[0].attrs.is_empty());
        assert_eq!(tokens[1].kind, "mdc_block_slot");
        assert_eq!(tokens[1].attrs.get("x"), None);
    }

    #[test]
    fn test_invalid_yaml_declines() {
        let tokens = parse("::card\n---\n- a\n---\n::\n");
        assert!(tokens[0].attrs.is_empty());
        assert_eq!(tokens[1].kind, "hr");
    }
}
