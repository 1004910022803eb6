//! ATX headings.

use super::{BlockRule, BlockState, is_space};
use crate::Error;
use crate::token::Nesting;

/// `#` through `######` followed by a space or the end of the line.
pub struct Heading;

impl BlockRule for Heading {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        _end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        if state.relative_indent(start_line) >= 4 {
            return Ok(false);
        }

        let info = state.line_info(start_line);
        let bytes = state.src.as_bytes();
        let mut pos = info.content_start();
        let max = info.end;

        let level = state.skip_chars(pos, b'#').min(max) - pos;
        if level == 0 || level > 6 {
            return Ok(false);
        }
        pos += level;
        if pos < max && !is_space(bytes[pos]) {
            return Ok(false);
        }
        if silent {
            return Ok(true);
        }

        // Strip an optional closing sequence: `## title ##`.
        let mut end = state.skip_spaces_back(max, pos);
        let closing = state.skip_chars_back(end, b'#', pos);
        if closing > pos && is_space(bytes[closing - 1]) {
            end = closing;
        }
        let content = state.src[pos..end].trim().to_owned();

        state.line = start_line + 1;
        let tag = format!("h{level}");
        let markup = "#".repeat(level);

        let open = state.push("heading_open", &tag, Nesting::Open);
        open.markup.clone_from(&markup);
        open.map = Some((start_line, start_line + 1));

        let inline = state.push("inline", "", Nesting::SelfClosing);
        inline.content = content;
        inline.map = Some((start_line, start_line + 1));
        inline.children = Some(Vec::new());

        let close = state.push("heading_close", &tag, Nesting::Close);
        close.markup = markup;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::MarkdownParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_levels() {
        let tokens = MarkdownParser::new().parse("### Title ###\n").unwrap();
        assert_eq!(tokens[0].tag, "h3");
        assert_eq!(tokens[1].content, "Title");
        assert_eq!(tokens[2].kind, "heading_close");
    }

    #[test]
    fn test_hash_without_space_is_not_heading() {
        let tokens = MarkdownParser::new().parse("#tag\n").unwrap();
        assert_eq!(tokens[0].kind, "paragraph_open");
    }

    #[test]
    fn test_seven_hashes_is_not_heading() {
        let tokens = MarkdownParser::new().parse("####### x\n").unwrap();
        assert_eq!(tokens[0].kind, "paragraph_open");
    }

    #[test]
    fn test_empty_heading() {
        let tokens = MarkdownParser::new().parse("#\n").unwrap();
        assert_eq!(tokens[0].tag, "h1");
        assert_eq!(tokens[1].content, "");
    }
}
