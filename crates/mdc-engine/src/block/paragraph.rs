//! Paragraphs: the catch-all block rule.

use super::{BlockRule, BlockState, ParentType, chains};
use crate::Error;
use crate::token::Nesting;

/// Consumes lines until a blank line or a rule of the `paragraph` chain
/// claims the next line.
pub struct Paragraph;

impl BlockRule for Paragraph {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        _end_line: usize,
        _silent: bool,
    ) -> Result<bool, Error> {
        let md = state.md;
        let end_line = state.line_max;
        let mut next_line = start_line + 1;

        {
            let mut scope = state.scope();
            scope.parent = ParentType::Paragraph;

            while next_line < end_line && !scope.is_empty(next_line) {
                // Lazy continuation lines can't start a new block.
                if scope.relative_indent(next_line) > 3 {
                    next_line += 1;
                    continue;
                }
                if md
                    .block
                    .interrupts(chains::PARAGRAPH, &mut scope, next_line, end_line)?
                {
                    break;
                }
                next_line += 1;
            }
        }

        let content = state
            .get_lines(start_line, next_line, state.blk_indent, false)
            .trim()
            .to_owned();
        state.line = next_line;

        let open = state.push("paragraph_open", "p", Nesting::Open);
        open.map = Some((start_line, next_line));

        let inline = state.push("inline", "", Nesting::SelfClosing);
        inline.content = content;
        inline.map = Some((start_line, next_line));
        inline.children = Some(Vec::new());

        state.push("paragraph_close", "p", Nesting::Close);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::MarkdownParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interrupted_by_heading() {
        let tokens = MarkdownParser::new().parse("text\n# Title\n").unwrap();
        assert_eq!(tokens[1].content, "text");
        assert_eq!(tokens[3].kind, "heading_open");
    }

    #[test]
    fn test_lazy_indented_line_continues() {
        let tokens = MarkdownParser::new().parse("text\n    # not a heading\n").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].content, "text\n    # not a heading");
    }

    #[test]
    fn test_indented_code_does_not_interrupt() {
        let tokens = MarkdownParser::new().parse("a\n    b\n").unwrap();
        assert_eq!(tokens.len(), 3);
    }
}
