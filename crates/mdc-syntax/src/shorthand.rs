//! Single-line block components: `:name[content]{props}`.

use mdc_engine::{BlockRule, BlockState, Error, Nesting, Token};

use crate::{MARKER, kinds, parse_block_params, rules};

/// Block rule for the one-line component form.
///
/// A line that starts with a single marker and a letter always names a
/// component, so a name that fails to parse there is a hard error rather
/// than a declined match. Any other character after the marker (`:30`,
/// `:_x`) leaves the line to ordinary markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShorthandRule;

impl BlockRule for ShorthandRule {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        _end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        let text = state.line_text(start_line);
        let mut chars = text.chars();
        if chars.next() != Some(MARKER) || !chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        {
            return Ok(false);
        }

        let params = parse_block_params(&text[MARKER.len_utf8()..])
            .map_err(|err| Error::rule(rules::SHORTHAND, err))?;

        if let Some(remaining) = &params.remaining {
            tracing::trace!(
                line = start_line,
                remaining = %remaining,
                "shorthand left to inline parsing"
            );
            return Ok(false);
        }

        if silent {
            return Ok(true);
        }

        let map = Some((start_line, start_line + 1));
        if let Some(content) = params.content {
            let open = state.push(kinds::SHORTHAND, &params.name, Nesting::Open);
            open.attrs.merge_all(params.props.iter().flatten());
            open.map = map;

            let inline = state.push("inline", "", Nesting::SelfClosing);
            inline.map = map;
            inline.children = Some(vec![Token::text(content)]);

            state.push(kinds::SHORTHAND, &params.name, Nesting::Close);
        } else {
            let token = state.push(kinds::SHORTHAND, &params.name, Nesting::SelfClosing);
            token.attrs.merge_all(params.props.iter().flatten());
            token.map = map;
        }

        state.line = start_line + 1;
        Ok(true)
    }
}
