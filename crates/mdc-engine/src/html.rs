//! HTML renderer for token streams.
//!
//! Hidden tokens emit no tags of their own, which is how a paragraph
//! wrapper can disappear while its inline content still renders.

use std::fmt::Write;

use crate::token::{Nesting, Token};

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Renders a token stream to HTML.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render block tokens (and their inline children).
    #[must_use]
    pub fn render(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        for (idx, token) in tokens.iter().enumerate() {
            match token.kind.as_str() {
                "inline" => {
                    if let Some(children) = &token.children {
                        self.render_inline(children, &mut out);
                    }
                }
                "fence" => render_fence(token, &mut out),
                "code_block" => {
                    let _ = writeln!(out, "<pre><code>{}</code></pre>", escape_html(&token.content));
                }
                _ => render_tag(tokens, idx, &mut out),
            }
        }
        out
    }

    /// Render an inline token list.
    pub fn render_inline(&self, tokens: &[Token], out: &mut String) {
        for (idx, token) in tokens.iter().enumerate() {
            match token.kind.as_str() {
                "text" => out.push_str(&escape_html(&token.content)),
                "code_inline" => {
                    let _ = write!(
                        out,
                        "<code{}>{}</code>",
                        render_attrs(token),
                        escape_html(&token.content)
                    );
                }
                "softbreak" => out.push('\n'),
                "hardbreak" => out.push_str("<br>\n"),
                _ => render_tag(tokens, idx, out),
            }
        }
    }
}

fn render_fence(token: &Token, out: &mut String) {
    let content = escape_html(&token.content);
    match token.info.split_whitespace().next() {
        Some(lang) => {
            let _ = writeln!(
                out,
                r#"<pre><code class="language-{}">{content}</code></pre>"#,
                escape_html(lang)
            );
        }
        None => {
            let _ = writeln!(out, "<pre><code>{content}</code></pre>");
        }
    }
}

/// Render a generic open/close/self-closing tag.
fn render_tag(tokens: &[Token], idx: usize, out: &mut String) {
    let token = &tokens[idx];
    if token.hidden {
        return;
    }

    // Keep block tags on their own line after a hidden sibling.
    if token.block && token.nesting != Nesting::Close && idx > 0 && tokens[idx - 1].hidden {
        out.push('\n');
    }

    let attrs = render_attrs(token);
    match token.nesting {
        Nesting::Open => {
            let _ = write!(out, "<{}{attrs}>", token.tag);
        }
        Nesting::Close => {
            let _ = write!(out, "</{}>", token.tag);
        }
        Nesting::SelfClosing if VOID_ELEMENTS.contains(&token.tag.as_str()) => {
            let _ = write!(out, "<{}{attrs}>", token.tag);
        }
        Nesting::SelfClosing => {
            let _ = write!(out, "<{tag}{attrs}></{tag}>", tag = token.tag);
        }
    }

    if token.block && needs_line_feed(tokens, idx) {
        out.push('\n');
    }
}

fn needs_line_feed(tokens: &[Token], idx: usize) -> bool {
    let token = &tokens[idx];
    if token.nesting != Nesting::Open {
        return true;
    }
    match tokens.get(idx + 1) {
        Some(next) if next.kind == "inline" || next.hidden => false,
        Some(next) => !(next.nesting == Nesting::Close && next.tag == token.tag),
        None => true,
    }
}

fn render_attrs(token: &Token) -> String {
    let mut out = String::new();
    for (key, value) in token.attrs.iter() {
        let _ = write!(out, r#" {}="{}""#, escape_html(key), escape_html(value));
    }
    out
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn render(src: &str) -> String {
        let tokens = MarkdownParser::new().parse(src).unwrap();
        HtmlRenderer::new().render(&tokens)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
    }

    #[test]
    fn test_paragraph_and_heading() {
        assert_eq!(render("# Hi\n\na *b* & c\n"), "<h1>Hi</h1>\n<p>a <em>b</em> &amp; c</p>\n");
    }

    #[test]
    fn test_fence_language_class() {
        assert_eq!(
            render("```rust title\nlet a = 1 < 2;\n```\n"),
            "<pre><code class=\"language-rust\">let a = 1 &lt; 2;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_hr_is_void() {
        assert_eq!(render("---\n"), "<hr>\n");
    }

    #[test]
    fn test_hidden_tokens_keep_children() {
        let mut tokens = MarkdownParser::new().parse("text\n").unwrap();
        tokens[0].hidden = true;
        tokens[2].hidden = true;
        assert_eq!(HtmlRenderer::new().render(&tokens), "text");
    }

    #[test]
    fn test_non_void_self_closing_gets_end_tag() {
        let mut token = Token::new("widget", "my-widget", Nesting::SelfClosing);
        token.attrs.set("size", "2");
        token.block = true;
        assert_eq!(
            HtmlRenderer::new().render(&[token]),
            "<my-widget size=\"2\"></my-widget>\n"
        );
    }

    #[test]
    fn test_link_attributes() {
        assert_eq!(
            render("[a](/x?a=1&b=2)\n"),
            "<p><a href=\"/x?a=1&amp;b=2\">a</a></p>\n"
        );
    }
}
