//! Token stream primitives.
//!
//! The stream is flat at block level: containers are expressed as an opening
//! token, their children, and a matching closing token. Inline content hangs
//! off `inline` tokens as [`Token::children`].

/// Whether a token opens, closes, or stands alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Nesting {
    /// Opening tag (`+1`).
    Open,
    /// Self-contained token (`0`).
    SelfClosing,
    /// Closing tag (`-1`).
    Close,
}

/// Attribute key that accumulates values instead of overwriting them.
pub const CLASS_ATTR: &str = "class";

/// Ordered attribute list.
///
/// Keys keep their first insertion position. [`set`](Self::set) overwrites,
/// [`join_class`](Self::join_class) unions space-separated class names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Attrs {
    items: Vec<(String, String)>,
}

impl Attrs {
    /// Create an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.items.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.items.push((key, value));
        }
    }

    /// Add class names, skipping ones already present.
    pub fn join_class(&mut self, classes: &str) {
        let index = match self.items.iter().position(|(k, _)| k == CLASS_ATTR) {
            Some(index) => index,
            None => {
                if classes.split_whitespace().next().is_none() {
                    return;
                }
                self.items.push((CLASS_ATTR.to_owned(), String::new()));
                self.items.len() - 1
            }
        };

        let value = &mut self.items[index].1;
        for class in classes.split_whitespace() {
            if value.split(' ').any(|existing| existing == class) {
                continue;
            }
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(class);
        }
    }

    /// Apply one attribute: `class` unions, everything else overwrites.
    pub fn merge(&mut self, key: &str, value: &str) {
        if key == CLASS_ATTR {
            self.join_class(value);
        } else {
            self.set(key, value);
        }
    }

    /// Apply a sequence of pairs in order with [`merge`](Self::merge) semantics.
    pub fn merge_all<'p, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = &'p (String, String)>,
    {
        for (key, value) in pairs {
            self.merge(key, value);
        }
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A single entry of the token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// Token type, e.g. `paragraph_open`, `inline`, `mdc_block_open`.
    pub kind: String,
    /// HTML tag name (or component name).
    pub tag: String,
    /// Open, close, or self-contained.
    pub nesting: Nesting,
    /// Attributes applied to the tag.
    pub attrs: Attrs,
    /// Raw delimiter text (fence characters, marker runs, emphasis markers).
    pub markup: String,
    /// Extra information: fence info string, container name.
    pub info: String,
    /// Text content (inline source for `inline` tokens, literal text for `text`).
    pub content: String,
    /// Whether the token belongs to the block stream.
    pub block: bool,
    /// Hidden tokens are skipped by the renderer but keep their children.
    pub hidden: bool,
    /// Nesting level in the stream at the time the token was pushed.
    pub level: usize,
    /// Source line range `[start, end)`.
    pub map: Option<(usize, usize)>,
    /// Inline children.
    pub children: Option<Vec<Token>>,
}

impl Token {
    /// Create a token with empty attributes and content.
    #[must_use]
    pub fn new(kind: impl Into<String>, tag: impl Into<String>, nesting: Nesting) -> Self {
        Self {
            kind: kind.into(),
            tag: tag.into(),
            nesting,
            attrs: Attrs::new(),
            markup: String::new(),
            info: String::new(),
            content: String::new(),
            block: false,
            hidden: false,
            level: 0,
            map: None,
            children: None,
        }
    }

    /// Create a plain `text` token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        let mut token = Self::new("text", "", Nesting::SelfClosing);
        token.content = content.into();
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut attrs = Attrs::new();
        attrs.set("id", "a");
        attrs.set("title", "t");
        attrs.set("id", "b");

        let items: Vec<_> = attrs.iter().collect();
        assert_eq!(items, vec![("id", "b"), ("title", "t")]);
    }

    #[test]
    fn test_join_class_unions_values() {
        let mut attrs = Attrs::new();
        attrs.join_class("note  warning");
        attrs.join_class("warning big");
        assert_eq!(attrs.get("class"), Some("note warning big"));
    }

    #[test]
    fn test_join_class_dedupes_first_value() {
        let mut attrs = Attrs::new();
        attrs.join_class("a a b");
        assert_eq!(attrs.get("class"), Some("a b"));
    }

    #[test]
    fn test_join_class_ignores_blank() {
        let mut attrs = Attrs::new();
        attrs.join_class("   ");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_merge_all_last_write_wins() {
        let pairs = vec![
            ("class".to_owned(), "a".to_owned()),
            ("id".to_owned(), "x".to_owned()),
            ("class".to_owned(), "b".to_owned()),
            ("id".to_owned(), "y".to_owned()),
        ];
        let mut attrs = Attrs::new();
        attrs.merge_all(&pairs);

        assert_eq!(attrs.get("class"), Some("a b"));
        assert_eq!(attrs.get("id"), Some("y"));
        assert_eq!(attrs.len(), 2);
    }
}
