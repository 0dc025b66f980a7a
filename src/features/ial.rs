//! Inline attribute list (IAL) parsing
//!
//! Captions may carry an attribute block in either Pandoc form
//! (`{#id .class key="value"}`) or Kramdown form (`{: #id .class}`).
//! The parsed attributes end up on the table node and are re-emitted by
//! HTML-side consumers as ` id=".." class=".." key="value"`.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One IAL token: `#id`, `.class`, `key="value"`, `key='value'` or `key=value`
    static ref IAL_TOKEN: Regex = Regex::new(
        r#"(?x)
        \#(?P<id>[^\s.\#}]+)
        | \.(?P<class>[^\s.\#}]+)
        | (?P<key>[A-Za-z_][A-Za-z0-9_:-]*)=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s}]+))
        "#
    )
    .expect("IAL token regex");
}

/// Parsed attribute set with insertion order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub extra: IndexMap<String, String>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.extra.is_empty()
    }

    /// Render as HTML attribute text with a leading space per attribute,
    /// e.g. ` id="tbl" class="wide striped" data-note="x"`.
    pub fn to_html_string(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", id));
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }
        for (key, value) in &self.extra {
            out.push_str(&format!(" {}=\"{}\"", key, value));
        }
        out
    }

    /// Fold `other` into `self`; existing id/keys win (first writer)
    pub fn merge(&mut self, other: Attributes) {
        if self.id.is_none() {
            self.id = other.id;
        }
        for class in other.classes {
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        for (key, value) in other.extra {
            self.extra.entry(key).or_insert(value);
        }
    }
}

/// Parse the inside of an IAL block (text between the braces, Kramdown `:`
/// prefix already stripped).
pub fn parse_ial_content(content: &str) -> Attributes {
    let mut attrs = Attributes::default();
    for caps in IAL_TOKEN.captures_iter(content) {
        if let Some(id) = caps.name("id") {
            if attrs.id.is_none() {
                attrs.id = Some(id.as_str().to_string());
            }
        } else if let Some(class) = caps.name("class") {
            attrs.classes.push(class.as_str().to_string());
        } else if let Some(key) = caps.name("key") {
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("bare"))
                .map(|m| m.as_str())
                .unwrap_or("");
            attrs
                .extra
                .entry(key.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    attrs
}

/// Locate the last IAL block in `text` and parse it.
///
/// An IAL opens with `{` immediately followed by `:`, `#` or `.` and runs
/// to the next `}`. Returns the attributes plus the byte offset of the
/// opening brace, so callers can cut caption text off before it. Unmatched
/// braces are a pattern miss, not an error.
pub fn parse_trailing_ial(text: &str) -> Option<(Attributes, usize)> {
    let bytes = text.as_bytes();
    let mut found = None;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            match bytes.get(i + 1) {
                Some(b':') | Some(b'#') | Some(b'.') => found = Some(i),
                _ => {}
            }
        }
        i += 1;
    }
    let start = found?;
    let rest = &text[start + 1..];
    let close = rest.find('}')?;
    let mut content = &rest[..close];
    // Kramdown form: strip the marker colon
    if let Some(stripped) = content.strip_prefix(':') {
        content = stripped;
    }
    Some((parse_ial_content(content), start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pandoc_form() {
        let (attrs, start) = parse_trailing_ial("Caption {#tbl .wide}").unwrap();
        assert_eq!(start, 8);
        assert_eq!(attrs.id.as_deref(), Some("tbl"));
        assert_eq!(attrs.classes, vec!["wide".to_string()]);
        assert!(attrs.extra.is_empty());
    }

    #[test]
    fn test_kramdown_form() {
        let (attrs, _) = parse_trailing_ial("Caption {: #results .striped .wide}").unwrap();
        assert_eq!(attrs.id.as_deref(), Some("results"));
        assert_eq!(
            attrs.classes,
            vec!["striped".to_string(), "wide".to_string()]
        );
    }

    #[test]
    fn test_key_value_pairs() {
        let attrs = parse_ial_content("#t .c data-note=\"a b\" width=50%");
        assert_eq!(attrs.extra.get("data-note").map(String::as_str), Some("a b"));
        assert_eq!(attrs.extra.get("width").map(String::as_str), Some("50%"));
    }

    #[test]
    fn test_unmatched_brace_is_a_miss() {
        assert!(parse_trailing_ial("Caption {#tbl .wide").is_none());
        assert!(parse_trailing_ial("no braces here").is_none());
        // A brace not followed by an IAL marker is plain text
        assert!(parse_trailing_ial("set {a, b}").is_none());
    }

    #[test]
    fn test_last_block_wins() {
        let (attrs, _) = parse_trailing_ial("{.first} middle {.second}").unwrap();
        assert_eq!(attrs.classes, vec!["second".to_string()]);
    }

    #[test]
    fn test_to_html_string() {
        let mut attrs = Attributes::default();
        attrs.id = Some("tbl".into());
        attrs.classes = vec!["wide".into(), "striped".into()];
        attrs.extra.insert("data-x".into(), "1".into());
        assert_eq!(
            attrs.to_html_string(),
            " id=\"tbl\" class=\"wide striped\" data-x=\"1\""
        );
    }

    #[test]
    fn test_merge_first_writer_wins() {
        let mut a = parse_ial_content("#one .shared");
        let b = parse_ial_content("#two .shared .extra k=v");
        a.merge(b);
        assert_eq!(a.id.as_deref(), Some("one"));
        assert_eq!(a.classes, vec!["shared".to_string(), "extra".to_string()]);
        assert_eq!(a.extra.get("k").map(String::as_str), Some("v"));
    }
}
