//! Optional sanitation of rendered markup.
//!
//! The renderer only ever emits `img`, `br` and `span` fragments, so
//! sanitation is not required for correctness. Callers that embed the
//! output somewhere stricter can pass a [`SanitizeHtml`] implementation to
//! [`crate::mana::render_mana_html_with`] and get a final cleaning pass.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html, Node};

/// A post-processing pass over finished markup.
pub trait SanitizeHtml {
    /// Return a cleaned copy of `html`.
    fn sanitize_html(&self, html: &str) -> String;
}

/// No-op sanitizer that returns the markup unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl SanitizeHtml for PassThrough {
    fn sanitize_html(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Allow-list sanitizer scoped to the renderer's output vocabulary.
///
/// Elements `img`, `br`, `strong`, `em`, `span` and `div` survive with
/// their `src`, `alt`, `class`, `title` and `style` attributes. `script`
/// and `style` elements are removed together with their content. Any other
/// element is dropped while its children are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowList;

const ALLOWED_TAGS: [&str; 6] = ["img", "br", "strong", "em", "span", "div"];
// Attribute emission order matches the fragments the renderer produces.
const ALLOWED_ATTRS: [&str; 5] = ["src", "alt", "class", "title", "style"];
const VOID_TAGS: [&str; 2] = ["img", "br"];

impl SanitizeHtml for AllowList {
    fn sanitize_html(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut out = String::with_capacity(html.len());
        write_children(fragment.root_element(), &mut out);
        out
    }
}

fn write_children(parent: ElementRef, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => {
                let raw: &str = &text.text;
                out.push_str(&encode_text(raw));
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_element(element, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef, out: &mut String) {
    let tag = element.value().name();

    // Dangerous containers go away entirely, content included.
    if tag == "script" || tag == "style" {
        return;
    }

    if !ALLOWED_TAGS.contains(&tag) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(tag);
    let mut has_attrs = false;
    for name in ALLOWED_ATTRS {
        if let Some(value) = element.value().attr(name) {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
            has_attrs = true;
        }
    }

    if VOID_TAGS.contains(&tag) {
        out.push_str(if has_attrs { " />" } else { "/>" });
        return;
    }

    out.push('>');
    write_children(element, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_returns_input_unchanged() {
        let html = r#"<script>alert(1)</script><b>x</b>"#;
        assert_eq!(PassThrough.sanitize_html(html), html);
    }

    #[test]
    fn test_allowlist_keeps_renderer_fragments_intact() {
        let html = r#"Add <img src="https://icons.example/G.svg" alt="{G}" class="mana-symbol" title="{G}" />.<br/>Draw a card."#;
        assert_eq!(AllowList.sanitize_html(html), html);
    }

    #[test]
    fn test_allowlist_strips_script_with_content() {
        assert_eq!(
            AllowList.sanitize_html("before<script>alert(1)</script>after"),
            "beforeafter"
        );
    }

    #[test]
    fn test_allowlist_strips_style_element_with_content() {
        assert_eq!(
            AllowList.sanitize_html("a<style>.x { color: red }</style>b"),
            "ab"
        );
    }

    #[test]
    fn test_allowlist_unwraps_unknown_elements() {
        assert_eq!(
            AllowList.sanitize_html(r#"<a href="https://example.com">link</a>"#),
            "link"
        );
        assert_eq!(AllowList.sanitize_html("<b>bold</b> text"), "bold text");
    }

    #[test]
    fn test_allowlist_drops_unknown_attributes() {
        assert_eq!(
            AllowList.sanitize_html(r#"<span class="c" onclick="alert(1)">x</span>"#),
            r#"<span class="c">x</span>"#
        );
    }

    #[test]
    fn test_allowlist_reencodes_text() {
        assert_eq!(
            AllowList.sanitize_html("1 &amp; 2 &lt; 3"),
            "1 &amp; 2 &lt; 3"
        );
    }

    #[test]
    fn test_allowlist_keeps_nested_allowed_structure() {
        let html = r#"<div class="box"><em>a</em><strong>b</strong></div>"#;
        assert_eq!(AllowList.sanitize_html(html), html);
    }

    #[test]
    fn test_allowlist_empty_input() {
        assert_eq!(AllowList.sanitize_html(""), "");
    }
}
