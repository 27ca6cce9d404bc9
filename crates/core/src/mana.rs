//! Mana-token text rendering.
//!
//! Turns free-form card text containing `{G}`-style symbol tokens into a
//! single HTML string: every token with an entry in the symbol map becomes
//! an `<img>` pointing at the symbol's icon, every unknown token degrades to
//! a visible `<span>`, and everything around the tokens is HTML-escaped.
//! Rendering never fails; the worst outcome for any input is plain escaped
//! text.

use std::collections::HashMap;

use crate::sanitize::SanitizeHtml;

/// Lookup table from token text (braces included) to an icon URI.
pub type SymbolMap = HashMap<String, String>;

/// CSS class applied to icon and fallback fragments unless overridden.
pub const DEFAULT_ICON_CLASS: &str = "mana-symbol";

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Class attribute emitted on every `<img>` and fallback `<span>`.
    pub icon_class: String,
    /// Replace line breaks in the source text with `<br/>` elements.
    pub newlines_to_breaks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            icon_class: DEFAULT_ICON_CLASS.to_string(),
            newlines_to_breaks: true,
        }
    }
}

/// Escape text for HTML while leaving `{` and `}` intact so symbol tokens
/// stay recognizable. Ampersands are replaced first so entities produced by
/// the later replacements are not escaped a second time.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render card text to HTML, substituting `{...}` tokens from `symbols`.
///
/// `None` and the empty string both render to the empty string. The steps,
/// in order: escape the text, substitute tokens, then turn newlines into
/// `<br/>` when the options ask for it.
pub fn render_mana_html(text: Option<&str>, symbols: &SymbolMap, options: &RenderOptions) -> String {
    render_mana_html_with(text, symbols, options, None)
}

/// Like [`render_mana_html`], additionally passing the finished markup
/// through `sanitizer` when one is given.
pub fn render_mana_html_with(
    text: Option<&str>,
    symbols: &SymbolMap,
    options: &RenderOptions,
    sanitizer: Option<&dyn SanitizeHtml>,
) -> String {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return String::new(),
    };

    let escaped = escape_text(text);
    let substituted = substitute_tokens(&escaped, symbols, options);

    let html = if options.newlines_to_breaks {
        substituted.replace("\r\n", "<br/>").replace('\n', "<br/>")
    } else {
        substituted
    };

    match sanitizer {
        Some(sanitizer) => sanitizer.sanitize_html(&html),
        None => html,
    }
}

/// Replace every `{...}` token in already-escaped text with its fragment.
///
/// Single left-to-right pass: an opening brace starts a token and the next
/// closing brace ends it. An opening brace with no closing brace after it,
/// and the empty `{}` pair, are kept as literal text.
fn substitute_tokens(escaped: &str, symbols: &SymbolMap, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        match candidate.find('}') {
            // At least one character between the braces: a token.
            Some(close) if close > 1 => {
                out.push_str(&token_fragment(&candidate[..=close], symbols, options));
                rest = &candidate[close + 1..];
            }
            // "{}" names no symbol; keep it verbatim.
            Some(close) => {
                out.push_str(&candidate[..=close]);
                rest = &candidate[close + 1..];
            }
            None => {
                out.push_str(candidate);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Build the markup fragment for one token. A mapped token becomes an
/// `<img>` whose alt and title repeat the token text; an unmapped token
/// becomes a `<span>` showing the token itself, so a missing or stale
/// symbol map degrades the output instead of breaking it.
fn token_fragment(token: &str, symbols: &SymbolMap, options: &RenderOptions) -> String {
    let class = &options.icon_class;
    match symbols.get(token) {
        // Icon URIs come from the trusted symbol catalog and are emitted
        // as-is; the token text is escaped again for attribute positions.
        Some(uri) => format!(
            r#"<img src="{uri}" alt="{alt}" class="{class}" title="{alt}" />"#,
            alt = escape_text(token),
        ),
        None => format!(
            r#"<span class="{class}">{}</span>"#,
            escape_text(token)
        ),
    }
}
