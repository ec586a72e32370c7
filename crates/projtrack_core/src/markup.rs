//! Markup rendering for description and comment text.
//!
//! # Responsibility
//! - Convert stored markup to sanitized HTML for display (`render`).
//! - Strip markup to plain text for previews (`preview`).
//!
//! # Invariants
//! - Source text is HTML-escaped before any tag is generated; raw HTML in
//!   user input never reaches the output.
//! - Only http(s) and relative URLs survive into `href`/`src` attributes.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static MARKDOWN_ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));
static MARKDOWN_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));
static MARKDOWN_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").expect("valid heading regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 100;

/// Renders markup text to sanitized HTML.
///
/// Supported subset: images, links, `**bold**`, `*italic*`, inline code,
/// `#` headings, and line breaks. Everything else displays verbatim,
/// HTML-escaped.
pub fn render(text: &str) -> String {
    let escaped = escape_html(text);

    let with_images = MARKDOWN_IMAGE_RE.replace_all(&escaped, |caps: &Captures<'_>| {
        let alt = &caps[1];
        let url = caps[2].trim();
        if is_safe_url(url) {
            format!(r#"<img src="{url}" alt="{alt}">"#)
        } else {
            alt.to_string()
        }
    });

    let with_links = MARKDOWN_LINK_RE.replace_all(&with_images, |caps: &Captures<'_>| {
        let label = &caps[1];
        let url = caps[2].trim();
        if is_safe_url(url) {
            format!(r#"<a href="{url}">{label}</a>"#)
        } else {
            label.to_string()
        }
    });

    let with_headings = MARKDOWN_HEADING_RE.replace_all(&with_links, |caps: &Captures<'_>| {
        let level = caps[1].len();
        let body = caps[2].trim();
        format!("<h{level}>{body}</h{level}>")
    });

    let with_bold = MARKDOWN_BOLD_RE.replace_all(&with_headings, "<strong>$1</strong>");
    let with_italic = MARKDOWN_ITALIC_RE.replace_all(&with_bold, "<em>$1</em>");
    let with_code = MARKDOWN_CODE_RE.replace_all(&with_italic, "<code>$1</code>");

    with_code.replace('\n', "<br>")
}

/// Derives a plain-text preview from markup text.
///
/// Rules: images removed, links unwrapped to their label, markdown symbols
/// stripped, whitespace collapsed, first 100 chars retained. Returns `None`
/// when nothing displayable remains.
pub fn preview(text: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(text, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn is_safe_url(url: &str) -> bool {
    if url.starts_with("http://") || url.starts_with("https://") {
        return true;
    }
    // Relative paths are fine; anything with a scheme separator is not.
    !url.contains(':')
}

#[cfg(test)]
mod tests {
    use super::{preview, render};

    #[test]
    fn render_escapes_raw_html() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn render_converts_inline_markup() {
        let html = render("**bold** and *soft* and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>soft</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn render_keeps_safe_links_and_drops_script_urls() {
        let html = render("[ok](https://example.com) [bad](javascript:alert(1))");
        assert!(html.contains(r#"<a href="https://example.com">ok</a>"#));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("bad"));
    }

    #[test]
    fn render_turns_headings_and_newlines_into_blocks() {
        let html = render("# Title\nbody");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<br>body"));
    }

    #[test]
    fn preview_strips_markup_and_limits_length() {
        let source = "# title\n\n- [link](https://example.com)\n**bold** `code`";
        let text = preview(source).expect("preview should exist");
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
        assert!(text.contains("link"));
        assert!(text.len() <= 100);
    }

    #[test]
    fn preview_of_image_only_text_is_none() {
        assert_eq!(preview("![cover](cover.png)"), None);
        assert_eq!(preview("   "), None);
    }
}
