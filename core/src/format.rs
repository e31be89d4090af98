//! Markdown-lite formatting and search highlighting.
//!
//! Supported subset: `**bold**`, `# heading` lines and line breaks. Input is
//! HTML-escaped before any substitution, so the only tags in the output are the
//! ones produced here.
//!
//! Known limitations: bold is a single lazy pass, so nested or unbalanced `**`
//! markers give best-effort output; highlighting skips tags but may still land
//! inside an entity such as `&amp;` when the search term is a piece of it.

use once_cell::sync::Lazy;
use pulldown_cmark::escape::escape_html as write_escaped;
use regex::{Regex, RegexBuilder};

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#\s(.*?)$").expect("heading pattern is valid"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

pub const HIGHLIGHT_OPEN: &str = r#"<span class="highlight">"#;
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// Escape `&`, `<`, `>` and `"` for inclusion in markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // writing into a String cannot fail
    let _ = write_escaped(&mut escaped, text);
    escaped
}

/// Convert raw note text into display markup.
///
/// Bold and headings are substituted before newlines become `<br>`, since the
/// heading rule is anchored on line boundaries.
pub fn format_markdown(text: &str) -> String {
    let escaped = escape_html(text);
    let bolded = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    let headed = HEADING_RE.replace_all(&bolded, "<h1>$1</h1>");
    headed.replace('\n', "<br>")
}

/// Wrap every case-insensitive occurrence of `term` in a highlight span.
///
/// `markup` is expected to come from [`format_markdown`] or [`escape_html`];
/// the term is escaped the same way and matched literally. Text inside tags
/// is never touched.
pub fn highlight(markup: &str, term: &str) -> String {
    if term.is_empty() {
        return markup.to_string();
    }

    let pattern = regex::escape(&escape_html(term));
    let term_re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(err) => {
            log::warn!("highlight skipped, term could not be compiled: {}", err);
            return markup.to_string();
        }
    };

    let replacement = format!("{}${{0}}{}", HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE);
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;
    for tag in TAG_RE.find_iter(markup) {
        out.push_str(&term_re.replace_all(&markup[last..tag.start()], replacement.as_str()));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&term_re.replace_all(&markup[last..], replacement.as_str()));
    out
}
