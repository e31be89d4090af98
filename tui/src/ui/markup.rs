use once_cell::sync::Lazy;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

use super::palette::Palette;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>|&(?:amp|lt|gt|quot);|[^<&]+|&").expect("token pattern is valid")
});

#[derive(Default, Clone, Copy)]
struct Flags {
    bold: bool,
    heading: bool,
    highlight: bool,
}

impl Flags {
    fn style(&self, base: Style, palette: &Palette) -> Style {
        let mut style = base;
        if self.heading {
            style = style
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.highlight {
            style = style.bg(palette.highlight_bg).fg(palette.highlight_fg);
        }
        style
    }
}

/// Turn card markup (`<strong>`, `<h1>`, `<br>`, highlight spans and the four
/// escaped entities) into styled terminal lines
pub fn markup_to_lines(markup: &str, base: Style, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut flags = Flags::default();

    for token in TOKEN_RE.find_iter(markup).map(|m| m.as_str()) {
        let text = match token {
            "<strong>" => {
                flags.bold = true;
                continue;
            }
            "</strong>" => {
                flags.bold = false;
                continue;
            }
            "<h1>" => {
                flags.heading = true;
                continue;
            }
            "</h1>" => {
                flags.heading = false;
                continue;
            }
            "</span>" => {
                flags.highlight = false;
                continue;
            }
            "<br>" => {
                lines.push(Line::from(std::mem::take(&mut spans)));
                continue;
            }
            t if t.starts_with("<span") => {
                flags.highlight = true;
                continue;
            }
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            t if t.starts_with('<') => continue,
            t => t,
        };
        spans.push(Span::styled(text.to_string(), flags.style(base, palette)));
    }
    lines.push(Line::from(spans));
    lines
}

/// Plain text of a markup fragment
pub fn markup_to_plain(markup: &str) -> String {
    let palette = Palette::default();
    markup_to_lines(markup, Style::default(), &palette)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_split_lines() {
        let lines = markup_to_lines("a<br>b<br>c", Style::default(), &Palette::default());
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_plain_text_unescapes() {
        assert_eq!(markup_to_plain("&lt;b&gt; &amp; &quot;q&quot;"), "<b> & \"q\"");
        assert_eq!(markup_to_plain("<h1>Title</h1><br><strong>x</strong>"), "Title\nx");
    }

    #[test]
    fn test_styles_follow_tags() {
        let palette = Palette::default();
        let lines = markup_to_lines(
            r#"<strong>bold</strong> <span class="highlight">hit</span>"#,
            Style::default(),
            &palette,
        );
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[2].style.bg, Some(palette.highlight_bg));
    }
}
