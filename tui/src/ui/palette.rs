use ratatui::style::{Color, Style};
use smartnotes_core::{Mood, Theme};

/// Colors for one display mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub pinned: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                border: Color::Gray,
                selection_bg: Color::LightBlue,
                selection_fg: Color::Black,
                highlight_bg: Color::Yellow,
                highlight_fg: Color::Black,
                pinned: Color::Magenta,
                error: Color::Red,
            },
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                border: Color::DarkGray,
                selection_bg: Color::Blue,
                selection_fg: Color::White,
                highlight_bg: Color::Yellow,
                highlight_fg: Color::Black,
                pinned: Color::LightMagenta,
                error: Color::LightRed,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn mood(&self, mood: Mood) -> Color {
        match mood {
            Mood::Positive => Color::Green,
            Mood::Urgent => self.error,
            Mood::Neutral => self.muted,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
