use crate::app::{App, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use smartnotes_core::view::{NO_MATCHES_TITLE, WELCOME_TITLE};
use smartnotes_core::{FormField, NoteCard, RenderedView};

use super::markup::{markup_to_lines, markup_to_plain};
use super::palette::Palette;

/// Render the header with title, search, sort and theme
pub fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let searching = app.mode == InputMode::Search;
    let term = if searching { app.search_input.as_str() } else { app.controller.search_term() };
    let search_text = if searching {
        format!("{}▊", term)
    } else if term.is_empty() {
        "-".to_string()
    } else {
        term.to_string()
    };

    let header_spans = vec![
        Span::styled(
            " 📝 Smart Notes Pro ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("Search: ", Style::default().fg(palette.muted)),
        Span::styled(
            search_text,
            if searching {
                Style::default().fg(palette.highlight_fg).bg(palette.highlight_bg)
            } else {
                Style::default().fg(palette.fg)
            },
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Sort: {}", app.controller.sort_mode()),
            Style::default().fg(palette.muted),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Theme: {}", app.controller.theme()),
            Style::default().fg(palette.muted),
        ),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Render the note list, or the welcome / no-results message
pub fn render_notes(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" Notes ({}) ", app.view.cards().len()))
        .title_alignment(Alignment::Left);

    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let cards = match &app.view {
        RenderedView::Welcome => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(WELCOME_TITLE, heading)),
                Line::from(format!(
                    "Press '{}' to create your first note.",
                    app.config.keymap.add_note
                )),
            ];
            render_message(frame, lines, block, palette, area);
            return;
        }
        RenderedView::NoMatches { term } => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(NO_MATCHES_TITLE, heading)),
                Line::from(vec![
                    Span::raw("Your search for \""),
                    Span::styled(term.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("\" did not match any notes."),
                ]),
                Line::from("Try a different search term or add a new note!"),
            ];
            render_message(frame, lines, block, palette, area);
            return;
        }
        RenderedView::Cards(cards) => cards,
    };

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| ListItem::new(card_text(card, palette)))
        .collect();

    let mut state = ListState::default();
    if !cards.is_empty() {
        state.select(Some(app.selected));
    }

    let list = List::new(items)
        .style(palette.base())
        .block(block)
        .highlight_style(Style::default().bg(palette.selection_bg).fg(palette.selection_fg))
        .highlight_symbol("▌");

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_message(
    frame: &mut Frame,
    lines: Vec<Line<'static>>,
    block: Block,
    palette: &Palette,
    area: Rect,
) {
    let message = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .style(palette.base())
        .wrap(Wrap { trim: true });
    frame.render_widget(message, area);
}

/// Lines for one card: title, meta, content, summary and a spacer
fn card_text(card: &NoteCard, palette: &Palette) -> Text<'static> {
    let mut lines = Vec::new();

    let pin = if card.pinned { "📌 " } else { "" };
    let title_color = if card.pinned { palette.pinned } else { palette.fg };
    let title_style = Style::default().add_modifier(Modifier::BOLD).fg(title_color);
    let mut header = vec![Span::styled(pin.to_string(), title_style)];
    for line in markup_to_lines(&card.title, title_style, palette) {
        header.extend(line.spans);
    }
    lines.push(Line::from(header));

    let meta = Style::default().fg(palette.muted);
    lines.push(Line::from(vec![
        Span::styled(format!("Created: {} | Mood: ", card.created), meta),
        Span::styled(
            format!("{} {}", card.mood, card.mood.emoji()).trim_end().to_string(),
            Style::default().fg(palette.mood(card.mood)),
        ),
        Span::styled(format!(" | Tags: {}", card.tags), meta),
    ]));

    lines.extend(markup_to_lines(&card.content, Style::default().fg(palette.fg), palette));

    lines.push(Line::from(Span::styled(
        format!("Summary: {}", markup_to_plain(&card.summary)),
        meta.add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));

    Text::from(lines)
}

pub fn render_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let (text, style) = match &app.status {
        Some(status) if status.is_error => (
            format!(" {} ", status.text),
            Style::default().bg(palette.error).fg(palette.bg),
        ),
        Some(status) => (
            format!(" {} ", status.text),
            Style::default().bg(palette.border).fg(palette.fg),
        ),
        None => {
            let km = &app.config.keymap;
            (
                format!(
                    concat!(
                        " {} notes | [{}:Add] [{}:Edit] [{}:Delete] [{}:Pin] [{}:Search] ",
                        "[{}:Sort] [{}:Theme] [{}:Export] [{}:Help] [{}:Quit] ",
                    ),
                    app.controller.notes().len(),
                    km.add_note,
                    km.edit_note,
                    km.delete_note,
                    km.toggle_pin,
                    km.search,
                    km.toggle_sort,
                    km.toggle_theme,
                    km.export,
                    km.help,
                    km.quit,
                ),
                Style::default().bg(palette.border).fg(palette.fg),
            )
        }
    };

    let status_bar = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}

/// Rect of `percent_x` by `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the add/edit form overlay
pub fn render_note_form(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let editor = app.controller.editor();
    let popup_area = centered_rect(70, 60, area);
    let heading = if editor.edit_id().is_some() { " Edit Note " } else { " New Note " };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(heading)
        .border_style(Style::default().fg(palette.accent))
        .style(palette.base());
    frame.render_widget(Clear, popup_area);
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 1,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(2),
        height: popup_area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let field_block = |label: &'static str, focused: bool| {
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(Style::default().fg(if focused {
                palette.accent
            } else {
                palette.border
            }))
    };

    let title_focused = editor.focus() == FormField::Title;
    let cursor = |focused: bool| if focused { "▊" } else { "" };

    let title = Paragraph::new(format!("{}{}", editor.title, cursor(title_focused)))
        .style(palette.base())
        .block(field_block(" Title ", title_focused));
    frame.render_widget(title, chunks[0]);

    let content = Paragraph::new(format!("{}{}", editor.content, cursor(!title_focused)))
        .style(palette.base())
        .wrap(Wrap { trim: false })
        .block(field_block(" Content (**bold**, # heading) ", !title_focused));
    frame.render_widget(content, chunks[1]);

    let hints = Paragraph::new(format!(
        "[{}: {}] [Tab: Switch field] [Esc: Cancel]",
        app.config.keymap.submit_form,
        editor.submit_label()
    ))
    .style(Style::default().fg(palette.muted))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

pub fn render_delete_confirmation(frame: &mut Frame, _app: &App, palette: &Palette, area: Rect) {
    let popup_width = 60.min(area.width);
    let popup_height = 5;

    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let text = "Are you sure you want to delete this note? (y/n)";
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title("Confirm Deletion")
                .borders(Borders::ALL)
                .style(Style::default().fg(palette.error)),
        )
        .style(palette.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area); // This clears the area behind the popup
    frame.render_widget(paragraph, popup_area);
}

pub fn render_export_prompt(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let popup_width = 60.min(area.width);
    let popup_height = 5;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Enter format to download (json or txt) ")
        .style(Style::default().fg(palette.accent));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 1,
        y: popup_area.y + 2,
        width: popup_area.width.saturating_sub(2),
        height: 1,
    };

    let text = format!("{}▊", app.export_input);
    let paragraph = Paragraph::new(text)
        .style(palette.base());

    frame.render_widget(paragraph, inner);
}

/// Render the help screen overlay
pub fn render_help_screen(frame: &mut Frame, app: &App, palette: &Palette, size: Rect) {
    let km = &app.config.keymap;
    let section = |name: &'static str| {
        Line::from(Span::styled(
            name,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |key: &str, what: &str| Line::from(format!("{:<13}{}", key, what));

    let help_text = vec![
        Line::from(""),
        section("Navigation"),
        entry(&format!("↑/↓ {}/{}", km.select_up, km.select_down), "Move selection"),
        entry(&km.search, "Search (Enter keeps filter, Esc clears it)"),
        entry(&km.toggle_sort, "Toggle newest/oldest"),
        Line::from(""),
        section("Notes"),
        entry(&km.add_note, "Add new note"),
        entry(&format!("{} / Enter", km.edit_note), "Edit selected note"),
        entry(&km.toggle_pin, "Pin / unpin"),
        entry(&format!("{} / Delete", km.delete_note), "Delete (asks first)"),
        Line::from(""),
        section("Form"),
        entry("Tab", "Switch between title and content"),
        entry(&km.submit_form, "Save"),
        entry("Esc", "Cancel"),
        Line::from(""),
        section("Other"),
        entry(&km.toggle_theme, "Toggle dark/light mode"),
        entry(&km.export, "Export notes (json or txt)"),
        entry(&km.help, "Show this help"),
        entry(&km.quit, "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            format!("Press '{}' or 'Esc' to close", km.help),
            Style::default().fg(palette.muted),
        )),
    ];

    let popup_width = 64.min(size.width);
    let popup_height = (help_text.len() as u16 + 2).min(size.height);
    let x = (size.width.saturating_sub(popup_width)) / 2;
    let y = (size.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .style(palette.base());

    frame.render_widget(Clear, popup_area);
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 1,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(2),
        height: popup_area.height.saturating_sub(2),
    };

    let paragraph = Paragraph::new(help_text)
        .wrap(Wrap { trim: true })
        .style(palette.base());

    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use smartnotes_core::Intent;
    use tempfile::tempdir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_welcome_screen_renders() {
        let dir = tempdir().unwrap();
        let mut app = App::open(dir.path(), Config::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal.draw(|f| crate::ui::render(f, &mut app)).unwrap();

        assert!(buffer_text(&terminal).contains("Welcome to Smart Notes Pro!"));
    }

    #[test]
    fn test_cards_render_title_and_tags() {
        let dir = tempdir().unwrap();
        let mut app = App::open(dir.path(), Config::default()).unwrap();
        app.controller.handle(Intent::OpenCreate).unwrap();
        app.controller.editor_mut().title = "Roadmap".to_string();
        app.controller.editor_mut().content = "project idea".to_string();
        app.controller.handle(Intent::Submit).unwrap();
        app.refresh();

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| crate::ui::render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Roadmap"));
        assert!(text.contains("Tags: Work, Idea"));
    }
}
