use crate::app::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

use super::{
    render_delete_confirmation, render_export_prompt, render_header, render_help_screen,
    render_note_form, render_notes, render_status_bar, Palette,
};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.size();
    let palette = Palette::for_theme(app.controller.theme());

    frame.render_widget(Block::default().style(palette.base()), size);

    // Create main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(0),     // Notes
            Constraint::Length(1),  // Status bar
        ])
        .split(size);

    render_header(frame, app, &palette, chunks[0]);
    render_notes(frame, app, &palette, chunks[1]);
    render_status_bar(frame, app, &palette, chunks[2]);

    // Overlays (drawn last)
    match app.mode {
        InputMode::Form => render_note_form(frame, app, &palette, size),
        InputMode::ConfirmDelete(_) => render_delete_confirmation(frame, app, &palette, size),
        InputMode::ExportPrompt => render_export_prompt(frame, app, &palette, size),
        InputMode::Help => render_help_screen(frame, app, &palette, size),
        InputMode::Normal | InputMode::Search => {}
    }
}
