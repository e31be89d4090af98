use anyhow::Result;
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::app::{App, InputMode};
use crate::config::key_matches;

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
    /// Mouse event
    Mouse(MouseEvent),
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => return Ok(Event::Key(key)),
                CEvent::Mouse(m) => return Ok(Event::Mouse(m)),
                _ => {}
            }
        }
        Ok(Event::Tick)
    }
}

/// Handle key events for the application
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // On Windows, crossterm reports both key press and release events.
    // We only want to handle press events to avoid duplicates.
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.mode {
        InputMode::Help => match key.code {
            KeyCode::Esc => app.close_help(),
            _ if key_matches(&app.config.keymap.help, &key) => app.close_help(),
            _ => {}
        },
        InputMode::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        },
        InputMode::ExportPrompt => match key.code {
            KeyCode::Esc => app.cancel_export(),
            KeyCode::Enter => app.confirm_export(),
            KeyCode::Backspace => {
                app.export_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.export_input.push(c);
            }
            _ => {}
        },
        InputMode::Search => match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.close_search(),
            KeyCode::Backspace => app.backspace_search_query(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.update_search_query(c);
            }
            _ => {}
        },
        InputMode::Form => handle_form_input(key, app),
        InputMode::Normal => handle_normal_input(key, app),
    }
}

fn handle_form_input(key: KeyEvent, app: &mut App) {
    if key_matches(&app.config.keymap.submit_form, &key) {
        app.submit_form();
        return;
    }

    let on_title = app.controller.editor().focus() == smartnotes_core::FormField::Title;
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::BackTab => app.form_next_field(),
        // Title is a single line; Enter moves on to the content
        KeyCode::Enter if on_title => app.form_next_field(),
        KeyCode::Enter => app.form_input('\n'),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => {
            // Allow AltGr combinations (CONTROL+ALT) for special characters
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                app.form_input(c);
            }
        }
        _ => {}
    }
}

fn handle_normal_input(key: KeyEvent, app: &mut App) {
    let keymap = app.config.keymap.clone();

    match key.code {
        KeyCode::Up => return app.move_up(),
        KeyCode::Down => return app.move_down(),
        KeyCode::Enter => return app.open_edit_selected(),
        KeyCode::Delete => return app.initiate_delete(),
        _ => {}
    }

    if key_matches(&keymap.quit, &key) {
        app.quit();
    } else if key_matches(&keymap.select_up, &key) {
        app.move_up();
    } else if key_matches(&keymap.select_down, &key) {
        app.move_down();
    } else if key_matches(&keymap.add_note, &key) {
        app.open_create();
    } else if key_matches(&keymap.edit_note, &key) {
        app.open_edit_selected();
    } else if key_matches(&keymap.delete_note, &key) {
        app.initiate_delete();
    } else if key_matches(&keymap.toggle_pin, &key) {
        app.toggle_pin_selected();
    } else if key_matches(&keymap.toggle_theme, &key) {
        app.toggle_theme();
    } else if key_matches(&keymap.toggle_sort, &key) {
        app.toggle_sort();
    } else if key_matches(&keymap.export, &key) {
        app.open_export();
    } else if key_matches(&keymap.search, &key) {
        app.open_search();
    } else if key_matches(&keymap.help, &key) {
        app.open_help();
    }
}

/// Handle mouse events for the application
pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use smartnotes_core::RenderedView;
    use tempfile::tempdir;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app);
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(250);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_keyboard_note_lifecycle() {
        let dir = tempdir().unwrap();
        let mut app = App::open(dir.path(), Config::default()).unwrap();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, InputMode::Form);
        type_str(&mut app, "Idea");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "new concept");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "second line");
        handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut app);

        assert_eq!(app.mode, InputMode::Normal);
        let note = &app.controller.notes()[0];
        assert_eq!(note.title, "Idea");
        assert_eq!(note.content, "new concept\nsecond line");
        assert_eq!(note.tags, vec!["Idea"]);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.controller.notes().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.view, RenderedView::Welcome);
    }

    #[test]
    fn test_quit_key() {
        let dir = tempdir().unwrap();
        let mut app = App::open(dir.path(), Config::default()).unwrap();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_in_search_does_not_trigger_shortcuts() {
        let dir = tempdir().unwrap();
        let mut app = App::open(dir.path(), Config::default()).unwrap();

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "quit");

        assert!(!app.should_quit);
        assert_eq!(app.controller.search_term(), "quit");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
    }
}
