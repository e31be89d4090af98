use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use smartnotes_core::controller::Settings;
use smartnotes_core::models::DEFAULT_DATE_FORMAT;
use smartnotes_core::{SortMode, Theme};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keymap {
    pub quit: String,
    pub add_note: String,
    pub edit_note: String,
    pub delete_note: String,
    pub toggle_pin: String,
    pub toggle_theme: String,
    pub toggle_sort: String,
    pub export: String,
    pub search: String,
    pub help: String,
    pub submit_form: String,
    pub select_up: String,
    pub select_down: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            add_note: "a".to_string(),
            edit_note: "e".to_string(),
            delete_note: "d".to_string(),
            toggle_pin: "p".to_string(),
            toggle_theme: "t".to_string(),
            toggle_sort: "s".to_string(),
            export: "x".to_string(),
            search: "/".to_string(),
            help: "h".to_string(),
            submit_form: "ctrl-s".to_string(),
            select_up: "k".to_string(),
            select_down: "j".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    /// chrono strftime pattern for card and export dates
    pub date_format: String,
    /// Theme used until one is toggled and stored
    pub default_theme: Theme,
    pub default_sort: SortMode,
    /// Where exports are written; the data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            default_theme: Theme::Light,
            default_sort: SortMode::Newest,
            export_dir: None,
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            date_format: self.date_format.clone(),
            default_theme: self.default_theme,
            default_sort: self.default_sort,
        }
    }

    /// Export directory; relative paths are taken from `data_dir`
    pub fn export_dir(&self, data_dir: &Path) -> PathBuf {
        match &self.export_dir {
            Some(dir) => data_dir.join(dir),
            None => data_dir.to_path_buf(),
        }
    }
}

/// Read `path`, writing the defaults there first if it does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string(&config)?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Parse a binding such as `"q"`, `"ctrl-s"`, `"alt-enter"` or `"esc"`
pub fn parse_binding(binding: &str) -> Option<(KeyCode, KeyModifiers)> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = binding.trim();
    loop {
        if let Some(r) = rest.strip_prefix("ctrl-") {
            modifiers |= KeyModifiers::CONTROL;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("alt-") {
            modifiers |= KeyModifiers::ALT;
            rest = r;
        } else {
            break;
        }
    }

    let code = match rest {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some((code, modifiers))
}

/// Whether `key` triggers `binding`. Shift is ignored so `"?"` matches however
/// the terminal reports it.
pub fn key_matches(binding: &str, key: &KeyEvent) -> bool {
    let Some((code, modifiers)) = parse_binding(binding) else {
        return false;
    };
    let pressed = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
    let code_matches = match (code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) if modifiers.contains(KeyModifiers::CONTROL) => {
            a.eq_ignore_ascii_case(&b)
        }
        (a, b) => a == b,
    };
    code_matches && pressed == modifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_written_on_first_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = load_config(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.keymap.quit, "q");
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_theme = \"dark\"\n[keymap]\nquit = \"ctrl-q\"\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.keymap.quit, "ctrl-q");
        assert_eq!(config.keymap.add_note, "a");
        assert_eq!(config.default_sort, SortMode::Newest);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_theme = 3").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_export_dir_resolves_against_data_dir() {
        let data_dir = Path::new("/srv/notes");
        let mut config = Config::default();
        assert_eq!(config.export_dir(data_dir), PathBuf::from("/srv/notes"));

        config.export_dir = Some(PathBuf::from("exports"));
        assert_eq!(config.export_dir(data_dir), PathBuf::from("/srv/notes/exports"));

        config.export_dir = Some(PathBuf::from("/tmp/out"));
        assert_eq!(config.export_dir(data_dir), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(parse_binding("q"), Some((KeyCode::Char('q'), KeyModifiers::NONE)));
        assert_eq!(parse_binding("ctrl-s"), Some((KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert_eq!(parse_binding("alt-enter"), Some((KeyCode::Enter, KeyModifiers::ALT)));
        assert_eq!(parse_binding("nonsense"), None);
    }

    #[test]
    fn test_key_matches() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let plain_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);

        assert!(key_matches("ctrl-s", &ctrl_s));
        assert!(!key_matches("ctrl-s", &plain_s));
        assert!(key_matches("s", &plain_s));
        assert!(!key_matches("s", &ctrl_s));
        assert!(key_matches("?", &shifted));
    }
}
