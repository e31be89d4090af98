//! Export formats and the file emission seam.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::models::Note;
use crate::{Error, Result};

pub const JSON_FILENAME: &str = "smartnotes_backup.json";
pub const TEXT_FILENAME: &str = "smartnotes_export.txt";
pub const JSON_MIME: &str = "application/json";
pub const TEXT_MIME: &str = "text/plain";

/// Line placed between note blocks in the text export
pub const TEXT_DIVIDER: &str = "====================\n";

/// Writes a named file somewhere the user can pick it up
pub trait FileEmitter {
    /// Emit `contents` as `filename`, returning where it ended up
    fn emit(&mut self, filename: &str, contents: &str, mime: &str) -> Result<PathBuf>;
}

/// Emits files into a fixed directory
#[derive(Debug, Clone)]
pub struct DirectoryEmitter {
    dir: PathBuf,
}

impl DirectoryEmitter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileEmitter for DirectoryEmitter {
    fn emit(&mut self, filename: &str, contents: &str, mime: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, contents)?;
        log::info!("wrote {} ({}, {} bytes)", path.display(), mime, contents.len());
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
}

impl ExportFormat {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => JSON_FILENAME,
            ExportFormat::Text => TEXT_FILENAME,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Json => JSON_MIME,
            ExportFormat::Text => TEXT_MIME,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Text => f.write_str("txt"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Accepts `json` or `txt`, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "txt" => Ok(ExportFormat::Text),
            other => Err(Error::InvalidInput(format!("Unknown export format: {}", other))),
        }
    }
}

/// Plain-text export: one block per note, blocks joined by [`TEXT_DIVIDER`]
pub fn text_export(notes: &[Note], date_format: &str) -> String {
    notes
        .iter()
        .map(|note| {
            format!(
                "--- Note: {} ---\nDate: {}\nTags: {}\nMood: {}\n\n{}\n\n",
                note.title,
                note.created_display(date_format),
                note.tags_joined(),
                note.mood,
                note.content
            )
        })
        .collect::<Vec<_>>()
        .join(TEXT_DIVIDER)
}
