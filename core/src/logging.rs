//! File logging bootstrap.
//!
//! The terminal belongs to the UI, so log records go to rotating files in a
//! directory chosen at startup. Initialization happens at most once per
//! process; asking again for the same directory is a no-op and asking for a
//! different one is an error.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const LOG_FILE_BASENAME: &str = "smartnotes";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Start logging at `level` into `log_dir`
pub fn init_logging<P: AsRef<Path>>(level: &str, log_dir: P) -> Result<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.as_ref().to_path_buf();

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(&log_dir)?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| Error::Logging(format!("invalid log level `{}`: {}", level, err)))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| Error::Logging(format!("failed to start logger: {}", err)))?;

        log::info!(
            "smartnotes {} logging at {} into {}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(Error::Logging(format!(
            "logging already initialized at `{}`",
            state.log_dir.display()
        )));
    }
    if state.level != level {
        return Err(Error::Logging(format!(
            "logging already initialized with level `{}`",
            state.level
        )));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(Error::Logging(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level(" INFO ").unwrap(), "info");
        assert_eq!(normalize_level("warning").unwrap(), "warn");
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn test_init_is_idempotent_and_rejects_conflicts() {
        let dir = tempdir().unwrap();
        let other = tempdir().unwrap();

        init_logging("info", dir.path()).unwrap();
        init_logging("info", dir.path()).unwrap();

        assert!(init_logging("info", other.path()).is_err());
        assert!(init_logging("debug", dir.path()).is_err());

        let state = LOGGING_STATE.get().unwrap();
        assert_eq!(state.level, "info");
        assert_eq!(state.log_dir, dir.path());
    }
}
