mod mood;
mod note;
mod theme;

pub use mood::Mood;
pub use note::{Note, NoteId};
pub use theme::Theme;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::{Error, Result};

/// Date format used for cards and text exports unless configured otherwise
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Convert a Unix timestamp in milliseconds to local time
pub fn millis_to_datetime(millis: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Current wall-clock time in milliseconds since the epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a millisecond timestamp as a local date.
///
/// `date_format` must already have passed [`validate_date_format`]; chrono
/// panics while displaying an invalid format string.
pub fn format_timestamp(millis: i64, date_format: &str) -> String {
    millis_to_datetime(millis).format(date_format).to_string()
}

/// Reject strftime strings chrono cannot render
pub fn validate_date_format(date_format: &str) -> Result<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidInput(format!(
            "Invalid date format: {}",
            date_format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format(DEFAULT_DATE_FORMAT).is_ok());
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%Q").is_err());
    }

    #[test]
    fn test_format_timestamp_uses_format() {
        let millis = 1_700_000_000_000;
        let expected = millis_to_datetime(millis).format("%Y").to_string();
        assert_eq!(format_timestamp(millis, "%Y"), expected);
        assert_eq!(expected.len(), 4);
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in milliseconds
        assert!(now_millis() > 1_577_836_800_000);
    }
}
