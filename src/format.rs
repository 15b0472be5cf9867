use std::fmt::Display;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::{CallSite, Level};

/// Current wall-clock time in the local offset, falling back to UTC when the
/// local offset cannot be determined.
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Render one log line, trailing newline included:
/// `[2026-01-09 13:04:05 INFO] main.rs:12: message`
pub(crate) fn format_line(
    at: OffsetDateTime,
    level: Level,
    site: &CallSite,
    message: &dyn Display,
) -> Result<String, time::error::Format> {
    let date = at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))?;
    Ok(format!("[{} {}] {}: {}\n", date, level, site, message))
}

/// Second-resolution stamp inserted into rotated file names, e.g.
/// `20260109130405`.
pub(crate) fn backup_stamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.format(format_description!(
        "[year][month][day][hour][minute][second]"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_line() {
        let at = datetime!(2026-01-09 13:04:05 UTC);
        let site = CallSite::new("main.rs", 12);
        let line = format_line(at, Level::Info, &site, &"hello").unwrap();
        assert_eq!(line, "[2026-01-09 13:04:05 INFO] main.rs:12: hello\n");
    }

    #[test]
    fn test_format_line_pads_fields() {
        let at = datetime!(2026-03-01 00:00:09 UTC);
        let site = CallSite::new("lib.rs", 1);
        let line = format_line(at, Level::Warning, &site, &format_args!("{}-{}", 1, 2)).unwrap();
        assert_eq!(line, "[2026-03-01 00:00:09 WARNING] lib.rs:1: 1-2\n");
    }

    #[test]
    fn test_backup_stamp() {
        let at = datetime!(2026-01-09 13:04:05 UTC);
        let stamp = backup_stamp(at).unwrap();
        assert_eq!(stamp, "20260109130405");
        assert_eq!(stamp.len(), 14);
    }
}
