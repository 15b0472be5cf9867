use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Severity of a log message.
///
/// Levels are totally ordered: `Trace < Debug < Info < Warning < Error < Fatal`.
/// A logger suppresses every message whose level is below its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Name printed in the bracketed prefix of each line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Level::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| {
                Error::InvalidLevel(format!(
                    "{} (expected {}..={})",
                    value,
                    Level::Trace as u8,
                    Level::Fatal as u8
                ))
            })
    }
}

/// Parses level names case-insensitively; `warn` is accepted for `Warning`.
impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_strictly_ordered() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_level_names() {
        let names: Vec<&str> = Level::ALL.iter().map(Level::as_str).collect();
        assert_eq!(
            names,
            ["TRACE", "DEBUG", "INFO", "WARNING", "ERROR", "FATAL"]
        );
        assert_eq!(Level::Warning.to_string(), "WARNING");
    }

    #[test]
    fn test_level_try_from_index() {
        assert_eq!(Level::try_from(0).unwrap(), Level::Trace);
        assert_eq!(Level::try_from(5).unwrap(), Level::Fatal);
        assert!(matches!(Level::try_from(6), Err(Error::InvalidLevel(_))));
        assert!(matches!(Level::try_from(255), Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" warn ".parse::<Level>().unwrap(), Level::Warning);
        assert!(matches!(
            "verbose".parse::<Level>(),
            Err(Error::InvalidLevel(name)) if name == "verbose"
        ));
    }

    #[test]
    fn test_default_level_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }
}
