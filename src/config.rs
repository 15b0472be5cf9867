use serde::{Deserialize, Deserializer, Serialize, de};
use std::path::PathBuf;

/// Configuration for a [`Logger`](crate::Logger).
///
/// The types derive `serde` so a host application can embed them in its own
/// configuration; this crate never reads configuration files itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level name (e.g., "info", "warning")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// File logging configuration
    #[serde(default)]
    pub file: Option<FileLogConfig>,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }

    /// Set log level
    pub fn with_level(mut self, level: String) -> Self {
        self.level = level;
        self
    }

    /// Set file logging configuration
    pub fn with_file(mut self, file: FileLogConfig) -> Self {
        self.file = Some(file);
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_mode() -> u32 {
    0o644
}

/// Configuration for file logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLogConfig {
    /// Path to the log file
    pub path: PathBuf,
    /// Permission bits for a newly created file, as an octal string such as
    /// "0640". Integers are rejected: `644` would otherwise become `0o1204`.
    #[serde(default = "default_mode", deserialize_with = "deserialize_mode")]
    pub mode: u32,
    /// Size in bytes at which the file is rotated.
    /// Accepts a byte count or a string with units (K/M/G, case-insensitive).
    /// Examples: 4096, "512K", "10M", "1g"
    #[serde(deserialize_with = "deserialize_size")]
    pub max_size: u64,
}

impl FileLogConfig {
    /// Create a new FileLogConfig with the default mode.
    pub fn new<P: Into<PathBuf>>(path: P, max_size: u64) -> Self {
        Self {
            path: path.into(),
            mode: default_mode(),
            max_size,
        }
    }

    /// Set the permission bits for a newly created file.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }
}

/// Parse a size string with optional units (K/M/G, case-insensitive), bytes if no unit.
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let Some(last) = s.chars().last() else {
        return Err("empty size string".to_string());
    };

    let (num_str, multiplier) = if last.is_alphabetic() {
        let multiplier = match last.to_ascii_uppercase() {
            'K' => 1024,
            'M' => 1024 * 1024,
            'G' => 1024 * 1024 * 1024,
            unit => return Err(format!("invalid unit: {}, supported: K/M/G", unit)),
        };
        (&s[..s.len() - last.len_utf8()], multiplier)
    } else {
        (s, 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| "size too large".to_string())
}

/// Parse permission bits written in octal, with or without a `0o`/`0` prefix.
fn parse_mode(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let digits = s.strip_prefix("0o").unwrap_or(s);
    let mode =
        u32::from_str_radix(digits, 8).map_err(|_| format!("invalid octal mode: {}", s))?;
    check_mode(mode)
}

fn check_mode(mode: u32) -> Result<u32, String> {
    if mode > 0o7777 {
        return Err(format!("mode out of range: {:o}", mode));
    }
    Ok(mode)
}

/// Size or mode value that can be a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => parse_size(&s).map_err(de::Error::custom),
    }
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Err(de::Error::custom(format!(
            "mode must be an octal string such as \"0644\", got integer {}",
            n
        ))),
        NumberOrString::String(s) => parse_mode(&s).map_err(de::Error::custom),
    }
}
