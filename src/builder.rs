//! Builder pattern for constructing a [`Logger`].
//!
//! # Example
//!
//! ```rust,no_run
//! let mut logger = rotalog::builder()
//!     .with_level("debug")
//!     .with_file("/var/log/app.log", 1024 * 1024)
//!     .with_mode(0o640)
//!     .build()
//!     .expect("Failed to create logger");
//!
//! logger.debug("ready");
//! ```

use crate::{FileLogConfig, LogConfig, Logger, Result};
use std::path::PathBuf;

/// A builder for configuring and constructing a [`Logger`].
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LogConfig,
}

impl LoggerBuilder {
    /// Create a new LoggerBuilder with default configuration.
    pub fn new() -> Self {
        Self {
            config: LogConfig::new(),
        }
    }

    /// Create a LoggerBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self { config }
    }

    /// Set the minimum level (e.g., "trace", "debug", "info", "warning", "error", "fatal").
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config = self.config.with_level(level.into());
        self
    }

    /// Log to a file as well, rotating it at `max_size` bytes.
    pub fn with_file(mut self, path: impl Into<PathBuf>, max_size: u64) -> Self {
        let file_config = FileLogConfig::new(path, max_size);
        self.config = self.config.with_file(file_config);
        self
    }

    /// Configure file logging with a custom FileLogConfig.
    pub fn with_file_config(mut self, file_config: FileLogConfig) -> Self {
        self.config = self.config.with_file(file_config);
        self
    }

    /// Set the permission bits of the log file.
    ///
    /// Has no effect unless a file is configured.
    pub fn with_mode(mut self, mode: u32) -> Self {
        if let Some(ref mut file) = self.config.file {
            file.mode = mode;
        }
        self
    }

    /// Get the current configuration without building.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Build the logger, opening the log file if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The level name is unknown
    /// - The file size limit is zero
    /// - The log file cannot be opened
    pub fn build(self) -> Result<Logger> {
        Logger::from_config(&self.config)
    }
}
