use thiserror::Error as ThisError;

/// Errors returned by the configuration surface of the logger.
///
/// Emission calls (`info`, `warning`, ...) never return these; only
/// construction, attaching and closing a file sink can fail.
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Level name or index outside TRACE..FATAL.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    /// `close_file` was called without an attached sink.
    #[error("No log file attached")]
    NoFileAttached,
    /// Diagnostics initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
