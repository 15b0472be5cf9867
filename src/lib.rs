//! # Rotalog
//!
//! A small leveled logger with optional file persistence and size-triggered
//! rotation.
//!
//! ## Features
//!
//! - Six ordered levels, `TRACE` through `FATAL`, with threshold filtering
//! - Every line carries a local timestamp, the level and the caller's
//!   `file:line`
//! - Console output on stdout, always
//! - Optional append-only log file, renamed to `<stem>_<YYYYMMDDHHMMSS><ext>`
//!   once it reaches a size limit
//!
//! ## Example
//!
//! ```rust
//! use rotalog::{Level, Logger};
//!
//! let mut logger = Logger::new(Level::Info);
//! logger.debug("not printed");
//! logger.info("printed as `[YYYY-MM-DD HH:MM:SS INFO] lib.rs:9: printed ...`");
//! ```

pub mod builder;
pub mod callsite;
pub mod config;
pub mod diagnostics;
pub mod error;
mod format;
pub mod level;
pub mod logger;
pub mod sink;

pub use builder::LoggerBuilder;
pub use callsite::{CallSite, CallSiteProvider, TrackCaller};
pub use config::{FileLogConfig, LogConfig};
pub use diagnostics::init_diagnostics;
pub use error::{Error, Result};
pub use level::Level;
pub use logger::Logger;
pub use sink::FileSink;

/// Start building a [`Logger`].
pub fn builder() -> LoggerBuilder {
    LoggerBuilder::new()
}
