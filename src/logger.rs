use std::fmt::{self, Display};
use std::io::{self, Write};
use std::panic::Location;
use std::path::Path;

use time::OffsetDateTime;

use crate::format::{self, format_line};
use crate::{CallSiteProvider, FileSink, Level, LogConfig, Result, TrackCaller};

/// A leveled logger writing to stdout and, optionally, to a rotating file.
///
/// Every accepted message is printed to the console. When a file sink is
/// attached the same line is appended to it, after a size check that may
/// rotate the file first. Logging methods never fail: I/O problems on the
/// file side detach the sink and are reported through `tracing`, and the
/// logger keeps printing to the console.
///
/// The logger is not internally synchronized. Share it across threads behind
/// a `Mutex`.
///
/// # Example
///
/// ```rust,no_run
/// use rotalog::{Level, Logger};
///
/// let mut logger = Logger::new(Level::Info);
/// logger.attach_file("/var/log/app.log", 0o644, 10 * 1024 * 1024)?;
///
/// logger.debug("suppressed");
/// logger.info("service started");
/// logger.close_file()?;
/// # Ok::<(), rotalog::Error>(())
/// ```
pub struct Logger {
    threshold: Level,
    sink: Option<FileSink>,
    console: Box<dyn Write + Send>,
    call_sites: Box<dyn CallSiteProvider + Send>,
}

impl Logger {
    /// Create a console-only logger that suppresses messages below
    /// `threshold`.
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            sink: None,
            console: Box::new(io::stdout()),
            call_sites: Box::new(TrackCaller),
        }
    }

    /// Create a logger from configuration values, attaching the file sink if
    /// one is configured.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        let threshold: Level = config.level.parse()?;
        let mut logger = Self::new(threshold);

        if let Some(file) = &config.file {
            logger.attach_file(&file.path, file.mode, file.max_size)?;
        }

        Ok(logger)
    }

    /// Replace the console writer (stdout by default).
    pub fn with_console<W>(mut self, console: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.console = Box::new(console);
        self
    }

    /// Replace the call-site provider ([`TrackCaller`] by default).
    pub fn with_call_sites<P>(mut self, provider: P) -> Self
    where
        P: CallSiteProvider + Send + 'static,
    {
        self.call_sites = Box::new(provider);
        self
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Level) {
        self.threshold = threshold;
    }

    /// Whether a message at `level` would be emitted.
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Attach a file sink, opening `path` in append mode and creating it with
    /// `mode` permission bits if it does not exist.
    ///
    /// The file is rotated before any write that finds it at or above
    /// `max_size` bytes. A previously attached sink is closed first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_size` is zero or `path` is empty
    /// - The file cannot be opened
    pub fn attach_file(&mut self, path: impl AsRef<Path>, mode: u32, max_size: u64) -> Result<()> {
        let sink = FileSink::open(path.as_ref(), mode, max_size)?;

        if let Some(previous) = self.sink.replace(sink)
            && let Err(e) = previous.close()
        {
            tracing::warn!(error = %e, "failed to close replaced log file");
        }

        Ok(())
    }

    /// Close and detach the file sink. Later messages go to the console only.
    ///
    /// The sink is detached even when flushing it to disk fails; that failure
    /// is returned.
    pub fn close_file(&mut self) -> Result<()> {
        let sink = self.sink.take().ok_or(crate::Error::NoFileAttached)?;
        sink.close()?;
        Ok(())
    }

    pub fn has_file(&self) -> bool {
        self.sink.is_some()
    }

    pub fn file_sink(&self) -> Option<&FileSink> {
        self.sink.as_ref()
    }

    #[track_caller]
    pub fn trace(&mut self, message: impl Display) {
        self.emit(Level::Trace, &message, Location::caller());
    }

    #[track_caller]
    pub fn debug(&mut self, message: impl Display) {
        self.emit(Level::Debug, &message, Location::caller());
    }

    #[track_caller]
    pub fn info(&mut self, message: impl Display) {
        self.emit(Level::Info, &message, Location::caller());
    }

    #[track_caller]
    pub fn warning(&mut self, message: impl Display) {
        self.emit(Level::Warning, &message, Location::caller());
    }

    #[track_caller]
    pub fn error(&mut self, message: impl Display) {
        self.emit(Level::Error, &message, Location::caller());
    }

    /// Emit at `Fatal`. Only logs; the process keeps running.
    #[track_caller]
    pub fn fatal(&mut self, message: impl Display) {
        self.emit(Level::Fatal, &message, Location::caller());
    }

    #[track_caller]
    pub fn log(&mut self, level: Level, message: impl Display) {
        self.emit(level, &message, Location::caller());
    }

    fn emit(&mut self, level: Level, message: &dyn Display, caller: &'static Location<'static>) {
        if !self.is_enabled(level) {
            return;
        }

        // No location, no line.
        let Some(site) = self.call_sites.resolve(caller) else {
            return;
        };

        let now = format::now();
        let line = match format_line(now, level, &site, message) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to format log line");
                return;
            }
        };

        if let Err(e) = self
            .console
            .write_all(line.as_bytes())
            .and_then(|()| self.console.flush())
        {
            tracing::warn!(error = %e, "failed to write log line to console");
        }

        self.write_to_file(now, &line);
    }

    fn write_to_file(&mut self, now: OffsetDateTime, line: &str) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        let result = sink.prepare(now).and_then(|()| sink.write_line(line));
        if let Err(e) = result {
            tracing::warn!(
                path = %sink.path().display(),
                error = %e,
                "log file unusable, detaching file sink"
            );
            self.detach();
        }
    }

    fn detach(&mut self) {
        if let Some(sink) = self.sink.take()
            && let Err(e) = sink.close()
        {
            tracing::warn!(error = %e, "failed to close detached log file");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
