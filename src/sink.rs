use std::fs::{File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::format::backup_stamp;
use crate::{Error, Result};

/// Lifecycle of the sink's handle.
#[derive(Debug)]
enum SinkState {
    /// Handle open in append mode.
    Open(File),
    /// Handle closed while the full file is moved aside. Writes are refused
    /// until a fresh handle is in place.
    Rotating,
}

/// An append-only log file that is renamed aside once it reaches a size
/// limit.
///
/// The sink exclusively owns its handle. Rotation closes the handle, renames
/// the file to `<stem>_<YYYYMMDDHHMMSS><ext>` in the same directory and
/// reopens the original path with the configured permission bits.
#[derive(Debug)]
pub struct FileSink {
    /// Path of the active log file.
    path: PathBuf,
    /// Permission bits used when the file is created.
    mode: u32,
    /// Size in bytes at which the file is rotated before the next write.
    max_size: u64,
    state: SinkState,
}

impl FileSink {
    /// Open (or create) `path` in append mode.
    pub(crate) fn open(path: &Path, mode: u32, max_size: u64) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(Error::Config("log file path is empty".to_string()));
        }
        if max_size == 0 {
            return Err(Error::Config(
                "max_size must be greater than 0".to_string(),
            ));
        }
        // Rotation needs the name as text to build the backup name.
        if path.file_name().and_then(|name| name.to_str()).is_none() {
            return Err(Error::Config(format!(
                "log file path needs a UTF-8 file name: {}",
                path.display()
            )));
        }

        let file = open_append(path, mode)?;

        Ok(Self {
            path: path.to_path_buf(),
            mode,
            max_size,
            state: SinkState::Open(file),
        })
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Permission bits applied when the file is created.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Rotation threshold in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Rotation check, run before every write.
    ///
    /// `Ok` means the handle is usable for the next write. An error means the
    /// rotation failed part way and the sink no longer holds an open file.
    pub(crate) fn prepare(&mut self, now: OffsetDateTime) -> io::Result<()> {
        let size = match &self.state {
            SinkState::Open(file) => file.metadata()?.len(),
            SinkState::Rotating => return Err(rotating_error()),
        };

        if size < self.max_size {
            return Ok(());
        }

        self.rotate(now)
    }

    /// Open -> Rotating -> Open.
    fn rotate(&mut self, now: OffsetDateTime) -> io::Result<()> {
        let backup = self.move_aside(now)?;
        self.reopen()?;

        tracing::debug!(
            path = %self.path.display(),
            backup = %backup.display(),
            "rotated log file"
        );

        Ok(())
    }

    /// Open -> Rotating: close the handle and rename the file to its backup
    /// name.
    fn move_aside(&mut self, now: OffsetDateTime) -> io::Result<PathBuf> {
        // Dropping the old state closes the handle.
        self.state = SinkState::Rotating;

        let stamp = backup_stamp(now).map_err(io::Error::other)?;
        let backup = backup_path(&self.path, &stamp)?;
        std::fs::rename(&self.path, &backup)?;
        Ok(backup)
    }

    /// Rotating -> Open: a fresh file at the original path. On failure the
    /// sink stays in `Rotating`.
    fn reopen(&mut self) -> io::Result<()> {
        let file = open_append(&self.path, self.mode)?;
        self.state = SinkState::Open(file);
        Ok(())
    }

    /// Append one formatted line.
    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        match &mut self.state {
            SinkState::Open(file) => file.write_all(line.as_bytes()),
            SinkState::Rotating => Err(rotating_error()),
        }
    }

    /// Flush the handle to disk and close it.
    pub(crate) fn close(self) -> io::Result<()> {
        match self.state {
            SinkState::Open(file) => file.sync_all(),
            SinkState::Rotating => Ok(()),
        }
    }
}

fn rotating_error() -> io::Error {
    io::Error::other("log file has no open handle after a failed rotation")
}

fn open_append(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}

/// Name of the rotated copy of `path`, placed in the same directory.
///
/// The stamp goes right before the last `.` of the file name:
/// `app.log` becomes `app_<stamp>.log`. A name without a dot gets the stamp
/// appended: `app` becomes `app_<stamp>`.
pub(crate) fn backup_path(path: &Path, stamp: &str) -> io::Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log file path has no usable file name: {}", path.display()),
            )
        })?;

    let backup = match name.rfind('.') {
        Some(dot) => format!("{}_{}{}", &name[..dot], stamp, &name[dot..]),
        None => format!("{}_{}", name, stamp),
    };

    Ok(path.with_file_name(backup))
}
